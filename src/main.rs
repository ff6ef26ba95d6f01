//! aggregate-prefixes - Aggregates IPv4 or IPv6 prefixes from file or STDIN
//!
//! Reads a list of unsorted prefixes and writes the sorted aggregates to STDOUT.

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufWriter, IsTerminal, Write};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use aggregate_prefixes::aggregator::{aggregate_prefixes, count_addresses};
use aggregate_prefixes::cli::Cli;
use aggregate_prefixes::config::Config;
use aggregate_prefixes::utils::{format_address_count, format_count};
use aggregate_prefixes::{input, order, parser, Family, Prefix};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_overrides(cli.max_length, cli.verbose);
    config.validate()?;

    // Setup logging based on verbosity
    let log_level = if config.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(&cli, &config)
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let tokens = input::read_source(&cli.prefixes)?;
    let prefixes = parser::parse_prefixes(&tokens)?;
    debug!("Parsed {} distinct prefixes", prefixes.len());

    let input_count = prefixes.len();
    let aggregation = aggregate_prefixes(prefixes, config.max_length, config.verbose)?;

    for optimisation in &aggregation.optimisations {
        info!("{}", optimisation);
    }
    info!(
        "Aggregated {} prefixes into {}",
        format_count(input_count),
        format_count(aggregation.prefixes.len())
    );
    for family in [Family::Ipv4, Family::Ipv6] {
        let nets: Vec<Prefix> = aggregation
            .prefixes
            .iter()
            .filter(|p| p.family() == family)
            .copied()
            .collect();
        if !nets.is_empty() {
            info!(
                "{} aggregates cover {} addresses",
                family,
                format_address_count(count_addresses(&nets))
            );
        }
    }

    let mut out = BufWriter::new(io::stdout().lock());
    for line in order::render(&aggregation.prefixes) {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    Ok(())
}
