//! CIDR aggregation engine.
//!
//! Reduces a set of prefixes to the smallest set covering exactly the same
//! addresses:
//!
//! 1. prefixes longer than the length cap are discarded,
//! 2. prefixes contained in a broader prefix of the set are dropped,
//! 3. sibling pairs are merged into their parent until none remain,
//! 4. containment is checked once more on the merged set.
//!
//! IPv4 and IPv6 are processed independently. For example
//! `[10.0.0.0/25, 10.0.0.128/25]` becomes `[10.0.0.0/24]`.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use tracing::info;

use crate::error::{AggregateError, Result};
use crate::order;
use crate::parser::parse_prefixes;
use crate::prefix::{AddressBits, Cidr, Prefix};

/// Default length cap: the IPv6 width, so nothing is discarded.
pub const DEFAULT_MAX_LENGTH: i64 = 128;

/// Rule that removed a prefix from the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Longer than the configured maximum length.
    LengthFilter { max_length: u8 },
    /// Contained in a broader prefix.
    Subsumed { by: Prefix },
    /// Merged with its sibling into the parent prefix.
    Merged { sibling: Prefix, into: Prefix },
}

/// One entry of the verbose report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Optimisation {
    pub removed: Prefix,
    pub rule: Rule,
}

impl fmt::Display for Optimisation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            Rule::LengthFilter { max_length } => {
                write!(f, "{} discarded: longer than /{}", self.removed, max_length)
            }
            Rule::Subsumed { by } => write!(f, "{} removed: covered by {}", self.removed, by),
            Rule::Merged { sibling, into } => {
                write!(f, "{} merged with {} into {}", self.removed, sibling, into)
            }
        }
    }
}

/// Result of an aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Aggregated prefixes, IPv4 first, then by address and length.
    pub prefixes: Vec<Prefix>,
    /// Removal report; empty unless verbose reporting was requested.
    pub optimisations: Vec<Optimisation>,
}

struct Report {
    entries: Option<Vec<Optimisation>>,
}

impl Report {
    fn new(enabled: bool) -> Self {
        Self {
            entries: enabled.then(Vec::new),
        }
    }

    fn record(&mut self, removed: Prefix, rule: Rule) {
        if let Some(entries) = self.entries.as_mut() {
            entries.push(Optimisation { removed, rule });
        }
    }

    fn into_entries(self) -> Vec<Optimisation> {
        self.entries.unwrap_or_default()
    }
}

/// Check a maximum prefix length and narrow it to `u8`.
///
/// Lengths above 32 are accepted for IPv4 input and simply never filter.
///
/// # Examples
/// ```
/// use aggregate_prefixes::aggregator::validate_max_length;
/// assert_eq!(validate_max_length(24).unwrap(), 24);
/// assert!(validate_max_length(-1).is_err());
/// assert!(validate_max_length(129).is_err());
/// ```
pub fn validate_max_length(max_length: i64) -> Result<u8> {
    u8::try_from(max_length)
        .ok()
        .filter(|len| *len <= u128::WIDTH)
        .ok_or(AggregateError::InvalidMaxLength { max_length })
}

/// Aggregate textual prefixes into sorted canonical `address/length` strings.
///
/// When `verbose` is set, every optimisation is emitted as an `info` event.
///
/// # Examples
/// ```
/// use aggregate_prefixes::aggregator::aggregate;
/// let result = aggregate(["10.0.0.0/25", "10.0.0.128/25"], 128, false).unwrap();
/// assert_eq!(result, vec!["10.0.0.0/24"]);
/// ```
pub fn aggregate<I, S>(tokens: I, max_length: i64, verbose: bool) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    validate_max_length(max_length)?;
    let prefixes = parse_prefixes(tokens)?;
    let aggregation = aggregate_prefixes(prefixes, max_length, verbose)?;
    for optimisation in &aggregation.optimisations {
        info!("{}", optimisation);
    }
    Ok(order::render(&aggregation.prefixes))
}

/// Aggregate typed prefixes.
///
/// Duplicates in the input are ignored. The returned prefixes are ordered
/// as described in [`order`].
pub fn aggregate_prefixes<I>(prefixes: I, max_length: i64, verbose: bool) -> Result<Aggregation>
where
    I: IntoIterator<Item = Prefix>,
{
    let max_length = validate_max_length(max_length)?;
    let prefixes: BTreeSet<Prefix> = prefixes.into_iter().collect();
    let mut report = Report::new(verbose);

    let mut v4 = BTreeSet::new();
    let mut v6 = BTreeSet::new();
    for prefix in prefixes {
        if prefix.len() > max_length {
            report.record(prefix, Rule::LengthFilter { max_length });
            continue;
        }
        match prefix {
            Prefix::V4(cidr) => {
                v4.insert(cidr);
            }
            Prefix::V6(cidr) => {
                v6.insert(cidr);
            }
        }
    }

    let mut aggregated = aggregate_family(v4, &mut report, Prefix::V4);
    aggregated.extend(aggregate_family(v6, &mut report, Prefix::V6));
    order::sort_prefixes(&mut aggregated);

    Ok(Aggregation {
        prefixes: aggregated,
        optimisations: report.into_entries(),
    })
}

fn aggregate_family<A: AddressBits>(
    set: BTreeSet<Cidr<A>>,
    report: &mut Report,
    wrap: fn(Cidr<A>) -> Prefix,
) -> Vec<Prefix> {
    let set = remove_subsumed(set, report, wrap);
    let set = merge_siblings(set, report, wrap);
    let set = remove_subsumed(set, report, wrap);
    set.into_iter().map(wrap).collect()
}

/// Drop every prefix contained in another prefix of the set.
///
/// In address-then-length order a covering prefix comes before everything
/// it contains, and prefixes that survive are disjoint, so comparing against
/// the last kept prefix is enough.
fn remove_subsumed<A: AddressBits>(
    set: BTreeSet<Cidr<A>>,
    report: &mut Report,
    wrap: fn(Cidr<A>) -> Prefix,
) -> BTreeSet<Cidr<A>> {
    let mut kept = BTreeSet::new();
    let mut cover: Option<Cidr<A>> = None;

    for cidr in set {
        match cover {
            Some(by) if by.contains(&cidr) => {
                report.record(wrap(cidr), Rule::Subsumed { by: wrap(by) });
            }
            _ => {
                kept.insert(cidr);
                cover = Some(cidr);
            }
        }
    }

    kept
}

/// Merge sibling pairs into their parent until no pair is left.
///
/// Every prefix starts out as a candidate; each new parent becomes a
/// candidate in turn. Each merge removes one element, so the loop performs
/// at most `set.len()` merges.
fn merge_siblings<A: AddressBits>(
    mut set: BTreeSet<Cidr<A>>,
    report: &mut Report,
    wrap: fn(Cidr<A>) -> Prefix,
) -> BTreeSet<Cidr<A>> {
    let mut pending: VecDeque<Cidr<A>> = set.iter().copied().collect();

    while let Some(cidr) = pending.pop_front() {
        if !set.contains(&cidr) {
            continue;
        }
        let (Some(sibling), Some(parent)) = (cidr.sibling(), cidr.parent()) else {
            continue;
        };
        if !set.remove(&sibling) {
            continue;
        }
        set.remove(&cidr);

        let (low, high) = if cidr < sibling {
            (cidr, sibling)
        } else {
            (sibling, cidr)
        };
        let into = wrap(parent);
        report.record(
            wrap(low),
            Rule::Merged {
                sibling: wrap(high),
                into,
            },
        );
        report.record(
            wrap(high),
            Rule::Merged {
                sibling: wrap(low),
                into,
            },
        );

        set.insert(parent);
        pending.push_back(parent);
    }

    set
}

/// Total number of addresses covered by a list of prefixes.
///
/// Saturates at `u128::MAX` (reached by `::/0`).
pub fn count_addresses(prefixes: &[Prefix]) -> u128 {
    prefixes
        .iter()
        .map(Prefix::address_count)
        .fold(0u128, |acc, count| acc.saturating_add(count))
}
