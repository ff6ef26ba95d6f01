//! # aggregate-prefixes - CIDR Prefix Aggregation
//!
//! Aggregates an unsorted list of IPv4 or IPv6 prefixes into the smallest
//! set of prefixes covering exactly the same addresses. Useful to compress
//! router prefix lists, ACLs and route tables without changing what they
//! match.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     aggregate-prefixes                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap) + Config (serde_yaml) + Input (file / STDIN)    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Parser                                                     │
//! │    └── text → canonical Prefix (host bits masked)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Aggregator                                                 │
//! │    ├── length filter                                        │
//! │    ├── subsumption removal                                  │
//! │    └── sibling merge to fixed point (per family)            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Order                                                      │
//! │    └── IPv4 before IPv6, numeric address, then length       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use aggregate_prefixes::aggregate;
//!
//! let aggregates = aggregate(
//!     ["10.0.0.0/25", "10.0.0.128/25", "10.0.1.7/32", "2001:db8::/33", "2001:db8:8000::/33"],
//!     128,
//!     false,
//! )?;
//! assert_eq!(aggregates, vec!["10.0.0.0/24", "10.0.1.7/32", "2001:db8::/32"]);
//! # Ok::<(), aggregate_prefixes::AggregateError>(())
//! ```
//!
//! ## Modules
//!
//! - [`aggregator`] - Length filter, subsumption removal and sibling merging
//! - [`cli`] - Command-line interface definitions
//! - [`config`] - Configuration parsing and validation
//! - [`error`] - Error types
//! - [`input`] - Reading prefix lists from files or STDIN
//! - [`order`] - Result ordering and rendering
//! - [`parser`] - Prefix parsing and normalization
//! - [`prefix`] - Typed prefixes backed by fixed-width integers
//! - [`utils`] - Formatting helpers

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod order;
pub mod parser;
pub mod prefix;
pub mod utils;

pub use aggregator::{aggregate, aggregate_prefixes, Aggregation, Optimisation, Rule};
pub use cli::Cli;
pub use config::Config;
pub use error::AggregateError;
pub use prefix::{Cidr, Family, Prefix};
