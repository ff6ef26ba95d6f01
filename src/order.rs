//! Result ordering and rendering.
//!
//! Prefixes sort IPv4 before IPv6, then by network address as an unsigned
//! integer, then by length. No two distinct prefixes compare equal.

use crate::prefix::Prefix;

/// Sort prefixes in output order.
pub fn sort_prefixes(prefixes: &mut [Prefix]) {
    prefixes.sort();
}

/// Render prefixes as canonical `address/length` strings, keeping their order.
pub fn render(prefixes: &[Prefix]) -> Vec<String> {
    prefixes.iter().map(Prefix::to_string).collect()
}

/// Sort a copy of `prefixes` and render it.
///
/// # Examples
/// ```
/// use aggregate_prefixes::order::ordered;
/// use aggregate_prefixes::Prefix;
/// let prefixes: Vec<Prefix> = ["::/0", "10.0.0.0/8", "9.0.0.0/8"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// assert_eq!(ordered(&prefixes), vec!["9.0.0.0/8", "10.0.0.0/8", "::/0"]);
/// ```
pub fn ordered(prefixes: &[Prefix]) -> Vec<String> {
    let mut sorted = prefixes.to_vec();
    sort_prefixes(&mut sorted);
    render(&sorted)
}
