//! Prefix parsing and normalization.
//!
//! Turns textual prefixes such as `10.0.0.5/24`, `2001:db8::/32` or a bare
//! `192.0.2.1` into canonical [`Prefix`] values. Host bits are masked off and
//! a bare address becomes a host route (/32 or /128).

use std::collections::BTreeSet;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::error::{AggregateError, Result};
use crate::prefix::{AddressBits, Cidr, Family, Prefix};

/// Parse a single prefix.
///
/// The family is chosen by syntax: anything containing ':' is IPv6.
///
/// # Examples
/// ```
/// use aggregate_prefixes::parser::parse_prefix;
/// assert_eq!(parse_prefix("10.0.0.5/24").unwrap().to_string(), "10.0.0.0/24");
/// assert_eq!(parse_prefix("2001:db8::1").unwrap().to_string(), "2001:db8::1/128");
/// assert!(parse_prefix("10.0.0.0/33").is_err());
/// assert!(parse_prefix("invalid").is_err());
/// ```
pub fn parse_prefix(token: &str) -> Result<Prefix> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AggregateError::malformed(token, "empty prefix"));
    }

    let (addr_part, len_part) = match token.split_once('/') {
        Some((addr, len)) => (addr, Some(len)),
        None => (token, None),
    };

    if token.contains(':') {
        let addr: Ipv6Addr = addr_part
            .parse()
            .map_err(|_| AggregateError::malformed(token, "not a valid IPv6 address"))?;
        build(token, u128::from(addr), len_part, Family::Ipv6).map(Prefix::V6)
    } else {
        let addr: Ipv4Addr = addr_part
            .parse()
            .map_err(|_| AggregateError::malformed(token, "not a valid IPv4 address"))?;
        build(token, u32::from(addr), len_part, Family::Ipv4).map(Prefix::V4)
    }
}

/// Parse a batch of prefixes into a deduplicated set.
///
/// Stops at the first malformed token.
///
/// # Examples
/// ```
/// use aggregate_prefixes::parser::parse_prefixes;
/// let set = parse_prefixes(["10.0.0.1/24", "10.0.0.0/24"]).unwrap();
/// assert_eq!(set.len(), 1);
/// assert!(parse_prefixes(["10.0.0.0/24", "bogus"]).is_err());
/// ```
pub fn parse_prefixes<I, S>(tokens: I) -> Result<BTreeSet<Prefix>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| parse_prefix(token.as_ref()))
        .collect()
}

fn build<A: AddressBits>(
    token: &str,
    addr: A,
    len_part: Option<&str>,
    family: Family,
) -> Result<Cidr<A>> {
    let len = parse_length(token, len_part, family)?;
    Cidr::new(addr, len).ok_or_else(|| out_of_range(token, family))
}

fn parse_length(token: &str, len_part: Option<&str>, family: Family) -> Result<u8> {
    let Some(len_part) = len_part else {
        return Ok(family.width());
    };

    if len_part.is_empty() {
        return Err(AggregateError::malformed(token, "missing prefix length"));
    }

    // Rejects signs and whitespace that u32::from_str would otherwise allow
    if !len_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AggregateError::malformed(
            token,
            format!("prefix length '{}' is not a number", len_part),
        ));
    }

    len_part
        .parse::<u32>()
        .ok()
        .filter(|len| *len <= u32::from(family.width()))
        .and_then(|len| u8::try_from(len).ok())
        .ok_or_else(|| out_of_range(token, family))
}

fn out_of_range(token: &str, family: Family) -> AggregateError {
    AggregateError::malformed(
        token,
        format!(
            "prefix length out of range for {} (0-{})",
            family,
            family.width()
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(token: &str) -> String {
        match parse_prefix(token) {
            Err(AggregateError::MalformedPrefix { reason, .. }) => reason,
            other => panic!("expected malformed prefix for {:?}, got {:?}", token, other),
        }
    }

    #[test]
    fn test_parse_ipv4() {
        let prefix = parse_prefix("192.168.0.0/16").unwrap();
        assert_eq!(prefix.family(), Family::Ipv4);
        assert_eq!(prefix.len(), 16);
        assert_eq!(prefix.to_string(), "192.168.0.0/16");
    }

    #[test]
    fn test_parse_ipv6() {
        let prefix = parse_prefix("2001:DB8:0:0::/48").unwrap();
        assert_eq!(prefix.family(), Family::Ipv6);
        assert_eq!(prefix.to_string(), "2001:db8::/48");
    }

    #[test]
    fn test_bare_address_is_host_route() {
        assert_eq!(parse_prefix("10.1.2.3").unwrap().to_string(), "10.1.2.3/32");
        assert_eq!(parse_prefix("::1").unwrap().to_string(), "::1/128");
    }

    #[test]
    fn test_host_bits_are_masked() {
        assert_eq!(
            parse_prefix("10.0.0.5/24").unwrap().to_string(),
            "10.0.0.0/24"
        );
        assert_eq!(
            parse_prefix("2001:db8::1/32").unwrap().to_string(),
            "2001:db8::/32"
        );
        assert_eq!(parse_prefix("255.255.255.255/0").unwrap().to_string(), "0.0.0.0/0");
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(
            parse_prefix("  10.0.0.0/8\t").unwrap().to_string(),
            "10.0.0.0/8"
        );
    }

    #[test]
    fn test_boundary_lengths() {
        assert!(parse_prefix("0.0.0.0/0").is_ok());
        assert!(parse_prefix("1.2.3.4/32").is_ok());
        assert!(parse_prefix("::/0").is_ok());
        assert!(parse_prefix("::1/128").is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(reason(""), "empty prefix");
        assert_eq!(reason("   "), "empty prefix");
    }

    #[test]
    fn test_rejects_bad_address() {
        assert_eq!(reason("256.0.0.0/8"), "not a valid IPv4 address");
        assert_eq!(reason("1.2.3/24"), "not a valid IPv4 address");
        assert_eq!(reason("hello"), "not a valid IPv4 address");
        assert_eq!(reason("/24"), "not a valid IPv4 address");
        assert_eq!(reason("2001:db8:::/32"), "not a valid IPv6 address");
        assert_eq!(reason("10.0.0.0-10.0.0.255"), "not a valid IPv4 address");
    }

    #[test]
    fn test_rejects_bad_length() {
        assert_eq!(reason("10.0.0.0/"), "missing prefix length");
        assert_eq!(reason("10.0.0.0/-1"), "prefix length '-1' is not a number");
        assert_eq!(reason("10.0.0.0/+8"), "prefix length '+8' is not a number");
        assert_eq!(reason("10.0.0.0/24/8"), "prefix length '24/8' is not a number");
        assert_eq!(
            reason("10.0.0.0/33"),
            "prefix length out of range for IPv4 (0-32)"
        );
        assert_eq!(
            reason("::/129"),
            "prefix length out of range for IPv6 (0-128)"
        );
        assert_eq!(
            reason("10.0.0.0/99999999999999"),
            "prefix length out of range for IPv4 (0-32)"
        );
    }

    #[test]
    fn test_error_reports_token() {
        let err = parse_prefix("10.0.0.0/40").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid prefix '10.0.0.0/40': prefix length out of range for IPv4 (0-32)"
        );
    }

    #[test]
    fn test_parse_prefixes_deduplicates() {
        let set = parse_prefixes(["10.0.0.0/24", "10.0.0.77/24", "10.0.0.0/24"]).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_parse_prefixes_fails_on_any_bad_token() {
        let err = parse_prefixes(vec!["10.0.0.0/24".to_string(), "nope".to_string()]).unwrap_err();
        assert!(matches!(err, AggregateError::MalformedPrefix { ref token, .. } if token == "nope"));
    }

    #[test]
    fn test_parse_prefixes_empty() {
        let tokens: Vec<&str> = vec![];
        assert!(parse_prefixes(tokens).unwrap().is_empty());
    }
}
