//! Robustness tests for edge cases and error conditions.
//!
//! These tests verify that the library rejects bad input instead of
//! panicking and copes with large inputs.

use aggregate_prefixes::aggregator::{aggregate, aggregate_prefixes, count_addresses};
use aggregate_prefixes::parser::{parse_prefix, parse_prefixes};
use aggregate_prefixes::{AggregateError, Prefix};

/// Test prefix parsing edge cases
#[test]
fn test_prefix_parsing_edge_cases() {
    // Valid edge cases
    assert!(parse_prefix("0.0.0.0/0").is_ok());
    assert!(parse_prefix("0.0.0.0/32").is_ok());
    assert!(parse_prefix("255.255.255.255").is_ok());
    assert!(parse_prefix("::/0").is_ok());
    assert!(parse_prefix("::/128").is_ok());
    assert!(parse_prefix("::ffff:192.0.2.1/128").is_ok());

    // Invalid cases - should fail gracefully
    for bad in [
        "",
        " ",
        "192.168.1.1/33",
        "192.168.1.1/-1",
        "192.168.1.1/",
        "/24",
        "1.2.3.4.5",
        "1.2.3",
        "hello",
        "::/129",
        "2001:db8::g/32",
        "10.0.0.0/8 extra",
        "10.0.0.0-10.0.0.255",
        "10.0.0.*",
        "١٠.0.0.0/8",
    ] {
        assert!(
            matches!(parse_prefix(bad), Err(AggregateError::MalformedPrefix { .. })),
            "expected {:?} to be rejected",
            bad
        );
    }
}

/// A bad token anywhere aborts the whole run
#[test]
fn test_no_partial_results() {
    let result = aggregate(["10.0.0.0/25", "10.0.0.128/25", "junk"], 128, false);
    assert_eq!(
        result,
        Err(AggregateError::MalformedPrefix {
            token: "junk".to_string(),
            reason: "not a valid IPv4 address".to_string(),
        })
    );
}

/// Test large input handling
#[test]
fn test_large_input_handling() {
    // Every /24 of 10.0.0.0/8, listed as two /25 halves
    let tokens: Vec<String> = (0..65_536u32)
        .flat_map(|i| {
            let (b, c) = (i / 256, i % 256);
            [format!("10.{}.{}.0/25", b, c), format!("10.{}.{}.128/25", b, c)]
        })
        .collect();

    let result = aggregate(&tokens, 128, false).unwrap();
    assert_eq!(result, vec!["10.0.0.0/8"]);
}

/// Test large host route input
#[test]
fn test_large_sparse_input() {
    // Every other host in 192.168.0.0/16: nothing merges
    let tokens: Vec<String> = (0..32_768u32)
        .map(|i| {
            let host = i * 2;
            format!("192.168.{}.{}", host / 256, host % 256)
        })
        .collect();

    let prefixes = parse_prefixes(&tokens).unwrap();
    let aggregation = aggregate_prefixes(prefixes, 128, false).unwrap();
    assert_eq!(aggregation.prefixes.len(), 32_768);
    assert_eq!(count_addresses(&aggregation.prefixes), 32_768);
}

/// Deep IPv6 merge chains terminate
#[test]
fn test_deep_ipv6_merge_chain() {
    // ::/128 plus the sibling halves at every level up to /1 cover all of ::/0
    let mut prefixes: Vec<Prefix> = vec!["::/128".parse().unwrap()];
    for len in 1..=128u32 {
        let addr = 1u128 << (128 - len);
        let token = format!("{}/{}", std::net::Ipv6Addr::from(addr), len);
        prefixes.push(token.parse().unwrap());
    }

    let aggregation = aggregate_prefixes(prefixes, 128, true).unwrap();
    let rendered: Vec<String> = aggregation.prefixes.iter().map(|p| p.to_string()).collect();
    assert_eq!(rendered, vec!["::/0"]);
    // Every input prefix and every intermediate parent but the last was merged
    assert_eq!(aggregation.optimisations.len(), 2 * 128);
}

/// Aggregation can run concurrently on independent inputs
#[test]
fn test_concurrent_runs() {
    let handles: Vec<_> = (0..8u32)
        .map(|n| {
            std::thread::spawn(move || {
                let tokens = [format!("10.{}.0.0/17", n), format!("10.{}.128.0/17", n)];
                aggregate(&tokens, 128, false).unwrap()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), vec![format!("10.{}.0.0/16", n)]);
    }
}
