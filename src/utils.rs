//! Common utility functions used across modules.
//!
//! - [`format_count`] - Format counts with K/M suffix (1.5K, 2.3M)
//! - [`format_address_count`] - Format address counts, including IPv6-sized ones

/// Format a count with K/M suffix for compact display.
///
/// # Examples
/// ```
/// use aggregate_prefixes::utils::format_count;
/// assert_eq!(format_count(500), "500");
/// assert_eq!(format_count(1500), "1.5K");
/// assert_eq!(format_count(1_500_000), "1.5M");
/// ```
pub fn format_count(count: usize) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Format a number of addresses.
///
/// Counts up to the size of the IPv4 space use [`format_count`]; larger
/// ones are shown as a power of two, which is how IPv6 blocks are sized.
/// `u128::MAX` is the saturated count of `::/0`.
///
/// # Examples
/// ```
/// use aggregate_prefixes::utils::format_address_count;
/// assert_eq!(format_address_count(256), "256");
/// assert_eq!(format_address_count(1u128 << 96), "2^96");
/// assert_eq!(format_address_count(3u128 << 96), "~2^97");
/// ```
pub fn format_address_count(count: u128) -> String {
    if count == u128::MAX {
        return "2^128".to_string();
    }
    match usize::try_from(count) {
        Ok(small) if count <= 1u128 << 32 => format_count(small),
        _ if count.is_power_of_two() => format!("2^{}", count.trailing_zeros()),
        _ => format!("~2^{}", 127 - count.leading_zeros()),
    }
}
