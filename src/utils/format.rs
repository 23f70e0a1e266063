use chrono::{Local, TimeZone};

use crate::models::address::Address;

/// Shortens an address for display, e.g. `0x1234...7890`.
pub fn truncate_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Two-letter avatar initials taken from the first hex digits of the address.
pub fn avatar_initials(address: &Address) -> String {
    address.to_string()[2..4].to_uppercase()
}

/// Local date followed by hours and minutes. Falls back to the raw value when
/// the timestamp is outside chrono's range.
pub fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> Address {
        "0xab34567890123456789012345678901234567890".parse().unwrap()
    }

    #[test]
    fn test_truncate_address() {
        assert_eq!(truncate_address(&addr()), "0xab34...7890");
    }

    #[test]
    fn test_avatar_initials() {
        assert_eq!(avatar_initials(&addr()), "AB");
    }

    #[test]
    fn test_format_timestamp_shape() {
        let formatted = format_timestamp(1_700_000_000_000);
        // "YYYY-MM-DD HH:MM" regardless of the local zone
        assert_eq!(formatted.len(), 16);
        assert!(formatted.starts_with("2023-11-1"));
    }
}
