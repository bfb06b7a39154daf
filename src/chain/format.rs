// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! Balance formatting helpers.
//!
//! Two renderings exist side by side: [`format_units`] is the exact
//! decimal-trimmed form used for wallet and fee balances, and
//! [`format_compact`] is the fixed-threshold K/M/B form the migration
//! dashboard shows for large token quantities.

use alloy::primitives::U256;

/// Format a base-unit amount with the given decimals, trimming trailing
/// zeros and capping at 6 fractional digits.
pub fn format_units(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, &trimmed[..trimmed.len().min(6)])
        }
    }
}

/// Scale a base-unit amount down by its decimals into a display value.
///
/// Compact formatting shows two significant decimals at most, so f64
/// precision is sufficient here; exact rendering goes through
/// [`format_units`] instead.
pub fn units_to_display(amount: U256, decimals: u8) -> f64 {
    let value: f64 = amount.to_string().parse().unwrap_or(f64::MAX);
    value / 10f64.powi(decimals as i32)
}

/// Compact human rendering with fixed thresholds:
/// ≥1e9 → `B`, ≥1e6 → `M`, ≥1e3 → `K`, else two decimals.
pub fn format_compact(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{value:.2}")
    }
}

/// [`format_compact`] applied to a base-unit amount.
pub fn format_compact_units(amount: U256, decimals: u8) -> String {
    format_compact(units_to_display(amount, decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_boundaries() {
        assert_eq!(format_compact(999.0), "999.00");
        assert_eq!(format_compact(1_000.0), "1.00K");
        assert_eq!(format_compact(1_000_000.0), "1.00M");
        assert_eq!(format_compact(1_000_000_000.0), "1.00B");
    }

    #[test]
    fn compact_intermediate_values() {
        assert_eq!(format_compact(0.0), "0.00");
        assert_eq!(format_compact(1_500.0), "1.50K");
        assert_eq!(format_compact(2_340_000.0), "2.34M");
        assert_eq!(format_compact(12_700_000_000.0), "12.70B");
    }

    #[test]
    fn compact_units_scales_by_decimals() {
        // 1,000 tokens at 18 decimals
        let amount = U256::from(10u64).pow(U256::from(21u64));
        assert_eq!(format_compact_units(amount, 18), "1.00K");
    }

    #[test]
    fn exact_units_trims_zeros() {
        let one = U256::from(1_000_000_000_000_000_000u64);
        assert_eq!(format_units(one, 18), "1");

        let one_and_half = U256::from(1_500_000_000_000_000_000u64);
        assert_eq!(format_units(one_and_half, 18), "1.5");

        assert_eq!(format_units(U256::ZERO, 18), "0");
    }

    #[test]
    fn exact_units_caps_fraction_at_six_digits() {
        let complex = U256::from(1_234_567_890_000_000_000u64);
        assert_eq!(format_units(complex, 18), "1.234567");
    }

    #[test]
    fn exact_units_usdc() {
        // 1.5 USDC at 6 decimals
        assert_eq!(format_units(U256::from(1_500_000u64), 6), "1.5");
    }
}
