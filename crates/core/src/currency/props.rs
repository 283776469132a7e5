//! Property-based tests for amount conversion.
//!
//! - Round-trip law: minor -> major -> minor is the identity
//! - Zero-decimal identity
//! - Multiplier consistency
//! - Comparison correctness
//! - Formatting and parsing agree

use proptest::prelude::*;
use rust_decimal::Decimal;

use centime_shared::CurrencyCode;

use super::format::plain_format;
use super::metadata::MAX_DECIMALS;
use super::units;

/// Strategy over every supported precision.
fn decimal_places() -> impl Strategy<Value = u32> {
    0u32..=MAX_DECIMALS
}

/// Strategy over the full non-negative minor-unit range.
fn minor_amount() -> impl Strategy<Value = i64> {
    0i64..=i64::MAX
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// *For any* non-negative minor amount and precision, converting to major
    /// units and back SHALL return the original amount.
    #[test]
    fn prop_round_trip(minor in minor_amount(), decimals in decimal_places()) {
        let major = units::to_major(minor, decimals);
        prop_assert_eq!(units::to_minor(major, decimals), Ok(minor));
    }

    /// Negative amounts (refunds) round-trip as well.
    #[test]
    fn prop_round_trip_negative(minor in i64::MIN..0i64, decimals in decimal_places()) {
        let major = units::to_major(minor, decimals);
        prop_assert_eq!(units::to_minor(major, decimals), Ok(minor));
    }

    /// *For any* amount, a zero-decimal currency's major value equals its
    /// minor value.
    #[test]
    fn prop_zero_decimal_identity(minor in any::<i64>()) {
        prop_assert_eq!(units::to_major(minor, 0), Decimal::from(minor));
    }

    /// The multiplier is exactly `10^decimals` and scales one major unit to
    /// minor units.
    #[test]
    fn prop_multiplier_consistency(decimals in decimal_places()) {
        let multiplier = units::multiplier(decimals);
        prop_assert_eq!(multiplier, 10_i64.pow(decimals));
        prop_assert_eq!(units::to_minor(Decimal::ONE, decimals), Ok(multiplier));
        prop_assert_eq!(units::to_major(multiplier, decimals), Decimal::ONE);
    }

    /// `compare` agrees with integer ordering.
    #[test]
    fn prop_compare_matches_ordering(a in any::<i64>(), b in any::<i64>()) {
        let expected: i8 = if a < b { -1 } else if a == b { 0 } else { 1 };
        prop_assert_eq!(units::compare(a, b) as i8, expected);
    }

    /// The plain fallback rendering parses back to the same minor amount.
    #[test]
    fn prop_plain_format_parses_back(minor in 0i64..1_000_000_000_000, decimals in 0u32..=4) {
        let code = CurrencyCode::new("XTS");
        let text = plain_format(units::to_major(minor, decimals), &code, decimals);
        let major = units::parse_major(&text).unwrap();
        prop_assert_eq!(units::to_minor(major, decimals), Ok(minor));
    }

    /// Rounding never moves a value by more than half a minor unit.
    #[test]
    fn prop_rounding_is_nearest(
        mantissa in -1_000_000_000_000i64..1_000_000_000_000,
        extra_scale in 0u32..6,
        decimals in 0u32..=4,
    ) {
        let major = Decimal::new(mantissa, decimals + extra_scale);
        let minor = units::to_minor(major, decimals).unwrap();
        let back = units::to_major(minor, decimals);
        let half = Decimal::new(5, decimals + 1);
        prop_assert!((back - major).abs() <= half);
    }

    /// Validity is decided by sign and, for precision 0, integrality.
    #[test]
    fn prop_valid_minor_amounts(minor in minor_amount(), decimals in decimal_places()) {
        prop_assert!(units::is_valid(Decimal::from(minor), decimals));
        prop_assert!(units::is_valid(units::to_major(minor, decimals), decimals));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_round_trip_boundaries() {
        for decimals in 0..=MAX_DECIMALS {
            for minor in [0, 1, 9, 10, 99, 100, i64::MAX - 1, i64::MAX] {
                assert_eq!(
                    units::to_minor(units::to_major(minor, decimals), decimals),
                    Ok(minor)
                );
            }
        }
    }
}
