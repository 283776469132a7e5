//! Built-in precision table.
//!
//! Used when the metadata source cannot be reached, and as the second tier
//! for codes the source does not know. Only currencies whose precision
//! differs from [`DEFAULT_DECIMALS`] are listed.

use centime_shared::CurrencyCode;

use super::metadata::PrecisionMap;

/// Precision assumed for any code found in neither the source nor this table.
pub const DEFAULT_DECIMALS: u32 = 2;

/// Currencies without a minor unit.
const ZERO_DECIMAL: &[&str] = &[
    "BIF", "CLP", "DJF", "GNF", "ISK", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "UYI", "VND",
    "VUV", "XAF", "XOF", "XPF",
];

/// Currencies subdivided into thousandths.
const THREE_DECIMAL: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Accounting units with four decimal places.
const FOUR_DECIMAL: &[&str] = &["CLF", "UYW"];

/// Looks a canonical code up in the static table.
#[must_use]
pub fn static_decimals(code: &CurrencyCode) -> Option<u32> {
    let code = code.as_str();
    if ZERO_DECIMAL.contains(&code) {
        Some(0)
    } else if THREE_DECIMAL.contains(&code) {
        Some(3)
    } else if FOUR_DECIMAL.contains(&code) {
        Some(4)
    } else {
        None
    }
}

/// Builds the whole static table as a precision map.
#[must_use]
pub fn static_map() -> PrecisionMap {
    ZERO_DECIMAL
        .iter()
        .map(|code| (CurrencyCode::new(code), 0))
        .chain(THREE_DECIMAL.iter().map(|code| (CurrencyCode::new(code), 3)))
        .chain(FOUR_DECIMAL.iter().map(|code| (CurrencyCode::new(code), 4)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("JPY", Some(0))]
    #[case("KRW", Some(0))]
    #[case("VND", Some(0))]
    #[case("UGX", Some(0))]
    #[case("RWF", Some(0))]
    #[case("BHD", Some(3))]
    #[case("JOD", Some(3))]
    #[case("KWD", Some(3))]
    #[case("OMR", Some(3))]
    #[case("TND", Some(3))]
    #[case("CLF", Some(4))]
    #[case("USD", None)]
    #[case("XYZ", None)]
    fn test_static_decimals(#[case] code: &str, #[case] expected: Option<u32>) {
        assert_eq!(static_decimals(&CurrencyCode::new(code)), expected);
    }

    #[test]
    fn test_static_lookup_is_case_insensitive_through_code() {
        assert_eq!(static_decimals(&CurrencyCode::new("jpy")), Some(0));
    }

    #[test]
    fn test_static_map_matches_lookup() {
        let map = static_map();
        assert_eq!(
            map.len(),
            ZERO_DECIMAL.len() + THREE_DECIMAL.len() + FOUR_DECIMAL.len()
        );
        for (code, decimals) in map.iter() {
            assert_eq!(static_decimals(code), Some(decimals));
        }
    }
}
