//! Display formatting for amounts.
//!
//! Locale-aware rendering sits behind [`LocaleFormatter`]. Whatever happens
//! there, [`plain_format`] is the deterministic last resort:
//! `"USD 12.34"`, `"JPY 1234"`, `"BHD 1.500"`.

use std::collections::HashMap;

use centime_shared::CurrencyCode;
use rust_decimal::{Decimal, RoundingStrategy};
use unic_langid::LanguageIdentifier;

use super::error::FormatError;

/// Locale-aware currency formatting facility.
#[cfg_attr(test, mockall::automock)]
pub trait LocaleFormatter: Send + Sync {
    /// Renders a major-unit amount with exactly `decimals` fraction digits.
    fn format_currency(
        &self,
        major: Decimal,
        currency: &CurrencyCode,
        decimals: u32,
        locale: &str,
    ) -> Result<String, FormatError>;
}

/// Fixes an amount to exactly `decimals` fraction digits.
fn fixed(major: Decimal, decimals: u32) -> Decimal {
    let mut value = major.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(decimals);
    value
}

/// Plain fallback rendering: uppercase code, a space, the fixed amount.
#[must_use]
pub fn plain_format(major: Decimal, currency: &CurrencyCode, decimals: u32) -> String {
    format!("{currency} {}", fixed(major, decimals))
}

/// Separator and symbol placement rules for a group of locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumberConvention {
    group: &'static str,
    decimal: char,
    symbol_after: bool,
    spaced: bool,
}

const SYMBOL_FIRST: NumberConvention = NumberConvention {
    group: ",",
    decimal: '.',
    symbol_after: false,
    spaced: false,
};

const SYMBOL_FIRST_SPACED_COMMA: NumberConvention = NumberConvention {
    group: ".",
    decimal: ',',
    symbol_after: false,
    spaced: true,
};

const DOT_GROUPED: NumberConvention = NumberConvention {
    group: ".",
    decimal: ',',
    symbol_after: true,
    spaced: true,
};

const SPACE_GROUPED: NumberConvention = NumberConvention {
    group: " ",
    decimal: ',',
    symbol_after: true,
    spaced: true,
};

const SWISS: NumberConvention = NumberConvention {
    group: "'",
    decimal: '.',
    symbol_after: false,
    spaced: true,
};

fn convention_for(locale: &LanguageIdentifier) -> Option<NumberConvention> {
    let region = locale.region.as_ref().map(|region| region.as_str());
    match (locale.language.as_str(), region) {
        ("de" | "fr" | "it", Some("CH")) => Some(SWISS),
        ("pt", Some("BR")) | ("nl", _) => Some(SYMBOL_FIRST_SPACED_COMMA),
        ("en" | "ja" | "zh" | "ko" | "th" | "he" | "ms" | "fil", _) => Some(SYMBOL_FIRST),
        ("de" | "es" | "it" | "pt" | "id" | "tr" | "da" | "el" | "vi", _) => Some(DOT_GROUPED),
        ("fr" | "ru" | "pl" | "cs" | "sv" | "nb" | "fi" | "uk", _) => Some(SPACE_GROUPED),
        _ => None,
    }
}

/// Inserts `separator` between groups of three digits.
fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

const BUILT_IN_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "¥"),
    ("KRW", "₩"),
    ("INR", "₹"),
    ("VND", "₫"),
    ("IDR", "Rp"),
    ("SGD", "S$"),
    ("AUD", "A$"),
    ("CAD", "C$"),
    ("NZD", "NZ$"),
    ("HKD", "HK$"),
    ("BRL", "R$"),
    ("MXN", "MX$"),
    ("PHP", "₱"),
    ("THB", "฿"),
    ("RUB", "₽"),
    ("TRY", "₺"),
    ("CHF", "CHF"),
];

/// Built-in [`LocaleFormatter`] driven by a small table of number conventions.
///
/// Codes without a registered symbol are rendered with the code itself.
#[derive(Debug, Clone)]
pub struct ConventionFormatter {
    symbols: HashMap<CurrencyCode, String>,
}

impl ConventionFormatter {
    /// Creates a formatter with the built-in symbol table.
    #[must_use]
    pub fn new() -> Self {
        let symbols = BUILT_IN_SYMBOLS
            .iter()
            .map(|(code, symbol)| (CurrencyCode::new(code), (*symbol).to_string()))
            .collect();
        Self { symbols }
    }

    /// Registers or replaces the symbol for a currency.
    #[must_use]
    pub fn with_symbol(mut self, currency: &str, symbol: impl Into<String>) -> Self {
        self.symbols.insert(CurrencyCode::new(currency), symbol.into());
        self
    }

    fn symbol_for<'a>(&'a self, currency: &'a CurrencyCode) -> &'a str {
        self.symbols
            .get(currency)
            .map_or(currency.as_str(), String::as_str)
    }
}

impl Default for ConventionFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LocaleFormatter for ConventionFormatter {
    fn format_currency(
        &self,
        major: Decimal,
        currency: &CurrencyCode,
        decimals: u32,
        locale: &str,
    ) -> Result<String, FormatError> {
        let tag: LanguageIdentifier = locale
            .parse()
            .map_err(|_| FormatError::InvalidLocale(locale.to_string()))?;
        let convention =
            convention_for(&tag).ok_or_else(|| FormatError::UnsupportedLocale(locale.to_string()))?;

        let value = fixed(major, decimals);
        let sign = if value.is_sign_negative() && !value.is_zero() {
            "-"
        } else {
            ""
        };

        let digits = value.abs().to_string();
        let number = match digits.split_once('.') {
            Some((int_part, frac_part)) => format!(
                "{}{}{frac_part}",
                group_digits(int_part, convention.group),
                convention.decimal
            ),
            None => group_digits(&digits, convention.group),
        };

        let symbol = self.symbol_for(currency);
        let gap = if convention.spaced || symbol == currency.as_str() {
            " "
        } else {
            ""
        };

        Ok(if convention.symbol_after {
            format!("{sign}{number}{gap}{symbol}")
        } else {
            format!("{sign}{symbol}{gap}{number}")
        })
    }
}
