//! Minor/major unit arithmetic.
//!
//! Pure functions parameterized by a precision (decimal places). Major-unit
//! values are `Decimal`, so `to_minor(to_major(x, d), d) == x` holds for every
//! `i64` and every precision up to [`MAX_DECIMALS`].
//!
//! Rounding is half away from zero: `10.125 USD -> 1013`, `2.5 JPY -> 3`,
//! `-0.005 USD -> -1`.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::AmountError;
use super::metadata::MAX_DECIMALS;

/// An amount as handed in by a caller: already numeric, or user text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountInput {
    /// A numeric major-unit value.
    Number(Decimal),
    /// A display or user-entered string.
    Text(String),
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

fn clamp(decimals: u32) -> u32 {
    decimals.min(MAX_DECIMALS)
}

/// Returns `10^decimals`.
#[must_use]
pub fn multiplier(decimals: u32) -> i64 {
    10_i64.pow(clamp(decimals))
}

/// Converts minor units to a major-unit value.
///
/// Zero-decimal currencies get the minor amount back unchanged.
#[must_use]
pub fn to_major(minor: i64, decimals: u32) -> Decimal {
    match clamp(decimals) {
        0 => Decimal::from(minor),
        scale => Decimal::new(minor, scale),
    }
}

/// Converts a major-unit value to minor units, rounding half away from zero.
pub fn to_minor(major: Decimal, decimals: u32) -> Result<i64, AmountError> {
    let decimals = clamp(decimals);
    let rounded = major.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let shift = decimals.saturating_sub(rounded.scale());

    10_i128
        .checked_pow(shift)
        .and_then(|factor| rounded.mantissa().checked_mul(factor))
        .and_then(|minor| i64::try_from(minor).ok())
        .ok_or_else(|| AmountError::OutOfRange(major.to_string()))
}

/// Drops every character except ASCII digits, `.` and `-`.
///
/// Tolerates currency symbols, thousands separators and whitespace. Locales
/// that use `,` as the decimal separator are NOT supported: `"1.234,56"`
/// becomes `"1.23456"`.
#[must_use]
pub fn strip_display_value(display: &str) -> String {
    display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Longest leading `-?digits(.digits)?` run with at least one digit,
/// normalized so `Decimal` accepts it (`".5"` -> `"0.5"`, `"5."` -> `"5"`).
fn leading_number(stripped: &str) -> Option<String> {
    let (negative, rest) = match stripped.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, stripped),
    };

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let (int_part, after) = rest.split_at(int_len);
    let frac_part = after.strip_prefix('.').map_or("", |frac| {
        let frac_len = frac.bytes().take_while(u8::is_ascii_digit).count();
        &frac[..frac_len]
    });

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut number = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        number.push('-');
    }
    number.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        number.push('.');
        number.push_str(frac_part);
    }
    Some(number)
}

/// Best-effort parse of a display string into a major-unit value.
///
/// After stripping, the leading numeric run is used and the rest ignored, so
/// `"1.2.3"` reads as `1.2` and `"12-3"` as `12`. Callers that need strict
/// input must validate before parsing.
pub fn parse_major(display: &str) -> Result<Decimal, AmountError> {
    let stripped = strip_display_value(display);
    let number =
        leading_number(&stripped).ok_or_else(|| AmountError::Unparseable(display.to_string()))?;
    Decimal::from_str(&number).map_err(|_| AmountError::OutOfRange(display.to_string()))
}

/// Strict numeric reading of an amount, without any stripping.
#[must_use]
pub fn numeric_value(input: &AmountInput) -> Option<Decimal> {
    match input {
        AmountInput::Number(value) => Some(*value),
        AmountInput::Text(text) => Decimal::from_str(text.trim()).ok(),
    }
}

/// Validity predicate: non-negative, and integral for zero-decimal currencies.
#[must_use]
pub fn is_valid(amount: Decimal, decimals: u32) -> bool {
    amount >= Decimal::ZERO && (decimals > 0 || amount.fract().is_zero())
}

/// Three-way comparison of two minor-unit amounts.
#[must_use]
pub fn compare(a: i64, b: i64) -> Ordering {
    a.cmp(&b)
}
