//! Exact-decimal parsing and display formatting for financial amounts.
//!
//! Every rounding step uses half-away-from-zero so that the same input always
//! renders the same way regardless of where it came from.

use crate::value_objects::numeric_input::NumericInput;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

mod subscript;

pub use subscript::{subscript_digits, SUBSCRIPT_TABLE};

pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;
pub const DISPLAY_DECIMALS: u32 = 2;
pub const PRICE_SIGNIFICANT_DIGITS: u32 = 4;
/// Fewer leading fractional zeros than this are printed as-is.
pub const COMPRESS_MIN_ZEROS: usize = 4;
pub const DEFAULT_PERCENT_DECIMALS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("hex value has no digits: {0:?}")]
    EmptyHex(String),
    #[error("invalid hex value: {0:?}")]
    InvalidHex(String),
    #[error("invalid decimal value: {0:?}")]
    InvalidDecimal(String),
    #[error("number is not finite: {0}")]
    NonFinite(String),
    #[error("value out of exact decimal range: {0:?}")]
    OutOfRange(String),
}

/// What to do when a tiny value has more leading zeros than the subscript table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptOverflow {
    #[default]
    Extend,
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatOptions {
    /// Render values `>= 1000` with thousands separators instead of K/M/B/T.
    pub grouped: bool,
    pub subscript_overflow: SubscriptOverflow,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumericFormatter {
    options: FormatOptions,
}

impl NumericFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn format(&self, input: &NumericInput) -> Result<String, ParseError> {
        let value = parse_exact(input)?;
        Ok(self.format_decimal(value))
    }

    pub fn format_decimal(&self, value: Decimal) -> String {
        to_number_format(value, &self.options)
    }

    /// Formats an already validated `f64` (equity, pnl) for display.
    pub fn format_f64(&self, value: f64) -> Result<String, ParseError> {
        self.format(&NumericInput::Number(value))
    }
}

/// Formats with default options (suffix buckets, extended subscripts).
pub fn format(input: &NumericInput) -> Result<String, ParseError> {
    NumericFormatter::default().format(input)
}

pub fn parse_exact(input: &NumericInput) -> Result<Decimal, ParseError> {
    match input {
        NumericInput::Number(value) => parse_number(*value),
        NumericInput::Decimal(raw) => parse_decimal_str(raw),
        NumericInput::Hex(raw) => parse_hex_str(raw),
    }
}

fn parse_number(value: f64) -> Result<Decimal, ParseError> {
    if !value.is_finite() {
        return Err(ParseError::NonFinite(value.to_string()));
    }
    // `Display` for f64 is the shortest round-trip text and never uses an exponent.
    let text = value.to_string();
    let parsed = Decimal::from_str(&text)
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .ok_or_else(|| ParseError::OutOfRange(text.clone()))?;
    if parsed.is_zero() && value != 0.0 {
        return Err(ParseError::OutOfRange(text));
    }
    Ok(parsed)
}

fn parse_decimal_str(raw: &str) -> Result<Decimal, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let parsed = if trimmed.contains(['e', 'E']) {
        Decimal::from_scientific(trimmed)
    } else {
        Decimal::from_str(trimmed)
    };
    match parsed {
        // Below 1e-28 the value rounds to zero.
        Ok(value) if value.is_zero() && has_nonzero_digit(trimmed) => {
            Err(ParseError::OutOfRange(trimmed.to_string()))
        }
        Ok(value) => Ok(value),
        Err(_) if is_decimal_literal(trimmed) => Err(ParseError::OutOfRange(trimmed.to_string())),
        Err(_) => Err(ParseError::InvalidDecimal(trimmed.to_string())),
    }
}

fn mantissa(text: &str) -> &str {
    text.split(['e', 'E']).next().unwrap_or(text)
}

fn has_nonzero_digit(text: &str) -> bool {
    mantissa(text).chars().any(|c| matches!(c, '1'..='9'))
}

/// `[+-]digits[.digits][e[+-]digits]`, with `_` allowed between digits.
fn is_decimal_literal(text: &str) -> bool {
    let digits = |part: &str| part.chars().all(|c| c.is_ascii_digit() || c == '_');
    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (text, None),
    };

    let unsigned = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let mantissa_ok = !(int_part.is_empty() && frac_part.is_empty())
        && digits(int_part)
        && digits(frac_part);
    let exponent_ok = exponent.map_or(true, |e| {
        let e = e.strip_prefix(['+', '-']).unwrap_or(e);
        !e.is_empty() && digits(e)
    });
    mantissa_ok && exponent_ok
}

fn parse_hex_str(raw: &str) -> Result<Decimal, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(ParseError::EmptyHex(trimmed.to_string()));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidHex(trimmed.to_string()));
    }
    let value = u128::from_str_radix(digits, 16)
        .map_err(|_| ParseError::OutOfRange(trimmed.to_string()))?;
    Decimal::from_u128(value).ok_or_else(|| ParseError::OutOfRange(trimmed.to_string()))
}

fn suffix_buckets() -> [(Decimal, &'static str); 4] {
    [
        (Decimal::from(1_000_000_000_000u64), "T"),
        (Decimal::from(1_000_000_000u64), "B"),
        (Decimal::from(1_000_000u64), "M"),
        (Decimal::ONE_THOUSAND, "K"),
    ]
}

fn round_display(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(DISPLAY_DECIMALS, ROUNDING)
        .normalize()
}

/// Magnitude formatting: `K`/`M`/`B`/`T` suffixes above a thousand, subscript
/// compression below one, 2 dp in between.
pub fn to_number_format(value: Decimal, options: &FormatOptions) -> String {
    if value.is_zero() {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if options.grouped && magnitude >= Decimal::ONE_THOUSAND {
        return group_thousands(round_display(value));
    }
    for (threshold, suffix) in suffix_buckets() {
        if magnitude >= threshold {
            return format!("{}{}", round_display(value / threshold), suffix);
        }
    }
    if magnitude < Decimal::ONE {
        return price_format(value, options.subscript_overflow);
    }
    round_display(value).to_string()
}

fn group_thousands(value: Decimal) -> String {
    let text = value.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if value.is_sign_negative() {
        grouped.push('-');
    }
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Sub-one formatting: 4 significant digits, with a run of 4+ leading
/// fractional zeros collapsed into a subscript count (`0.0000123` -> `0.0₄123`).
pub fn price_format(value: Decimal, overflow: SubscriptOverflow) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    let magnitude = value.abs();
    let rounded = magnitude
        .round_sf_with_strategy(PRICE_SIGNIFICANT_DIGITS, ROUNDING)
        .unwrap_or(magnitude)
        .normalize();
    let text = rounded.to_string();

    let Some(first_nonzero) = text.find(|c: char| c != '0' && c != '.') else {
        return "0".to_string();
    };
    let leading_zeros = first_nonzero.saturating_sub(2);
    if !text.starts_with("0.") || leading_zeros < COMPRESS_MIN_ZEROS {
        return format!("{sign}{text}");
    }

    let significant = &text[first_nonzero..];
    match overflow {
        SubscriptOverflow::Exponential if leading_zeros >= SUBSCRIPT_TABLE.len() => {
            format!("{sign}{}", exponential(significant, leading_zeros))
        }
        _ => format!("{sign}0.0{}{significant}", subscript_digits(leading_zeros)),
    }
}

fn exponential(significant: &str, leading_zeros: usize) -> String {
    let (head, tail) = significant.split_at(1);
    let exponent = leading_zeros + 1;
    if tail.is_empty() {
        format!("{head}e-{exponent}")
    } else {
        format!("{head}.{tail}e-{exponent}")
    }
}

/// `value * 100` fixed to `decimals` places; zero renders as `"0"`.
pub fn to_percent(value: Decimal, decimals: u32) -> Result<String, ParseError> {
    if value.is_zero() {
        return Ok("0".to_string());
    }
    let scaled = value
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| ParseError::OutOfRange(value.to_string()))?;
    let mut scaled = scaled.round_dp_with_strategy(decimals, ROUNDING);
    scaled.rescale(decimals);
    Ok(scaled.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(input: impl Into<NumericInput>) -> String {
        format(&input.into()).expect("formats")
    }

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).expect("decimal literal")
    }

    #[test]
    fn zero_in_every_representation() {
        assert_eq!(fmt(0.0), "0");
        assert_eq!(fmt("0"), "0");
        assert_eq!(fmt("0x0"), "0");
        assert_eq!(fmt(""), "0");
        assert_eq!(fmt(-0.0), "0");
    }

    #[test]
    fn suffix_thresholds_are_exact() {
        assert_eq!(fmt(999u64), "999");
        assert_eq!(fmt(1_000u64), "1K");
        assert_eq!(fmt(1_000_000u64), "1M");
        assert_eq!(fmt(1_000_000_000u64), "1B");
        assert_eq!(fmt(1_000_000_000_000u64), "1T");
    }

    #[test]
    fn suffixed_values_round_to_two_places() {
        assert_eq!(fmt(1500u64), "1.5K");
        assert_eq!(fmt("1234.5678"), "1.23K");
        assert_eq!(fmt(2_505_000u64), "2.51M");
        assert_eq!(fmt(-1500i64), "-1.5K");
    }

    #[test]
    fn mid_range_rounds_half_away_from_zero() {
        assert_eq!(fmt("12.345"), "12.35");
        assert_eq!(fmt("-12.345"), "-12.35");
        assert_eq!(fmt("12.5"), "12.5");
        assert_eq!(fmt(1.0), "1");
    }

    #[test]
    fn grouped_mode_uses_thousands_separators() {
        let formatter = NumericFormatter::new(FormatOptions {
            grouped: true,
            ..FormatOptions::default()
        });
        assert_eq!(
            formatter
                .format(&NumericInput::from("1234567.891"))
                .expect("formats"),
            "1,234,567.89"
        );
        assert_eq!(formatter.format_decimal(dec("1000")), "1,000");
        assert_eq!(formatter.format_decimal(dec("-98765.4")), "-98,765.4");
        assert_eq!(formatter.format_decimal(dec("999.5")), "999.5");
    }

    #[test]
    fn sub_one_values_keep_four_significant_digits() {
        assert_eq!(fmt(0.5), "0.5");
        assert_eq!(fmt("0.123456"), "0.1235");
        assert_eq!(fmt("0.000123"), "0.000123");
    }

    #[test]
    fn long_zero_runs_collapse_into_subscript() {
        assert_eq!(fmt(0.0000123), "0.0₄123");
        assert_eq!(fmt("0.00000000123456"), "0.0₈1235");
        assert_eq!(fmt("-0.0000123"), "-0.0₄123");
    }

    #[test]
    fn compression_is_shorter_than_naive_expansion() {
        let compressed = fmt(0.0000123);
        assert!(compressed.chars().count() < "0.0000123".chars().count());
    }

    #[test]
    fn zero_runs_past_the_table_follow_overflow_policy() {
        let raw = format!("0.{}123", "0".repeat(20));
        let value = dec(&raw);
        assert_eq!(price_format(value, SubscriptOverflow::Extend), "0.0₂₀123");
        assert_eq!(
            price_format(value, SubscriptOverflow::Exponential),
            "1.23e-21"
        );
        // Inside the table the policy makes no difference.
        assert_eq!(
            price_format(dec("0.0000123"), SubscriptOverflow::Exponential),
            "0.0₄123"
        );
    }

    #[test]
    fn hex_inputs_parse_through_integer_arithmetic() {
        assert_eq!(fmt("0xff"), "255");
        assert_eq!(fmt("0x3e8"), "1K");
        assert_eq!(fmt("abc"), "2.75K");
        assert_eq!(
            parse_exact(&NumericInput::Hex("de0b6b3a7640000".to_string())).expect("hex"),
            dec("1000000000000000000")
        );
    }

    #[test]
    fn malformed_inputs_fail_instead_of_coercing_to_zero() {
        assert_eq!(
            format(&NumericInput::from("0x")),
            Err(ParseError::EmptyHex("0x".to_string()))
        );
        assert_eq!(
            format(&NumericInput::Hex("0xzz".to_string())),
            Err(ParseError::InvalidHex("0xzz".to_string()))
        );
        assert_eq!(
            format(&NumericInput::from("12abc!")),
            Err(ParseError::InvalidDecimal("12abc!".to_string()))
        );
        assert!(matches!(
            format(&NumericInput::Number(f64::NAN)),
            Err(ParseError::NonFinite(_))
        ));
    }

    #[test]
    fn hex_beyond_decimal_range_is_rejected() {
        let too_wide = format!("0x{}", "f".repeat(40));
        assert!(matches!(
            format(&NumericInput::from(too_wide.as_str())),
            Err(ParseError::OutOfRange(_))
        ));
        let past_decimal_max = format!("0x1{}", "0".repeat(25));
        assert!(matches!(
            format(&NumericInput::from(past_decimal_max.as_str())),
            Err(ParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn scientific_decimal_strings_are_accepted() {
        assert_eq!(
            parse_exact(&NumericInput::Decimal("1.5e3".to_string())).expect("sci"),
            dec("1500")
        );
    }

    #[test]
    fn decimal_strings_keep_eighteen_significant_digits() {
        let raw = "123456789.123456789";
        assert_eq!(
            parse_exact(&NumericInput::from(raw)).expect("parses").to_string(),
            raw
        );
    }

    #[test]
    fn percent_helper_fixes_decimal_places() {
        let pct = |raw: &str, decimals| to_percent(dec(raw), decimals).expect("percent");
        assert_eq!(pct("0.1234", DEFAULT_PERCENT_DECIMALS), "12.34");
        assert_eq!(pct("0.5", 2), "50.00");
        assert_eq!(pct("0.123456", 3), "12.346");
        assert_eq!(pct("-0.015", 1), "-1.5");
        assert_eq!(pct("0", 2), "0");
    }

    #[test]
    fn percent_of_huge_values_reports_overflow() {
        assert!(matches!(
            to_percent(Decimal::MAX, 2),
            Err(ParseError::OutOfRange(_))
        ));
        let max_hex = parse_exact(&NumericInput::from("0xffffffffffffffffffffffff")).expect("hex");
        assert_eq!(max_hex, Decimal::MAX);
        assert!(to_percent(max_hex, DEFAULT_PERCENT_DECIMALS).is_err());
        assert!(to_percent(Decimal::MIN, 0).is_err());
    }

    #[test]
    fn values_below_decimal_precision_are_not_shown_as_zero() {
        assert!(matches!(
            format(&NumericInput::Number(1e-30)),
            Err(ParseError::OutOfRange(_))
        ));
        assert!(matches!(
            format(&NumericInput::Number(-3.5e-40)),
            Err(ParseError::OutOfRange(_))
        ));
        let thirty_zeros = format!("0.{}123", "0".repeat(30));
        assert!(matches!(
            format(&NumericInput::from(thirty_zeros.as_str())),
            Err(ParseError::OutOfRange(_))
        ));
        assert!(matches!(
            format(&NumericInput::Decimal("1e-30".to_string())),
            Err(ParseError::OutOfRange(_))
        ));
        // Zero spelled with many digits is still zero.
        let long_zero = format!("0.{}", "0".repeat(40));
        assert_eq!(fmt(long_zero.as_str()), "0");
    }

    #[test]
    fn decimal_range_failures_differ_from_malformed_text() {
        let too_many_digits = "1".repeat(40);
        assert!(matches!(
            format(&NumericInput::from(too_many_digits.as_str())),
            Err(ParseError::OutOfRange(_))
        ));
        assert!(matches!(
            format(&NumericInput::Decimal("-9e40".to_string())),
            Err(ParseError::OutOfRange(_))
        ));
        for malformed in ["1.2.3", "--1", "1e", "1e+", "12,5"] {
            assert_eq!(
                format(&NumericInput::Decimal(malformed.to_string())),
                Err(ParseError::InvalidDecimal(malformed.to_string())),
                "{malformed}"
            );
        }
    }
}
