use serde::Serialize;
use std::str::FromStr;
use tracing::debug;
use vantage_domain::services::numeric::{parse_exact, to_percent, NumericFormatter, ParseError};
use vantage_domain::value_objects::numeric_input::NumericInput;

/// Prefix carried by every input-validation failure, so callers can tell
/// bad input from other failures.
pub const PARSE_ERROR_PREFIX: &str = "parse error";

/// How a raw CLI/config string should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Auto,
    Number,
    Decimal,
    Hex,
}

impl FromStr for InputKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Ok(InputKind::Auto),
            "number" => Ok(InputKind::Number),
            "decimal" => Ok(InputKind::Decimal),
            "hex" => Ok(InputKind::Hex),
            other => Err(format!(
                "unsupported input kind: {other} (expected auto | number | decimal | hex)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedValue {
    pub input: String,
    pub kind: &'static str,
    /// Exact base-10 value before any display rounding.
    pub decimal: String,
    pub formatted: String,
}

fn parse_error(err: ParseError) -> String {
    format!("{PARSE_ERROR_PREFIX}: {err}")
}

pub fn parse_input(raw: &str, kind: InputKind) -> Result<NumericInput, String> {
    let trimmed = raw.trim();
    match kind {
        InputKind::Auto => Ok(NumericInput::classify(trimmed)),
        InputKind::Decimal => Ok(NumericInput::Decimal(trimmed.to_string())),
        InputKind::Hex => Ok(NumericInput::Hex(trimmed.to_string())),
        InputKind::Number => trimmed
            .parse::<f64>()
            .map(NumericInput::Number)
            .map_err(|_| format!("{PARSE_ERROR_PREFIX}: invalid number: {trimmed:?}")),
    }
}

fn input_label(input: &NumericInput) -> String {
    match input {
        NumericInput::Number(value) => value.to_string(),
        NumericInput::Decimal(raw) | NumericInput::Hex(raw) => raw.clone(),
    }
}

fn record_format_metrics(operation: &'static str, ok: bool) {
    metrics::counter!(
        "vantage.format.calls_total",
        "operation" => operation,
        "result" => if ok { "ok" } else { "err" }
    )
    .increment(1);
}

pub fn format_value(
    input: &NumericInput,
    formatter: &NumericFormatter,
) -> Result<FormattedValue, String> {
    let result = parse_exact(input).map(|value| FormattedValue {
        input: input_label(input),
        kind: input.kind(),
        decimal: value.to_string(),
        formatted: formatter.format_decimal(value),
    });
    record_format_metrics("format", result.is_ok());

    let value = result.map_err(parse_error)?;
    debug!(kind = value.kind, formatted = %value.formatted, "formatted value");
    Ok(value)
}

/// Fraction to percent text, e.g. `0.1234` -> `"12.34"`.
pub fn format_percent(input: &NumericInput, decimals: u32) -> Result<String, String> {
    let result = parse_exact(input).and_then(|value| to_percent(value, decimals));
    record_format_metrics("percent", result.is_ok());
    result.map_err(parse_error)
}

/// Display text for a signed amount: `+100`, `-50`, `0`.
pub fn format_signed(formatter: &NumericFormatter, value: f64) -> Result<String, String> {
    let formatted = formatter.format_f64(value).map_err(parse_error)?;
    if value > 0.0 {
        Ok(format!("+{formatted}"))
    } else {
        Ok(formatted)
    }
}
