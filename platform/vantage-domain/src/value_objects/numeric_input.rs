/// A raw numeric value as it arrives from upstream.
///
/// Strings that could be read either way are resolved once, at the boundary,
/// by [`NumericInput::classify`]: a string made only of `0-9` is decimal, a
/// string with an `0x` prefix or any `a-f` letter (and only hex digits) is hex.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    Number(f64),
    Decimal(String),
    Hex(String),
}

impl NumericInput {
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_hex_like(trimmed) {
            NumericInput::Hex(trimmed.to_string())
        } else {
            NumericInput::Decimal(trimmed.to_string())
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            NumericInput::Number(_) => "number",
            NumericInput::Decimal(_) => "decimal",
            NumericInput::Hex(_) => "hex",
        }
    }
}

pub fn is_hex_like(value: &str) -> bool {
    let value = value.trim();
    if value
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("0x"))
    {
        return true;
    }
    !value.is_empty()
        && value.chars().all(|c| c.is_ascii_hexdigit())
        && value
            .chars()
            .any(|c| matches!(c.to_ascii_lowercase(), 'a'..='f'))
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<u64> for NumericInput {
    fn from(value: u64) -> Self {
        NumericInput::Decimal(value.to_string())
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Decimal(value.to_string())
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::classify(value)
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::classify(&value)
    }
}
