use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// CSS `rgba(...)` with `alpha` in `0..=1`, overriding the parsed alpha when given.
    pub fn to_css(&self, alpha: Option<f64>) -> String {
        let alpha = alpha
            .map(|a| a.clamp(0.0, 1.0))
            .unwrap_or(f64::from(self.a) / 255.0);
        let alpha = (alpha * 1000.0).round() / 1000.0;
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == u8::MAX {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("hex color must have 6 or 8 digits, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex color: {0:?}")]
    InvalidDigit(String),
}

/// Parses `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
pub fn parse_hex_color(raw: &str) -> Result<Rgba, ColorError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidDigit(trimmed.to_string()));
    }
    if digits.len() != 6 && digits.len() != 8 {
        return Err(ColorError::InvalidLength(digits.len()));
    }

    let channel = |idx: usize| {
        u8::from_str_radix(&digits[idx..idx + 2], 16)
            .map_err(|_| ColorError::InvalidDigit(trimmed.to_string()))
    };
    Ok(Rgba {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
        a: if digits.len() == 8 { channel(6)? } else { u8::MAX },
    })
}
