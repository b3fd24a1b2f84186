use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit of the chart's Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Dollar,
    Percent,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Dollar => "dollar",
            DisplayMode::Percent => "percent",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "dollar" => Ok(DisplayMode::Dollar),
            "percent" => Ok(DisplayMode::Percent),
            other => Err(format!(
                "unsupported display mode: {other} (expected dollar | percent)"
            )),
        }
    }
}
