use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vantage_domain::services::color::{parse_hex_color, Rgba};
use vantage_domain::services::duration::parse_duration_like_seconds;
use vantage_domain::services::numeric::{FormatOptions, SubscriptOverflow, DEFAULT_PERCENT_DECIMALS};
use vantage_domain::value_objects::display_mode::DisplayMode;

pub const DEFAULT_POSITIVE_COLOR: Rgba = Rgba {
    r: 0x10,
    g: 0xB9,
    b: 0x81,
    a: u8::MAX,
};
pub const DEFAULT_NEGATIVE_COLOR: Rgba = Rgba {
    r: 0xEF,
    g: 0x44,
    b: 0x44,
    a: u8::MAX,
};
const MAX_PERCENT_DECIMALS: u32 = 10;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub format: Option<FormatConfig>,
    pub chart: Option<ChartConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct FormatConfig {
    pub grouped: Option<bool>,
    pub percent_decimals: Option<u32>,
    pub subscript_overflow: Option<SubscriptOverflow>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    pub display_mode: Option<DisplayMode>,
    pub initial_balance: Option<f64>,
    /// Trailing time window such as `"7d"`; applied before the point cap.
    pub window: Option<String>,
    pub positive_color: Option<String>,
    pub negative_color: Option<String>,
}

/// Chart options after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub display_mode: DisplayMode,
    pub initial_balance: Option<f64>,
    pub window_seconds: Option<i64>,
    pub positive_color: Rgba,
    pub negative_color: Rgba,
    pub percent_decimals: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::default(),
            initial_balance: None,
            window_seconds: None,
            positive_color: DEFAULT_POSITIVE_COLOR,
            negative_color: DEFAULT_NEGATIVE_COLOR,
            percent_decimals: DEFAULT_PERCENT_DECIMALS,
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    load_config_from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))
}

pub fn load_config_from_str(raw: &str) -> Result<Config, String> {
    toml::from_str(raw).map_err(|err| err.to_string())
}

pub fn to_toml_pretty(config: &Config) -> Result<String, String> {
    toml::to_string_pretty(config)
        .map_err(|err| format!("failed to serialize config as TOML: {err}"))
}

pub fn resolve_format_options(config: &Config) -> FormatOptions {
    let format = config.format.clone().unwrap_or_default();
    FormatOptions {
        grouped: format.grouped.unwrap_or(false),
        subscript_overflow: format.subscript_overflow.unwrap_or_default(),
    }
}

pub fn resolve_percent_decimals(config: &Config) -> Result<u32, String> {
    let decimals = config
        .format
        .as_ref()
        .and_then(|f| f.percent_decimals)
        .unwrap_or(DEFAULT_PERCENT_DECIMALS);
    validate_percent_decimals(decimals)
        .map_err(|err| format!("format.percent_decimals {err}"))
}

/// Bounds the fraction digits of percent text, wherever they were configured.
pub fn validate_percent_decimals(decimals: u32) -> Result<u32, String> {
    if decimals > MAX_PERCENT_DECIMALS {
        return Err(format!(
            "must be <= {MAX_PERCENT_DECIMALS} (got {decimals})"
        ));
    }
    Ok(decimals)
}

pub fn resolve_chart_settings(config: &Config) -> Result<ChartSettings, String> {
    let chart = config.chart.clone().unwrap_or_default();

    if let Some(balance) = chart.initial_balance {
        if !balance.is_finite() || balance < 0.0 {
            return Err("chart.initial_balance must be finite and >= 0".to_string());
        }
    }

    let window_seconds = match chart.window.as_deref() {
        Some(raw) => {
            let seconds = parse_duration_like_seconds(raw)
                .map_err(|err| format!("invalid chart.window: {err}"))?;
            if seconds == 0 {
                return Err("chart.window must be > 0".to_string());
            }
            Some(seconds)
        }
        None => None,
    };

    let color = |raw: Option<&str>, fallback: Rgba, field: &str| match raw {
        Some(raw) => {
            parse_hex_color(raw).map_err(|err| format!("invalid chart.{field}: {err}"))
        }
        None => Ok(fallback),
    };

    Ok(ChartSettings {
        display_mode: chart.display_mode.unwrap_or_default(),
        initial_balance: chart.initial_balance,
        window_seconds,
        positive_color: color(
            chart.positive_color.as_deref(),
            DEFAULT_POSITIVE_COLOR,
            "positive_color",
        )?,
        negative_color: color(
            chart.negative_color.as_deref(),
            DEFAULT_NEGATIVE_COLOR,
            "negative_color",
        )?,
        percent_decimals: resolve_percent_decimals(config)?,
    })
}
