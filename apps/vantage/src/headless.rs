use std::path::{Path, PathBuf};
use vantage_application::charting::load_equity_view;
use vantage_application::config::{
    load_config, resolve_chart_settings, resolve_format_options, resolve_percent_decimals,
    validate_percent_decimals, Config,
};
use vantage_application::formatting::{format_percent, format_value, parse_input, InputKind};
use vantage_domain::services::numeric::NumericFormatter;
use vantage_domain::value_objects::display_mode::DisplayMode;
use vantage_infrastructure::history::FilesystemEquityHistoryRepository;

#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessCommand {
    Format {
        value: String,
        kind: InputKind,
        grouped: bool,
    },
    Percent {
        value: String,
        decimals: Option<u32>,
    },
    Chart {
        input: PathBuf,
        mode: Option<DisplayMode>,
        initial_balance: Option<f64>,
    },
}

pub struct HeadlessArgs {
    pub command: HeadlessCommand,
    pub config_path: Option<PathBuf>,
}

pub fn resolve_config_path(cli_value: Option<PathBuf>) -> Option<PathBuf> {
    cli_value.or_else(|| {
        std::env::var("VANTAGE_CONFIG")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    })
}

fn load_optional_config(path: Option<&Path>) -> Result<Config, String> {
    match path {
        Some(path) => load_config(path),
        None => Ok(Config::default()),
    }
}

pub fn run_headless(args: HeadlessArgs) -> Result<serde_json::Value, String> {
    let config = load_optional_config(args.config_path.as_deref())?;
    match args.command {
        HeadlessCommand::Format {
            value,
            kind,
            grouped,
        } => run_format(&config, &value, kind, grouped),
        HeadlessCommand::Percent { value, decimals } => run_percent(&config, &value, decimals),
        HeadlessCommand::Chart {
            input,
            mode,
            initial_balance,
        } => run_chart(&config, &input, mode, initial_balance),
    }
}

fn run_format(
    config: &Config,
    raw: &str,
    kind: InputKind,
    grouped: bool,
) -> Result<serde_json::Value, String> {
    let mut options = resolve_format_options(config);
    options.grouped |= grouped;
    let input = parse_input(raw, kind)?;
    let value = format_value(&input, &NumericFormatter::new(options))?;
    Ok(serde_json::json!({
        "status": "ok",
        "mode": "format",
        "input": value.input,
        "kind": value.kind,
        "decimal": value.decimal,
        "formatted": value.formatted,
    }))
}

fn run_percent(
    config: &Config,
    raw: &str,
    decimals: Option<u32>,
) -> Result<serde_json::Value, String> {
    let decimals = match decimals {
        Some(d) => validate_percent_decimals(d).map_err(|err| format!("--decimals {err}"))?,
        None => resolve_percent_decimals(config)?,
    };
    let input = parse_input(raw, InputKind::Auto)?;
    let percent = format_percent(&input, decimals)?;
    Ok(serde_json::json!({
        "status": "ok",
        "mode": "percent",
        "input": raw.trim(),
        "decimals": decimals,
        "percent": percent,
    }))
}

fn run_chart(
    config: &Config,
    input: &Path,
    mode: Option<DisplayMode>,
    initial_balance: Option<f64>,
) -> Result<serde_json::Value, String> {
    let mut settings = resolve_chart_settings(config)?;
    if let Some(mode) = mode {
        settings.display_mode = mode;
    }
    if let Some(balance) = initial_balance {
        if !balance.is_finite() || balance < 0.0 {
            return Err("--initial-balance must be finite and >= 0".to_string());
        }
        settings.initial_balance = Some(balance);
    }

    let formatter = NumericFormatter::new(resolve_format_options(config));
    let repo = FilesystemEquityHistoryRepository::new();
    let view = load_equity_view(&repo, input, &settings, &formatter)?;

    let Some(view) = view else {
        return Ok(serde_json::json!({
            "status": "no_data",
            "mode": "chart",
            "input": input.display().to_string(),
        }));
    };
    let view_json = serde_json::to_value(&view)
        .map_err(|err| format!("failed to serialize chart view: {err}"))?;
    Ok(serde_json::json!({
        "status": "ok",
        "mode": "chart",
        "input": input.display().to_string(),
        "chart": view_json,
    }))
}
