use crate::config::ChartSettings;
use crate::formatting::{format_percent, format_signed, PARSE_ERROR_PREFIX};
use chrono::Duration;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, info_span, warn};
use vantage_domain::repositories::equity_history::EquityHistoryRepository;
use vantage_domain::services::chart::{
    compute_domain, downsample_recent, filter_valid_history, resolve_initial_balance, summarize,
    DEFAULT_INITIAL_BALANCE,
};
use vantage_domain::services::duration::format_duration;
use vantage_domain::services::numeric::NumericFormatter;
use vantage_domain::value_objects::chart_point::DerivedChartPoint;
use vantage_domain::value_objects::display_mode::DisplayMode;
use vantage_domain::value_objects::equity_point::EquityPoint;
use vantage_domain::value_objects::numeric_input::NumericInput;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterView {
    pub current_equity: String,
    pub pnl: String,
    pub pnl_pct: String,
    pub peak_equity: String,
    pub trough_equity: String,
    pub points: usize,
    pub cycles: String,
    pub span: String,
}

/// Everything the equity panel needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityView {
    pub display_mode: DisplayMode,
    pub initial_balance: f64,
    pub reference_line: f64,
    pub domain: [f64; 2],
    pub points: Vec<DerivedChartPoint>,
    pub line_color: String,
    pub footer: FooterView,
}

fn within_window(series: Vec<EquityPoint>, window_seconds: Option<i64>) -> Vec<EquityPoint> {
    let (Some(window), Some(last)) = (window_seconds, series.last()) else {
        return series;
    };
    let cutoff = last.timestamp - Duration::seconds(window);
    series
        .into_iter()
        .filter(|p| p.timestamp >= cutoff)
        .collect()
}

fn record_build_metrics(result: &'static str, start: Instant) {
    metrics::counter!("vantage.chart.builds_total", "result" => result).increment(1);
    metrics::histogram!("vantage.chart.build_ms", "result" => result)
        .record(start.elapsed().as_millis() as f64);
}

/// Builds the chart view for `history`. `Ok(None)` means nothing valid is
/// left to plot and the caller should show its "no data" state.
pub fn build_equity_view(
    history: &[EquityPoint],
    settings: &ChartSettings,
    formatter: &NumericFormatter,
) -> Result<Option<EquityView>, String> {
    let _span = info_span!(
        "build_equity_view",
        display_mode = %settings.display_mode,
        input_points = history.len()
    )
    .entered();
    let start = Instant::now();

    let valid = filter_valid_history(history);
    let dropped = history.len() - valid.len();
    if dropped > 0 {
        debug!(dropped, "filtered sentinel equity points");
    }
    let windowed = within_window(valid, settings.window_seconds);
    let series = downsample_recent(&windowed);
    if series.len() < windowed.len() {
        debug!(
            kept = series.len(),
            total = windowed.len(),
            "downsampled equity history"
        );
    }

    if series.is_empty() {
        info!("no valid equity points to chart");
        record_build_metrics("no_data", start);
        return Ok(None);
    }

    let configured = settings.initial_balance.filter(|v| *v != 0.0);
    let initial_balance = resolve_initial_balance(configured, series);
    if configured.is_none() {
        let derived = series[0].total_equity - series[0].pnl;
        if !derived.is_finite() || derived == 0.0 {
            warn!(
                default = DEFAULT_INITIAL_BALANCE,
                "initial balance unavailable; using default"
            );
        }
    }

    let view = compose_view(series, settings, formatter, initial_balance);
    let label = if view.is_ok() { "ok" } else { "err" };
    record_build_metrics(label, start);
    let view = view?;

    metrics::gauge!("vantage.chart.points").set(view.points.len() as f64);
    info!(
        points = view.points.len(),
        initial_balance,
        domain_min = view.domain[0],
        domain_max = view.domain[1],
        "built equity view"
    );
    Ok(Some(view))
}

fn compose_view(
    series: &[EquityPoint],
    settings: &ChartSettings,
    formatter: &NumericFormatter,
    initial_balance: f64,
) -> Result<EquityView, String> {
    let chart = compute_domain(series, settings.display_mode, initial_balance)
        .map_err(|err| format!("failed to compute chart domain: {err}"))?;
    let summary = summarize(series, initial_balance)
        .ok_or_else(|| "failed to summarize equity series: empty".to_string())?;

    let format_amount = |value: f64| {
        formatter
            .format_f64(value)
            .map_err(|err| format!("{PARSE_ERROR_PREFIX}: {err}"))
    };
    let pnl_fraction = NumericInput::Number(summary.pnl / initial_balance);
    let pnl_pct = format_percent(&pnl_fraction, settings.percent_decimals)?;
    let pnl_pct = if summary.pnl > 0.0 {
        format!("+{pnl_pct}%")
    } else {
        format!("{pnl_pct}%")
    };

    let line_color = if summary.pnl >= 0.0 {
        settings.positive_color
    } else {
        settings.negative_color
    };

    let footer = FooterView {
        current_equity: format_amount(summary.current_equity)?,
        pnl: format_signed(formatter, summary.pnl)?,
        pnl_pct,
        peak_equity: format_amount(summary.peak_equity)?,
        trough_equity: format_amount(summary.trough_equity)?,
        points: summary.points,
        cycles: format!("#{}..#{}", summary.first_cycle, summary.last_cycle),
        span: format_duration(summary.span_seconds),
    };

    Ok(EquityView {
        display_mode: chart.display_mode,
        initial_balance: chart.initial_balance,
        reference_line: chart.reference_line,
        domain: chart.domain,
        points: chart.points,
        line_color: line_color.to_css(None),
        footer,
    })
}

/// Loads history through `repo` and builds the chart view.
pub fn load_equity_view(
    repo: &dyn EquityHistoryRepository,
    path: &Path,
    settings: &ChartSettings,
    formatter: &NumericFormatter,
) -> Result<Option<EquityView>, String> {
    let stage_start = Instant::now();
    let history = repo.load_equity_history(path)?;
    metrics::histogram!("vantage.chart.load_ms")
        .record(stage_start.elapsed().as_millis() as f64);
    debug!(path = %path.display(), points = history.len(), "loaded equity history");
    build_equity_view(&history, settings, formatter)
}
