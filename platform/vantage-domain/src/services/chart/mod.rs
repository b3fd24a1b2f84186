use crate::value_objects::chart_point::DerivedChartPoint;
use crate::value_objects::display_mode::DisplayMode;
use crate::value_objects::equity_point::EquityPoint;
use serde::Serialize;

mod summary;

pub use summary::{summarize, EquitySummary};

/// Hard cap on plotted points; older points are dropped first.
pub const MAX_CHART_POINTS: usize = 2000;
/// Equity at or below this is a feed sentinel, not a real balance.
pub const MIN_VALID_EQUITY: f64 = 1.0;
pub const DEFAULT_INITIAL_BALANCE: f64 = 1000.0;

const PERCENT_PADDING_RATIO: f64 = 0.2;
const PERCENT_MIN_PADDING: f64 = 1.0;
const DOLLAR_PADDING_RATIO: f64 = 0.15;
const DOLLAR_MIN_PADDING_RATIO: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("equity series is empty")]
    EmptySeries,
    #[error("initial balance must be finite and non-zero (got {0})")]
    InvalidInitialBalance(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityChart {
    pub display_mode: DisplayMode,
    pub initial_balance: f64,
    pub points: Vec<DerivedChartPoint>,
    /// `[min, max]` of the Y axis.
    pub domain: [f64; 2],
    pub reference_line: f64,
}

pub fn is_valid_point(point: &EquityPoint) -> bool {
    point.total_equity > MIN_VALID_EQUITY
}

pub fn filter_valid_history(series: &[EquityPoint]) -> Vec<EquityPoint> {
    series.iter().filter(|p| is_valid_point(p)).cloned().collect()
}

pub fn downsample_recent(series: &[EquityPoint]) -> &[EquityPoint] {
    let start = series.len().saturating_sub(MAX_CHART_POINTS);
    &series[start..]
}

/// Filters sentinels, then keeps the most recent [`MAX_CHART_POINTS`].
pub fn prepare_history(series: &[EquityPoint]) -> Vec<EquityPoint> {
    let valid = filter_valid_history(series);
    downsample_recent(&valid).to_vec()
}

/// Configured balance, else the balance implied by the first valid point, else 1000.
pub fn resolve_initial_balance(configured: Option<f64>, valid_history: &[EquityPoint]) -> f64 {
    let usable = |v: &f64| v.is_finite() && *v != 0.0;
    configured
        .filter(usable)
        .or_else(|| {
            valid_history
                .first()
                .map(|p| p.total_equity - p.pnl)
                .filter(usable)
        })
        .unwrap_or(DEFAULT_INITIAL_BALANCE)
}

pub fn reference_line(mode: DisplayMode, initial_balance: f64) -> f64 {
    match mode {
        DisplayMode::Dollar => initial_balance,
        DisplayMode::Percent => 0.0,
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn pnl_pct_display(total_equity: f64, initial_balance: f64) -> f64 {
    round2((total_equity - initial_balance) / initial_balance * 100.0)
}

pub fn project_point(
    point: &EquityPoint,
    mode: DisplayMode,
    initial_balance: f64,
) -> DerivedChartPoint {
    let pnl_pct = pnl_pct_display(point.total_equity, initial_balance);
    DerivedChartPoint {
        timestamp: point.timestamp,
        value: match mode {
            DisplayMode::Dollar => point.total_equity,
            DisplayMode::Percent => pnl_pct,
        },
        raw_equity: point.total_equity,
        raw_pnl: point.pnl,
        raw_pnl_pct: pnl_pct,
        cycle: point.cycle_number,
    }
}

/// Projects `series` and computes a padded Y domain that always contains the
/// reference line.
pub fn compute_domain(
    series: &[EquityPoint],
    mode: DisplayMode,
    initial_balance: f64,
) -> Result<EquityChart, ChartError> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }
    if !initial_balance.is_finite() || initial_balance == 0.0 {
        return Err(ChartError::InvalidInitialBalance(initial_balance));
    }

    let points: Vec<DerivedChartPoint> = series
        .iter()
        .map(|p| project_point(p, mode, initial_balance))
        .collect();

    let baseline = reference_line(mode, initial_balance);
    let (min_val, max_val) = points.iter().fold((baseline, baseline), |(lo, hi), p| {
        (lo.min(p.value), hi.max(p.value))
    });

    let padding = match mode {
        DisplayMode::Percent => {
            let range = max_val.abs().max(min_val.abs());
            (range * PERCENT_PADDING_RATIO).max(PERCENT_MIN_PADDING)
        }
        DisplayMode::Dollar => {
            let range = max_val - min_val;
            (range * DOLLAR_PADDING_RATIO).max(initial_balance.abs() * DOLLAR_MIN_PADDING_RATIO)
        }
    };

    Ok(EquityChart {
        display_mode: mode,
        initial_balance,
        points,
        domain: [(min_val - padding).floor(), (max_val + padding).ceil()],
        reference_line: baseline,
    })
}
