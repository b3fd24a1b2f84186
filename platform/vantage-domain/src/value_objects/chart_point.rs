use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-point projection fed to the line chart. Recomputed on every render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedChartPoint {
    pub timestamp: DateTime<Utc>,
    /// Plotted value: equity in dollar mode, 2 dp pnl percent in percent mode.
    pub value: f64,
    pub raw_equity: f64,
    pub raw_pnl: f64,
    pub raw_pnl_pct: f64,
    pub cycle: u64,
}
