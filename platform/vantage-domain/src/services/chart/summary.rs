use super::pnl_pct_display;
use crate::value_objects::equity_point::EquityPoint;
use serde::Serialize;

/// Footer statistics for the equity panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquitySummary {
    pub current_equity: f64,
    pub pnl: f64,
    pub pnl_pct: f64,
    pub peak_equity: f64,
    pub trough_equity: f64,
    pub points: usize,
    pub first_cycle: u64,
    pub last_cycle: u64,
    pub span_seconds: i64,
}

pub fn summarize(series: &[EquityPoint], initial_balance: f64) -> Option<EquitySummary> {
    let first = series.first()?;
    let last = series.last()?;

    let (peak_equity, trough_equity) = series.iter().fold(
        (f64::NEG_INFINITY, f64::INFINITY),
        |(peak, trough), p| (peak.max(p.total_equity), trough.min(p.total_equity)),
    );

    Some(EquitySummary {
        current_equity: last.total_equity,
        pnl: last.total_equity - initial_balance,
        pnl_pct: pnl_pct_display(last.total_equity, initial_balance),
        peak_equity,
        trough_equity,
        points: series.len(),
        first_cycle: first.cycle_number,
        last_cycle: last.cycle_number,
        span_seconds: (last.timestamp - first.timestamp).num_seconds().max(0),
    })
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use crate::value_objects::equity_point::EquityPoint;
    use chrono::{TimeZone, Utc};

    fn point(cycle: u64, minutes: i64, total_equity: f64) -> EquityPoint {
        EquityPoint {
            timestamp: Utc.timestamp_opt(1_700_000_000 + minutes * 60, 0).unwrap(),
            total_equity,
            pnl: total_equity - 1000.0,
            pnl_pct: 0.0,
            cycle_number: cycle,
        }
    }

    #[test]
    fn summarizes_last_point_against_baseline() {
        let series = vec![
            point(3, 0, 1000.0),
            point(4, 3, 1250.0),
            point(5, 6, 900.0),
            point(6, 90, 1100.0),
        ];
        let summary = summarize(&series, 1000.0).expect("summary");
        assert_eq!(summary.current_equity, 1100.0);
        assert_eq!(summary.pnl, 100.0);
        assert_eq!(summary.pnl_pct, 10.0);
        assert_eq!(summary.peak_equity, 1250.0);
        assert_eq!(summary.trough_equity, 900.0);
        assert_eq!(summary.points, 4);
        assert_eq!((summary.first_cycle, summary.last_cycle), (3, 6));
        assert_eq!(summary.span_seconds, 5400);
    }

    #[test]
    fn empty_series_has_no_summary() {
        assert!(summarize(&[], 1000.0).is_none());
    }
}
