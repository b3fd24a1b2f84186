use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reporting cycle of a trader's account, as delivered by the data feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub total_equity: f64,
    pub pnl: f64,
    pub pnl_pct: f64,
    pub cycle_number: u64,
}

#[cfg(test)]
mod tests {
    use super::EquityPoint;

    #[test]
    fn deserializes_rfc3339_timestamps() {
        let raw = r#"{
            "timestamp": "2024-03-01T12:30:00Z",
            "total_equity": 1050.5,
            "pnl": 50.5,
            "pnl_pct": 5.05,
            "cycle_number": 7
        }"#;
        let point: EquityPoint = serde_json::from_str(raw).expect("valid point");
        assert_eq!(point.cycle_number, 7);
        assert_eq!(point.timestamp.timestamp(), 1_709_296_200);
    }

    #[test]
    fn rejects_unparseable_timestamp() {
        let raw = r#"{
            "timestamp": "not-a-date",
            "total_equity": 1000.0,
            "pnl": 0.0,
            "pnl_pct": 0.0,
            "cycle_number": 1
        }"#;
        assert!(serde_json::from_str::<EquityPoint>(raw).is_err());
    }
}
