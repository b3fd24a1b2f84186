use crate::value_objects::equity_point::EquityPoint;
use std::path::Path;

/// Source of a trader's equity series, ordered by time.
pub trait EquityHistoryRepository {
    fn load_equity_history(&self, path: &Path) -> Result<Vec<EquityPoint>, String>;
}

/// Serves a fixed series; handy for callers that already hold the data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEquityHistory {
    points: Vec<EquityPoint>,
}

impl InMemoryEquityHistory {
    pub fn new(points: Vec<EquityPoint>) -> Self {
        Self { points }
    }
}

impl EquityHistoryRepository for InMemoryEquityHistory {
    fn load_equity_history(&self, _path: &Path) -> Result<Vec<EquityPoint>, String> {
        Ok(self.points.clone())
    }
}
