use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Instant;
use vantage_domain::repositories::equity_history::EquityHistoryRepository;
use vantage_domain::value_objects::equity_point::EquityPoint;

/// Reads equity history from `.json` (array, or `{"history": [...]}`) or
/// `.csv` files with a `timestamp,total_equity,pnl,pnl_pct,cycle_number` header.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilesystemEquityHistoryRepository;

impl FilesystemEquityHistoryRepository {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryDocument {
    List(Vec<EquityPoint>),
    Wrapped { history: Vec<EquityPoint> },
}

fn record_read_metrics<T>(kind: &'static str, start: Instant, result: &Result<T, String>) {
    let result_label = if result.is_ok() { "ok" } else { "err" };
    metrics::counter!(
        "vantage.infra.history.read.calls_total",
        "kind" => kind,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!("vantage.infra.history.read_ms", "kind" => kind, "result" => result_label)
        .record(start.elapsed().as_millis() as f64);
}

pub fn read_equity_json(path: &Path) -> Result<Vec<EquityPoint>, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    let document: HistoryDocument = serde_json::from_str(&contents)
        .map_err(|err| format!("failed to parse equity JSON {}: {}", path.display(), err))?;
    Ok(match document {
        HistoryDocument::List(points) => points,
        HistoryDocument::Wrapped { history } => history,
    })
}

pub fn read_equity_csv(path: &Path) -> Result<Vec<EquityPoint>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|err| format!("failed to open {}: {}", path.display(), err))?;
    let mut points = Vec::new();
    for (idx, record) in reader.deserialize::<EquityPoint>().enumerate() {
        let point = record.map_err(|err| {
            format!(
                "failed to parse equity CSV {} (row {}): {}",
                path.display(),
                idx + 1,
                err
            )
        })?;
        points.push(point);
    }
    Ok(points)
}

impl EquityHistoryRepository for FilesystemEquityHistoryRepository {
    fn load_equity_history(&self, path: &Path) -> Result<Vec<EquityPoint>, String> {
        let start = Instant::now();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        let (kind, result) = match extension.as_deref() {
            Some("json") => ("json", read_equity_json(path)),
            Some("csv") => ("csv", read_equity_csv(path)),
            _ => {
                return Err(format!(
                    "unsupported equity history file {} (expected .json or .csv)",
                    path.display()
                ))
            }
        };
        record_read_metrics(kind, start, &result);
        if let Ok(points) = &result {
            tracing::debug!(path = %path.display(), kind, points = points.len(), "read equity history");
        }
        result
    }
}
