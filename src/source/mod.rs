pub mod backend;
pub mod sheets;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// One positional feed row.
pub type Row = Vec<String>;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{feed} feed returned {status}: {body}")]
    Status {
        feed: &'static str,
        status: u16,
        body: String,
    },
}

/// Read-only access to the two feeds the dashboard is built from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_employees(&self) -> Result<Vec<Row>, SourceError>;
    async fn fetch_attendance(&self) -> Result<Vec<Row>, SourceError>;
}

/// Tabular body shared by the Sheets `values` endpoint.
/// A sheet with no data rows omits `values` altogether.
#[derive(Debug, Default, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Option<Vec<Vec<Value>>>,
}

impl ValueRange {
    /// Flatten cells to strings. Rows are only padded as far as the sheet sent them.
    pub fn into_rows(self) -> Vec<Row> {
        self.values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Fixed feeds, for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub employees: Vec<Row>,
    pub attendance: Vec<Row>,
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch_employees(&self) -> Result<Vec<Row>, SourceError> {
        Ok(self.employees.clone())
    }

    async fn fetch_attendance(&self) -> Result<Vec<Row>, SourceError> {
        Ok(self.attendance.clone())
    }
}
