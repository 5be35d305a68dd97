use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::source::{RecordSource, Row, SourceError, ValueRange};

/// Reads both feeds from a Google Sheets spreadsheet through the v4 `values` API.
#[derive(Debug, Clone)]
pub struct SheetsSource {
    client: Client,
    base_url: String,
    sheet_id: String,
    api_key: String,
    employees_range: String,
    attendance_range: String,
}

impl SheetsSource {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.sheets_base_url.trim_end_matches('/').to_string(),
            sheet_id: config.sheet_id.clone(),
            api_key: config.sheets_api_key.clone(),
            employees_range: config.employees_range.clone(),
            attendance_range: config.attendance_range.clone(),
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, self.sheet_id, range
        )
    }

    async fn fetch_range(&self, feed: &'static str, range: &str) -> Result<Vec<Row>, SourceError> {
        let resp = self
            .client
            .get(self.values_url(range))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                feed,
                status: status.as_u16(),
                body,
            });
        }

        let rows = resp.json::<ValueRange>().await?.into_rows();
        debug!(feed, range, rows = rows.len(), "Fetched sheet range");
        Ok(rows)
    }
}

#[async_trait]
impl RecordSource for SheetsSource {
    async fn fetch_employees(&self) -> Result<Vec<Row>, SourceError> {
        self.fetch_range("employees", &self.employees_range).await
    }

    async fn fetch_attendance(&self) -> Result<Vec<Row>, SourceError> {
        self.fetch_range("attendance", &self.attendance_range).await
    }
}
