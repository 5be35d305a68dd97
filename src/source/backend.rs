use reqwest::Client;
use serde_json::Value;

use crate::{config::Config, source::SourceError};

/// Client for a dashboard backend that serves the reconciled data itself.
///
/// The poller reads the spreadsheet directly; this is kept for deployments
/// that put a backend in front of it.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Client for `BACKEND_BASE_URL`.
    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(client, &config.backend_base_url)
    }

    /// GET `{base}/dashboard-data`
    pub async fn get_dashboard_data(&self) -> Result<Value, SourceError> {
        let resp = self
            .client
            .get(format!("{}/dashboard-data", self.base_url))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                feed: "dashboard-data",
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json().await?)
    }
}
