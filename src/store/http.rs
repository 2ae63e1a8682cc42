//! HTTP implementation of the store contract

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::models::{NewReport, Priority, Report, SubmitReceipt};

use super::{ReportStore, StoreError};

/// reqwest-backed client for the persistence service
#[derive(Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

/// Non-success response body per the store contract
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

impl HttpStore {
    /// Create a client for the given base URL (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    /// Turn a non-success response into `StoreError::Server`, surfacing the
    /// store's `detail` message verbatim when the body carries one.
    async fn error_from(resp: reqwest::Response) -> StoreError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.detail)
            .unwrap_or(body);
        StoreError::Server { status, detail }
    }
}

#[async_trait]
impl ReportStore for HttpStore {
    async fn submit_report(&self, report: &NewReport) -> Result<String, StoreError> {
        let url = format!("{}/submit", self.base_url);

        info!(url = %url, entries = report.checklist.len(), "submitting inspection report");
        let resp = self.client.post(&url).json(report).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }

        let receipt: SubmitReceipt = resp.json().await?;
        info!(report_id = %receipt.report_id, "report accepted by store");
        Ok(receipt.report_id)
    }

    async fn list_reports(&self) -> Result<Vec<Report>, StoreError> {
        let url = format!("{}/reports", self.base_url);

        debug!(url = %url, "fetching reports");
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }

        let reports: Vec<Report> = resp.json().await?;
        debug!(count = reports.len(), "fetched reports");
        Ok(reports)
    }

    async fn list_p1_reports(&self) -> Result<Vec<Report>, StoreError> {
        let url = format!("{}/reports/p1-priorities", self.base_url);

        debug!(url = %url, "fetching P1 priority reports");
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }

        let reports: Vec<Report> = resp.json().await?;
        debug!(count = reports.len(), "fetched P1 reports");
        Ok(reports)
    }

    async fn patch_priority(
        &self,
        entry_id: &str,
        priority: Option<Priority>,
    ) -> Result<(), StoreError> {
        let url = format!("{}/entries/{}/priority", self.base_url, entry_id);

        debug!(url = %url, ?priority, "patching entry priority");
        let resp = self
            .client
            .patch(&url)
            .json(&json!({ "priority": priority }))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let store = HttpStore::new("http://127.0.0.1:8000/");
        assert_eq!(store.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn keeps_clean_base_url() {
        let store = HttpStore::new("http://plant.example:9000");
        assert_eq!(store.base_url, "http://plant.example:9000");
    }

    #[test]
    fn from_config_uses_configured_url() {
        let store = HttpStore::from_config(&StoreConfig::default());
        assert_eq!(store.base_url, "http://127.0.0.1:8000");
    }
}
