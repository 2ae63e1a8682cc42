//! Persistence-service client layer
//!
//! The store is an external collaborator; this crate only consumes the four
//! endpoints of its REST contract. `ReportStore` is the seam the session
//! objects talk through, so triage and submission flows are testable without
//! network calls.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::AppError;
use crate::models::{NewReport, Priority, Report};

pub use http::HttpStore;

/// Failures observable when talking to the store.
///
/// `Http` covers transport-level failures (no response); `Server` is a
/// received non-success status with whatever detail the store provided.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned {status}: {detail}")]
    Server { status: u16, detail: String },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Http(e) => AppError::Transport(e),
            StoreError::Server { status, detail } => AppError::Server { status, detail },
        }
    }
}

/// Client-side view of the persistence service contract
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// `POST /submit`: create one complete report; returns the
    /// server-assigned report id.
    async fn submit_report(&self, report: &NewReport) -> Result<String, StoreError>;

    /// `GET /reports`: all reports, full entries, unfiltered.
    async fn list_reports(&self) -> Result<Vec<Report>, StoreError>;

    /// `GET /reports/p1-priorities`: reports containing at least one P1
    /// entry, with entries already restricted server-side to P1.
    async fn list_p1_reports(&self) -> Result<Vec<Report>, StoreError>;

    /// `PATCH /entries/{entryId}/priority`: set or clear one entry's
    /// priority. Only the ok/not-ok outcome is relied upon.
    async fn patch_priority(
        &self,
        entry_id: &str,
        priority: Option<Priority>,
    ) -> Result<(), StoreError>;
}
