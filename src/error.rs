//! Error types for the PlantLog client

use thiserror::Error;

/// Local pre-submission validation failures.
///
/// These block the triggering action and never contact the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("operator name is required")]
    MissingOperatorName,

    #[error("incomplete checklist for {equipment}: {filled}/{total} items checked")]
    IncompleteChecklist {
        equipment: String,
        filled: usize,
        total: usize,
    },

    #[error("remarks are required for all 'Not OK' items on {equipment}")]
    MissingRemarks { equipment: String },

    #[error("no checklist data to submit")]
    EmptyReport,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The request never produced a response (network unreachable, rejected
    /// in flight). Carries no server detail.
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The store answered with a non-success status; `detail` is the
    /// store-provided message, verbatim.
    #[error("store returned {status}: {detail}")]
    Server { status: u16, detail: String },

    #[error("no pending priority edits to save")]
    NothingToSave,

    /// Some priority patches applied, some failed. Applied patches are not
    /// rolled back; all pending edits are kept for retry.
    #[error("{applied} priority update(s) saved, {} failed; edits kept for retry", .failed.len())]
    PartialCommit { applied: usize, failed: Vec<String> },

    /// Every priority patch failed; pending edits are kept for retry.
    #[error("all {} priority update(s) failed; edits kept for retry", .failed.len())]
    CommitFailed { failed: Vec<String> },

    #[error("report export failed: {0}")]
    Export(String),
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;
