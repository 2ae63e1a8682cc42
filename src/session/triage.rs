//! Priority triage buffer (manager session)
//!
//! Tracks uncommitted priority edits against the committed server state and
//! commits them as one concurrent batch. Overall success is the logical AND
//! of the individual patches; on any failure every pending edit is kept so
//! the manager can retry. Patches that did apply are not rolled back, so
//! after a partial failure the store may already reflect some of the batch.

use futures::future::join_all;
use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{InspectionEntry, Priority};
use crate::store::{ReportStore, StoreError};

/// Result of one priority patch within a batch commit
#[derive(Debug)]
pub struct PatchOutcome {
    pub entry_id: String,
    pub priority: Option<Priority>,
    pub result: Result<(), StoreError>,
}

/// Per-entry outcomes of a fully applied batch commit, in pending-edit order
#[derive(Debug)]
pub struct CommitReport {
    pub outcomes: Vec<PatchOutcome>,
}

impl CommitReport {
    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed_ids(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.entry_id.clone())
            .collect()
    }

    pub fn all_applied(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Local unsaved priority edits pending a batch commit
#[derive(Debug, Default)]
pub struct TriageBuffer {
    /// entryId -> edited priority; `None` means explicit "clear priority"
    pending: IndexMap<String, Option<Priority>>,
}

impl TriageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a local edit. Never touches the store.
    pub fn edit(&mut self, entry_id: &str, priority: Option<Priority>) {
        self.pending.insert(entry_id.to_string(), priority);
    }

    /// Read path for rendering: the pending value if the entry is locally
    /// edited, else the committed one. Locally edited values show without a
    /// round trip.
    pub fn effective_priority(&self, entry: &InspectionEntry) -> Option<Priority> {
        self.pending
            .get(&entry.id)
            .copied()
            .unwrap_or(entry.priority)
    }

    pub fn has_edit(&self, entry_id: &str) -> bool {
        self.pending.contains_key(entry_id)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Drop all pending edits (navigation away from the dashboard)
    pub fn discard(&mut self) {
        self.pending.clear();
    }

    /// Commit every pending edit: one patch per entry, all issued
    /// concurrently. Succeeds only if all patches succeed, clearing the
    /// buffer. Partial and total failure are reported distinctly and both
    /// keep the buffer intact for retry; already-applied patches are not
    /// compensated.
    pub async fn commit(&mut self, store: &dyn ReportStore) -> AppResult<CommitReport> {
        if self.pending.is_empty() {
            return Err(AppError::NothingToSave);
        }

        let edits: Vec<(String, Option<Priority>)> = self
            .pending
            .iter()
            .map(|(id, priority)| (id.clone(), *priority))
            .collect();

        let results = join_all(
            edits
                .iter()
                .map(|(id, priority)| store.patch_priority(id, *priority)),
        )
        .await;

        let outcomes: Vec<PatchOutcome> = edits
            .into_iter()
            .zip(results)
            .map(|((entry_id, priority), result)| PatchOutcome {
                entry_id,
                priority,
                result,
            })
            .collect();
        let report = CommitReport { outcomes };

        let applied = report.applied();
        let failed = report.failed_ids();
        if failed.is_empty() {
            info!(count = applied, "priority edits committed");
            self.pending.clear();
            Ok(report)
        } else if applied > 0 {
            warn!(
                applied,
                failed = failed.len(),
                "partial priority commit; edits kept for retry"
            );
            Err(AppError::PartialCommit { applied, failed })
        } else {
            warn!(
                failed = failed.len(),
                "priority commit failed; edits kept for retry"
            );
            Err(AppError::CommitFailed { failed })
        }
    }
}
