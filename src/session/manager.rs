//! Manager dashboard session
//!
//! Holds read-only copies of all submitted reports, the expanded-report
//! accordion state, and the priority triage buffer. Copies go stale on any
//! mutation this session initiates and are refetched afterwards; the store
//! stays the sole arbiter of consistency.

use crate::error::AppResult;
use crate::models::{InspectionEntry, Priority, Report};
use crate::reporting::aggregate;
use crate::reporting::export::ReportDocument;
use crate::reporting::pdf::{self, ExportedPdf};
use crate::store::ReportStore;

use super::triage::{CommitReport, TriageBuffer};

#[derive(Debug, Default)]
pub struct ManagerSession {
    reports: Vec<Report>,
    expanded: Option<String>,
    triage: TriageBuffer,
}

impl ManagerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the local report copies from `GET /reports`
    pub async fn refresh(&mut self, store: &dyn ReportStore) -> AppResult<()> {
        self.reports = store.list_reports().await?;
        Ok(())
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Expand the given report, collapsing any other; re-invoking on the
    /// open report collapses it.
    pub fn toggle_report(&mut self, report_id: &str) {
        if self.expanded.as_deref() == Some(report_id) {
            self.expanded = None;
        } else {
            self.expanded = Some(report_id.to_string());
        }
    }

    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Equipment-grouped view of one report in manager display order:
    /// "Not OK" entries first within each group, stable among equals.
    pub fn grouped(&self, report: &Report) -> Vec<aggregate::EquipmentGroup> {
        aggregate::group_entries_sorted(&report.entries)
    }

    pub fn issue_count(&self, report: &Report) -> usize {
        aggregate::issue_count(&report.entries)
    }

    /// Record a local priority edit (None clears); shows immediately via
    /// `effective_priority`, saved only on `save_priorities`.
    pub fn edit_priority(&mut self, entry_id: &str, priority: Option<Priority>) {
        self.triage.edit(entry_id, priority);
    }

    pub fn effective_priority(&self, entry: &InspectionEntry) -> Option<Priority> {
        self.triage.effective_priority(entry)
    }

    pub fn pending_edits(&self) -> usize {
        self.triage.len()
    }

    /// Discard unsaved edits (navigation away)
    pub fn discard_edits(&mut self) {
        self.triage.discard();
    }

    /// Commit the triage buffer, then refetch the reports. The refetch is
    /// issued strictly after every patch has resolved, never interleaved.
    /// On commit failure the pending edits survive and the stale copies are
    /// kept as-is.
    pub async fn save_priorities(&mut self, store: &dyn ReportStore) -> AppResult<CommitReport> {
        let receipt = self.triage.commit(store).await?;
        self.refresh(store).await?;
        Ok(receipt)
    }

    /// Export one report as the full (ISO) PDF variant
    pub fn export_full(&self, report: &Report) -> AppResult<ExportedPdf> {
        pdf::render(&ReportDocument::full(report))
    }
}
