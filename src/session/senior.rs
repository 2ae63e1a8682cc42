//! Senior manager dashboard session (P1 critical issues monitor)
//!
//! Read-only consumer of the store's pre-filtered P1 query: each returned
//! report contains only P1-flagged entries. The client applies no further
//! filtering and no display sort; entry order is preserved as received.

use crate::error::AppResult;
use crate::models::Report;
use crate::reporting::aggregate;
use crate::reporting::export::ReportDocument;
use crate::reporting::pdf::{self, ExportedPdf};
use crate::store::ReportStore;

#[derive(Debug, Default)]
pub struct SeniorSession {
    reports: Vec<Report>,
    expanded: Option<String>,
}

impl SeniorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the local copies from `GET /reports/p1-priorities`
    pub async fn refresh(&mut self, store: &dyn ReportStore) -> AppResult<()> {
        self.reports = store.list_p1_reports().await?;
        Ok(())
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// All clear: no report currently carries a P1 issue
    pub fn all_clear(&self) -> bool {
        self.reports.is_empty()
    }

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

    /// P1 entries in one report. The store already restricts entries to P1,
    /// but this still filters on the flag in case that contract changes.
    pub fn p1_count(&self, report: &Report) -> usize {
        aggregate::p1_count(&report.entries)
    }

    /// Equipment-grouped view, original entry order within each group
    pub fn grouped(&self, report: &Report) -> Vec<aggregate::EquipmentGroup> {
        aggregate::group_entries(&report.entries)
    }

    /// Export one report as the P1-critical PDF variant
    pub fn export_p1(&self, report: &Report) -> AppResult<ExportedPdf> {
        pdf::render(&ReportDocument::p1(report))
    }
}
