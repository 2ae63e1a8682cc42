//! Export content assembly
//!
//! `ReportDocument` is the content contract for both export variants: what
//! data appears, grouped how, in what order. Rendering to an actual PDF is
//! `reporting::pdf`'s job; everything here is pure and deterministic.

use chrono::{DateTime, Utc};

use crate::models::Report;

use super::aggregate::{group_entries, group_entries_sorted};

/// Document title of the full checklist report
const FULL_TITLE: &str = "TITLE : MHY Limestone Plant Daily LLF Checklist";
/// Document title of the P1-only management report
const P1_TITLE: &str = "P1 CRITICAL ISSUES - URGENT ATTENTION REQUIRED";
/// Department block shown in the header frame
const DEPARTMENT: [&str; 2] = ["MECHANICAL", "MAINTENANCE & IBL"];
const DIVISION: &str = "CHEMICALS' DIVISION";
/// Signature/footer row, fixed by the QSF form layout
const FOOTER_CELLS: [&str; 4] = [
    "QSF-510-02-07",
    "Name of fitter and sign",
    "Name of engineer and sign",
    "Rev No: 02    Rev Date: 25-05-2024",
];

/// Which export variant a document was assembled for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Full,
    P1Only,
}

impl ReportKind {
    /// Filename prefix of the exported artifact
    pub fn file_prefix(self) -> &'static str {
        match self {
            ReportKind::Full => "ISO",
            ReportKind::P1Only => "P1_CRITICAL",
        }
    }
}

/// One row of an equipment section table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub parameter: String,
    pub status: String,
    pub action: String,
    pub priority: String,
}

/// One equipment group within the document
#[derive(Debug, Clone)]
pub struct DocumentSection {
    pub heading: String,
    /// Visually distinguished (P1-only variant)
    pub critical: bool,
    pub rows: Vec<TableRow>,
    pub remarks: Option<String>,
}

/// Assembled export content for one report
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub kind: ReportKind,
    pub title: String,
    pub operator_name: String,
    /// Submission date, `DD-MM-YYYY`
    pub submitted_on: String,
    pub sections: Vec<DocumentSection>,
}

impl ReportDocument {
    /// Variant A: every entry per equipment group, manager display-sort
    /// order, priority column showing the stored value or `-`.
    pub fn full(report: &Report) -> Self {
        let sections = group_entries_sorted(&report.entries)
            .into_iter()
            .map(|group| DocumentSection {
                heading: group.equipment_name.clone(),
                critical: false,
                remarks: group.equipment_remarks.clone(),
                rows: group
                    .specs
                    .iter()
                    .map(|entry| TableRow {
                        parameter: entry.spec_name.clone(),
                        status: entry.status.to_string(),
                        action: entry
                            .action
                            .map(|a| a.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        priority: entry
                            .priority
                            .map(|p| p.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    })
                    .collect(),
            })
            .collect();

        Self {
            kind: ReportKind::Full,
            title: FULL_TITLE.to_string(),
            operator_name: report.operator_name.clone(),
            submitted_on: format_report_date(report.created_at),
            sections,
        }
    }

    /// Variant B: entries verbatim (the store pre-filters to P1-only), with
    /// the priority column hard-rendered as `P1 - CRITICAL` regardless of
    /// the stored value, and critical section headings.
    pub fn p1(report: &Report) -> Self {
        let sections = group_entries(&report.entries)
            .into_iter()
            .map(|group| DocumentSection {
                heading: format!("{} - CRITICAL", group.equipment_name),
                critical: true,
                remarks: group.equipment_remarks.clone(),
                rows: group
                    .specs
                    .iter()
                    .map(|entry| TableRow {
                        parameter: entry.spec_name.clone(),
                        status: entry.status.to_string(),
                        action: entry
                            .action
                            .map(|a| a.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        priority: "P1 - CRITICAL".to_string(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            kind: ReportKind::P1Only,
            title: P1_TITLE.to_string(),
            operator_name: report.operator_name.clone(),
            submitted_on: format_report_date(report.created_at),
            sections,
        }
    }

    /// Deterministic artifact filename:
    /// `{kind}_Report_{operatorName}_{DD-MM-YYYY}.pdf`
    pub fn file_name(&self) -> String {
        format!(
            "{}_Report_{}_{}.pdf",
            self.kind.file_prefix(),
            self.operator_name,
            self.submitted_on
        )
    }

    pub fn department(&self) -> [&'static str; 2] {
        DEPARTMENT
    }

    pub fn division(&self) -> &'static str {
        DIVISION
    }

    pub fn footer_cells(&self) -> [&'static str; 4] {
        FOOTER_CELLS
    }
}

/// Format a submission timestamp as `DD-MM-YYYY`
pub fn format_report_date(ts: DateTime<Utc>) -> String {
    ts.format("%d-%m-%Y").to_string()
}
