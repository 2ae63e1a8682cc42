//! Report aggregation and export

pub mod aggregate;
pub mod export;
pub mod pdf;

pub use aggregate::{group_entries, group_entries_sorted, issue_count, p1_count, EquipmentGroup};
pub use export::{ReportDocument, ReportKind};
pub use pdf::{render, ExportedPdf};
