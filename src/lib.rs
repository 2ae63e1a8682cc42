//! PlantLog Equipment Inspection Client
//!
//! Client-side library for the plant equipment-inspection tool: operators
//! record per-equipment checklist results, managers triage issues by
//! priority, senior managers review P1 criticals and export reports.
//! Persistence lives in an external HTTP store; this crate owns the session
//! state, validation, aggregation and document generation around it.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod reporting;
pub mod session;
pub mod store;

pub use config::ClientConfig;
pub use error::{AppError, AppResult, ValidationError};
pub use session::{InspectionForm, ManagerSession, SeniorSession, TriageBuffer};
pub use store::{HttpStore, ReportStore};
