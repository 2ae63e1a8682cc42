//! Owned per-session view state
//!
//! Each struct here is constructed once per active session (one operator
//! form, one manager dashboard, one senior dashboard) and owns its state
//! outright; nothing is ambient or global. Unsaved state dies with the
//! session, which is also what makes late store responses harmless: a torn
//! down session has nothing left to mutate.

pub mod form;
pub mod manager;
pub mod senior;
pub mod triage;

pub use form::{AnswerDetail, InspectionForm, SubmitOutcome};
pub use manager::ManagerSession;
pub use senior::SeniorSession;
pub use triage::{CommitReport, PatchOutcome, TriageBuffer};
