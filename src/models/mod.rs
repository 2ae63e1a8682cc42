//! Domain models

pub mod checklist;
pub mod enums;
pub mod reference;
pub mod report;

pub use checklist::ChecklistAnswer;
pub use enums::{CorrectiveAction, Priority, Shift, Status};
pub use reference::{master_data, ChecklistSpec, Equipment, MasterData};
pub use report::{InspectionEntry, NewEntry, NewReport, Report, SubmitReceipt};
