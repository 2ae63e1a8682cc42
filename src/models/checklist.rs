//! Transient per-session checklist answers

use serde::{Deserialize, Serialize};

use super::enums::{CorrectiveAction, Status};

/// One operator answer for an (equipment, spec) pair.
///
/// Invariant: `action` and `remarks` are only meaningful while `status` is
/// "Not OK"; both are cleared on every transition to "OK".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistAnswer {
    pub status: Status,
    pub action: Option<CorrectiveAction>,
    pub remarks: String,
}

impl ChecklistAnswer {
    /// A fresh "OK" answer
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            action: None,
            remarks: String::new(),
        }
    }

    /// A fresh "Not OK" answer with the default corrective action
    pub fn not_ok() -> Self {
        Self {
            status: Status::NotOk,
            action: Some(CorrectiveAction::Repair),
            remarks: String::new(),
        }
    }

    pub fn is_issue(&self) -> bool {
        self.status.is_issue()
    }

    /// Apply a status selection, enforcing the OK-clears-details invariant.
    /// Re-selecting "Not OK" keeps existing remarks and only defaults the
    /// action when none was chosen yet.
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
        match status {
            Status::Ok => {
                self.action = None;
                self.remarks.clear();
            }
            Status::NotOk => {
                if self.action.is_none() {
                    self.action = Some(CorrectiveAction::Repair);
                }
            }
        }
    }
}
