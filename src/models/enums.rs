//! Shared domain enums (wire strings match the store contract)

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Result of inspecting one checklist parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Not OK")]
    NotOk,
}

impl Status {
    /// True for "Not OK"
    pub fn is_issue(self) -> bool {
        self == Status::NotOk
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Status::Ok => "OK",
            Status::NotOk => "Not OK",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Shift
// ---------------------------------------------------------------------------

/// Operator shift timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Evening,
    Night,
}

impl Shift {
    /// Working hours of the shift, for display alongside the name
    pub fn hours(self) -> &'static str {
        match self {
            Shift::Morning => "06:00 - 14:00",
            Shift::Evening => "14:00 - 22:00",
            Shift::Night => "22:00 - 06:00",
        }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Shift::Morning => "Morning",
            Shift::Evening => "Evening",
            Shift::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// CorrectiveAction
// ---------------------------------------------------------------------------

/// Corrective action selected for a "Not OK" parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectiveAction {
    Repair,
    Replace,
}

impl std::fmt::Display for CorrectiveAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CorrectiveAction::Repair => "Repair",
            CorrectiveAction::Replace => "Replace",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Manager-assigned severity on a "Not OK" entry. P1 is critical and
/// visible to senior management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        };
        write!(f, "{}", label)
    }
}
