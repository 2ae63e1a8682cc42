//! Persisted report models (read side) and submission payloads (write side)
//!
//! Wire names are camelCase per the store contract. Equipment and spec names
//! are denormalized into each entry at submission time so historical reports
//! stay readable if the reference data later changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{CorrectiveAction, Priority, Shift, Status};

/// One (equipment, spec) inspection result within a persisted report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionEntry {
    /// Server-assigned, unique
    pub id: String,
    pub equipment_id: String,
    pub equipment_name: String,
    pub spec_id: String,
    pub spec_name: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<CorrectiveAction>,
    #[serde(default)]
    pub remarks: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_remarks: Option<String>,
    /// Manager-assigned; only meaningful when status is "Not OK"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl InspectionEntry {
    pub fn is_issue(&self) -> bool {
        self.status.is_issue()
    }
}

/// One operator's complete submitted inspection session.
///
/// Immutable once created except for per-entry `priority`, which is patched
/// out-of-band. The client holds read-only copies that can go stale and are
/// refreshed after any mutation it initiates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub operator_name: String,
    pub shift: Shift,
    pub created_at: DateTime<Utc>,
    pub entries: Vec<InspectionEntry>,
}

/// Entry shape sent on submission (no id or priority yet)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub equipment_id: String,
    pub equipment_name: String,
    pub spec_id: String,
    pub spec_name: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<CorrectiveAction>,
    #[serde(default)]
    pub remarks: String,
}

/// `POST /submit` request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub operator_name: String,
    pub shift: Shift,
    pub checklist: Vec<NewEntry>,
}

/// `POST /submit` success response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    pub report_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_json_roundtrip() {
        let json = r#"{
            "id": "e1",
            "equipmentId": "eq_01",
            "equipmentName": "L-1 Conveyor",
            "specId": "sp_05",
            "specName": "Vibration",
            "status": "Not OK",
            "action": "Repair",
            "remarks": "excessive vibration at drive end",
            "priority": "P1"
        }"#;
        let entry: InspectionEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.equipment_id, "eq_01");
        assert_eq!(entry.status, Status::NotOk);
        assert_eq!(entry.action, Some(CorrectiveAction::Repair));
        assert_eq!(entry.priority, Some(Priority::P1));
        assert!(entry.equipment_remarks.is_none());

        let out = serde_json::to_value(&entry).unwrap();
        assert_eq!(out["equipmentName"], "L-1 Conveyor");
        assert_eq!(out["status"], "Not OK");
    }

    #[test]
    fn ok_entry_defaults() {
        let json = r#"{
            "id": "e2",
            "equipmentId": "eq_01",
            "equipmentName": "L-1 Conveyor",
            "specId": "sp_01",
            "specName": "Abnormal Sound",
            "status": "OK"
        }"#;
        let entry: InspectionEntry = serde_json::from_str(json).unwrap();
        assert!(entry.action.is_none());
        assert!(entry.remarks.is_empty());
        assert!(entry.priority.is_none());
    }

    #[test]
    fn submission_payload_shape() {
        let payload = NewReport {
            operator_name: "Raj Kumar".to_string(),
            shift: Shift::Morning,
            checklist: vec![NewEntry {
                equipment_id: "eq_01".to_string(),
                equipment_name: "L-1 Conveyor".to_string(),
                spec_id: "sp_01".to_string(),
                spec_name: "Abnormal Sound".to_string(),
                status: Status::Ok,
                action: None,
                remarks: String::new(),
            }],
        };
        let out = serde_json::to_value(&payload).unwrap();
        assert_eq!(out["operatorName"], "Raj Kumar");
        assert_eq!(out["shift"], "Morning");
        assert_eq!(out["checklist"][0]["specId"], "sp_01");
        // action is omitted entirely for OK items
        assert!(out["checklist"][0].get("action").is_none());
    }
}
