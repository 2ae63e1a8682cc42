//! Static reference data: equipment list and checklist parameters
//!
//! Loaded once at process start and immutable at runtime. Lookups are total:
//! an unknown id resolves to itself so a stale or missing reference entry
//! can never abort a submission.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A physical machine/unit subject to inspection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// One inspection parameter applied uniformly across equipment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistSpec {
    pub id: String,
    pub label: String,
}

/// Master reference data owned by the application shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterData {
    pub equipments: Vec<Equipment>,
    pub checklist_specs: Vec<ChecklistSpec>,
}

impl MasterData {
    /// Number of checklist parameters inspected per equipment
    pub fn spec_count(&self) -> usize {
        self.checklist_specs.len()
    }

    pub fn find_equipment(&self, id: &str) -> Option<&Equipment> {
        self.equipments.iter().find(|e| e.id == id)
    }

    pub fn find_spec(&self, id: &str) -> Option<&ChecklistSpec> {
        self.checklist_specs.iter().find(|s| s.id == id)
    }

    /// Display name for an equipment id, falling back to the raw id
    pub fn equipment_name(&self, id: &str) -> String {
        self.find_equipment(id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Display label for a spec id, falling back to the raw id
    pub fn spec_label(&self, id: &str) -> String {
        self.find_spec(id)
            .map(|s| s.label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Reference deployment: the MHY coal plant equipment roster and its
    /// 15-parameter daily checklist.
    pub fn plant_defaults() -> Self {
        let equipments = [
            ("eq_01", "L-1 Conveyor", "Old Coal Plant"),
            ("eq_02", "Vibrofeeder -1", "Old Coal Plant"),
            ("eq_03", "Vibrofeeder-2", "Old Coal Plant"),
            ("eq_04", "Crusher -1", "Old Coal Plant"),
            ("eq_05", "Crusher -2", "Old Coal Plant"),
            ("eq_06", "B2-Conveyor", "Old Coal Plant"),
            ("eq_07", "P-1 Conveyor", "New Coal Plant"),
            ("eq_08", "Vibrator -1", "New Coal Plant"),
            ("eq_09", "Vibrator -2", "New Coal Plant"),
            ("eq_10", "Crusher -1", "New Coal Plant"),
            ("eq_11", "Crusher -2", "New Coal Plant"),
            ("eq_12", "Vibrator-3", "New Coal Plant"),
            ("eq_13", "Vibrator -4", "New Coal Plant"),
            ("eq_14", "P2- Conveyor", "New Coal Plant"),
            ("eq_15", "R1- Conveyor", "New Coal Plant"),
            ("eq_16", "R2- Conveyor", "New Coal Plant"),
        ]
        .into_iter()
        .map(|(id, name, location)| Equipment {
            id: id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
        })
        .collect();

        let checklist_specs = [
            ("sp_01", "Abnormal Sound"),
            ("sp_02", "Guard all"),
            ("sp_03", "Condition of Gear box"),
            ("sp_04", "V belt/ chain/coupling condition"),
            ("sp_05", "Vibration"),
            ("sp_06", "Bearing/Temp/Abnormality"),
            ("sp_07", "Base plate J bolt"),
            ("sp_08", "Condition of belt"),
            ("sp_09", "Condition of roller"),
            ("sp_10", "Condition of skirt plate/rubber"),
            ("sp_11", "Oil/Grease level"),
            ("sp_12", "Condition of pulley"),
            ("sp_13", "Condition of Screen/Pan plate"),
            ("sp_14", "Condition of dumping pad"),
            ("sp_15", "Any other issues"),
        ]
        .into_iter()
        .map(|(id, label)| ChecklistSpec {
            id: id.to_string(),
            label: label.to_string(),
        })
        .collect();

        Self {
            equipments,
            checklist_specs,
        }
    }
}

static MASTER: Lazy<Arc<MasterData>> = Lazy::new(|| Arc::new(MasterData::plant_defaults()));

/// Process-wide reference data for the reference deployment
pub fn master_data() -> Arc<MasterData> {
    Arc::clone(&MASTER)
}
