//! Report aggregation engine
//!
//! Pure functions that turn a report's flat entry sequence into
//! equipment-grouped views and derived counts. Counts are computed on
//! demand and never cached across mutations.

use indexmap::IndexMap;

use crate::models::{InspectionEntry, Priority, Status};

/// Entries of one report grouped under their equipment
#[derive(Debug, Clone)]
pub struct EquipmentGroup {
    pub equipment_id: String,
    pub equipment_name: String,
    pub equipment_remarks: Option<String>,
    pub specs: Vec<InspectionEntry>,
}

impl EquipmentGroup {
    /// "Not OK" entries within this group
    pub fn issue_count(&self) -> usize {
        issue_count(&self.specs)
    }

    /// P1-flagged entries within this group
    pub fn p1_count(&self) -> usize {
        p1_count(&self.specs)
    }
}

/// Group a report's entries by equipment, preserving the first-seen order of
/// equipment ids and the input order of entries within each group. Name and
/// remarks come from the group's first entry.
pub fn group_entries(entries: &[InspectionEntry]) -> Vec<EquipmentGroup> {
    let mut groups: IndexMap<String, EquipmentGroup> = IndexMap::new();
    for entry in entries {
        groups
            .entry(entry.equipment_id.clone())
            .or_insert_with(|| EquipmentGroup {
                equipment_id: entry.equipment_id.clone(),
                equipment_name: entry.equipment_name.clone(),
                equipment_remarks: entry.equipment_remarks.clone(),
                specs: Vec::new(),
            })
            .specs
            .push(entry.clone());
    }
    groups.into_values().collect()
}

/// Same grouping with the manager display sort applied within each group:
/// "Not OK" entries first, then "OK", ties keeping their input order.
pub fn group_entries_sorted(entries: &[InspectionEntry]) -> Vec<EquipmentGroup> {
    let mut groups = group_entries(entries);
    for group in &mut groups {
        sort_issues_first(&mut group.specs);
    }
    groups
}

/// Stable in-place sort putting "Not OK" before "OK"
pub fn sort_issues_first(entries: &mut [InspectionEntry]) {
    entries.sort_by_key(|e| match e.status {
        Status::NotOk => 0,
        Status::Ok => 1,
    });
}

/// Count of "Not OK" entries
pub fn issue_count(entries: &[InspectionEntry]) -> usize {
    entries.iter().filter(|e| e.is_issue()).count()
}

/// Count of entries flagged P1
pub fn p1_count(entries: &[InspectionEntry]) -> usize {
    entries
        .iter()
        .filter(|e| e.priority == Some(Priority::P1))
        .count()
}
