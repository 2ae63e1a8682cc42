//! Inspection form state machine (operator session)
//!
//! Accumulates checklist answers per equipment, validates them, and packages
//! one complete report for submission. Answers live only in this session:
//! nothing is persisted until `submit` succeeds, and a successful submit
//! clears the form.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::info;

use crate::error::{AppResult, ValidationError};
use crate::models::{
    ChecklistAnswer, CorrectiveAction, MasterData, NewEntry, NewReport, Shift, Status,
};
use crate::store::ReportStore;

/// Free-form update to one answer's detail fields
#[derive(Debug, Clone)]
pub enum AnswerDetail {
    Action(CorrectiveAction),
    Remarks(String),
}

/// Outcome of a gated submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted { report_id: String },
    Cancelled,
}

pub struct InspectionForm {
    master: Arc<MasterData>,
    operator_name: String,
    shift: Shift,
    /// equipmentId -> specId -> answer; insertion-ordered so ids unknown to
    /// the master keep their first-seen position in the submission
    answers: IndexMap<String, IndexMap<String, ChecklistAnswer>>,
    /// Exclusive accordion: at most one equipment panel open
    active_panel: Option<String>,
}

impl InspectionForm {
    pub fn new(master: Arc<MasterData>) -> Self {
        Self {
            master,
            operator_name: String::new(),
            shift: Shift::Morning,
            answers: IndexMap::new(),
            active_panel: None,
        }
    }

    pub fn operator_name(&self) -> &str {
        &self.operator_name
    }

    pub fn set_operator_name(&mut self, name: impl Into<String>) {
        self.operator_name = name.into();
    }

    pub fn shift(&self) -> Shift {
        self.shift
    }

    pub fn set_shift(&mut self, shift: Shift) {
        self.shift = shift;
    }

    /// Write or overwrite the status of one (equipment, spec) answer.
    /// Always succeeds; the OK-clears-details invariant is enforced by
    /// `ChecklistAnswer::set_status`.
    pub fn set_status(&mut self, equipment_id: &str, spec_id: &str, status: Status) {
        let answer = self
            .answers
            .entry(equipment_id.to_string())
            .or_default()
            .entry(spec_id.to_string())
            .or_insert_with(ChecklistAnswer::ok);
        answer.set_status(status);
    }

    /// Update the action or remarks of an answer. If no answer exists for
    /// the pair yet, a "Not OK" answer is assumed to be in progress and
    /// created first, so a status-less record can never exist.
    pub fn set_detail(&mut self, equipment_id: &str, spec_id: &str, detail: AnswerDetail) {
        let answer = self
            .answers
            .entry(equipment_id.to_string())
            .or_default()
            .entry(spec_id.to_string())
            .or_insert_with(ChecklistAnswer::not_ok);
        match detail {
            AnswerDetail::Action(action) => answer.action = Some(action),
            AnswerDetail::Remarks(remarks) => answer.remarks = remarks,
        }
    }

    pub fn answer(&self, equipment_id: &str, spec_id: &str) -> Option<&ChecklistAnswer> {
        self.answers.get(equipment_id)?.get(spec_id)
    }

    /// Number of specs answered for this equipment
    pub fn answered_count(&self, equipment_id: &str) -> usize {
        self.answers.get(equipment_id).map_or(0, IndexMap::len)
    }

    pub fn is_complete(&self, equipment_id: &str) -> bool {
        self.answered_count(equipment_id) == self.master.spec_count()
    }

    /// Expand the given panel, collapsing any other; re-invoking on the open
    /// panel collapses it.
    pub fn toggle_panel(&mut self, equipment_id: &str) {
        if self.active_panel.as_deref() == Some(equipment_id) {
            self.active_panel = None;
        } else {
            self.active_panel = Some(equipment_id.to_string());
        }
    }

    pub fn active_panel(&self) -> Option<&str> {
        self.active_panel.as_deref()
    }

    /// Advisory validation run before a per-equipment save
    pub fn validate_equipment(&self, equipment_id: &str) -> Result<(), ValidationError> {
        if self.operator_name.trim().is_empty() {
            return Err(ValidationError::MissingOperatorName);
        }

        let filled = self.answered_count(equipment_id);
        let total = self.master.spec_count();
        if filled < total {
            return Err(ValidationError::IncompleteChecklist {
                equipment: self.master.equipment_name(equipment_id),
                filled,
                total,
            });
        }

        let missing_remarks = self
            .answers
            .get(equipment_id)
            .map_or(false, |specs| {
                specs.values().any(|a| a.is_issue() && a.remarks.is_empty())
            });
        if missing_remarks {
            return Err(ValidationError::MissingRemarks {
                equipment: self.master.equipment_name(equipment_id),
            });
        }

        Ok(())
    }

    /// Per-equipment save: validates, then collapses the open panel. With no
    /// incremental persistence this records nothing remotely; it exists so
    /// the operator gets a completeness check per equipment.
    pub fn save_equipment(&mut self, equipment_id: &str) -> Result<(), ValidationError> {
        self.validate_equipment(equipment_id)?;
        self.active_panel = None;
        Ok(())
    }

    /// Flatten the answers into one submission payload: equipment in
    /// master-list order, specs in master-list order within each, ids the
    /// master does not know appended afterwards in first-seen order under
    /// their raw id. Reference lookups never fail.
    pub fn build_submission(&self) -> Result<NewReport, ValidationError> {
        if self.operator_name.trim().is_empty() {
            return Err(ValidationError::MissingOperatorName);
        }
        if self.answers.is_empty() {
            return Err(ValidationError::EmptyReport);
        }

        let mut equipment_order: Vec<&str> = self
            .master
            .equipments
            .iter()
            .map(|e| e.id.as_str())
            .filter(|id| self.answers.contains_key(*id))
            .collect();
        equipment_order.extend(
            self.answers
                .keys()
                .map(String::as_str)
                .filter(|id| self.master.find_equipment(id).is_none()),
        );

        let mut checklist = Vec::new();
        for equipment_id in equipment_order {
            let Some(specs) = self.answers.get(equipment_id) else {
                continue;
            };
            let equipment_name = self.master.equipment_name(equipment_id);

            let mut spec_order: Vec<&str> = self
                .master
                .checklist_specs
                .iter()
                .map(|s| s.id.as_str())
                .filter(|id| specs.contains_key(*id))
                .collect();
            spec_order.extend(
                specs
                    .keys()
                    .map(String::as_str)
                    .filter(|id| self.master.find_spec(id).is_none()),
            );

            for spec_id in spec_order {
                let Some(answer) = specs.get(spec_id) else {
                    continue;
                };
                checklist.push(NewEntry {
                    equipment_id: equipment_id.to_string(),
                    equipment_name: equipment_name.clone(),
                    spec_id: spec_id.to_string(),
                    spec_name: self.master.spec_label(spec_id),
                    status: answer.status,
                    action: answer.action,
                    remarks: answer.remarks.clone(),
                });
            }
        }

        Ok(NewReport {
            operator_name: self.operator_name.clone(),
            shift: self.shift,
            checklist,
        })
    }

    /// Submit the daily report through the confirmation gate.
    ///
    /// A declined gate is a no-op. On store success the form is reset
    /// (answers, operator name, open panel; the shift selection survives).
    /// On any failure local state is left untouched so the operator can
    /// retry; transport and server failures surface as distinct errors.
    pub async fn submit<F>(
        &mut self,
        store: &dyn ReportStore,
        confirm: F,
    ) -> AppResult<SubmitOutcome>
    where
        F: FnOnce(&NewReport) -> bool,
    {
        let payload = self.build_submission()?;
        if !confirm(&payload) {
            return Ok(SubmitOutcome::Cancelled);
        }

        let report_id = store.submit_report(&payload).await?;
        info!(report_id = %report_id, entries = payload.checklist.len(), "daily report submitted");

        self.answers.clear();
        self.operator_name.clear();
        self.active_panel = None;

        Ok(SubmitOutcome::Submitted { report_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChecklistSpec, Equipment};
    use crate::store::{MockReportStore, StoreError};

    fn small_master() -> Arc<MasterData> {
        Arc::new(MasterData {
            equipments: vec![
                Equipment {
                    id: "eq_01".to_string(),
                    name: "Conveyor".to_string(),
                    location: "Old Plant".to_string(),
                },
                Equipment {
                    id: "eq_02".to_string(),
                    name: "Crusher".to_string(),
                    location: "New Plant".to_string(),
                },
            ],
            checklist_specs: vec![
                ChecklistSpec {
                    id: "sp_01".to_string(),
                    label: "Abnormal Sound".to_string(),
                },
                ChecklistSpec {
                    id: "sp_02".to_string(),
                    label: "Guard all".to_string(),
                },
                ChecklistSpec {
                    id: "sp_03".to_string(),
                    label: "Oil level".to_string(),
                },
            ],
        })
    }

    fn answer_all_ok(form: &mut InspectionForm, equipment_id: &str) {
        for spec in ["sp_01", "sp_02", "sp_03"] {
            form.set_status(equipment_id, spec, Status::Ok);
        }
    }

    #[test]
    fn reverting_to_ok_clears_action_and_remarks() {
        let mut form = InspectionForm::new(small_master());
        form.set_status("eq_01", "sp_01", Status::NotOk);
        form.set_detail(
            "eq_01",
            "sp_01",
            AnswerDetail::Remarks("loose bolt".to_string()),
        );
        form.set_status("eq_01", "sp_01", Status::Ok);

        let answer = form.answer("eq_01", "sp_01").unwrap();
        assert_eq!(answer.status, Status::Ok);
        assert!(answer.action.is_none());
        assert!(answer.remarks.is_empty());
    }

    #[test]
    fn not_ok_defaults_action_to_repair() {
        let mut form = InspectionForm::new(small_master());
        form.set_status("eq_01", "sp_01", Status::NotOk);
        assert_eq!(
            form.answer("eq_01", "sp_01").unwrap().action,
            Some(CorrectiveAction::Repair)
        );
    }

    #[test]
    fn set_detail_on_unanswered_pair_creates_not_ok() {
        let mut form = InspectionForm::new(small_master());
        form.set_detail(
            "eq_01",
            "sp_02",
            AnswerDetail::Action(CorrectiveAction::Replace),
        );
        let answer = form.answer("eq_01", "sp_02").unwrap();
        assert_eq!(answer.status, Status::NotOk);
        assert_eq!(answer.action, Some(CorrectiveAction::Replace));
    }

    #[test]
    fn toggle_panel_is_an_exclusive_accordion() {
        let mut form = InspectionForm::new(small_master());
        assert_eq!(form.active_panel(), None);

        form.toggle_panel("eq_01");
        assert_eq!(form.active_panel(), Some("eq_01"));

        form.toggle_panel("eq_02");
        assert_eq!(form.active_panel(), Some("eq_02"));

        form.toggle_panel("eq_02");
        assert_eq!(form.active_panel(), None);
    }

    #[test]
    fn validate_requires_operator_name_first() {
        let mut form = InspectionForm::new(small_master());
        answer_all_ok(&mut form, "eq_01");
        assert_eq!(
            form.validate_equipment("eq_01"),
            Err(ValidationError::MissingOperatorName)
        );
    }

    #[test]
    fn validate_flags_incomplete_checklist() {
        let mut form = InspectionForm::new(small_master());
        form.set_operator_name("Raj Kumar");
        form.set_status("eq_01", "sp_01", Status::Ok);
        assert_eq!(
            form.validate_equipment("eq_01"),
            Err(ValidationError::IncompleteChecklist {
                equipment: "Conveyor".to_string(),
                filled: 1,
                total: 3,
            })
        );
    }

    #[test]
    fn validate_succeeds_iff_issues_have_remarks() {
        let mut form = InspectionForm::new(small_master());
        form.set_operator_name("Raj Kumar");
        answer_all_ok(&mut form, "eq_01");
        form.set_status("eq_01", "sp_02", Status::NotOk);

        assert_eq!(
            form.validate_equipment("eq_01"),
            Err(ValidationError::MissingRemarks {
                equipment: "Conveyor".to_string(),
            })
        );

        form.set_detail(
            "eq_01",
            "sp_02",
            AnswerDetail::Remarks("guard missing".to_string()),
        );
        assert_eq!(form.validate_equipment("eq_01"), Ok(()));
    }

    #[test]
    fn save_equipment_collapses_the_open_panel() {
        let mut form = InspectionForm::new(small_master());
        form.set_operator_name("Raj Kumar");
        form.toggle_panel("eq_01");
        answer_all_ok(&mut form, "eq_01");

        form.save_equipment("eq_01").unwrap();
        assert_eq!(form.active_panel(), None);
    }

    #[test]
    fn build_submission_orders_by_master_lists() {
        let mut form = InspectionForm::new(small_master());
        form.set_operator_name("Raj Kumar");
        // Answered out of master order on purpose
        form.set_status("eq_02", "sp_03", Status::Ok);
        form.set_status("eq_02", "sp_01", Status::Ok);
        form.set_status("eq_01", "sp_02", Status::Ok);

        let payload = form.build_submission().unwrap();
        assert_eq!(payload.checklist.len(), 3);
        let pairs: Vec<(&str, &str)> = payload
            .checklist
            .iter()
            .map(|e| (e.equipment_id.as_str(), e.spec_id.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("eq_01", "sp_02"), ("eq_02", "sp_01"), ("eq_02", "sp_03")]
        );
        assert_eq!(payload.checklist[0].equipment_name, "Conveyor");
        assert_eq!(payload.checklist[0].spec_name, "Guard all");
    }

    #[test]
    fn build_submission_falls_back_to_raw_ids() {
        let mut form = InspectionForm::new(small_master());
        form.set_operator_name("Raj Kumar");
        form.set_status("eq_01", "sp_01", Status::Ok);
        form.set_status("eq_99", "sp_77", Status::Ok);

        let payload = form.build_submission().unwrap();
        assert_eq!(payload.checklist.len(), 2);
        // Unknown ids come last, named by their raw id
        let last = &payload.checklist[1];
        assert_eq!(last.equipment_id, "eq_99");
        assert_eq!(last.equipment_name, "eq_99");
        assert_eq!(last.spec_name, "sp_77");
    }

    #[test]
    fn build_submission_rejects_empty_form() {
        let mut form = InspectionForm::new(small_master());
        assert_eq!(
            form.build_submission().unwrap_err(),
            ValidationError::MissingOperatorName
        );
        form.set_operator_name("Raj Kumar");
        assert_eq!(
            form.build_submission().unwrap_err(),
            ValidationError::EmptyReport
        );
    }

    #[test]
    fn full_checklist_all_ok_yields_empty_details() {
        let master = crate::models::reference::master_data();
        let mut form = InspectionForm::new(Arc::clone(&master));
        form.set_operator_name("Raj Kumar");
        for spec in &master.checklist_specs {
            form.set_status("eq_01", &spec.id, Status::Ok);
        }

        assert!(form.is_complete("eq_01"));
        let payload = form.build_submission().unwrap();
        assert_eq!(payload.checklist.len(), 15);
        assert!(payload
            .checklist
            .iter()
            .all(|e| e.action.is_none() && e.remarks.is_empty()));
    }

    #[tokio::test]
    async fn submit_resets_form_on_success() {
        let mut store = MockReportStore::new();
        store
            .expect_submit_report()
            .times(1)
            .returning(|_| Ok("rep_42".to_string()));

        let mut form = InspectionForm::new(small_master());
        form.set_operator_name("Raj Kumar");
        form.set_shift(Shift::Night);
        form.toggle_panel("eq_01");
        answer_all_ok(&mut form, "eq_01");

        let outcome = form.submit(&store, |_| true).await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Submitted {
                report_id: "rep_42".to_string()
            }
        );
        assert!(form.operator_name().is_empty());
        assert_eq!(form.answered_count("eq_01"), 0);
        assert_eq!(form.active_panel(), None);
        // shift selection survives a submit
        assert_eq!(form.shift(), Shift::Night);
    }

    #[tokio::test]
    async fn declined_confirmation_sends_nothing() {
        let store = MockReportStore::new();

        let mut form = InspectionForm::new(small_master());
        form.set_operator_name("Raj Kumar");
        answer_all_ok(&mut form, "eq_01");

        let outcome = form.submit(&store, |_| false).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Cancelled);
        assert_eq!(form.answered_count("eq_01"), 3);
    }

    #[tokio::test]
    async fn failed_submit_leaves_state_untouched() {
        let mut store = MockReportStore::new();
        store.expect_submit_report().times(1).returning(|_| {
            Err(StoreError::Server {
                status: 422,
                detail: "shift already reported".to_string(),
            })
        });

        let mut form = InspectionForm::new(small_master());
        form.set_operator_name("Raj Kumar");
        answer_all_ok(&mut form, "eq_01");

        let err = form.submit(&store, |_| true).await.unwrap_err();
        match err {
            crate::error::AppError::Server { status, detail } => {
                assert_eq!(status, 422);
                assert_eq!(detail, "shift already reported");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(form.operator_name(), "Raj Kumar");
        assert_eq!(form.answered_count("eq_01"), 3);
    }
}
