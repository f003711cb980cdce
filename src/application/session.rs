//! Session state: everything the client remembers between actions.
//!
//! Lives only in memory and is lost when the program exits.

use std::path::{Path, PathBuf};

use crate::domain::PredictionRequest;

use super::charts::ChartBoard;
use super::dispatch::{Plan, PlannedCall};
use super::error::Prompt;
use super::render::{simulation_summary, ResultView};
use super::service::ActionOutcome;

/// Client-side state shared by the three actions.
#[derive(Debug, Default)]
pub struct Session {
    last_payload: Option<PredictionRequest>,
    result: Option<ResultView>,
    simulation: Option<String>,
    charts: ChartBoard,
    last_report: Option<PathBuf>,
}

impl Session {
    /// Payload of the last successful prediction (including any merged
    /// simulation inputs).
    #[must_use]
    pub fn last_payload(&self) -> Option<&PredictionRequest> {
        self.last_payload.as_ref()
    }

    /// Mutable access to the stored payload.
    pub fn last_payload_mut(&mut self) -> Option<&mut PredictionRequest> {
        self.last_payload.as_mut()
    }

    /// Apply the plan's stored-payload update and hand back the call to run.
    pub fn begin(&mut self, plan: Plan) -> PlannedCall {
        if let Some(update) = plan.stored_update {
            self.last_payload = Some(update);
        }
        plan.call
    }

    /// Fold a completed action into the session.
    ///
    /// Returns a notice for the user when the outcome warrants one.
    pub fn apply(&mut self, outcome: ActionOutcome) -> Option<Prompt> {
        match outcome {
            ActionOutcome::Predicted { payload, response } => {
                let view = ResultView::from_response(&response);
                self.charts.draw_risk(view.probability);
                self.result = Some(view);
                self.simulation = None;
                self.last_payload = Some(payload);
                None
            }
            ActionOutcome::Simulated(response) => {
                self.simulation = Some(simulation_summary(&response));
                self.charts.draw_staffing(Some(&response.staffing));
                None
            }
            ActionOutcome::ReportSaved(path) => {
                let notice = Prompt::info(format!("Report saved to {}", path.display()));
                self.last_report = Some(path);
                Some(notice)
            }
        }
    }

    /// Wipe the stored payload's identity values and forget it.
    pub fn clear_sensitive(&mut self) {
        if let Some(payload) = self.last_payload_mut() {
            payload.wipe();
        }
        self.last_payload = None;
    }

    /// Prediction result, present once a prediction has succeeded.
    #[must_use]
    pub fn result(&self) -> Option<&ResultView> {
        self.result.as_ref()
    }

    /// Staffing summary, hidden again by every new prediction.
    #[must_use]
    pub fn simulation(&self) -> Option<&str> {
        self.simulation.as_deref()
    }

    #[must_use]
    pub fn charts(&self) -> &ChartBoard {
        &self.charts
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&Path> {
        self.last_report.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dispatch::{plan, Intent};
    use crate::domain::{
        FormState, PredictionResponse, SimulationResponse, Staffing, SIMULATION_DATE_KEY,
    };

    fn predicted(session: &mut Session, form: &FormState, probability: f64) {
        let payload = PredictionRequest::from_form(form);
        session.apply(ActionOutcome::Predicted {
            payload,
            response: PredictionResponse {
                readmission_probability: Some(probability),
                ..Default::default()
            },
        });
    }

    fn simulated() -> ActionOutcome {
        ActionOutcome::Simulated(SimulationResponse {
            simulation_date: "2026-03-16".to_string(),
            hospital_unit: "ICU".to_string(),
            staffing: Staffing {
                expected_readmissions: 5.0,
                suggested_beds: 10.0,
                suggested_nurses: 20.0,
                suggested_doctors: 3.0,
            },
        })
    }

    #[test]
    fn test_prediction_stores_payload_and_draws_risk() {
        let mut session = Session::default();
        let form = FormState::default();
        predicted(&mut session, &form, 0.1234);

        assert_eq!(session.last_payload(), Some(&PredictionRequest::from_form(&form)));
        assert_eq!(session.result().map(|r| r.score.as_str()), Some("0.1234"));
        let risk = session.charts().risk().chart().expect("risk chart");
        assert_eq!(risk.bars[0].value, 0.1234);
    }

    #[test]
    fn test_new_prediction_hides_simulation() {
        let mut session = Session::default();
        let form = FormState::default();
        predicted(&mut session, &form, 0.3);
        session.apply(simulated());
        assert!(session.simulation().is_some());

        predicted(&mut session, &form, 0.6);
        assert!(session.simulation().is_none());
        assert_eq!(session.charts().active_instances(), 2);
    }

    #[test]
    fn test_simulation_summary_and_chart() {
        let mut session = Session::default();
        session.apply(simulated());
        let summary = session.simulation().expect("summary");
        for n in ["5", "10", "20", "3"] {
            assert!(summary.contains(n));
        }
        assert!(session.charts().staffing().chart().is_some());
    }

    #[test]
    fn test_begin_applies_simulation_merge() {
        let mut session = Session::default();
        let mut form = FormState::default();
        predicted(&mut session, &form, 0.3);
        form.set_value("simulation_date", "2026-03-16");
        form.set_value("hospital_unit", "ICU");

        let plan = plan(Intent::Simulate, &form, session.last_payload()).expect("plan");
        let call = session.begin(plan);

        assert_eq!(call.intent(), Intent::Simulate);
        assert!(session
            .last_payload()
            .is_some_and(|p| p.contains(SIMULATION_DATE_KEY)));
    }

    #[test]
    fn test_clear_sensitive_forgets_payload() {
        let mut session = Session::default();
        let mut form = FormState::default();
        form.load_sample_data();
        predicted(&mut session, &form, 0.3);
        assert!(session.last_payload().is_some());

        session.clear_sensitive();

        assert!(session.last_payload().is_none());
        assert!(session.result().is_some());
    }

    #[test]
    fn test_report_saved_notice() {
        let mut session = Session::default();
        let notice = session
            .apply(ActionOutcome::ReportSaved(PathBuf::from("/tmp/readmission_report.pdf")))
            .expect("notice");
        assert_eq!(notice.text, "Report saved to /tmp/readmission_report.pdf");
        assert!(session.last_report().is_some());
    }
}
