//! Readmission service: runs planned calls against the ports.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{FormState, PredictionRequest, PredictionResponse, SimulationResponse};
use crate::ports::{ApiError, ReadmissionApi, ReportSink, REPORT_FILE_NAME};

use super::dispatch::{plan, Intent, PlannedCall};
use super::error::{ActionError, Prompt};
use super::session::Session;

/// What a successful action produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Predicted {
        /// The payload that was scored, stored for later actions
        payload: PredictionRequest,
        response: PredictionResponse,
    },
    Simulated(SimulationResponse),
    ReportSaved(PathBuf),
}

/// Executes backend calls and delivers reports.
pub struct ReadmissionService<A, S>
where
    A: ReadmissionApi,
    S: ReportSink,
{
    api: Arc<A>,
    sink: Arc<S>,
}

impl<A, S> ReadmissionService<A, S>
where
    A: ReadmissionApi,
    S: ReportSink,
{
    pub fn new(api: Arc<A>, sink: Arc<S>) -> Self {
        Self { api, sink }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Issue the single backend call of a planned action.
    ///
    /// # Errors
    /// Returns `ActionError::Server` for non-2xx answers,
    /// `ActionError::Transport` for failed or unreadable exchanges and
    /// `ActionError::Sink` when a report cannot be stored.
    pub fn execute(&self, call: PlannedCall) -> Result<ActionOutcome, ActionError> {
        let intent = call.intent();
        tracing::info!(action = %intent, "Calling backend");

        let outcome = match call {
            PlannedCall::Predict(payload) => {
                let response = self.api.predict(&payload).map_err(|e| api_error(intent, e))?;
                tracing::info!(
                    risk = response.risk_label.as_deref().unwrap_or("-"),
                    probability = response.readmission_probability,
                    "Prediction complete"
                );
                ActionOutcome::Predicted { payload, response }
            }
            PlannedCall::Simulate(payload) => {
                let response = self
                    .api
                    .simulate_staffing(&payload)
                    .map_err(|e| api_error(intent, e))?;
                tracing::info!(
                    unit = %response.hospital_unit,
                    expected = response.staffing.expected_readmissions,
                    "Staffing simulation complete"
                );
                ActionOutcome::Simulated(response)
            }
            PlannedCall::Report(payload) => {
                let bytes = self.api.report(&payload).map_err(|e| api_error(intent, e))?;
                let path = self.sink.save(REPORT_FILE_NAME, &bytes).map_err(|e| {
                    tracing::error!("Failed to save report: {}", e);
                    ActionError::Sink(e.to_string())
                })?;
                ActionOutcome::ReportSaved(path)
            }
        };

        Ok(outcome)
    }

    /// Plan, execute and apply one action synchronously.
    ///
    /// Returns the prompt to show, if any. Precondition failures return
    /// before the API is touched.
    pub fn dispatch(&self, intent: Intent, form: &FormState, session: &mut Session) -> Option<Prompt> {
        let plan = match plan(intent, form, session.last_payload()) {
            Ok(plan) => plan,
            Err(e) => return Some(Prompt::from(&e)),
        };
        let call = session.begin(plan);
        match self.execute(call) {
            Ok(outcome) => session.apply(outcome),
            Err(e) => Some(Prompt::from(&e)),
        }
    }
}

fn api_error(intent: Intent, err: ApiError) -> ActionError {
    match err {
        ApiError::Server { status, message } => ActionError::Server {
            intent,
            status,
            message,
        },
        ApiError::Transport(detail) | ApiError::Decode(detail) => {
            tracing::error!(action = %intent, "Backend call failed: {}", detail);
            ActionError::Transport { intent, detail }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FsReportSink;
    use crate::domain::{Staffing, HOSPITAL_UNIT_KEY};
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Fake backend that records every call and answers from a script.
    #[derive(Default)]
    struct RecordingApi {
        calls: Mutex<Vec<(Intent, PredictionRequest)>>,
        fail_with: Option<ApiError>,
    }

    impl RecordingApi {
        fn failing(err: ApiError) -> Self {
            Self {
                fail_with: Some(err),
                ..Default::default()
            }
        }

        fn record(&self, intent: Intent, payload: &PredictionRequest) -> Result<(), ApiError> {
            self.calls.lock().expect("lock").push((intent, payload.clone()));
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<(Intent, PredictionRequest)> {
            self.calls.lock().expect("lock").clone()
        }
    }

    impl ReadmissionApi for RecordingApi {
        fn predict(&self, payload: &PredictionRequest) -> Result<PredictionResponse, ApiError> {
            self.record(Intent::Predict, payload)?;
            Ok(PredictionResponse {
                disease_type: Some("Diabetes".to_string()),
                prediction: Some(serde_json::json!("Readmitted")),
                readmission_probability: Some(0.1234),
                risk_label: Some("Low".to_string()),
                followup_plan: None,
            })
        }

        fn simulate_staffing(
            &self,
            payload: &PredictionRequest,
        ) -> Result<SimulationResponse, ApiError> {
            self.record(Intent::Simulate, payload)?;
            Ok(SimulationResponse {
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

        fn report(&self, payload: &PredictionRequest) -> Result<Vec<u8>, ApiError> {
            self.record(Intent::Report, payload)?;
            Ok(b"%PDF-1.7".to_vec())
        }
    }

    fn service(api: RecordingApi) -> (ReadmissionService<RecordingApi, FsReportSink>, Arc<RecordingApi>, tempfile::TempDir) {
        let dir = tempdir().expect("tempdir");
        let api = Arc::new(api);
        let sink = Arc::new(FsReportSink::new(dir.path()));
        (ReadmissionService::new(api.clone(), sink), api, dir)
    }

    #[test]
    fn test_preconditions_issue_no_calls() {
        let (service, api, _dir) = service(RecordingApi::default());
        let mut session = Session::default();
        let mut form = FormState::default();
        form.load_sample_data();

        let prompt = service.dispatch(Intent::Simulate, &form, &mut session);
        assert_eq!(prompt, Some(Prompt::error("Run a prediction first.")));
        let prompt = service.dispatch(Intent::Report, &form, &mut session);
        assert_eq!(prompt, Some(Prompt::error("Run a prediction first.")));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_missing_simulation_inputs_issue_no_call() {
        let (service, api, _dir) = service(RecordingApi::default());
        let mut session = Session::default();
        let form = FormState::default();

        assert_eq!(service.dispatch(Intent::Predict, &form, &mut session), None);
        let prompt = service.dispatch(Intent::Simulate, &form, &mut session);
        assert_eq!(
            prompt,
            Some(Prompt::error("Please select both Simulation Date and Hospital Unit."))
        );
        assert_eq!(api.calls().len(), 1);
    }

    #[test]
    fn test_full_flow() {
        let (service, api, dir) = service(RecordingApi::default());
        let mut session = Session::default();
        let mut form = FormState::default();
        form.load_sample_data();

        assert_eq!(service.dispatch(Intent::Predict, &form, &mut session), None);
        assert_eq!(session.result().map(|r| r.score.as_str()), Some("0.1234"));

        assert_eq!(service.dispatch(Intent::Simulate, &form, &mut session), None);
        assert_eq!(
            session.simulation(),
            Some("Expected readmissions (on 2026-03-16, ICU): 5. Beds: 10, Nurses: 20, Doctors: 3.")
        );

        let notice = service
            .dispatch(Intent::Report, &form, &mut session)
            .expect("notice");
        assert!(notice.text.contains("readmission_report.pdf"));
        assert!(dir.path().join(REPORT_FILE_NAME).exists());

        let calls = api.calls();
        let intents: Vec<Intent> = calls.iter().map(|(i, _)| *i).collect();
        assert_eq!(intents, [Intent::Predict, Intent::Simulate, Intent::Report]);
        // The report carries the payload as mutated by the simulation.
        assert!(calls[2].1.contains(HOSPITAL_UNIT_KEY));
    }

    #[test]
    fn test_failed_prediction_does_not_store_payload() {
        let (service, _api, _dir) = service(RecordingApi::failing(ApiError::Server {
            status: 400,
            message: Some("X".to_string()),
        }));
        let mut session = Session::default();
        let form = FormState::default();

        let prompt = service.dispatch(Intent::Predict, &form, &mut session);
        assert_eq!(prompt, Some(Prompt::error("X")));
        assert!(session.last_payload().is_none());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_server_error_without_message_uses_fallback() {
        let (service, _api, _dir) = service(RecordingApi::failing(ApiError::Server {
            status: 500,
            message: None,
        }));
        let mut session = Session::default();

        let prompt = service.dispatch(Intent::Predict, &FormState::default(), &mut session);
        assert_eq!(prompt, Some(Prompt::error("Prediction failed")));
    }

    #[test]
    fn test_transport_failure_uses_generic_prompt() {
        let (service, _api, _dir) =
            service(RecordingApi::failing(ApiError::Transport("refused".to_string())));
        let call = PlannedCall::Report(PredictionRequest::default());

        let err = service.execute(call).expect_err("should fail");
        assert_eq!(Prompt::from(&err).text, "Error generating PDF.");
    }
}
