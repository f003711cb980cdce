//! Background request worker.
//!
//! Each planned call runs on its own short-lived thread so the TUI keeps
//! drawing while the backend answers. All workers report into one channel
//! and the main loop applies results in arrival order: the last response
//! to arrive wins. There is no in-flight guard and no cancellation.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::application::{ActionError, ActionOutcome, Intent, PlannedCall, ReadmissionService};
use crate::ports::{ReadmissionApi, ReportSink};

/// Completion message from a worker.
#[derive(Debug, Clone)]
pub struct WorkerEvent {
    /// Sequence number assigned at spawn time
    pub seq: u64,
    pub intent: Intent,
    pub result: Result<ActionOutcome, ActionError>,
}

/// Spawns workers and collects their results.
pub struct RequestWorkers {
    tx: Sender<WorkerEvent>,
    rx: Receiver<WorkerEvent>,
    next_seq: u64,
    in_flight: usize,
}

impl Default for RequestWorkers {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            next_seq: 0,
            in_flight: 0,
        }
    }
}

impl RequestWorkers {
    /// Run `call` on a background thread.
    ///
    /// Returns the sequence number of the spawned request.
    pub fn spawn<A, S>(&mut self, service: Arc<ReadmissionService<A, S>>, call: PlannedCall) -> u64
    where
        A: ReadmissionApi + 'static,
        S: ReportSink + 'static,
    {
        self.next_seq += 1;
        self.in_flight += 1;
        let seq = self.next_seq;
        let intent = call.intent();
        let tx = self.tx.clone();

        thread::spawn(move || {
            // A panic must still produce an event, or the request stays in flight forever.
            let result = panic::catch_unwind(AssertUnwindSafe(|| service.execute(call)))
                .unwrap_or_else(|_| {
                    tracing::error!(seq, action = %intent, "Request worker panicked");
                    Err(ActionError::Transport {
                        intent,
                        detail: "request worker panicked".to_string(),
                    })
                });
            // The receiver only goes away when the app is shutting down.
            let _ = tx.send(WorkerEvent { seq, intent, result });
        });

        tracing::debug!(seq, action = %intent, "Request dispatched");
        seq
    }

    /// Next finished request, if any (non-blocking).
    pub fn try_recv(&mut self) -> Option<WorkerEvent> {
        let event = self.rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(event)
    }

    /// Number of requests still waiting for an answer.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FsReportSink;
    use crate::domain::{PredictionRequest, PredictionResponse, SimulationResponse};
    use crate::ports::ApiError;
    use std::time::{Duration, Instant};

    struct SlowApi;

    impl ReadmissionApi for SlowApi {
        fn predict(&self, payload: &PredictionRequest) -> Result<PredictionResponse, ApiError> {
            // The first request (flagged in the payload) answers last.
            if payload.contains("slow") {
                thread::sleep(Duration::from_millis(200));
            }
            Ok(PredictionResponse {
                risk_label: payload.get("label").and_then(|v| v.as_str()).map(String::from),
                ..Default::default()
            })
        }

        fn simulate_staffing(&self, _: &PredictionRequest) -> Result<SimulationResponse, ApiError> {
            Err(ApiError::Transport("unused".to_string()))
        }

        fn report(&self, _: &PredictionRequest) -> Result<Vec<u8>, ApiError> {
            Err(ApiError::Transport("unused".to_string()))
        }
    }

    struct PanickingApi;

    impl ReadmissionApi for PanickingApi {
        fn predict(&self, _: &PredictionRequest) -> Result<PredictionResponse, ApiError> {
            panic!("backend client bug");
        }

        fn simulate_staffing(&self, _: &PredictionRequest) -> Result<SimulationResponse, ApiError> {
            panic!("backend client bug");
        }

        fn report(&self, _: &PredictionRequest) -> Result<Vec<u8>, ApiError> {
            panic!("backend client bug");
        }
    }

    fn wait_for(workers: &mut RequestWorkers, n: usize) -> Vec<WorkerEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while events.len() < n && Instant::now() < deadline {
            match workers.try_recv() {
                Some(e) => events.push(e),
                None => thread::sleep(Duration::from_millis(5)),
            }
        }
        events
    }

    #[test]
    fn test_results_arrive_in_completion_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = Arc::new(ReadmissionService::new(
            Arc::new(SlowApi),
            Arc::new(FsReportSink::new(dir.path())),
        ));
        let mut workers = RequestWorkers::default();

        let mut slow = PredictionRequest::default();
        slow.insert("slow", true);
        slow.insert("label", "first");
        let mut fast = PredictionRequest::default();
        fast.insert("label", "second");

        let first = workers.spawn(service.clone(), PlannedCall::Predict(slow));
        let second = workers.spawn(service, PlannedCall::Predict(fast));
        assert_eq!(workers.in_flight(), 2);

        let events = wait_for(&mut workers, 2);
        let order: Vec<u64> = events.iter().map(|e| e.seq).collect();
        assert_eq!(order, [second, first]);
        assert_eq!(workers.in_flight(), 0);
    }

    #[test]
    fn test_panicking_request_still_completes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = Arc::new(ReadmissionService::new(
            Arc::new(PanickingApi),
            Arc::new(FsReportSink::new(dir.path())),
        ));
        let mut workers = RequestWorkers::default();

        let seq = workers.spawn(service, PlannedCall::Simulate(PredictionRequest::default()));
        let events = wait_for(&mut workers, 1);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].seq, seq);
        assert_eq!(events[0].intent, Intent::Simulate);
        assert!(matches!(
            events[0].result,
            Err(ActionError::Transport { intent: Intent::Simulate, .. })
        ));
        assert_eq!(workers.in_flight(), 0);
    }
}
