//! Action dispatcher: plans a backend call from the user's intent.
//!
//! Planning is a pure function of the form contents and the stored payload.
//! It runs every precondition check, so a refused action never reaches the
//! network.

use std::fmt;

use crate::domain::{FormState, PredictionRequest};

use super::error::ActionError;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Predict,
    Simulate,
    Report,
}

impl Intent {
    /// Prompt for a non-2xx response without an error message.
    #[must_use]
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::Predict => "Prediction failed",
            Self::Simulate => "Simulation failed",
            Self::Report => "Failed to generate report",
        }
    }

    /// Prompt for a failed or unreadable exchange.
    #[must_use]
    pub fn transport_message(&self) -> &'static str {
        match self {
            Self::Predict => "Server error while predicting.",
            Self::Simulate => "Error running staffing simulation.",
            Self::Report => "Error generating PDF.",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Predict => "predict",
            Self::Simulate => "simulate",
            Self::Report => "report",
        };
        f.write_str(s)
    }
}

/// A backend call ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedCall {
    Predict(PredictionRequest),
    Simulate(PredictionRequest),
    Report(PredictionRequest),
}

impl PlannedCall {
    #[must_use]
    pub fn intent(&self) -> Intent {
        match self {
            Self::Predict(_) => Intent::Predict,
            Self::Simulate(_) => Intent::Simulate,
            Self::Report(_) => Intent::Report,
        }
    }

    #[must_use]
    pub fn payload(&self) -> &PredictionRequest {
        match self {
            Self::Predict(p) | Self::Simulate(p) | Self::Report(p) => p,
        }
    }
}

/// Result of planning: the call plus the stored-payload update to apply
/// before sending it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub call: PlannedCall,
    pub stored_update: Option<PredictionRequest>,
}

/// Plan the backend call for `intent`.
///
/// - Predict builds a fresh payload from the form. The stored payload is only
///   replaced once that prediction succeeds.
/// - Simulate needs a stored payload and both simulation inputs; it merges
///   the inputs into the stored payload and sends the result.
/// - Report needs a stored payload and sends it unchanged.
///
/// # Errors
/// Returns `ActionError::NoPrediction` or `ActionError::MissingSimulationInputs`
/// when a precondition fails.
pub fn plan(
    intent: Intent,
    form: &FormState,
    stored: Option<&PredictionRequest>,
) -> Result<Plan, ActionError> {
    match intent {
        Intent::Predict => Ok(Plan {
            call: PlannedCall::Predict(PredictionRequest::from_form(form)),
            stored_update: None,
        }),
        Intent::Simulate => {
            let stored = stored.ok_or(ActionError::NoPrediction)?;
            let (date, unit) = form
                .simulation_inputs()
                .ok_or(ActionError::MissingSimulationInputs)?;

            let mut merged = stored.clone();
            merged.merge_simulation(date, unit);
            Ok(Plan {
                call: PlannedCall::Simulate(merged.clone()),
                stored_update: Some(merged),
            })
        }
        Intent::Report => {
            let stored = stored.ok_or(ActionError::NoPrediction)?;
            Ok(Plan {
                call: PlannedCall::Report(stored.clone()),
                stored_update: None,
            })
        }
    }
}
