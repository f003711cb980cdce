//! Action errors and the prompts they surface.

use std::fmt;

use super::dispatch::Intent;

/// Why a user action ended without its result.
///
/// Every variant is terminal for the action; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Simulate or report was requested before a successful prediction
    #[error("Run a prediction first.")]
    NoPrediction,

    /// Simulate was requested with a blank date or unit
    #[error("Please select both Simulation Date and Hospital Unit.")]
    MissingSimulationInputs,

    /// The backend answered non-2xx
    #[error("{}", .message.as_deref().unwrap_or(.intent.fallback_message()))]
    Server {
        intent: Intent,
        status: u16,
        message: Option<String>,
    },

    /// The request failed in transit or the response could not be parsed
    #[error("{}", .intent.transport_message())]
    Transport { intent: Intent, detail: String },

    /// The report arrived but could not be stored
    #[error("Could not save report: {0}")]
    Sink(String),
}

impl ActionError {
    /// Whether the action was refused before any request was sent.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NoPrediction | Self::MissingSimulationInputs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptLevel {
    Info,
    Error,
}

/// Blocking message shown to the user until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub level: PromptLevel,
    pub text: String,
}

impl Prompt {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: PromptLevel::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: PromptLevel::Error,
            text: text.into(),
        }
    }
}

impl From<&ActionError> for Prompt {
    fn from(err: &ActionError) -> Self {
        Self::error(err.to_string())
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
