//! Readmission API port: the HTTP contract of the prediction backend.
//!
//! This trait abstracts the transport (reqwest) from the application logic
//! so the action flow can be exercised without a server.

use crate::domain::{PredictionRequest, PredictionResponse, SimulationResponse};

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status
    #[error("Server returned {status}: {}", .message.as_deref().unwrap_or("<no error message>"))]
    Server { status: u16, message: Option<String> },

    /// The request never completed (connection refused, reset, timed out)
    #[error("Transport failure: {0}")]
    Transport(String),

    /// A 2xx response whose body could not be read or parsed
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Operations offered by the prediction backend.
///
/// Each method issues exactly one request and never retries.
pub trait ReadmissionApi: Send + Sync {
    /// Score a patient case.
    ///
    /// # Errors
    /// Returns `ApiError::Server` with the backend's `error` text on non-2xx.
    fn predict(&self, payload: &PredictionRequest) -> Result<PredictionResponse, ApiError>;

    /// Project staffing for the date and unit carried in the payload.
    ///
    /// # Errors
    /// Returns `ApiError::Server` with the backend's `error` text on non-2xx.
    fn simulate_staffing(&self, payload: &PredictionRequest)
        -> Result<SimulationResponse, ApiError>;

    /// Render the PDF report for a patient case.
    ///
    /// # Errors
    /// Returns `ApiError::Server` with the backend's `error` text on non-2xx.
    fn report(&self, payload: &PredictionRequest) -> Result<Vec<u8>, ApiError>;
}
