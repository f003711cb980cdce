//! Domain layer: form schema, payload and response types.
//!
//! Pure types with no I/O. Everything here is usable without a terminal or
//! a network connection.

mod disease;
pub mod form;
mod request;
mod response;

pub use disease::DiseaseType;
pub use form::{FieldGroup, FieldSpec, FormState, FORM_SCHEMA};
pub use request::{PredictionRequest, HOSPITAL_UNIT_KEY, SIMULATION_DATE_KEY};
pub use response::{ErrorBody, FollowupPlan, PredictionResponse, SimulationResponse, Staffing};
