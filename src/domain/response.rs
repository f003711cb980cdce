//! Response bodies returned by the prediction backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a successful `/api/predict` call.
///
/// Every field is optional on the wire; the renderer substitutes a dash.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub disease_type: Option<String>,

    /// Model output; some deployments send a label, others a class number
    #[serde(default)]
    pub prediction: Option<Value>,

    #[serde(default)]
    pub readmission_probability: Option<f64>,

    #[serde(default)]
    pub risk_label: Option<String>,

    #[serde(default)]
    pub followup_plan: Option<FollowupPlan>,
}

/// Structured follow-up recommendation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowupPlan {
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub schedule: Vec<String>,
    #[serde(default)]
    pub note: String,
}

/// Body of a successful `/api/simulate_staffing` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    #[serde(default)]
    pub simulation_date: String,
    #[serde(default)]
    pub hospital_unit: String,
    pub staffing: Staffing,
}

/// Projected staffing for one unit and day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Staffing {
    pub expected_readmissions: f64,
    pub suggested_beds: f64,
    pub suggested_nurses: f64,
    pub suggested_doctors: f64,
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
