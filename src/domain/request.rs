//! Prediction Request: the flat JSON mapping sent to the backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zeroize::Zeroize;

use super::disease::DiseaseType;
use super::form::{FieldGroup, FormState, FORM_SCHEMA};

/// Payload key for the staffing simulation date.
pub const SIMULATION_DATE_KEY: &str = "Simulation Date";
/// Payload key for the staffing simulation unit.
pub const HOSPITAL_UNIT_KEY: &str = "Hospital Unit";

/// Flat, insertion-ordered mapping of payload keys to JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionRequest(Map<String, Value>);

impl PredictionRequest {
    /// Build the payload from the visible part of the form.
    ///
    /// Shared fields are always included; of the disease-specific fields only
    /// the group matching the selected problem type is. Simulation inputs are
    /// left out.
    #[must_use]
    pub fn from_form(form: &FormState) -> Self {
        let disease = form.disease().field_group();
        let map = FORM_SCHEMA
            .iter()
            .filter(|spec| spec.group == FieldGroup::Shared || spec.group == disease)
            .map(|spec| (spec.key.to_string(), spec.coerce(form.value(spec.id))))
            .collect();
        Self(map)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Problem type recorded in the payload.
    #[must_use]
    pub fn disease(&self) -> Option<DiseaseType> {
        self.get("Problem Type")?.as_str()?.parse().ok()
    }

    /// Add (or overwrite) the staffing simulation inputs in place.
    pub fn merge_simulation(&mut self, date: &str, unit: &str) {
        self.insert(SIMULATION_DATE_KEY, date);
        self.insert(HOSPITAL_UNIT_KEY, unit);
    }

    /// Zero every string value in place, then drop all entries.
    pub fn wipe(&mut self) {
        for value in self.0.values_mut() {
            if let Value::String(text) = value {
                text.zeroize();
            }
        }
        self.0.clear();
    }
}
