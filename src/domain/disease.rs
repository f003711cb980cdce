//! Disease selector: decides which disease-specific field group is active.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::form::FieldGroup;

/// Condition the readmission model is asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DiseaseType {
    /// Hematology and urine labs are collected
    #[default]
    Diabetes,
    /// ECG and pulse are collected
    Heart,
}

impl DiseaseType {
    /// Selector options in display order. The first one is the default.
    pub const OPTIONS: &'static [&'static str] = &["Diabetes", "Heart"];

    /// Wire/display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::Heart => "Heart",
        }
    }

    /// The disease-specific field group shown while this type is selected.
    #[must_use]
    pub fn field_group(&self) -> FieldGroup {
        match self {
            Self::Diabetes => FieldGroup::Diabetes,
            Self::Heart => FieldGroup::Heart,
        }
    }
}

impl fmt::Display for DiseaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiseaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Diabetes" => Ok(Self::Diabetes),
            "Heart" => Ok(Self::Heart),
            other => Err(format!("Unknown problem type: {other}")),
        }
    }
}
