//! Patient form schema and editable form state.
//!
//! Every input the clinician can fill is described once in [`FORM_SCHEMA`]:
//! field id, payload key, coercion rule and blank default. The payload
//! builder and the form view are both driven from this table, so the
//! Diabetes/Heart split is a lookup on [`FieldGroup`] instead of two
//! hand-written code paths.

use serde_json::Value;
use zeroize::Zeroize;

use super::disease::DiseaseType;

/// Which part of the form a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    /// Identity, demographics and vitals, always visible
    Shared,
    /// Hematology and urine labs
    Diabetes,
    /// ECG and pulse
    Heart,
    /// Inputs for the staffing simulation, never part of the prediction payload
    Simulation,
}

/// How the raw input text is turned into a JSON value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coercion {
    /// Sent verbatim as a string
    Text,
    /// Parsed as a number; unparseable input becomes `null`
    Number,
    /// One of a fixed list of options, sent as a string
    Choice(&'static [&'static str]),
}

/// Value substituted when the field is left blank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlankDefault {
    /// Text: empty string. Number: zero.
    None,
    /// Literal text placeholder
    Placeholder(&'static str),
    /// Clinical baseline constant
    Number(f64),
}

/// Placeholder for blank identity fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single form input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub id: &'static str,
    pub key: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub group: FieldGroup,
    pub coercion: Coercion,
    pub blank: BlankDefault,
}

impl FieldSpec {
    /// Convert raw input into the value sent to the backend.
    #[must_use]
    pub fn coerce(&self, raw: &str) -> Value {
        match self.coercion {
            Coercion::Number => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return match self.blank {
                        BlankDefault::Number(n) => number_value(n),
                        _ => number_value(0.0),
                    };
                }
                raw.parse::<f64>().map_or(Value::Null, number_value)
            }
            Coercion::Text | Coercion::Choice(_) => match self.blank {
                BlankDefault::Placeholder(p) if raw.is_empty() => Value::from(p),
                _ => Value::from(raw),
            },
        }
    }

    /// Initial raw value for a fresh form.
    #[must_use]
    pub fn initial_value(&self) -> String {
        match self.coercion {
            Coercion::Choice(options) => options.first().copied().unwrap_or_default().to_string(),
            _ => String::new(),
        }
    }

    fn accepts(&self, c: char) -> bool {
        match self.coercion {
            Coercion::Number => c.is_ascii_digit() || c == '.' || c == '-',
            Coercion::Text => !c.is_control(),
            Coercion::Choice(_) => false,
        }
    }
}

/// Encode a number the way a JSON serializer in a browser would:
/// integral values without a fractional part, non-finite values as `null`.
#[must_use]
pub fn number_value(n: f64) -> Value {
    const MAX_SAFE: f64 = 9_007_199_254_740_992.0;
    if n.fract() == 0.0 && n.abs() < MAX_SAFE {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

const SEX: &[&str] = &["Male", "Female"];
const INSULIN: &[&str] = &["No", "Steady", "Up", "Down"];
const YES_NO: &[&str] = &["Yes", "No"];
const ECG: &[&str] = &["Normal", "Abnormal", "ST-T Abnormality", "LV Hypertrophy"];

const fn shared(
    id: &'static str,
    key: &'static str,
    label: &'static str,
    hint: &'static str,
    coercion: Coercion,
    blank: BlankDefault,
) -> FieldSpec {
    FieldSpec { id, key, label, hint, group: FieldGroup::Shared, coercion, blank }
}

const fn lab(
    group: FieldGroup,
    id: &'static str,
    key: &'static str,
    label: &'static str,
    hint: &'static str,
    coercion: Coercion,
    blank: BlankDefault,
) -> FieldSpec {
    FieldSpec { id, key, label, hint, group, coercion, blank }
}

/// The complete form, in display order.
pub const FORM_SCHEMA: &[FieldSpec] = &[
    shared("patient_id", "Patient ID", "Patient ID", "optional", Coercion::Text, BlankDefault::Placeholder(NOT_AVAILABLE)),
    shared("patient_name", "Patient Name", "Patient Name", "optional", Coercion::Text, BlankDefault::Placeholder(NOT_AVAILABLE)),
    shared("admission_date", "Admission Date", "Admission Date", "YYYY-MM-DD", Coercion::Text, BlankDefault::Placeholder(NOT_AVAILABLE)),
    shared("discharge_date", "Discharge Date", "Discharge Date", "YYYY-MM-DD", Coercion::Text, BlankDefault::Placeholder(NOT_AVAILABLE)),
    shared("problem_type", "Problem Type", "Problem Type", "←/→ to change", Coercion::Choice(DiseaseType::OPTIONS), BlankDefault::None),
    shared("age", "Age", "Age", "years", Coercion::Number, BlankDefault::None),
    shared("sex", "Sex", "Sex", "←/→ to change", Coercion::Choice(SEX), BlankDefault::None),
    shared("weight", "Weight", "Weight", "kg", Coercion::Number, BlankDefault::None),
    shared("bp", "Blood Pressure", "Blood Pressure", "e.g. 120/80", Coercion::Text, BlankDefault::None),
    shared("cholesterol", "Cholesterol", "Cholesterol", "mg/dL", Coercion::Number, BlankDefault::None),
    shared("insulin", "Insulin", "Insulin", "←/→ to change", Coercion::Choice(INSULIN), BlankDefault::None),
    shared("diabetics", "Diabetics", "Diabetic", "←/→ to change", Coercion::Choice(YES_NO), BlankDefault::None),
    shared("aqi", "air_quality_index", "Air Quality Index", "AQI", Coercion::Number, BlankDefault::None),
    shared("events", "social_event_count", "Social Events", "count", Coercion::Number, BlankDefault::None),
    lab(FieldGroup::Diabetes, "hb", "Hemoglobin (g/dL)", "Hemoglobin", "g/dL (blank: 13.5)", Coercion::Number, BlankDefault::Number(13.5)),
    lab(FieldGroup::Diabetes, "wbc", "WBC Count (10^9/L)", "WBC Count", "10^9/L (blank: 7.0)", Coercion::Number, BlankDefault::Number(7.0)),
    lab(FieldGroup::Diabetes, "plt_count", "Platelet Count (10^9/L)", "Platelet Count", "10^9/L (blank: 250)", Coercion::Number, BlankDefault::Number(250.0)),
    lab(FieldGroup::Diabetes, "urine_protein", "Urine Protein (mg/dL)", "Urine Protein", "mg/dL (blank: 10)", Coercion::Number, BlankDefault::Number(10.0)),
    lab(FieldGroup::Diabetes, "urine_glucose", "Urine Glucose (mg/dL)", "Urine Glucose", "mg/dL (blank: 5)", Coercion::Number, BlankDefault::Number(5.0)),
    lab(FieldGroup::Heart, "ecg", "ECG Result", "ECG Result", "←/→ to change", Coercion::Choice(ECG), BlankDefault::None),
    lab(FieldGroup::Heart, "pulse", "Pulse Rate (bpm)", "Pulse Rate", "bpm (blank: 72)", Coercion::Number, BlankDefault::Number(72.0)),
    lab(FieldGroup::Simulation, "simulation_date", "Simulation Date", "Simulation Date", "YYYY-MM-DD", Coercion::Text, BlankDefault::None),
    lab(FieldGroup::Simulation, "hospital_unit", "Hospital Unit", "Hospital Unit", "e.g. Cardiology", Coercion::Text, BlankDefault::None),
];

/// Look up a field by id.
#[must_use]
pub fn field(id: &str) -> Option<&'static FieldSpec> {
    FORM_SCHEMA.iter().find(|f| f.id == id)
}

fn index_of(id: &str) -> Option<usize> {
    FORM_SCHEMA.iter().position(|f| f.id == id)
}

/// Editable form contents plus keyboard focus.
///
/// Raw values are kept as typed, one slot per schema entry. Coercion only
/// happens when a payload is built.
#[derive(Debug, Clone)]
pub struct FormState {
    values: Vec<String>,
    focus: usize,
    pub error_message: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            values: FORM_SCHEMA.iter().map(FieldSpec::initial_value).collect(),
            focus: 0,
            error_message: None,
        }
    }
}

impl FormState {
    /// Raw value of a field, empty for unknown ids.
    #[must_use]
    pub fn value(&self, id: &str) -> &str {
        index_of(id).map_or("", |i| self.values[i].as_str())
    }

    /// Overwrite a field. Returns `false` for unknown ids.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        let Some(i) = index_of(id) else {
            return false;
        };
        self.values[i].zeroize();
        self.values[i] = value.into();
        self.keep_focus_visible();
        true
    }

    /// Disease type currently chosen in the selector.
    #[must_use]
    pub fn disease(&self) -> DiseaseType {
        self.value("problem_type").parse().unwrap_or_default()
    }

    /// Field groups currently on screen. Exactly one disease group is included.
    #[must_use]
    pub fn visible_groups(&self) -> [FieldGroup; 3] {
        [FieldGroup::Shared, self.disease().field_group(), FieldGroup::Simulation]
    }

    /// Whether a field is part of a visible group.
    #[must_use]
    pub fn is_visible(&self, spec: &FieldSpec) -> bool {
        self.visible_groups().contains(&spec.group)
    }

    /// Visible fields in display order with their schema index and raw value.
    pub fn visible_fields(&self) -> impl Iterator<Item = (usize, &'static FieldSpec, &str)> + '_ {
        FORM_SCHEMA
            .iter()
            .enumerate()
            .filter(move |(_, spec)| self.is_visible(spec))
            .map(move |(i, spec)| (i, spec, self.values[i].as_str()))
    }

    /// Schema index of the focused field.
    #[must_use]
    pub fn focus_index(&self) -> usize {
        self.focus
    }

    /// The focused field.
    #[must_use]
    pub fn focused(&self) -> &'static FieldSpec {
        &FORM_SCHEMA[self.focus]
    }

    /// Move focus to the next visible field, wrapping around.
    pub fn next_field(&mut self) {
        let n = FORM_SCHEMA.len();
        for step in 1..=n {
            let i = (self.focus + step) % n;
            if self.is_visible(&FORM_SCHEMA[i]) {
                self.focus = i;
                return;
            }
        }
    }

    /// Move focus to the previous visible field, wrapping around.
    pub fn prev_field(&mut self) {
        let n = FORM_SCHEMA.len();
        for step in 1..=n {
            let i = (self.focus + n - step) % n;
            if self.is_visible(&FORM_SCHEMA[i]) {
                self.focus = i;
                return;
            }
        }
    }

    /// Type a character into the focused field if its coercion accepts it.
    pub fn input_char(&mut self, c: char) {
        if self.focused().accepts(c) {
            self.values[self.focus].push(c);
            self.error_message = None;
        }
    }

    /// Delete the last character of the focused field.
    pub fn delete_char(&mut self) {
        if !matches!(self.focused().coercion, Coercion::Choice(_)) {
            self.values[self.focus].pop();
        }
    }

    /// Clear the focused field.
    pub fn clear_field(&mut self) {
        if !matches!(self.focused().coercion, Coercion::Choice(_)) {
            self.values[self.focus].zeroize();
        }
    }

    /// Step the focused choice field through its options.
    ///
    /// Changing the problem type flips which disease group is visible.
    pub fn cycle_choice(&mut self, forward: bool) {
        let Coercion::Choice(options) = self.focused().coercion else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = options
            .iter()
            .position(|o| *o == self.values[self.focus])
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        self.values[self.focus] = options[next].to_string();
        self.keep_focus_visible();
    }

    /// Simulation date and hospital unit, if both are filled in.
    #[must_use]
    pub fn simulation_inputs(&self) -> Option<(&str, &str)> {
        let date = self.value("simulation_date").trim();
        let unit = self.value("hospital_unit").trim();
        if date.is_empty() || unit.is_empty() {
            None
        } else {
            Some((date, unit))
        }
    }

    /// Fill the form with a representative diabetic patient.
    pub fn load_sample_data(&mut self) {
        let sample = [
            ("patient_id", "P-1042"),
            ("patient_name", "Jordan Reyes"),
            ("admission_date", "2026-03-02"),
            ("discharge_date", "2026-03-09"),
            ("problem_type", "Diabetes"),
            ("age", "64"),
            ("sex", "Male"),
            ("weight", "82"),
            ("bp", "140/90"),
            ("cholesterol", "210"),
            ("insulin", "Steady"),
            ("diabetics", "Yes"),
            ("aqi", "58"),
            ("events", "2"),
            ("hb", "12.1"),
            ("wbc", "8.4"),
            ("plt_count", "230"),
            ("urine_protein", "30"),
            ("urine_glucose", "15"),
            ("ecg", "Normal"),
            ("pulse", "78"),
            ("simulation_date", "2026-03-16"),
            ("hospital_unit", "Cardiology"),
        ];
        for (id, value) in sample {
            self.set_value(id, value);
        }
        self.error_message = None;
    }

    /// Wipe every buffer and return to a fresh form.
    pub fn clear_sensitive(&mut self) {
        for value in self.values.iter_mut() {
            value.zeroize();
        }
        *self = Self::default();
    }

    fn keep_focus_visible(&mut self) {
        if !self.is_visible(self.focused()) {
            self.next_field();
        }
    }
}
