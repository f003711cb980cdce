//! Response renderer: turns backend responses into display text.

use serde_json::Value;

use crate::domain::{FollowupPlan, PredictionResponse, SimulationResponse};

/// Shown in a display slot whose field is absent.
pub const PLACEHOLDER: &str = "-";

/// Text for the prediction result panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub disease: String,
    pub prediction: String,
    pub score: String,
    pub risk_label: String,
    pub followup: Option<String>,
    /// Probability fed to the risk chart
    pub probability: f64,
    pub received_at: chrono::DateTime<chrono::Local>,
}

impl ResultView {
    #[must_use]
    pub fn from_response(response: &PredictionResponse) -> Self {
        Self {
            disease: text_or_dash(response.disease_type.as_deref()),
            prediction: value_or_dash(response.prediction.as_ref()),
            score: response
                .readmission_probability
                .map_or_else(|| PLACEHOLDER.to_string(), |p| fixed_decimals(p, 4)),
            risk_label: text_or_dash(response.risk_label.as_deref()),
            followup: response.followup_plan.as_ref().map(followup_sentence),
            probability: response.readmission_probability.unwrap_or(0.0),
            received_at: chrono::Local::now(),
        }
    }
}

/// `Channel: Phone. Schedule: Day 3, Day 7. Check BP.`
#[must_use]
pub fn followup_sentence(plan: &FollowupPlan) -> String {
    format!(
        "Channel: {}. Schedule: {}. {}",
        plan.channel,
        plan.schedule.join(", "),
        plan.note
    )
}

/// One-line staffing summary.
#[must_use]
pub fn simulation_summary(response: &SimulationResponse) -> String {
    let s = &response.staffing;
    format!(
        "Expected readmissions (on {}, {}): {}. Beds: {}, Nurses: {}, Doctors: {}.",
        response.simulation_date,
        response.hospital_unit,
        s.expected_readmissions,
        s.suggested_beds,
        s.suggested_nurses,
        s.suggested_doctors
    )
}

/// Format with `digits` decimals, breaking exact midpoints away from zero.
///
/// `format!` rounds a midpoint to even (0.03125 -> "0.0312"); this gives
/// "0.0313".
#[must_use]
pub fn fixed_decimals(value: f64, digits: usize) -> String {
    let rounded = format!("{value:.digits$}");
    if !value.is_finite() {
        return rounded;
    }

    // Every finite f64 has a terminating decimal expansion of at most 1074
    // fractional digits, so this is the exact value.
    let exact = format!("{:.1074}", value.abs());
    let Some((int_part, frac)) = exact.split_once('.') else {
        return rounded;
    };
    if digits >= frac.len() {
        return rounded;
    }
    let tail = &frac[digits..];
    let is_midpoint = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    if !is_midpoint {
        return rounded;
    }

    let mut out: Vec<u8> = format!("{int_part}.{}", &frac[..digits]).into_bytes();
    let mut carry = true;
    for b in out.iter_mut().rev() {
        if !carry {
            break;
        }
        match *b {
            b'.' => {}
            b'9' => *b = b'0',
            _ => {
                *b += 1;
                carry = false;
            }
        }
    }
    if carry {
        out.insert(0, b'1');
    }
    if digits == 0 {
        out.pop();
    }

    let magnitude = String::from_utf8_lossy(&out).into_owned();
    if value.is_sign_negative() {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

fn text_or_dash(text: Option<&str>) -> String {
    match text {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn value_or_dash(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => PLACEHOLDER.to_string(),
        Some(Value::String(s)) => text_or_dash(Some(s.as_str())),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Staffing;
    use serde_json::json;

    #[test]
    fn test_score_has_four_decimals() {
        let response = PredictionResponse {
            readmission_probability: Some(0.1234),
            ..Default::default()
        };
        assert_eq!(ResultView::from_response(&response).score, "0.1234");

        let response = PredictionResponse {
            readmission_probability: Some(0.5),
            ..Default::default()
        };
        assert_eq!(ResultView::from_response(&response).score, "0.5000");
    }

    #[test]
    fn test_score_midpoints_round_up() {
        let response = PredictionResponse {
            readmission_probability: Some(0.03125),
            ..Default::default()
        };
        assert_eq!(ResultView::from_response(&response).score, "0.0313");

        assert_eq!(fixed_decimals(0.15625, 4), "0.1563");
        assert_eq!(fixed_decimals(0.0625, 4), "0.0625");
        assert_eq!(fixed_decimals(9.5, 0), "10");
        assert_eq!(fixed_decimals(-0.03125, 4), "-0.0313");
        assert_eq!(fixed_decimals(2.5, 0), "3");
        assert_eq!(fixed_decimals(0.12344, 4), "0.1234");
    }

    #[test]
    fn test_absent_fields_render_as_dash() {
        let view = ResultView::from_response(&PredictionResponse::default());
        assert_eq!(view.disease, "-");
        assert_eq!(view.prediction, "-");
        assert_eq!(view.score, "-");
        assert_eq!(view.risk_label, "-");
        assert_eq!(view.followup, None);
        assert_eq!(view.probability, 0.0);
    }

    #[test]
    fn test_numeric_prediction_is_shown() {
        let response = PredictionResponse {
            prediction: Some(json!(0)),
            ..Default::default()
        };
        assert_eq!(ResultView::from_response(&response).prediction, "0");
    }

    #[test]
    fn test_followup_sentence() {
        let plan = FollowupPlan {
            channel: "Phone".to_string(),
            schedule: vec!["Day 3".to_string(), "Day 7".to_string(), "Day 30".to_string()],
            note: "Review insulin dosing.".to_string(),
        };
        assert_eq!(
            followup_sentence(&plan),
            "Channel: Phone. Schedule: Day 3, Day 7, Day 30. Review insulin dosing."
        );
    }

    #[test]
    fn test_simulation_summary_template() {
        let response = SimulationResponse {
            simulation_date: "2026-03-16".to_string(),
            hospital_unit: "ICU".to_string(),
            staffing: Staffing {
                expected_readmissions: 5.0,
                suggested_beds: 10.0,
                suggested_nurses: 20.0,
                suggested_doctors: 3.0,
            },
        };
        assert_eq!(
            simulation_summary(&response),
            "Expected readmissions (on 2026-03-16, ICU): 5. Beds: 10, Nurses: 20, Doctors: 3."
        );
    }
}
