use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::enums::LabKey;

/// Answers to the multi-step survey, keyed by question id.
///
/// Every field is optional on the wire; a missing or empty answer is
/// simply "no answer" and contributes nothing to scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyResponses {
    /// "Yes" | "No" | "No period"
    #[serde(deserialize_with = "lenient_text")]
    pub q1_period: String,
    /// Days, free text from the form.
    #[serde(deserialize_with = "lenient_text")]
    pub q1_cycle_length: String,
    /// YYYY-MM-DD, or empty.
    #[serde(deserialize_with = "lenient_text")]
    pub q2_last_period: String,
    #[serde(deserialize_with = "lenient_flag")]
    pub q2_dont_remember: bool,
    /// "Normal" | "Heavy" | "Light" | "Painful"
    #[serde(deserialize_with = "lenient_text")]
    pub q3_flow: String,
    #[serde(deserialize_with = "lenient_list")]
    pub q4_symptoms: Vec<String>,
    /// "Steady energy" | "Morning fatigue" | "Afternoon crash" | "Constant fatigue"
    #[serde(deserialize_with = "lenient_text")]
    pub q5_energy: String,
    /// "No change" | "Irritable" | "Sad/depressed" | "Rage/anger"
    #[serde(deserialize_with = "lenient_text")]
    pub q6_mood: String,
    #[serde(deserialize_with = "lenient_list")]
    pub q7_cravings: Vec<String>,
    /// "Low" | "Moderate" | "High"
    #[serde(deserialize_with = "lenient_text")]
    pub q8_stress: String,
    /// "No" | "Currently using" | "Recently stopped"
    #[serde(deserialize_with = "lenient_text")]
    pub q9_birth_control: String,
    #[serde(deserialize_with = "lenient_list")]
    pub q10_conditions: Vec<String>,
    #[serde(deserialize_with = "lenient_labs")]
    pub q11_labs: LabValues,
}

impl SurveyResponses {
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.q4_symptoms.iter().any(|s| s == symptom)
    }

    pub fn has_craving(&self, craving: &str) -> bool {
        self.q7_cravings.iter().any(|c| c == craving)
    }

    pub fn has_condition(&self, condition: &str) -> bool {
        self.q10_conditions.iter().any(|c| c == condition)
    }
}

/// Lab values as entered in the form. Values stay strings until scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabValues {
    #[serde(deserialize_with = "lenient_lab")]
    pub free_t: Option<String>,
    #[serde(deserialize_with = "lenient_lab")]
    pub dhea: Option<String>,
    #[serde(deserialize_with = "lenient_lab")]
    pub lh: Option<String>,
    #[serde(deserialize_with = "lenient_lab")]
    pub fsh: Option<String>,
    #[serde(deserialize_with = "lenient_lab")]
    pub tsh: Option<String>,
    #[serde(deserialize_with = "lenient_lab")]
    pub t3: Option<String>,
    #[serde(deserialize_with = "lenient_lab")]
    pub insulin: Option<String>,
    #[serde(deserialize_with = "lenient_lab")]
    pub hba1c: Option<String>,
}

impl LabValues {
    /// Raw entry for `key`; empty strings count as absent.
    pub fn get(&self, key: LabKey) -> Option<&str> {
        let value = match key {
            LabKey::FreeT => &self.free_t,
            LabKey::Dhea => &self.dhea,
            LabKey::Lh => &self.lh,
            LabKey::Fsh => &self.fsh,
            LabKey::Tsh => &self.tsh,
            LabKey::T3 => &self.t3,
            LabKey::Insulin => &self.insulin,
            LabKey::Hba1c => &self.hba1c,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }
}

// Form answers arrive as whatever the client sent. Anything of the wrong
// shape, `null` included, reads as "no answer" rather than failing the
// whole body.

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(de)?).unwrap_or_default())
}

fn lenient_list<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    })
}

fn lenient_flag<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(de)?, Value::Bool(true)))
}

fn lenient_labs<'de, D: Deserializer<'de>>(de: D) -> Result<LabValues, D::Error> {
    match Value::deserialize(de)? {
        labs @ Value::Object(_) => serde_json::from_value(labs).map_err(serde::de::Error::custom),
        _ => Ok(LabValues::default()),
    }
}

/// Labs may be typed as text or sent as bare numbers.
fn lenient_lab<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(de)?))
}
