//! The patient-data record consumed by the risk engine.
//!
//! A `PatientRecord` is assembled upstream (one prompt per field) and handed
//! over complete. Every field has a default so that a front-end path which
//! skips a question still produces a well-formed record: flags default to
//! `false`, drug selections to `"None"`, doses to `0`.

use std::fmt;

use serde::{
    de::{self, Unexpected, Visitor},
    Deserialize, Deserializer, Serialize,
};

/// Sentinel used for "no drug selected" in group, name, and PPI fields.
pub const NO_SELECTION: &str = "None";

/// Body Mass Index in kg/m².
///
/// Returns `0.0` when `height_cm` is zero or negative instead of dividing by
/// zero.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Helicobacter pylori test status.
///
/// Accepts `true`, `false`, `null`, or one of the strings `"positive"`,
/// `"negative"`, `"unknown"` (case-insensitive). The intake schema accepts
/// exactly the same spellings. Only `Positive` counts
/// toward the indication score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "Option<HPyloriInput>")]
pub enum HPyloriStatus {
    Positive,
    Negative,
    #[default]
    Unknown,
}

impl HPyloriStatus {
    pub fn is_positive(self) -> bool {
        self == HPyloriStatus::Positive
    }
}

/// Wire shapes a front-end may use for the H. pylori answer.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum HPyloriInput {
    Flag(bool),
    Label(String),
}

impl TryFrom<Option<HPyloriInput>> for HPyloriStatus {
    type Error = String;

    fn try_from(input: Option<HPyloriInput>) -> Result<Self, Self::Error> {
        match input {
            None => Ok(HPyloriStatus::Unknown),
            Some(HPyloriInput::Flag(true)) => Ok(HPyloriStatus::Positive),
            Some(HPyloriInput::Flag(false)) => Ok(HPyloriStatus::Negative),
            Some(HPyloriInput::Label(label)) => match label.to_ascii_lowercase().as_str() {
                "positive" => Ok(HPyloriStatus::Positive),
                "negative" => Ok(HPyloriStatus::Negative),
                "unknown" => Ok(HPyloriStatus::Unknown),
                other => Err(format!("unrecognised H. pylori status '{other}'")),
            },
        }
    }
}

/// Administration route of the patient's PPI.
///
/// Serialized as `"Oral"`, `"IV"`, or `"None"` to match the front-end buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PpiRoute {
    Oral,
    #[serde(rename = "IV")]
    Intravenous,
    #[default]
    #[serde(rename = "None")]
    NotTaken,
}

/// The complete input to a single risk assessment.
///
/// Created fresh per assessment session and never mutated once handed to the
/// engine. Field names match the keys the conversational front-end writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientRecord {
    /// Age in whole years (0–120, enforced at intake).
    #[serde(deserialize_with = "whole_number")]
    pub age: u32,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,

    pub nsaid_use: bool,
    pub antiplatelet_use: bool,
    pub anticoagulant_use: bool,
    pub history_peptic_ulcer: bool,
    pub gi_bleed_risk_factors: bool,
    pub cardiovascular_disease_risk: bool,
    pub h_pylori_positive: HPyloriStatus,
    pub renal_impairment: bool,
    pub hepatic_impairment: bool,
    pub critical_illness: bool,
    pub steroid_use: bool,
    pub comorbidity: bool,

    /// NSAID drug class, e.g. `"Propionic acid derivatives (Profens)"`.
    pub selected_nsaid_group: String,
    /// NSAID drug name within the class, e.g. `"Ibuprofen"`.
    pub selected_nsaid: String,
    /// Daily NSAID dose in whole mg.
    #[serde(deserialize_with = "whole_number")]
    pub nsaid_dose: u32,

    pub selected_ppi: String,
    /// Daily PPI dose in whole mg.
    #[serde(deserialize_with = "whole_number")]
    pub ppi_dose: u32,
    pub ppi_route: PpiRoute,
}

/// Decode a `u32` written either as an integer or as an integral float
/// (`70.0`). JSON Schema's `"integer"` type admits both.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    struct WholeNumber;

    impl<'de> Visitor<'de> for WholeNumber {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a whole number between 0 and 4294967295")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
            if v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&v) {
                Ok(v as u32)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeNumber)
}

impl Default for PatientRecord {
    fn default() -> Self {
        Self {
            age: 0,
            weight_kg: None,
            height_cm: None,
            nsaid_use: false,
            antiplatelet_use: false,
            anticoagulant_use: false,
            history_peptic_ulcer: false,
            gi_bleed_risk_factors: false,
            cardiovascular_disease_risk: false,
            h_pylori_positive: HPyloriStatus::Unknown,
            renal_impairment: false,
            hepatic_impairment: false,
            critical_illness: false,
            steroid_use: false,
            comorbidity: false,
            selected_nsaid_group: NO_SELECTION.to_string(),
            selected_nsaid: NO_SELECTION.to_string(),
            nsaid_dose: 0,
            selected_ppi: NO_SELECTION.to_string(),
            ppi_dose: 0,
            ppi_route: PpiRoute::NotTaken,
        }
    }
}

impl PatientRecord {
    /// BMI from the recorded weight and height, if both were captured.
    pub fn bmi(&self) -> Option<f64> {
        match (self.weight_kg, self.height_cm) {
            (Some(weight), Some(height)) => Some(body_mass_index(weight, height)),
            _ => None,
        }
    }

    /// True when a concrete NSAID (not the `"None"` sentinel) was picked.
    pub fn has_nsaid_selection(&self) -> bool {
        self.selected_nsaid_group != NO_SELECTION && self.selected_nsaid != NO_SELECTION
    }

    /// True when the patient takes any NSAID, antiplatelet, or anticoagulant.
    pub fn on_gastrotoxic_medication(&self) -> bool {
        self.nsaid_use || self.antiplatelet_use || self.anticoagulant_use
    }
}
