//! Indication gate types.
//!
//! A gate ties a boolean combination of patient conditions to one weighted
//! indication. Gates are declared in the reference TOML and evaluated in
//! declaration order; every gate that fires adds its indication's weight
//! exactly once.

use serde::{Deserialize, Serialize};

use gastrorisk_contracts::patient::PatientRecord;

/// A single yes/no fact about the patient that a gate can test.
///
/// Expressed in TOML as the snake_case name of the record field:
/// ```toml
/// all = ["nsaid_use", "elderly"]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    NsaidUse,
    AntiplateletUse,
    AnticoagulantUse,
    HistoryPepticUlcer,
    GiBleedRiskFactors,
    CardiovascularDiseaseRisk,
    /// Only a positive test counts; unknown does not.
    HPyloriPositive,
    RenalImpairment,
    HepaticImpairment,
    CriticalIllness,
    SteroidUse,
    Comorbidity,
    /// `age` strictly above the configured elderly threshold.
    Elderly,
}

impl Condition {
    /// Return true if this condition holds for `record`.
    pub fn holds(self, record: &PatientRecord, elderly_age_threshold: u32) -> bool {
        match self {
            Condition::NsaidUse => record.nsaid_use,
            Condition::AntiplateletUse => record.antiplatelet_use,
            Condition::AnticoagulantUse => record.anticoagulant_use,
            Condition::HistoryPepticUlcer => record.history_peptic_ulcer,
            Condition::GiBleedRiskFactors => record.gi_bleed_risk_factors,
            Condition::CardiovascularDiseaseRisk => record.cardiovascular_disease_risk,
            Condition::HPyloriPositive => record.h_pylori_positive.is_positive(),
            Condition::RenalImpairment => record.renal_impairment,
            Condition::HepaticImpairment => record.hepatic_impairment,
            Condition::CriticalIllness => record.critical_illness,
            Condition::SteroidUse => record.steroid_use,
            Condition::Comorbidity => record.comorbidity,
            Condition::Elderly => record.age > elderly_age_threshold,
        }
    }
}

/// A single indication gate loaded from TOML.
///
/// Example:
/// ```toml
/// [[gates]]
/// id = "nsaid-combination"
/// indication = "NSAID + cortico/antiplatelet/anticoag"
/// all = ["nsaid_use"]
/// any = ["steroid_use", "antiplatelet_use", "anticoagulant_use"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicationGate {
    /// Stable identifier used in logs and configuration errors.
    pub id: String,

    /// Key into the indication weight table.
    pub indication: String,

    /// Every listed condition must hold.
    #[serde(default)]
    pub all: Vec<Condition>,

    /// When non-empty, at least one listed condition must also hold.
    #[serde(default)]
    pub any: Vec<Condition>,
}

impl IndicationGate {
    /// Return true if the gate fires for `record`.
    ///
    /// - every `all` condition must hold;
    /// - an empty `any` list imposes no further constraint, otherwise one of
    ///   its conditions must hold.
    pub fn fires(&self, record: &PatientRecord, elderly_age_threshold: u32) -> bool {
        let all_hold = self
            .all
            .iter()
            .all(|c| c.holds(record, elderly_age_threshold));
        let any_holds = self.any.is_empty()
            || self
                .any
                .iter()
                .any(|c| c.holds(record, elderly_age_threshold));
        all_hold && any_holds
    }

    /// True when the gate names no condition at all and would always fire.
    pub fn is_unconditional(&self) -> bool {
        self.all.is_empty() && self.any.is_empty()
    }
}
