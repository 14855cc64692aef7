//! Rule-based risk engine implementation.
//!
//! `RuleBasedEngine` holds validated `ReferenceTables` and implements the
//! `RiskEngine` trait from gastrorisk-core.
//!
//! Scoring algorithm:
//!
//! 1. Medication terms: NSAID (base risk, plus a penalty above the high-dose
//!    fraction of the maximum dose), antiplatelet, anticoagulant.
//! 2. Indication term: the weight of every gate that fires, once per gate.
//! 3. Triple-therapy bonus when all three medication classes are taken.
//! 4. High-risk bonus when either subtotal reaches its threshold, or on a
//!    peptic ulcer history or critical illness.
//! 5. PPI reduction for an adequate oral or IV dose, only when one of the
//!    three medication classes is taken.
//!
//! The total is the plain sum of every term.

use tracing::debug;

use gastrorisk_contracts::{
    assessment::ScoreBreakdown,
    error::GastroResult,
    patient::{PatientRecord, PpiRoute},
};
use gastrorisk_core::traits::RiskEngine;

use crate::reference::{ReferenceTables, ScoringConstants};

/// A `RiskEngine` driven entirely by `ReferenceTables`.
///
/// ```rust,ignore
/// use gastrorisk_engine::RuleBasedEngine;
///
/// let engine = RuleBasedEngine::builtin()?;
/// let result = engine.score(&record);
/// ```
#[derive(Debug, Clone)]
pub struct RuleBasedEngine {
    tables: ReferenceTables,
}

impl RuleBasedEngine {
    pub fn new(tables: ReferenceTables) -> Self {
        Self { tables }
    }

    /// Engine over the reference document compiled into the crate.
    pub fn builtin() -> GastroResult<Self> {
        Ok(Self::new(ReferenceTables::builtin()?))
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    fn constants(&self) -> &ScoringConstants {
        self.tables.constants()
    }

    /// NSAID contribution.
    ///
    /// Zero unless `nsaid_use` is set, a concrete drug is selected, and the
    /// dose is positive. An unknown (group, name) pair also scores zero.
    pub fn nsaid_score(&self, record: &PatientRecord) -> i32 {
        if !record.nsaid_use || !record.has_nsaid_selection() || record.nsaid_dose == 0 {
            return 0;
        }

        let Some(entry) = self
            .tables
            .nsaid(&record.selected_nsaid_group, &record.selected_nsaid)
        else {
            debug!(
                group = %record.selected_nsaid_group,
                name = %record.selected_nsaid,
                "NSAID not in reference table; contributing zero"
            );
            return 0;
        };

        let c = self.constants();
        let high_dose_limit = c.high_dose_fraction * f64::from(entry.max_dose);
        let mut score = entry.base_risk;
        if f64::from(record.nsaid_dose) > high_dose_limit {
            debug!(
                name = %entry.name,
                dose = record.nsaid_dose,
                limit = high_dose_limit,
                "high-dose NSAID penalty applied"
            );
            score += c.high_dose_penalty;
        }
        score
    }

    pub fn antiplatelet_score(&self, record: &PatientRecord) -> i32 {
        if record.antiplatelet_use {
            self.constants().antiplatelet_weight
        } else {
            0
        }
    }

    pub fn anticoagulant_score(&self, record: &PatientRecord) -> i32 {
        if record.anticoagulant_use {
            self.constants().anticoagulant_weight
        } else {
            0
        }
    }

    /// Sum of the weights of every firing gate, with the fired indication
    /// names in gate order.
    pub fn indication_score(&self, record: &PatientRecord) -> (i32, Vec<String>) {
        let threshold = self.constants().elderly_age_threshold;
        let mut score = 0;
        let mut fired = Vec::new();

        for gate in self.tables.gates() {
            if !gate.fires(record, threshold) {
                continue;
            }
            // Gate indications are checked against the weight table at load time.
            let weight = self.tables.indication_weight(&gate.indication).unwrap_or(0);
            debug!(gate_id = %gate.id, indication = %gate.indication, weight, "gate fired");
            score += weight;
            fired.push(gate.indication.clone());
        }

        (score, fired)
    }

    pub fn triple_therapy_bonus(&self, record: &PatientRecord) -> i32 {
        if record.nsaid_use && record.antiplatelet_use && record.anticoagulant_use {
            self.constants().triple_therapy_bonus
        } else {
            0
        }
    }

    pub fn high_risk_bonus(
        &self,
        record: &PatientRecord,
        medication_subtotal: i32,
        indication: i32,
    ) -> i32 {
        let c = self.constants();
        let high_risk = medication_subtotal >= c.high_risk_medication_threshold
            || indication >= c.high_risk_indication_threshold
            || record.history_peptic_ulcer
            || record.critical_illness;
        if high_risk {
            c.high_risk_bonus
        } else {
            0
        }
    }

    /// False only when the selected PPI is listed and its dose is not one of
    /// the offered doses. An unlisted PPI has nothing to compare against.
    pub fn ppi_dose_is_offered(&self, record: &PatientRecord) -> bool {
        self.tables
            .ppi_doses(&record.selected_ppi)
            .map_or(true, |doses| doses.contains(&record.ppi_dose))
    }

    /// Gastroprotection credit for an adequate PPI dose. Zero or negative.
    pub fn ppi_reduction(&self, record: &PatientRecord) -> i32 {
        if !record.on_gastrotoxic_medication() || record.ppi_dose == 0 {
            return 0;
        }

        if !self.ppi_dose_is_offered(record) {
            debug!(
                ppi = %record.selected_ppi,
                dose = record.ppi_dose,
                "PPI dose is not one of the offered doses; scoring by threshold"
            );
        }

        let c = self.constants();
        match record.ppi_route {
            PpiRoute::Oral if record.ppi_dose >= c.ppi_oral_min_dose => -c.ppi_oral_reduction,
            PpiRoute::Intravenous if record.ppi_dose >= c.ppi_iv_min_dose => -c.ppi_iv_reduction,
            _ => 0,
        }
    }
}

impl RiskEngine for RuleBasedEngine {
    fn breakdown(&self, record: &PatientRecord) -> ScoreBreakdown {
        let nsaid = self.nsaid_score(record);
        let antiplatelet = self.antiplatelet_score(record);
        let anticoagulant = self.anticoagulant_score(record);
        let medication_subtotal = nsaid + antiplatelet + anticoagulant;

        let (indication, fired_indications) = self.indication_score(record);
        let triple_therapy_bonus = self.triple_therapy_bonus(record);
        let high_risk_bonus = self.high_risk_bonus(record, medication_subtotal, indication);
        let ppi_reduction = self.ppi_reduction(record);

        let total = medication_subtotal
            + indication
            + triple_therapy_bonus
            + high_risk_bonus
            + ppi_reduction;

        debug!(
            medication_subtotal,
            indication,
            triple_therapy_bonus,
            high_risk_bonus,
            ppi_reduction,
            total,
            "score computed"
        );

        ScoreBreakdown {
            nsaid,
            antiplatelet,
            anticoagulant,
            medication_subtotal,
            indication,
            fired_indications,
            triple_therapy_bonus,
            high_risk_bonus,
            ppi_reduction,
            total,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
