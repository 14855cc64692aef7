//! Reference tables and their TOML schema.
//!
//! A `ReferenceConfig` is deserialized from TOML and checked before it
//! becomes `ReferenceTables`. Loading fails with `ConfigError` rather than
//! letting an incomplete table silently score zero later.

use std::{
    collections::{BTreeMap, HashSet},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use gastrorisk_contracts::{
    error::{GastroResult, GastroRiskError},
    patient::NO_SELECTION,
};

use crate::gate::IndicationGate;

/// Upper bound for every weight, bonus, penalty, reduction, and score
/// threshold. Keeps any sum of them far from `i32` overflow.
pub const MAX_WEIGHT: i32 = 100;

/// Reference document compiled into the binary.
const DEFAULT_REFERENCE: &str = include_str!("../reference/default.toml");

/// Every policy constant the engine applies.
///
/// All fields default to the clinical source's values, so a reference file
/// only needs to list the constants it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConstants {
    /// Fraction of the maximum daily dose above which the NSAID counts as
    /// high-dose. The comparison is strict.
    pub high_dose_fraction: f64,
    pub high_dose_penalty: i32,
    pub antiplatelet_weight: i32,
    pub anticoagulant_weight: i32,
    pub triple_therapy_bonus: i32,
    pub high_risk_bonus: i32,
    pub high_risk_medication_threshold: i32,
    pub high_risk_indication_threshold: i32,
    pub elderly_age_threshold: u32,
    pub ppi_oral_min_dose: u32,
    /// Subtracted from the score; written as a positive number.
    pub ppi_oral_reduction: i32,
    pub ppi_iv_min_dose: u32,
    /// Subtracted from the score; written as a positive number.
    pub ppi_iv_reduction: i32,
}

impl Default for ScoringConstants {
    fn default() -> Self {
        Self {
            high_dose_fraction: 0.75,
            high_dose_penalty: 2,
            antiplatelet_weight: 3,
            anticoagulant_weight: 4,
            triple_therapy_bonus: 2,
            high_risk_bonus: 1,
            high_risk_medication_threshold: 6,
            high_risk_indication_threshold: 6,
            elderly_age_threshold: 60,
            ppi_oral_min_dose: 20,
            ppi_oral_reduction: 2,
            ppi_iv_min_dose: 40,
            ppi_iv_reduction: 3,
        }
    }
}

/// One NSAID (or analgesic) entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NsaidEntry {
    /// Drug class, e.g. `"Acetic acid derivatives"`.
    pub group: String,
    pub name: String,
    /// Doses offered to the prescriber in mg, ascending. Informational:
    /// recorded doses are whole mg, so a fractional rung such as meloxicam's
    /// 7.5 is entered rounded and only `max_dose` affects scoring.
    pub dose_ladder: Vec<f64>,
    /// Human-readable dosing guidance.
    pub dosing: String,
    /// Maximum daily dose in mg.
    pub max_dose: u32,
    pub base_risk: i32,
}

impl NsaidEntry {
    fn none() -> Self {
        Self {
            group: NO_SELECTION.to_string(),
            name: NO_SELECTION.to_string(),
            dose_ladder: vec![0.0],
            dosing: String::new(),
            max_dose: 0,
            base_risk: 0,
        }
    }
}

/// A PPI and the doses (mg) offered for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpiEntry {
    pub name: String,
    pub doses: Vec<u32>,
}

/// The top-level structure deserialized from a reference TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    #[serde(default)]
    pub scoring: ScoringConstants,
    pub nsaids: Vec<NsaidEntry>,
    #[serde(default)]
    pub ppis: Vec<PpiEntry>,
    /// Indication name → weight.
    pub indications: BTreeMap<String, i32>,
    /// Evaluated in declaration order.
    pub gates: Vec<IndicationGate>,
}

/// Validated, indexed reference tables. Immutable once built.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    constants: ScoringConstants,
    /// group → name → entry.
    nsaids: BTreeMap<String, BTreeMap<String, NsaidEntry>>,
    ppis: Vec<PpiEntry>,
    indications: BTreeMap<String, i32>,
    gates: Vec<IndicationGate>,
}

impl ReferenceTables {
    /// Parse `s` as TOML and build validated tables.
    ///
    /// Returns `GastroRiskError::ConfigError` if the TOML is malformed, does
    /// not match `ReferenceConfig`, or fails validation.
    pub fn from_toml_str(s: &str) -> GastroResult<Self> {
        let config: ReferenceConfig = toml::from_str(s).map_err(|e| GastroRiskError::ConfigError {
            reason: format!("failed to parse reference TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as reference TOML.
    pub fn from_file(path: &Path) -> GastroResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GastroRiskError::ConfigError {
            reason: format!("failed to read reference file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The reference document shipped with the crate.
    pub fn builtin() -> GastroResult<Self> {
        Self::from_toml_str(DEFAULT_REFERENCE)
    }

    /// Validate `config` and index it.
    ///
    /// Fails when:
    /// - `high_dose_fraction` is outside `(0, 1]`;
    /// - a constant, indication weight, or base risk is outside
    ///   `0..=MAX_WEIGHT`;
    /// - a (group, name) pair appears twice;
    /// - a dose ladder is empty, not strictly ascending, or exceeds `max_dose`;
    /// - a gate id repeats, a gate has no conditions, or a gate names an
    ///   indication with no weight.
    ///
    /// A missing `"None"/"None"` entry is added.
    pub fn from_config(config: ReferenceConfig) -> GastroResult<Self> {
        let fraction = config.scoring.high_dose_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(config_error(format!(
                "high_dose_fraction must be within (0, 1], got {fraction}"
            )));
        }

        check_constants(&config.scoring)?;
        for (indication, weight) in &config.indications {
            check_weight(&format!("weight of indication '{indication}'"), *weight)?;
        }

        let mut nsaids: BTreeMap<String, BTreeMap<String, NsaidEntry>> = BTreeMap::new();
        for entry in config.nsaids {
            check_weight(&format!("base_risk of NSAID '{}'", entry.name), entry.base_risk)?;
            check_dose_ladder(&entry)?;
            let group = nsaids.entry(entry.group.clone()).or_default();
            if group.contains_key(&entry.name) {
                return Err(config_error(format!(
                    "duplicate NSAID entry '{}' in group '{}'",
                    entry.name, entry.group
                )));
            }
            group.insert(entry.name.clone(), entry);
        }
        nsaids
            .entry(NO_SELECTION.to_string())
            .or_default()
            .entry(NO_SELECTION.to_string())
            .or_insert_with(NsaidEntry::none);

        let mut gate_ids = HashSet::new();
        for gate in &config.gates {
            if !gate_ids.insert(gate.id.as_str()) {
                return Err(config_error(format!("duplicate gate id '{}'", gate.id)));
            }
            if gate.is_unconditional() {
                return Err(config_error(format!(
                    "gate '{}' lists no conditions and would always fire",
                    gate.id
                )));
            }
            if !config.indications.contains_key(&gate.indication) {
                warn!(
                    gate_id = %gate.id,
                    indication = %gate.indication,
                    "gate references an indication with no weight"
                );
                return Err(config_error(format!(
                    "indication '{}' referenced by gate '{}' has no weight in the indication table",
                    gate.indication, gate.id
                )));
            }
        }

        debug!(
            nsaid_groups = nsaids.len(),
            indications = config.indications.len(),
            gates = config.gates.len(),
            ppis = config.ppis.len(),
            "reference tables loaded"
        );

        Ok(Self {
            constants: config.scoring,
            nsaids,
            ppis: config.ppis,
            indications: config.indications,
            gates: config.gates,
        })
    }

    pub fn constants(&self) -> &ScoringConstants {
        &self.constants
    }

    /// Look up an NSAID by class and name. Exact, case-sensitive match.
    pub fn nsaid(&self, group: &str, name: &str) -> Option<&NsaidEntry> {
        self.nsaids.get(group).and_then(|drugs| drugs.get(name))
    }

    /// All NSAID entries, ordered by class then name.
    pub fn nsaids(&self) -> impl Iterator<Item = &NsaidEntry> {
        self.nsaids.values().flat_map(|drugs| drugs.values())
    }

    pub fn indication_weight(&self, indication: &str) -> Option<i32> {
        self.indications.get(indication).copied()
    }

    /// Indication name → weight, alphabetical.
    pub fn indications(&self) -> impl Iterator<Item = (&str, i32)> {
        self.indications.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Gates in declaration order.
    pub fn gates(&self) -> &[IndicationGate] {
        &self.gates
    }

    pub fn ppis(&self) -> &[PpiEntry] {
        &self.ppis
    }

    /// Dose options for a PPI, or `None` if the PPI is not listed.
    pub fn ppi_doses(&self, name: &str) -> Option<&[u32]> {
        self.ppis
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.doses.as_slice())
    }
}

fn config_error(reason: String) -> GastroRiskError {
    GastroRiskError::ConfigError { reason }
}

fn check_weight(what: &str, value: i32) -> GastroResult<()> {
    if (0..=MAX_WEIGHT).contains(&value) {
        Ok(())
    } else {
        Err(config_error(format!(
            "{what} must be within 0..={MAX_WEIGHT}, got {value}"
        )))
    }
}

fn check_constants(c: &ScoringConstants) -> GastroResult<()> {
    let weights = [
        ("high_dose_penalty", c.high_dose_penalty),
        ("antiplatelet_weight", c.antiplatelet_weight),
        ("anticoagulant_weight", c.anticoagulant_weight),
        ("triple_therapy_bonus", c.triple_therapy_bonus),
        ("high_risk_bonus", c.high_risk_bonus),
        ("high_risk_medication_threshold", c.high_risk_medication_threshold),
        ("high_risk_indication_threshold", c.high_risk_indication_threshold),
        ("ppi_oral_reduction", c.ppi_oral_reduction),
        ("ppi_iv_reduction", c.ppi_iv_reduction),
    ];
    for (name, value) in weights {
        check_weight(name, value)?;
    }
    Ok(())
}

fn check_dose_ladder(entry: &NsaidEntry) -> GastroResult<()> {
    if entry.dose_ladder.is_empty() {
        return Err(config_error(format!(
            "NSAID '{}' in group '{}' has an empty dose ladder",
            entry.name, entry.group
        )));
    }
    if entry.dose_ladder.windows(2).any(|w| w[0] >= w[1]) {
        return Err(config_error(format!(
            "dose ladder for NSAID '{}' must be strictly ascending",
            entry.name
        )));
    }
    let top = entry.dose_ladder[entry.dose_ladder.len() - 1];
    if top > f64::from(entry.max_dose) {
        return Err(config_error(format!(
            "dose ladder for NSAID '{}' reaches {top} mg, above its max dose of {} mg",
            entry.name, entry.max_dose
        )));
    }
    Ok(())
}
