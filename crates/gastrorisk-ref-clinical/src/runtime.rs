//! Assembly of the assessment pipeline.

use std::path::Path;

use tracing::info;

use gastrorisk_contracts::error::GastroResult;
use gastrorisk_core::Assessor;
use gastrorisk_engine::{ReferenceTables, RuleBasedEngine};
use gastrorisk_intake::{default_patient_schema, SchemaIntake};

/// Load reference tables from `path`, or the built-in document when `None`.
pub fn load_reference(path: Option<&Path>) -> GastroResult<ReferenceTables> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading reference tables");
            ReferenceTables::from_file(path)
        }
        None => ReferenceTables::builtin(),
    }
}

/// An assessor backed by `tables`, the patient intake schema, and its
/// custom checks.
pub fn build_assessor(tables: ReferenceTables) -> Assessor {
    Assessor::new(
        Box::new(RuleBasedEngine::new(tables)),
        Box::new(SchemaIntake::for_patients()),
        default_patient_schema(),
    )
}

/// The assessor every scenario uses.
pub fn builtin_assessor() -> GastroResult<Assessor> {
    Ok(build_assessor(ReferenceTables::builtin()?))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use gastrorisk_contracts::{assessment::RiskTier, error::GastroRiskError};

    use super::{build_assessor, builtin_assessor, load_reference};
    use crate::sample_patients;

    fn tier_of(document: serde_json::Value) -> RiskTier {
        builtin_assessor()
            .unwrap()
            .assess_document(&document)
            .unwrap()
            .result
            .tier
    }

    #[test]
    fn test_load_reference_defaults_to_builtin() {
        let tables = load_reference(None).unwrap();
        assert_eq!(tables.gates().len(), 16);
    }

    #[test]
    fn test_load_reference_missing_file() {
        match load_reference(Some(Path::new("/nonexistent/site-reference.toml"))) {
            Err(GastroRiskError::ConfigError { reason }) => {
                assert!(reason.contains("site-reference.toml"));
            }
            other => panic!("expected ConfigError, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_sample_patient_tiers() {
        assert_eq!(tier_of(sample_patients::elderly_ibuprofen_user()), RiskTier::Moderate);
        assert_eq!(tier_of(sample_patients::triple_therapy_patient()), RiskTier::VeryHigh);
        assert_eq!(tier_of(sample_patients::ppi_protected_nsaid_user()), RiskTier::Low);
        assert_eq!(tier_of(sample_patients::critical_care_patient()), RiskTier::High);
        assert_eq!(tier_of(sample_patients::low_risk_paracetamol_user()), RiskTier::Low);
    }

    #[test]
    fn test_elderly_ibuprofen_breakdown() {
        let report = builtin_assessor()
            .unwrap()
            .assess_document(&sample_patients::elderly_ibuprofen_user())
            .unwrap();

        assert_eq!(report.breakdown.nsaid, 3);
        assert_eq!(report.breakdown.fired_indications, vec!["NSAID & age > 60"]);
        assert_eq!(report.result.score, 5);
        let bmi = report.bmi.unwrap();
        assert!((bmi - 25.51).abs() < 0.01, "bmi was {bmi}");
    }

    /// Pantoprazole 40 mg IV takes three points off the critical-care patient.
    #[test]
    fn test_critical_care_breakdown() {
        let report = builtin_assessor()
            .unwrap()
            .assess_document(&sample_patients::critical_care_patient())
            .unwrap();

        assert_eq!(report.breakdown.medication_subtotal, 4);
        assert_eq!(report.breakdown.indication, 5);
        assert_eq!(report.breakdown.high_risk_bonus, 1);
        assert_eq!(report.breakdown.ppi_reduction, -3);
        assert_eq!(report.result.score, 7);
        assert_eq!(report.bmi, None);
    }

    #[test]
    fn test_every_sample_passes_intake() {
        let assessor = builtin_assessor().unwrap();
        for patient in sample_patients::all() {
            assert!(
                assessor.assess_document(&patient.document).is_ok(),
                "{} should pass intake",
                patient.name
            );
        }
    }

    /// A document intake accepts always decodes, and one it cannot decode
    /// is rejected at intake rather than after it.
    #[test]
    fn test_intake_and_decoding_agree_on_numbers() {
        let assessor = builtin_assessor().unwrap();

        let report = assessor
            .assess_document(&json!({ "age": 70.0, "ppi_dose": 40.0 }))
            .unwrap();
        assert_eq!(report.result.score, 0);

        for document in [
            json!({ "age": 40, "nsaid_dose": 5_000_000_000u64 }),
            json!({ "age": 40, "h_pylori_positive": "true" }),
        ] {
            match assessor.assess_document(&document) {
                Err(GastroRiskError::IntakeRejected { reason }) => {
                    assert!(reason.contains("json-schema"), "reason: {reason}");
                }
                other => panic!("expected IntakeRejected for {document}, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_custom_tables_flow_through() {
        let toml = r#"
            nsaids = []
            indications = {}
            gates = []

            [scoring]
            anticoagulant_weight = 10
        "#;
        let tables = gastrorisk_engine::ReferenceTables::from_toml_str(toml).unwrap();
        let report = build_assessor(tables)
            .assess_document(&json!({ "age": 40, "anticoagulant_use": true }))
            .unwrap();

        assert_eq!(report.result.tier, RiskTier::VeryHigh);
    }
}
