//! The assessment pipeline.
//!
//!   Document → Intake → Decode → Engine → Report
//!
//! `RiskEngine::breakdown()` is only reachable from a document once the
//! intake validator has passed it and serde has decoded it into a
//! `PatientRecord`. Callers that already hold a record skip straight to
//! `assess()`.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use gastrorisk_contracts::{
    assessment::{AssessmentId, AssessmentReport, AssessmentResult},
    error::{GastroResult, GastroRiskError},
    intake::IntakeSchema,
    patient::PatientRecord,
};

use crate::traits::{IntakeValidator, RiskEngine};

/// Runs patient documents through intake and scoring.
///
/// Holds no per-assessment state, so one assessor can be shared across
/// sessions.
pub struct Assessor {
    engine: Box<dyn RiskEngine>,
    intake: Box<dyn IntakeValidator>,
    schema: IntakeSchema,
}

impl Assessor {
    pub fn new(
        engine: Box<dyn RiskEngine>,
        intake: Box<dyn IntakeValidator>,
        schema: IntakeSchema,
    ) -> Self {
        Self { engine, intake, schema }
    }

    /// Score an already-decoded record.
    pub fn assess(&self, record: &PatientRecord) -> AssessmentReport {
        let assessment_id = AssessmentId::new();
        let breakdown = self.engine.breakdown(record);
        let result = AssessmentResult::from_score(breakdown.total);

        info!(
            assessment_id = %assessment_id.0,
            score = result.score,
            tier = ?result.tier,
            fired_indications = breakdown.fired_indications.len(),
            "assessment complete"
        );

        AssessmentReport {
            assessment_id,
            assessed_at: Utc::now(),
            bmi: record.bmi(),
            breakdown,
            result,
        }
    }

    /// Validate, decode, and score a raw patient document.
    ///
    /// # Errors
    ///
    /// - `IntakeRejected` when any intake check fails; the reason lists every
    ///   failure.
    /// - `MalformedRecord` when the document passed intake but serde cannot
    ///   decode it.
    /// - Whatever the intake validator itself returns.
    pub fn assess_document(&self, document: &Value) -> GastroResult<AssessmentReport> {
        debug!(schema_id = %self.schema.schema_id, "running intake");

        let report = self.intake.validate(document, &self.schema)?;
        if !report.passed {
            let summary = report.summary();
            warn!(
                schema_id = %self.schema.schema_id,
                failures = %summary,
                "patient document rejected"
            );
            return Err(GastroRiskError::IntakeRejected { reason: summary });
        }

        let record: PatientRecord =
            serde_json::from_value(document.clone()).map_err(|e| GastroRiskError::MalformedRecord {
                reason: e.to_string(),
            })?;

        Ok(self.assess(&record))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
