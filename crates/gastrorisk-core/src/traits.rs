//! Core trait definitions for the GASTRORISK pipeline.
//!
//! - `RiskEngine`      — the pure scoring function over a `PatientRecord`
//! - `IntakeValidator` — the gate a raw patient document must pass first
//!
//! The `Assessor` wires them together. Engines are never handed a document
//! that intake rejected.

use serde_json::Value;

use gastrorisk_contracts::{
    assessment::{AssessmentResult, ScoreBreakdown},
    error::GastroResult,
    intake::{IntakeReport, IntakeSchema},
    patient::PatientRecord,
};

/// A deterministic risk scorer.
///
/// Implementations must be total: every well-formed `PatientRecord` yields a
/// score, unknown drug references contribute zero, and nothing is written
/// anywhere. One instance may serve any number of threads concurrently.
pub trait RiskEngine: Send + Sync {
    /// Compute every intermediate term for `record`.
    fn breakdown(&self, record: &PatientRecord) -> ScoreBreakdown;

    /// Compute the final score and map it onto a risk tier.
    fn score(&self, record: &PatientRecord) -> AssessmentResult {
        AssessmentResult::from_score(self.breakdown(record).total)
    }
}

/// Structural and field-level checks on a raw patient document.
pub trait IntakeValidator: Send + Sync {
    /// Check `document` against `schema`.
    ///
    /// Return an `IntakeReport` with `passed = true` if every check passes,
    /// or `passed = false` with every collected failure otherwise.
    fn validate(&self, document: &Value, schema: &IntakeSchema) -> GastroResult<IntakeReport>;
}
