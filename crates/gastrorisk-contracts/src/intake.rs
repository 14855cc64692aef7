//! Intake schema and report types.
//!
//! Before a patient document is decoded into a `PatientRecord`, the intake
//! validator checks it against an `IntakeSchema`. Only a passing
//! `IntakeReport` lets the document reach the engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The full set of checks applied to an incoming patient document.
///
/// Combines a JSON Schema document with field rules that JSON Schema cannot
/// express conveniently (cross-field consistency, host-supplied checks).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeSchema {
    /// Unique identifier for this schema (e.g. "patient-record-v1").
    pub schema_id: String,
    /// A JSON Schema document used for structural validation.
    /// `Value::Null` disables the structural phase.
    pub json_schema: Value,
    /// Field rules evaluated after structural validation.
    pub rules: Vec<IntakeRule>,
}

/// A single field rule applied to a patient document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeRule {
    /// Unique identifier for this rule, referenced in failure reports.
    pub rule_id: String,
    /// Human-readable description for operator tooling.
    pub description: String,
    /// The check to apply.
    pub rule_type: IntakeRuleType,
}

/// The kinds of field checks intake supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IntakeRuleType {
    /// The field at `field_path` must be present and non-null.
    RequiredField {
        /// Dotted path, e.g. "age".
        field_path: String,
    },

    /// The numeric field at `field_path`, when present, must lie in `[min, max]`.
    Range {
        field_path: String,
        min: f64,
        max: f64,
    },

    /// The field at `field_path`, when present, must equal one of `allowed`.
    AllowedValues {
        field_path: String,
        allowed: Vec<Value>,
    },

    /// Delegate to a named function registered by the hosting application.
    Custom {
        function_name: String,
    },
}

/// The result of running an `IntakeSchema` against one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeReport {
    /// True only if every check passed.
    pub passed: bool,
    /// All failures collected during this run. Empty on pass.
    pub failures: Vec<IntakeFailure>,
}

impl IntakeReport {
    /// One line per failure, `rule_id: message`, joined with `"; "`.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("{}: {}", f.rule_id, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A single failed check within an `IntakeReport`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeFailure {
    pub rule_id: String,
    pub message: String,
}
