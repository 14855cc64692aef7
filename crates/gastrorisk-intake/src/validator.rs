//! Schema-based intake validator.
//!
//! `SchemaIntake` implements the `IntakeValidator` trait from
//! `gastrorisk-core`. Validation runs in two phases:
//!
//! 1. **Structural** — the raw document is validated against
//!    `IntakeSchema::json_schema` using the `jsonschema` crate.
//! 2. **Field rules** — each `IntakeRule` in `IntakeSchema::rules` is
//!    evaluated in order.
//!
//! Failures from both phases are collected into a single report. A schema
//! document that does not compile is an error, not a failed document.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use gastrorisk_contracts::{
    error::{GastroResult, GastroRiskError},
    intake::{IntakeFailure, IntakeReport, IntakeRuleType, IntakeSchema},
};
use gastrorisk_core::traits::IntakeValidator;

use crate::patient_schema::{nsaid_selection_consistent, NSAID_SELECTION_CONSISTENT};

/// Rule id attached to every structural failure.
pub const JSON_SCHEMA_RULE_ID: &str = "json-schema";

/// A host-supplied document check.
///
/// Receives the whole document. Returns `Some(message)` when the check fails,
/// `None` when it passes.
pub type CustomCheckFn = Box<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Validates raw patient documents before they are decoded.
pub struct SchemaIntake {
    custom_rules: HashMap<String, CustomCheckFn>,
}

impl SchemaIntake {
    /// Create a validator with no custom checks registered.
    pub fn new() -> Self {
        Self {
            custom_rules: HashMap::new(),
        }
    }

    /// Create a validator with every custom check named by
    /// [`default_patient_schema`](crate::patient_schema::default_patient_schema)
    /// registered.
    pub fn for_patients() -> Self {
        let mut intake = Self::new();
        intake.register_rule(
            NSAID_SELECTION_CONSISTENT,
            Box::new(nsaid_selection_consistent),
        );
        intake
    }

    /// Register a custom check under `name`.
    ///
    /// The name must match the `function_name` of a `IntakeRuleType::Custom`
    /// rule. Registering the same name twice replaces the earlier check.
    pub fn register_rule(&mut self, name: impl Into<String>, f: CustomCheckFn) {
        self.custom_rules.insert(name.into(), f);
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Resolve a dotted path against `value`. JSON `null` counts as absent.
    fn resolve_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
        let mut current = value;
        for segment in path.split('.') {
            match current.get(segment) {
                Some(v) if !v.is_null() => current = v,
                _ => return None,
            }
        }
        Some(current)
    }

    fn structural_failures(
        document: &Value,
        schema: &IntakeSchema,
    ) -> GastroResult<Vec<IntakeFailure>> {
        if schema.json_schema.is_null() {
            return Ok(Vec::new());
        }

        let validator = jsonschema::validator_for(&schema.json_schema).map_err(|e| {
            warn!(schema_id = %schema.schema_id, error = %e, "schema compilation failure");
            GastroRiskError::SchemaValidation {
                reason: format!("intake schema '{}' is not a valid JSON Schema: {e}", schema.schema_id),
            }
        })?;

        Ok(validator
            .iter_errors(document)
            .map(|error| {
                let message = format!(
                    "JSON Schema violation at '{}': {}",
                    error.instance_path, error
                );
                warn!(schema_id = %schema.schema_id, %message, "structural validation failure");
                IntakeFailure {
                    rule_id: JSON_SCHEMA_RULE_ID.to_string(),
                    message,
                }
            })
            .collect())
    }

    fn check_rule(&self, document: &Value, rule_type: &IntakeRuleType) -> Option<String> {
        match rule_type {
            IntakeRuleType::RequiredField { field_path } => {
                match Self::resolve_path(document, field_path) {
                    None => Some(format!("required field '{field_path}' is missing or null")),
                    Some(_) => None,
                }
            }

            // Absent fields pass; a present field must be a number in range.
            IntakeRuleType::Range {
                field_path,
                min,
                max,
            } => match Self::resolve_path(document, field_path) {
                None => None,
                Some(v) => match v.as_f64() {
                    Some(n) if n >= *min && n <= *max => None,
                    Some(n) => Some(format!(
                        "field '{field_path}' is {n}, outside the range [{min}, {max}]"
                    )),
                    None => Some(format!("field '{field_path}' has non-numeric value {v}")),
                },
            },

            IntakeRuleType::AllowedValues {
                field_path,
                allowed,
            } => match Self::resolve_path(document, field_path) {
                None => None,
                Some(actual) if allowed.contains(actual) => None,
                Some(actual) => Some(format!(
                    "field '{field_path}' has value {actual} which is not in the allowed set"
                )),
            },

            // An unregistered name fails rather than passing silently.
            IntakeRuleType::Custom { function_name } => {
                match self.custom_rules.get(function_name.as_str()) {
                    Some(f) => f(document),
                    None => Some(format!(
                        "no custom check registered under '{function_name}'"
                    )),
                }
            }
        }
    }
}

impl Default for SchemaIntake {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeValidator for SchemaIntake {
    fn validate(&self, document: &Value, schema: &IntakeSchema) -> GastroResult<IntakeReport> {
        let mut failures = Self::structural_failures(document, schema)?;

        for rule in &schema.rules {
            debug!(
                rule_id = %rule.rule_id,
                description = %rule.description,
                "evaluating intake rule"
            );

            if let Some(message) = self.check_rule(document, &rule.rule_type) {
                warn!(rule_id = %rule.rule_id, %message, "intake rule failed");
                failures.push(IntakeFailure {
                    rule_id: rule.rule_id.clone(),
                    message,
                });
            }
        }

        let passed = failures.is_empty();
        debug!(
            schema_id = %schema.schema_id,
            passed,
            failure_count = failures.len(),
            "intake complete"
        );

        Ok(IntakeReport { passed, failures })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use gastrorisk_contracts::{
        error::GastroRiskError,
        intake::{IntakeRule, IntakeRuleType, IntakeSchema},
    };
    use gastrorisk_core::traits::IntakeValidator;

    use super::{SchemaIntake, JSON_SCHEMA_RULE_ID};

    // ── Builder helpers ───────────────────────────────────────────────────────

    fn make_schema(json_schema: Value, rules: Vec<IntakeRule>) -> IntakeSchema {
        IntakeSchema {
            schema_id: "test-intake-v1".to_string(),
            json_schema,
            rules,
        }
    }

    fn rule(id: &str, rule_type: IntakeRuleType) -> IntakeRule {
        IntakeRule {
            rule_id: id.to_string(),
            description: format!("test rule {id}"),
            rule_type,
        }
    }

    fn age_range() -> IntakeRule {
        rule(
            "age-range",
            IntakeRuleType::Range {
                field_path: "age".to_string(),
                min: 18.0,
                max: 120.0,
            },
        )
    }

    // ── JSON Schema phase ─────────────────────────────────────────────────────

    #[test]
    fn test_schema_pass() {
        let intake = SchemaIntake::new();
        let schema = make_schema(
            json!({
                "type": "object",
                "properties": { "age": { "type": "integer" } }
            }),
            vec![],
        );

        let report = intake.validate(&json!({ "age": 40 }), &schema).unwrap();

        assert!(report.passed, "expected pass, failures: {:?}", report.failures);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_schema_type_mismatch_fails() {
        let intake = SchemaIntake::new();
        let schema = make_schema(
            json!({
                "type": "object",
                "properties": { "age": { "type": "integer" } }
            }),
            vec![],
        );

        let report = intake
            .validate(&json!({ "age": "forty" }), &schema)
            .unwrap();

        assert!(!report.passed);
        assert_eq!(report.failures[0].rule_id, JSON_SCHEMA_RULE_ID);
        assert!(
            report.failures[0].message.contains("/age"),
            "failure should point at the offending field: {}",
            report.failures[0].message
        );
    }

    #[test]
    fn test_invalid_schema_document_is_an_error() {
        let intake = SchemaIntake::new();
        let schema = make_schema(json!({ "type": 12 }), vec![]);

        match intake.validate(&json!({}), &schema) {
            Err(GastroRiskError::SchemaValidation { reason }) => {
                assert!(reason.contains("test-intake-v1"), "reason: {reason}");
            }
            other => panic!("expected SchemaValidation, got {:?}", other),
        }
    }

    // ── RequiredField ─────────────────────────────────────────────────────────

    #[test]
    fn test_required_field_present_passes() {
        let intake = SchemaIntake::new();
        let schema = make_schema(
            Value::Null,
            vec![rule(
                "req-age",
                IntakeRuleType::RequiredField {
                    field_path: "age".to_string(),
                },
            )],
        );

        let report = intake.validate(&json!({ "age": 0 }), &schema).unwrap();

        assert!(report.passed, "expected pass, failures: {:?}", report.failures);
    }

    /// `null` counts as missing.
    #[test]
    fn test_required_field_null_fails() {
        let intake = SchemaIntake::new();
        let schema = make_schema(
            Value::Null,
            vec![rule(
                "req-age",
                IntakeRuleType::RequiredField {
                    field_path: "age".to_string(),
                },
            )],
        );

        let report = intake.validate(&json!({ "age": null }), &schema).unwrap();

        assert!(!report.passed);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].rule_id, "req-age");
        assert!(report.failures[0].message.contains("'age'"));
    }

    #[test]
    fn test_required_nested_field() {
        let intake = SchemaIntake::new();
        let schema = make_schema(
            Value::Null,
            vec![rule(
                "req-ward",
                IntakeRuleType::RequiredField {
                    field_path: "admission.ward".to_string(),
                },
            )],
        );

        let ok = intake
            .validate(&json!({ "admission": { "ward": "ICU" } }), &schema)
            .unwrap();
        let missing = intake
            .validate(&json!({ "admission": {} }), &schema)
            .unwrap();

        assert!(ok.passed);
        assert!(!missing.passed);
    }

    // ── Range ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_range_bounds_are_inclusive() {
        let intake = SchemaIntake::new();
        let schema = make_schema(Value::Null, vec![age_range()]);

        for age in [18, 64, 120] {
            let report = intake.validate(&json!({ "age": age }), &schema).unwrap();
            assert!(report.passed, "age {age} should pass: {:?}", report.failures);
        }
    }

    #[test]
    fn test_range_outside_fails() {
        let intake = SchemaIntake::new();
        let schema = make_schema(Value::Null, vec![age_range()]);

        let report = intake.validate(&json!({ "age": 17 }), &schema).unwrap();

        assert!(!report.passed);
        assert_eq!(report.failures[0].rule_id, "age-range");
        assert!(report.failures[0].message.contains("outside the range"));
    }

    #[test]
    fn test_range_absent_field_passes() {
        let intake = SchemaIntake::new();
        let schema = make_schema(Value::Null, vec![age_range()]);

        let report = intake.validate(&json!({}), &schema).unwrap();

        assert!(report.passed);
    }

    #[test]
    fn test_range_non_numeric_fails() {
        let intake = SchemaIntake::new();
        let schema = make_schema(Value::Null, vec![age_range()]);

        let report = intake.validate(&json!({ "age": "old" }), &schema).unwrap();

        assert!(!report.passed);
        assert!(report.failures[0].message.contains("non-numeric"));
    }

    // ── AllowedValues ─────────────────────────────────────────────────────────

    #[test]
    fn test_allowed_values() {
        let intake = SchemaIntake::new();
        let schema = make_schema(
            Value::Null,
            vec![rule(
                "ppi-route",
                IntakeRuleType::AllowedValues {
                    field_path: "ppi_route".to_string(),
                    allowed: vec![json!("Oral"), json!("IV"), json!("None")],
                },
            )],
        );

        let ok = intake
            .validate(&json!({ "ppi_route": "IV" }), &schema)
            .unwrap();
        let bad = intake
            .validate(&json!({ "ppi_route": "Rectal" }), &schema)
            .unwrap();

        assert!(ok.passed);
        assert!(!bad.passed);
        assert_eq!(bad.failures[0].rule_id, "ppi-route");
    }

    // ── Custom ────────────────────────────────────────────────────────────────

    #[test]
    fn test_custom_rule_pass_and_fail() {
        let mut intake = SchemaIntake::new();
        intake.register_rule(
            "adult-only",
            Box::new(|doc| match doc.get("age").and_then(Value::as_u64) {
                Some(age) if age < 18 => Some("patient is a minor".to_string()),
                _ => None,
            }),
        );
        let schema = make_schema(
            Value::Null,
            vec![rule(
                "adult",
                IntakeRuleType::Custom {
                    function_name: "adult-only".to_string(),
                },
            )],
        );

        let ok = intake.validate(&json!({ "age": 30 }), &schema).unwrap();
        let bad = intake.validate(&json!({ "age": 12 }), &schema).unwrap();

        assert!(ok.passed);
        assert!(!bad.passed);
        assert_eq!(bad.failures[0].rule_id, "adult");
        assert_eq!(bad.failures[0].message, "patient is a minor");
    }

    #[test]
    fn test_unregistered_custom_rule_fails() {
        let intake = SchemaIntake::new();
        let schema = make_schema(
            Value::Null,
            vec![rule(
                "phantom",
                IntakeRuleType::Custom {
                    function_name: "does-not-exist".to_string(),
                },
            )],
        );

        let report = intake.validate(&json!({}), &schema).unwrap();

        assert!(!report.passed);
        assert!(report.failures[0].message.contains("does-not-exist"));
    }

    // ── Accumulation ──────────────────────────────────────────────────────────

    /// Structural and field failures are all reported in one pass, in order.
    #[test]
    fn test_failures_accumulate_across_phases() {
        let intake = SchemaIntake::new();
        let schema = make_schema(
            json!({
                "type": "object",
                "properties": { "nsaid_use": { "type": "boolean" } }
            }),
            vec![
                rule(
                    "req-age",
                    IntakeRuleType::RequiredField {
                        field_path: "age".to_string(),
                    },
                ),
                rule(
                    "phantom",
                    IntakeRuleType::Custom {
                        function_name: "missing".to_string(),
                    },
                ),
            ],
        );

        let report = intake
            .validate(&json!({ "nsaid_use": "yes" }), &schema)
            .unwrap();

        let ids: Vec<&str> = report.failures.iter().map(|f| f.rule_id.as_str()).collect();
        assert_eq!(ids, vec![JSON_SCHEMA_RULE_ID, "req-age", "phantom"]);
        assert!(report.summary().starts_with("json-schema: "));
    }
}
