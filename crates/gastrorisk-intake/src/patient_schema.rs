//! The intake schema for patient documents.

use serde_json::{json, Value};

use gastrorisk_contracts::{
    intake::{IntakeRule, IntakeRuleType, IntakeSchema},
    patient::NO_SELECTION,
};

pub const PATIENT_SCHEMA_ID: &str = "patient-record-v1";

/// Name under which [`nsaid_selection_consistent`] is registered.
pub const NSAID_SELECTION_CONSISTENT: &str = "nsaid-selection-consistent";

const FLAGS: [&str; 11] = [
    "nsaid_use",
    "antiplatelet_use",
    "anticoagulant_use",
    "history_peptic_ulcer",
    "gi_bleed_risk_factors",
    "cardiovascular_disease_risk",
    "renal_impairment",
    "hepatic_impairment",
    "critical_illness",
    "steroid_use",
    "comorbidity",
];

/// Schema applied to every patient document before decoding.
pub fn default_patient_schema() -> IntakeSchema {
    IntakeSchema {
        schema_id: PATIENT_SCHEMA_ID.to_string(),
        json_schema: patient_json_schema(),
        rules: vec![
            IntakeRule {
                rule_id: "req-age".to_string(),
                description: "age must be present".to_string(),
                rule_type: IntakeRuleType::RequiredField {
                    field_path: "age".to_string(),
                },
            },
            IntakeRule {
                rule_id: NSAID_SELECTION_CONSISTENT.to_string(),
                description: "a selected NSAID must come with a daily dose".to_string(),
                rule_type: IntakeRuleType::Custom {
                    function_name: NSAID_SELECTION_CONSISTENT.to_string(),
                },
            },
        ],
    }
}

fn patient_json_schema() -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "age".to_string(),
        json!({ "type": "integer", "minimum": 0, "maximum": 120 }),
    );
    for field in ["weight_kg", "height_cm"] {
        properties.insert(
            field.to_string(),
            json!({ "type": ["number", "null"], "minimum": 0 }),
        );
    }
    for flag in FLAGS {
        properties.insert(flag.to_string(), json!({ "type": "boolean" }));
    }
    properties.insert(
        "h_pylori_positive".to_string(),
        json!({
            "anyOf": [
                { "type": ["boolean", "null"] },
                { "type": "string", "pattern": "^(?i)(positive|negative|unknown)$" }
            ]
        }),
    );
    for field in ["selected_nsaid_group", "selected_nsaid", "selected_ppi"] {
        properties.insert(field.to_string(), json!({ "type": "string" }));
    }
    for field in ["nsaid_dose", "ppi_dose"] {
        properties.insert(
            field.to_string(),
            json!({ "type": "integer", "minimum": 0, "maximum": u32::MAX }),
        );
    }
    properties.insert(
        "ppi_route".to_string(),
        json!({ "enum": ["Oral", "IV", "None"] }),
    );

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "properties": properties
    })
}

/// Fails when NSAID use is declared with a specific drug but no dose.
///
/// A missing dose would otherwise decode as 0 mg and silently skip the
/// high-dose penalty.
pub fn nsaid_selection_consistent(document: &Value) -> Option<String> {
    let nsaid_use = document
        .get("nsaid_use")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let drug = document
        .get("selected_nsaid")
        .and_then(Value::as_str)
        .filter(|name| *name != NO_SELECTION);
    let dose_missing = document.get("nsaid_dose").map_or(true, Value::is_null);

    match drug {
        Some(name) if nsaid_use && dose_missing => Some(format!(
            "'{name}' is selected for an NSAID user but nsaid_dose is missing"
        )),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
