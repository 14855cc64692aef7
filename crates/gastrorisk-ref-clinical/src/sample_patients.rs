//! Fictional patient documents for the reference runtime.
//!
//! Each function returns the raw JSON a front end would submit. Fields left
//! out take their record defaults, so the documents only list what matters
//! for each case.

use serde_json::{json, Value};

/// A named sample document.
#[derive(Debug, Clone)]
pub struct SamplePatient {
    pub name: &'static str,
    pub summary: &'static str,
    pub document: Value,
}

/// Every sample patient, lowest intervention need last.
pub fn all() -> Vec<SamplePatient> {
    vec![
        SamplePatient {
            name: "elderly-ibuprofen-user",
            summary: "70-year-old taking ibuprofen 800 mg/day, no other risk factors",
            document: elderly_ibuprofen_user(),
        },
        SamplePatient {
            name: "triple-therapy",
            summary: "55-year-old on ibuprofen, an antiplatelet and an anticoagulant",
            document: triple_therapy_patient(),
        },
        SamplePatient {
            name: "ppi-protected-nsaid-user",
            summary: "50-year-old on diclofenac 100 mg/day with omeprazole 20 mg oral",
            document: ppi_protected_nsaid_user(),
        },
        SamplePatient {
            name: "critical-care",
            summary: "ICU patient on anticoagulation with renal impairment, pantoprazole 40 mg IV",
            document: critical_care_patient(),
        },
        SamplePatient {
            name: "low-risk-paracetamol-user",
            summary: "34-year-old taking paracetamol 1000 mg/day",
            document: low_risk_paracetamol_user(),
        },
    ]
}

pub fn elderly_ibuprofen_user() -> Value {
    json!({
        "age": 70,
        "weight_kg": 72.0,
        "height_cm": 168.0,
        "nsaid_use": true,
        "selected_nsaid_group": "Propionic acid derivatives (Profens)",
        "selected_nsaid": "Ibuprofen",
        "nsaid_dose": 800
    })
}

pub fn triple_therapy_patient() -> Value {
    json!({
        "age": 55,
        "weight_kg": 88.0,
        "height_cm": 180.0,
        "nsaid_use": true,
        "antiplatelet_use": true,
        "anticoagulant_use": true,
        "selected_nsaid_group": "Propionic acid derivatives (Profens)",
        "selected_nsaid": "Ibuprofen",
        "nsaid_dose": 1200
    })
}

pub fn ppi_protected_nsaid_user() -> Value {
    json!({
        "age": 50,
        "weight_kg": 64.0,
        "height_cm": 160.0,
        "nsaid_use": true,
        "h_pylori_positive": "negative",
        "selected_nsaid_group": "Acetic acid derivatives",
        "selected_nsaid": "Diclofenac",
        "nsaid_dose": 100,
        "selected_ppi": "Omeprazole",
        "ppi_dose": 20,
        "ppi_route": "Oral"
    })
}

pub fn critical_care_patient() -> Value {
    json!({
        "age": 58,
        "weight_kg": null,
        "height_cm": null,
        "anticoagulant_use": true,
        "critical_illness": true,
        "renal_impairment": true,
        "h_pylori_positive": null,
        "selected_ppi": "Pantoprazole",
        "ppi_dose": 40,
        "ppi_route": "IV"
    })
}

pub fn low_risk_paracetamol_user() -> Value {
    json!({
        "age": 34,
        "weight_kg": 59.0,
        "height_cm": 165.0,
        "nsaid_use": true,
        "h_pylori_positive": false,
        "selected_nsaid_group": "Non-NSAID Analgesics",
        "selected_nsaid": "Paracetamol",
        "nsaid_dose": 1000
    })
}
