//! Scenario 3: Intake Rejection
//!
//! Submits documents that must never reach the engine and prints the error
//! each one produces.
//!
//!   1. Missing age and an unknown PPI route → `IntakeRejected`, both listed
//!   2. Ketorolac selected with no dose      → `IntakeRejected`
//!   3. Age outside the accepted range       → `IntakeRejected`

use serde_json::{json, Value};

use gastrorisk_contracts::error::{GastroResult, GastroRiskError};

use crate::runtime::builtin_assessor;

/// The rejected documents shown, as (label, document).
pub fn cases() -> Vec<(&'static str, Value)> {
    vec![
        (
            "missing age, unknown route",
            json!({
                "nsaid_use": false,
                "selected_ppi": "Omeprazole",
                "ppi_dose": 20,
                "ppi_route": "Sublingual"
            }),
        ),
        (
            "NSAID selected without a dose",
            json!({
                "age": 45,
                "nsaid_use": true,
                "selected_nsaid_group": "Acetic acid derivatives",
                "selected_nsaid": "Ketorolac"
            }),
        ),
        (
            "age out of range",
            json!({ "age": 212 }),
        ),
    ]
}

/// Run Scenario 3: Intake Rejection.
pub fn run_scenario() -> GastroResult<()> {
    println!("=== Scenario 3: Intake Rejection ===");
    println!();

    let assessor = builtin_assessor()?;

    for (label, document) in cases() {
        println!("  Case: {label}");
        match assessor.assess_document(&document) {
            Err(GastroRiskError::IntakeRejected { reason }) => {
                for failure in reason.split("; ") {
                    println!("    REJECTED  {failure}");
                }
            }
            Err(other) => println!("    ERROR     {other}"),
            Ok(report) => println!("    ACCEPTED  score {}", report.result.score),
        }
        println!();
    }

    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}
