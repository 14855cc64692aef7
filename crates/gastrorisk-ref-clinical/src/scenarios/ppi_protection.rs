//! Scenario 2: PPI Protection
//!
//! Scores one elderly naproxen user three times: unprotected, with an
//! adequate oral PPI, and with an adequate IV PPI. Shows the reduction each
//! route earns and how it moves the tier.

use serde_json::{json, Value};

use gastrorisk_contracts::error::GastroResult;

use crate::runtime::builtin_assessor;

fn naproxen_user(ppi: &str, dose: u32, route: &str) -> Value {
    json!({
        "age": 68,
        "nsaid_use": true,
        "selected_nsaid_group": "Propionic acid derivatives (Profens)",
        "selected_nsaid": "Naproxen",
        "nsaid_dose": 1000,
        "selected_ppi": ppi,
        "ppi_dose": dose,
        "ppi_route": route
    })
}

/// The three variants shown, as (label, document).
pub fn variants() -> Vec<(&'static str, Value)> {
    vec![
        ("no PPI", naproxen_user("None", 0, "None")),
        ("esomeprazole 20 mg oral", naproxen_user("Esomeprazole", 20, "Oral")),
        ("pantoprazole 80 mg IV", naproxen_user("Pantoprazole", 80, "IV")),
    ]
}

/// Run Scenario 2: PPI Protection.
pub fn run_scenario() -> GastroResult<()> {
    println!("=== Scenario 2: PPI Protection ===");
    println!();
    println!("  Patient: 68-year-old taking naproxen 1000 mg/day");
    println!();

    let assessor = builtin_assessor()?;

    for (label, document) in variants() {
        let report = assessor.assess_document(&document)?;
        println!(
            "  {:<26} PPI {:>2}  score {:>2}  {} {}",
            label,
            report.breakdown.ppi_reduction,
            report.result.score,
            report.result.tier.marker(),
            report.result.label
        );
    }

    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
