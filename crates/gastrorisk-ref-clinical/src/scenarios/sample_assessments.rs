//! Scenario 1: Sample Assessments
//!
//! Scores every fictional sample patient end to end: intake, decoding,
//! engine, rendering. Covers each risk band at least once.

use gastrorisk_contracts::error::GastroResult;

use crate::{render::render_assessment, runtime::builtin_assessor, sample_patients};

/// Run Scenario 1: Sample Assessments.
pub fn run_scenario() -> GastroResult<()> {
    println!("=== Scenario 1: Sample Assessments ===");
    println!();

    let assessor = builtin_assessor()?;

    for patient in sample_patients::all() {
        println!("  Patient: {} ({})", patient.name, patient.summary);
        let report = assessor.assess_document(&patient.document)?;
        let b = &report.breakdown;
        println!(
            "  Breakdown: medication {} + indication {} + triple {} + high-risk {} + PPI {} = {}",
            b.medication_subtotal,
            b.indication,
            b.triple_therapy_bonus,
            b.high_risk_bonus,
            b.ppi_reduction,
            b.total
        );
        println!();
        for line in render_assessment(&report).lines() {
            println!("    {line}");
        }
        println!();
    }

    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}
