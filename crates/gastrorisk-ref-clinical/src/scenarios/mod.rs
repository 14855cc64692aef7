//! Reference runtime demo scenarios.
//!
//! Each scenario wires up the real GASTRORISK components (reference tables,
//! engine, intake, assessor) with fictional patients and prints what a
//! clinician would see.

pub mod intake_rejection;
pub mod ppi_protection;
pub mod sample_assessments;

use gastrorisk_contracts::error::GastroResult;

/// Run every scenario in order.
pub fn run_all() -> GastroResult<()> {
    sample_assessments::run_scenario()?;
    ppi_protection::run_scenario()?;
    intake_rejection::run_scenario()?;
    Ok(())
}
