//! # gastrorisk-ref-clinical
//!
//! Clinical reference runtime for GASTRORISK.
//!
//! Wires the rule-based engine and the schema intake into an `Assessor` and
//! demonstrates it in three scenarios using fictional patients:
//!
//! 1. **Sample assessments** — five representative patients scored end to
//!    end, one per risk pattern.
//! 2. **PPI protection** — the same NSAID user with no PPI, an oral PPI,
//!    and an IV PPI.
//! 3. **Intake rejection** — documents that never reach the engine.
//!
//! All patient data is hardcoded and fictional.

pub mod render;
pub mod runtime;
pub mod sample_patients;
pub mod scenarios;

pub use render::{render_assessment, render_reference};
pub use runtime::{build_assessor, load_reference};
