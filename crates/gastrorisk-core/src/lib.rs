//! # gastrorisk-core
//!
//! The scoring pipeline for GASTRORISK.
//!
//! This crate provides:
//! - The two core traits (`RiskEngine`, `IntakeValidator`)
//! - The `Assessor` that runs a patient document through intake, decoding,
//!   and scoring
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gastrorisk_core::{Assessor, traits::{RiskEngine, IntakeValidator}};
//! ```

pub mod assessor;
pub mod traits;

pub use assessor::Assessor;
