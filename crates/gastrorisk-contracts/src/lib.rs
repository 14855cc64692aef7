//! # gastrorisk-contracts
//!
//! Shared types for the GASTRORISK upper-GI bleeding risk engine.
//!
//! All crates in the workspace import from here. No scoring logic lives in
//! this crate — only data definitions, the tier table, and error types.

pub mod assessment;
pub mod error;
pub mod intake;
pub mod patient;
