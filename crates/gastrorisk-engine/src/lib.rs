//! # gastrorisk-engine
//!
//! A TOML-driven, rule-based GI bleeding risk engine.
//!
//! ## Overview
//!
//! This crate provides [`RuleBasedEngine`], which implements the
//! [`RiskEngine`](gastrorisk_core::traits::RiskEngine) trait. The drug table,
//! indication weights, indication gates, and every scoring constant are
//! declared in a TOML reference document, validated once at load, and never
//! modified afterwards.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use gastrorisk_engine::{ReferenceTables, RuleBasedEngine};
//!
//! let tables = ReferenceTables::from_file(Path::new("reference/site.toml"))?;
//! let engine = RuleBasedEngine::new(tables);
//! // Pass `engine` to `gastrorisk_core::Assessor::new(...)`.
//! ```
//!
//! ## Gate matching
//!
//! Each gate lists `all` conditions (every one must hold) and optional `any`
//! conditions (at least one must hold). Every gate that fires adds its
//! indication's weight once.

pub mod engine;
pub mod gate;
pub mod reference;

pub use engine::RuleBasedEngine;
pub use gate::{Condition, IndicationGate};
pub use reference::{
    NsaidEntry, PpiEntry, ReferenceConfig, ReferenceTables, ScoringConstants, MAX_WEIGHT,
};

// ── Tests ─────────────────────────────────────────────────────────────────────
