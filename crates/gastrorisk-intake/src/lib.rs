//! # gastrorisk-intake
//!
//! Intake checks for incoming patient documents.
//!
//! This crate provides [`validator::SchemaIntake`], which implements the
//! [`gastrorisk_core::traits::IntakeValidator`] trait. A document is checked
//! in two phases:
//!
//! 1. **Structural** — JSON Schema validation via the `jsonschema` crate.
//! 2. **Field rules** — `RequiredField`, `Range`, `AllowedValues` and `Custom`
//!    rules evaluated against the raw JSON.
//!
//! [`patient_schema::default_patient_schema`] returns the schema used for
//! patient records, and [`validator::SchemaIntake::for_patients`] returns a
//! validator with the matching custom rules already registered.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use gastrorisk_intake::{patient_schema::default_patient_schema, validator::SchemaIntake};
//!
//! let intake = SchemaIntake::for_patients();
//! let report = intake.validate(&document, &default_patient_schema())?;
//! ```

pub mod patient_schema;
pub mod validator;

pub use patient_schema::default_patient_schema;
pub use validator::SchemaIntake;
