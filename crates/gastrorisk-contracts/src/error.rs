//! Error types shared by every GASTRORISK crate.
//!
//! Scoring itself never fails. Errors only arise at the edges: loading the
//! reference tables, accepting a patient document, and decoding it.

use thiserror::Error;

/// The unified error type for the GASTRORISK workspace.
#[derive(Debug, Error)]
pub enum GastroRiskError {
    /// The reference tables are missing, malformed, or incomplete.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The intake validator rejected a patient document.
    #[error("patient document rejected at intake: {reason}")]
    IntakeRejected { reason: String },

    /// A document passed intake but could not be decoded into a `PatientRecord`.
    #[error("malformed patient record: {reason}")]
    MalformedRecord { reason: String },

    /// A JSON Schema could not be compiled or applied outside the normal intake path.
    #[error("schema validation error: {reason}")]
    SchemaValidation { reason: String },
}

/// Convenience alias used throughout the GASTRORISK crates.
pub type GastroResult<T> = Result<T, GastroRiskError>;
