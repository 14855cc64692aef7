//! GASTRORISK — command-line assessor
//!
//! Scores a patient document, runs the sample scenarios, or prints the
//! active reference tables.
//!
//! Usage:
//!   cargo run -p gastrorisk-demo -- assess patient.json
//!   cargo run -p gastrorisk-demo -- assess patient.json --json
//!   cargo run -p gastrorisk-demo -- assess patient.json --reference site.toml
//!   cargo run -p gastrorisk-demo -- scenarios
//!   cargo run -p gastrorisk-demo -- reference

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gastrorisk_contracts::error::GastroRiskError;
use gastrorisk_ref_clinical::{
    build_assessor, load_reference, render_assessment, render_reference, scenarios,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// GASTRORISK — GI bleeding risk assessment for PPI therapy decisions.
#[derive(Parser)]
#[command(
    name = "gastrorisk",
    about = "GI bleeding risk assessment for PPI therapy decisions",
    long_about = "Scores a patient's upper GI bleeding risk from medications and clinical\n\
                  indications and maps it onto a PPI therapy recommendation."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assess the patient document in FILE (JSON).
    Assess {
        file: PathBuf,
        /// Reference tables to use instead of the built-in ones.
        #[arg(long, value_name = "TOML")]
        reference: Option<PathBuf>,
        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run every sample scenario.
    Scenarios,
    /// Print the drug table, PPI doses, indication weights, gates, and
    /// scoring constants.
    Reference {
        #[arg(long, value_name = "TOML")]
        reference: Option<PathBuf>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Assessment(#[from] GastroRiskError),

    #[error("failed to read patient file '{path}': {source}")]
    ReadPatient {
        path: String,
        source: std::io::Error,
    },

    #[error("patient file '{path}' is not valid JSON: {source}")]
    ParsePatient {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(serde_json::Error),
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for per-gate output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Assess {
            file,
            reference,
            json,
        } => assess(&file, reference.as_deref(), json),
        Command::Scenarios => scenarios::run_all().map_err(CliError::from),
        Command::Reference { reference } => print_reference(reference.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("gastrorisk: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn assess(file: &Path, reference: Option<&Path>, json: bool) -> Result<(), CliError> {
    let path = file.display().to_string();
    let contents = std::fs::read_to_string(file).map_err(|source| CliError::ReadPatient {
        path: path.clone(),
        source,
    })?;
    let document: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|source| CliError::ParsePatient { path, source })?;
    debug!(file = %file.display(), "patient document loaded");

    let assessor = build_assessor(load_reference(reference)?);
    let report = assessor.assess_document(&document)?;

    if json {
        let text = serde_json::to_string_pretty(&report).map_err(CliError::Serialize)?;
        println!("{text}");
    } else {
        println!("{}", render_assessment(&report));
    }
    Ok(())
}

fn print_reference(reference: Option<&Path>) -> Result<(), CliError> {
    let tables = load_reference(reference)?;
    println!("{}", render_reference(&tables));
    Ok(())
}
