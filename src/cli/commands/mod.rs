//! CLI command handlers for `ProgramFinder`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod catalog;
pub mod config;
pub mod rank;

use program_finder::config::Config;
use program_finder::core::catalog::Catalog;
use program_finder::core::intake::{self, IntakeError};
use program_finder::core::models::SubjectLedger;
use program_finder::core::registry::SubjectRegistry;
use program_finder::{error, info};
use std::path::Path;

/// Load the configured subject list, exiting on failure
pub fn load_registry(config: &Config) -> SubjectRegistry {
    let path = config.subjects_path();
    match SubjectRegistry::resolve_source(path.as_deref()) {
        Ok(registry) => {
            info!("Loaded {} subjects", registry.len());
            registry
        }
        Err(e) => {
            error!("Failed to load subjects: {e}");
            eprintln!("✗ Failed to load subjects: {e}");
            std::process::exit(1);
        }
    }
}

/// Load the configured catalog and validate it against `registry`, exiting on failure
pub fn load_catalog(config: &Config, registry: &SubjectRegistry) -> Catalog {
    let path = config.catalog_path();
    match Catalog::resolve_source(path.as_deref(), registry) {
        Ok(catalog) => {
            info!("Loaded {} programs", catalog.len());
            catalog
        }
        Err(e) => {
            error!("Failed to load catalog: {e}");
            eprintln!("✗ Failed to load catalog: {e}");
            std::process::exit(1);
        }
    }
}

/// Build a ledger from an optional ledger file followed by `id=pct` arguments
///
/// # Errors
/// Returns the first file or argument error.
pub fn collect_ledger(
    subjects: &[String],
    ledger_file: Option<&Path>,
    registry: &SubjectRegistry,
) -> Result<SubjectLedger, IntakeError> {
    let mut ledger = match ledger_file {
        Some(path) => intake::load_ledger_file(path, registry)?,
        None => SubjectLedger::new(),
    };
    intake::extend_from_args(&mut ledger, registry, subjects)?;
    Ok(ledger)
}

/// [`collect_ledger`], printing the error and exiting on failure
pub fn ledger_or_exit(
    subjects: &[String],
    ledger_file: Option<&Path>,
    registry: &SubjectRegistry,
) -> SubjectLedger {
    match collect_ledger(subjects, ledger_file, registry) {
        Ok(ledger) => ledger,
        Err(e) => {
            error!("Invalid subjects: {e}");
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}
