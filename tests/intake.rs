//! Integration tests for loading ledgers, catalogs and subject lists from disk

use program_finder::core::catalog::{CatalogError, CatalogIssue};
use program_finder::core::intake::{load_ledger_file, IntakeError};
use program_finder::{Catalog, SubjectRegistry};
use std::fs;
use tempfile::TempDir;

#[test]
fn ledger_file_round_trips_into_ranking() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("ledger.toml");
    fs::write(
        &path,
        r#"
[[subjects]]
id = "math"
percentage = 65

[[subjects]]
id = "english"
percentage = 55

[[subjects]]
id = "accounting"
percentage = 70
"#,
    )
    .expect("Failed to write ledger");

    let registry = SubjectRegistry::builtin();
    let ledger = load_ledger_file(&path, &registry).expect("ledger should load");
    assert_eq!(ledger.count(), 3);
    assert_eq!(ledger.get("accounting").unwrap().display_name, "Accounting");

    let catalog = Catalog::builtin();
    let top = &catalog.rank(&ledger)[0];
    assert_eq!(top.program.id, "bcom-accounting");
    assert_eq!(top.result.score, 85);
}

#[test]
fn missing_ledger_file_is_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let registry = SubjectRegistry::builtin();

    let err = load_ledger_file(&temp_dir.path().join("absent.toml"), &registry).unwrap_err();
    assert!(matches!(err, IntakeError::Io { .. }));
}

#[test]
fn duplicate_in_ledger_file_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("ledger.toml");
    fs::write(
        &path,
        "[[subjects]]\nid = \"math\"\npercentage = 60\n\n[[subjects]]\nid = \"math\"\npercentage = 70\n",
    )
    .expect("Failed to write ledger");

    let err = load_ledger_file(&path, &SubjectRegistry::builtin()).unwrap_err();
    assert_eq!(err.to_string(), "math: Subject 'math' has already been added");
}

#[test]
fn custom_catalog_validated_against_registry() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("programs.toml");
    fs::write(
        &path,
        r#"
[[program]]
id = "bsc-astro"
title = "BSc Astronomy"
code = "BSC-AST"

[program.requirements]
math = 70
required = ["astrophysics"]
"#,
    )
    .expect("Failed to write catalog");

    let registry = SubjectRegistry::builtin();
    let err = Catalog::resolve_source(Some(&path), &registry).unwrap_err();
    match err {
        CatalogError::Invalid(issues) => {
            assert_eq!(issues.len(), 1);
            assert!(matches!(issues[0], CatalogIssue::UnknownSubject { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn custom_subject_list_extends_catalog_vocabulary() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let subjects_path = temp_dir.path().join("subjects.toml");
    fs::write(
        &subjects_path,
        "[[subject]]\nid = \"math\"\nname = \"Mathematics\"\n\n[[subject]]\nid = \"astrophysics\"\nname = \"Astrophysics\"\n",
    )
    .expect("Failed to write subjects");

    let registry = SubjectRegistry::resolve_source(Some(&subjects_path)).expect("subjects load");
    assert_eq!(registry.len(), 2);

    let catalog = Catalog::from_toml(
        "[[program]]\nid = \"bsc-astro\"\ntitle = \"BSc Astronomy\"\ncode = \"BSC-AST\"\n\n[program.requirements]\nmath = 70\nrequired = [\"astrophysics\"]\n",
    )
    .expect("catalog parses");
    assert!(catalog.validate(&registry).is_empty());
}
