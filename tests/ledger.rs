//! Integration tests for the subject ledger

use program_finder::core::models::{LedgerError, ValidationError};
use program_finder::SubjectLedger;

#[test]
fn duplicate_subject_rejected_and_ledger_unchanged() {
    let mut ledger = SubjectLedger::new();
    ledger.add_subject("math", "Mathematics", "65").unwrap();

    let err = ledger.add_subject("math", "Mathematics", "80").unwrap_err();
    assert!(matches!(err, LedgerError::Duplicate(_)));
    assert_eq!(ledger.count(), 1);
    assert_eq!(ledger.get("math").unwrap().percentage.value(), 65);
}

#[test]
fn remove_then_readd_takes_new_percentage() {
    let mut ledger = SubjectLedger::new();
    ledger.add_subject("english", "English Home Language", "52").unwrap();
    ledger.add_subject("history", "History", "61").unwrap();

    let removed = ledger.remove_subject("english").unwrap();
    assert_eq!(removed.percentage.value(), 52);
    ledger.add_subject("english", "English Home Language", "67").unwrap();

    assert_eq!(ledger.count(), 2);
    assert_eq!(ledger.get("english").unwrap().percentage.value(), 67);
    assert_eq!(ledger.entries()[1].subject_id.as_str(), "english");
}

#[test]
fn invalid_input_rejected() {
    let mut ledger = SubjectLedger::new();

    for (id, pct, expected) in [
        ("", "50", ValidationError::MissingSubject),
        ("math", "", ValidationError::InvalidPercentage(String::new())),
        ("math", "101", ValidationError::InvalidPercentage("101".to_string())),
        ("math", "-3", ValidationError::InvalidPercentage("-3".to_string())),
        ("math", "sixty", ValidationError::InvalidPercentage("sixty".to_string())),
    ] {
        let err = ledger.add_subject(id, "Mathematics", pct).unwrap_err();
        assert_eq!(err, LedgerError::Validation(expected));
    }
    assert!(ledger.is_empty());
}

#[test]
fn boundary_percentages_accepted() {
    let mut ledger = SubjectLedger::new();
    ledger.add_subject("math", "Mathematics", "0").unwrap();
    ledger.add_subject("english", "English Home Language", "100").unwrap();

    assert_eq!(ledger.total(), 100);
    assert_eq!(ledger.average(), Some(50.0));

    ledger.clear();
    assert_eq!(ledger.count(), 0);
    assert_eq!(ledger.average(), None);
}
