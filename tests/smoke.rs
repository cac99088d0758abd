//! Integration smoke tests for `program_finder`

use program_finder::core::get_version;
use program_finder::{Catalog, SubjectRegistry};

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn builtin_data_is_consistent() {
    let registry = SubjectRegistry::builtin();
    let catalog = Catalog::resolve_source(None, &registry).expect("built-in catalog should validate");
    assert!(!catalog.is_empty());
    assert!(registry.len() > 10);
}
