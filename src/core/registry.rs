//! Selectable subject reference list

use crate::core::catalog::CatalogError;
use crate::core::models::{SubjectId, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Compiled-in subject list
const BUILTIN_SUBJECTS: &str = include_str!("../../assets/subjects.toml");

/// A selectable subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectInfo {
    /// Subject identifier
    pub id: SubjectId,
    /// Display name (e.g. "Physical Sciences")
    pub name: String,
}

/// Subject id to display name lookup
///
/// The registry labels ledger entries and is the reference that catalog
/// requirements are checked against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRegistry {
    #[serde(default, rename = "subject")]
    subjects: Vec<SubjectInfo>,
}

impl SubjectRegistry {
    /// Build a registry from `(id, name)` pairs
    ///
    /// # Errors
    /// Returns an error if an id is malformed or repeated.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self, CatalogError> {
        let subjects = pairs
            .iter()
            .map(|(id, name)| {
                SubjectId::parse(id)
                    .map(|id| SubjectInfo {
                        id,
                        name: (*name).to_string(),
                    })
                    .map_err(CatalogError::InvalidSubject)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self { subjects }.checked()
    }

    /// Parse a registry from TOML (`[[subject]]` tables with `id` and `name`)
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or an id is repeated.
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        let registry: Self = toml::from_str(toml_str).map_err(CatalogError::Parse)?;
        registry.checked()
    }

    /// Load a registry from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse the compiled-in subject list
    ///
    /// # Errors
    /// Returns an error if the embedded asset does not parse or repeats an id.
    pub fn try_builtin() -> Result<Self, CatalogError> {
        Self::from_toml(BUILTIN_SUBJECTS)
    }

    /// The compiled-in subject list
    ///
    /// # Panics
    /// Panics if the embedded subject list is invalid. This cannot happen for a
    /// released binary since the asset is checked by the test suite.
    #[must_use]
    pub fn builtin() -> Self {
        Self::try_builtin().expect("Failed to parse compiled-in subject list")
    }

    /// Use the file at `path` when given, otherwise the built-in list
    ///
    /// # Errors
    /// Returns an error if the custom file cannot be loaded.
    pub fn resolve_source(path: Option<&Path>) -> Result<Self, CatalogError> {
        path.map_or_else(Self::try_builtin, Self::load)
    }

    fn checked(self) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for info in &self.subjects {
            if !seen.insert(info.id.as_str()) {
                return Err(CatalogError::DuplicateSubject(info.id.clone()));
            }
        }
        Ok(self)
    }

    /// Look up a raw subject id
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingSubject`] for empty input,
    /// [`ValidationError::InvalidSubjectId`] for malformed input and
    /// [`ValidationError::UnknownSubject`] when the id is not registered.
    pub fn resolve(&self, raw: &str) -> Result<&SubjectInfo, ValidationError> {
        let id = SubjectId::parse(raw)?;
        self.get(id.as_str())
            .ok_or_else(|| ValidationError::UnknownSubject(id.to_string()))
    }

    /// Look up a subject by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SubjectInfo> {
        self.subjects.iter().find(|info| info.id == id)
    }

    /// Display name for `id`
    #[must_use]
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.get(id).map(|info| info.name.as_str())
    }

    /// Whether `id` is registered
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Subjects in listing order
    pub fn iter(&self) -> std::slice::Iter<'_, SubjectInfo> {
        self.subjects.iter()
    }

    /// Number of subjects
    #[must_use]
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_source_without_path_uses_builtin() {
        let resolved = SubjectRegistry::resolve_source(None).unwrap();
        assert_eq!(resolved.len(), SubjectRegistry::try_builtin().unwrap().len());
        assert!(resolved.contains("math-lit"));
    }

    #[test]
    fn test_builtin_has_gated_subjects() {
        let registry = SubjectRegistry::builtin();
        for id in [
            SubjectId::MATH,
            SubjectId::MATH_LIT,
            SubjectId::ENGLISH,
            SubjectId::ENGLISH_FAL,
        ] {
            assert!(registry.contains(id), "{id} missing from builtin registry");
        }
        assert_eq!(registry.display_name("math"), Some("Mathematics"));
    }

    #[test]
    fn test_resolve_errors() {
        let registry = SubjectRegistry::builtin();
        assert_eq!(
            registry.resolve("").unwrap_err(),
            ValidationError::MissingSubject
        );
        assert_eq!(
            registry.resolve("astrology").unwrap_err(),
            ValidationError::UnknownSubject("astrology".to_string())
        );
        assert_eq!(registry.resolve("history").unwrap().name, "History");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = SubjectRegistry::from_pairs(&[("math", "Mathematics"), ("math", "Maths")]);
        assert!(matches!(result, Err(CatalogError::DuplicateSubject(_))));
    }

    #[test]
    fn test_from_toml() {
        let registry = SubjectRegistry::from_toml(
            r#"
[[subject]]
id = "music"
name = "Music"
"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert_eq!(registry.iter().next().unwrap().name, "Music");
    }
}
