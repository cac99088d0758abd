//! Program catalog loading and validation

use crate::core::models::{Program, SubjectId, SubjectLedger, ValidationError};
use crate::core::ranking::{rank_programs, RankedProgram};
use crate::core::registry::SubjectRegistry;
use crate::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Compiled-in program catalog
const BUILTIN_CATALOG: &str = include_str!("../../assets/programs.toml");

/// Errors raised while loading catalog or subject reference data
#[derive(Debug)]
pub enum CatalogError {
    /// The file could not be read
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// The TOML was malformed or did not match the schema
    Parse(toml::de::Error),
    /// A subject id in the reference list was malformed
    InvalidSubject(ValidationError),
    /// The same subject id appears twice in the reference list
    DuplicateSubject(SubjectId),
    /// The catalog failed validation against the subject registry
    Invalid(Vec<CatalogIssue>),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Parse(err) => write!(f, "invalid TOML: {err}"),
            Self::InvalidSubject(err) => write!(f, "invalid subject list: {err}"),
            Self::DuplicateSubject(id) => write!(f, "subject '{id}' is listed more than once"),
            Self::Invalid(issues) => {
                let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
                write!(f, "invalid catalog: {}", messages.join("; "))
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidSubject(err) => Some(err),
            Self::DuplicateSubject(_) | Self::Invalid(_) => None,
        }
    }
}

/// A problem found by [`Catalog::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// Two programs share an id
    DuplicateProgram(String),
    /// A requirement names a subject that is not in the registry
    UnknownSubject {
        /// Program id
        program: String,
        /// Unregistered subject
        subject: SubjectId,
    },
    /// A subject is both required and recommended, so it scores twice
    RequiredAlsoRecommended {
        /// Program id
        program: String,
        /// Overlapping subject
        subject: SubjectId,
    },
}

impl CatalogIssue {
    /// Whether the issue makes the catalog unusable (as opposed to a warning)
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::RequiredAlsoRecommended { .. })
    }
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateProgram(id) => write!(f, "program id '{id}' is used more than once"),
            Self::UnknownSubject { program, subject } => {
                write!(f, "program '{program}' names unknown subject '{subject}'")
            }
            Self::RequiredAlsoRecommended { program, subject } => write!(
                f,
                "program '{program}' lists '{subject}' as both required and recommended"
            ),
        }
    }
}

/// Ordered, read-only list of programs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, rename = "program")]
    programs: Vec<Program>,
}

impl Catalog {
    /// Build a catalog from programs, keeping their order
    #[must_use]
    pub const fn new(programs: Vec<Program>) -> Self {
        Self { programs }
    }

    /// Parse a catalog from TOML (`[[program]]` tables)
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed, a threshold is outside 0-100,
    /// or a subject id is malformed.
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        toml::from_str(toml_str).map_err(CatalogError::Parse)
    }

    /// Load a catalog from a TOML file
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

    /// Parse the compiled-in catalog
    ///
    /// # Errors
    /// Returns an error if the embedded asset does not parse.
    pub fn try_builtin() -> Result<Self, CatalogError> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    /// The compiled-in catalog
    ///
    /// # Panics
    /// Panics if the embedded catalog is invalid TOML. The asset is covered by
    /// the test suite, so this should never happen in practice.
    #[must_use]
    pub fn builtin() -> Self {
        Self::try_builtin().expect("Failed to parse compiled-in program catalog")
    }

    /// Load the catalog at `path` (or the built-in one) and check it against
    /// `registry`. Warnings are logged; errors reject the catalog.
    ///
    /// # Errors
    /// Returns an error if loading fails or validation finds errors.
    pub fn resolve_source(
        path: Option<&Path>,
        registry: &SubjectRegistry,
    ) -> Result<Self, CatalogError> {
        let catalog = path.map_or_else(Self::try_builtin, Self::load)?;
        let issues = catalog.validate(registry);

        for issue in issues.iter().filter(|issue| !issue.is_error()) {
            warn!("Catalog: {issue}");
        }

        let errors: Vec<CatalogIssue> = issues.into_iter().filter(CatalogIssue::is_error).collect();
        if errors.is_empty() {
            Ok(catalog)
        } else {
            Err(CatalogError::Invalid(errors))
        }
    }

    /// Check program ids and requirement subjects
    ///
    /// # Returns
    /// Every issue found, errors and warnings alike, in catalog order
    #[must_use]
    pub fn validate(&self, registry: &SubjectRegistry) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut seen_ids = HashSet::new();

        for program in &self.programs {
            if !seen_ids.insert(program.id.as_str()) {
                issues.push(CatalogIssue::DuplicateProgram(program.id.clone()));
            }

            for subject in program.requirements.subject_ids() {
                if !registry.contains(subject.as_str()) {
                    issues.push(CatalogIssue::UnknownSubject {
                        program: program.id.clone(),
                        subject: subject.clone(),
                    });
                }
            }

            for subject in program.requirements.overlapping() {
                issues.push(CatalogIssue::RequiredAlsoRecommended {
                    program: program.id.clone(),
                    subject: subject.clone(),
                });
            }
        }

        issues
    }

    /// Programs in catalog order
    #[must_use]
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// Look up a program by id
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Program> {
        self.programs.iter().find(|program| program.id == id)
    }

    /// Programs belonging to `faculty` (case-insensitive), in catalog order
    #[must_use]
    pub fn by_faculty(&self, faculty: &str) -> Vec<&Program> {
        self.programs
            .iter()
            .filter(|program| program.faculty.eq_ignore_ascii_case(faculty))
            .collect()
    }

    /// Distinct faculty names in order of first appearance
    #[must_use]
    pub fn faculties(&self) -> Vec<&str> {
        let mut faculties: Vec<&str> = Vec::new();
        for program in &self.programs {
            if !faculties.contains(&program.faculty.as_str()) {
                faculties.push(&program.faculty);
            }
        }
        faculties
    }

    /// Number of programs
    #[must_use]
    pub fn len(&self) -> usize {
        self.programs.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Rank every program against `ledger`; see [`rank_programs`]
    #[must_use]
    pub fn rank(&self, ledger: &SubjectLedger) -> Vec<RankedProgram<'_>> {
        rank_programs(&self.programs, ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_source_without_path_uses_builtin() {
        let registry = SubjectRegistry::builtin();
        let resolved = Catalog::resolve_source(None, &registry).unwrap();
        assert_eq!(resolved, Catalog::try_builtin().unwrap());
        assert_eq!(resolved.len(), 13);
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        let registry = SubjectRegistry::builtin();

        assert_eq!(catalog.len(), 13);
        assert!(
            catalog.validate(&registry).is_empty(),
            "builtin catalog issues: {:?}",
            catalog.validate(&registry)
        );
    }

    #[test]
    fn test_builtin_accounting_requirements() {
        let catalog = Catalog::builtin();
        let accounting = catalog.find("bcom-accounting").unwrap();

        assert_eq!(accounting.requirements.math.map(|p| p.value()), Some(60));
        assert_eq!(accounting.requirements.english.map(|p| p.value()), Some(50));
        assert_eq!(accounting.requirements.required, vec!["math", "accounting"]);
        assert_eq!(accounting.requirements.recommended, vec!["economics"]);
        assert_eq!(accounting.nqf_level, Some(7));
    }

    #[test]
    fn test_validate_flags_unknown_duplicate_and_overlap() {
        let catalog = Catalog::from_toml(
            r#"
[[program]]
id = "a"
title = "A"
code = "A"
[program.requirements]
required = ["accounting", "astronomy"]
recommended = ["accounting"]

[[program]]
id = "a"
title = "A again"
code = "A2"
"#,
        )
        .unwrap();
        let issues = catalog.validate(&SubjectRegistry::builtin());

        assert_eq!(issues.len(), 3);
        assert!(matches!(
            &issues[0],
            CatalogIssue::UnknownSubject { subject, .. } if subject == "astronomy"
        ));
        assert!(matches!(
            &issues[1],
            CatalogIssue::RequiredAlsoRecommended { subject, .. } if subject == "accounting"
        ));
        assert!(!issues[1].is_error());
        assert_eq!(issues[2], CatalogIssue::DuplicateProgram("a".to_string()));
    }

    #[test]
    fn test_malformed_subject_id_rejected_at_parse() {
        let result = Catalog::from_toml(
            r#"
[[program]]
id = "a"
title = "A"
code = "A"
[program.requirements]
required = ["Physical Science"]
"#,
        );
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_faculties_and_filter() {
        let catalog = Catalog::builtin();
        let faculties = catalog.faculties();

        assert_eq!(faculties[0], "Economic and Management Sciences");
        assert!(faculties.contains(&"Law"));
        assert_eq!(catalog.by_faculty("natural sciences").len(), 3);
    }
}
