//! Building a subject ledger from command-line arguments and ledger files
//!
//! Two input shapes are accepted:
//! - `id=percentage` arguments, e.g. `math=65`
//! - a TOML ledger file:
//!
//! ```toml
//! [[subjects]]
//! id = "math"
//! percentage = 65
//! ```
//!
//! Every entry goes through [`SubjectLedger::add_subject`], so a loaded ledger
//! satisfies the same invariants as one built interactively.

use crate::core::models::{LedgerError, SubjectLedger};
use crate::core::registry::SubjectRegistry;
use crate::debug;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while building a ledger from external input
#[derive(Debug)]
pub enum IntakeError {
    /// Argument was not of the form `id=percentage`
    Malformed(String),
    /// The subject could not be added
    Subject {
        /// Subject id as given
        subject: String,
        /// Why it was rejected
        source: LedgerError,
    },
    /// Ledger file could not be read
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// Ledger file was not valid TOML
    Parse(toml::de::Error),
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(arg) => {
                write!(f, "Expected SUBJECT=PERCENTAGE (e.g. math=65), got '{arg}'")
            }
            Self::Subject { subject, source } => write!(f, "{subject}: {source}"),
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Parse(err) => write!(f, "invalid ledger file: {err}"),
        }
    }
}

impl std::error::Error for IntakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Malformed(_) => None,
            Self::Subject { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LedgerFile {
    #[serde(default)]
    subjects: Vec<LedgerFileEntry>,
}

#[derive(Debug, Deserialize)]
struct LedgerFileEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    percentage: Option<toml::Value>,
}

impl LedgerFileEntry {
    /// Percentage as raw text so that floats, strings and missing values are
    /// rejected by the same validation as typed input
    fn raw_percentage(&self) -> String {
        match &self.percentage {
            None => String::new(),
            Some(toml::Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Split `id=percentage`
///
/// # Errors
/// Returns [`IntakeError::Malformed`] when there is no `=`.
pub fn parse_subject_arg(arg: &str) -> Result<(&str, &str), IntakeError> {
    arg.split_once('=')
        .map(|(id, pct)| (id.trim(), pct.trim()))
        .ok_or_else(|| IntakeError::Malformed(arg.to_string()))
}

/// Add one subject, labelled from the registry
///
/// # Errors
/// Returns [`IntakeError::Subject`] if the id is empty, malformed or unknown,
/// the percentage is invalid, or the subject is already present.
pub fn add_labelled(
    ledger: &mut SubjectLedger,
    registry: &SubjectRegistry,
    subject_id: &str,
    percentage: &str,
) -> Result<(), IntakeError> {
    let wrap = |source: LedgerError| IntakeError::Subject {
        subject: subject_id.to_string(),
        source,
    };
    let info = registry
        .resolve(subject_id)
        .map_err(|err| wrap(LedgerError::Validation(err)))?;
    let entry = ledger
        .add_subject(info.id.as_str(), &info.name, percentage)
        .map_err(wrap)?;
    debug!(
        "Added subject {} ({}) at {}",
        entry.subject_id, entry.display_name, entry.percentage
    );
    Ok(())
}

/// Add every `id=percentage` argument to `ledger`, stopping at the first error
///
/// # Errors
/// Returns the first malformed argument or rejected subject.
pub fn extend_from_args<S: AsRef<str>>(
    ledger: &mut SubjectLedger,
    registry: &SubjectRegistry,
    args: &[S],
) -> Result<(), IntakeError> {
    for arg in args {
        let (id, pct) = parse_subject_arg(arg.as_ref())?;
        add_labelled(ledger, registry, id, pct)?;
    }
    Ok(())
}

/// Build a ledger from `id=percentage` arguments
///
/// # Errors
/// Returns the first malformed argument or rejected subject.
pub fn build_ledger<S: AsRef<str>>(
    args: &[S],
    registry: &SubjectRegistry,
) -> Result<SubjectLedger, IntakeError> {
    let mut ledger = SubjectLedger::new();
    extend_from_args(&mut ledger, registry, args)?;
    Ok(ledger)
}

/// Build a ledger from TOML text
///
/// # Errors
/// Returns an error if the TOML is malformed or any entry is rejected.
pub fn ledger_from_toml(
    toml_str: &str,
    registry: &SubjectRegistry,
) -> Result<SubjectLedger, IntakeError> {
    let file: LedgerFile = toml::from_str(toml_str).map_err(IntakeError::Parse)?;
    let mut ledger = SubjectLedger::new();
    for entry in &file.subjects {
        add_labelled(&mut ledger, registry, &entry.id, &entry.raw_percentage())?;
    }
    Ok(ledger)
}

/// Build a ledger from a TOML ledger file
///
/// # Errors
/// Returns an error if the file cannot be read or any entry is rejected.
pub fn load_ledger_file(
    path: &Path,
    registry: &SubjectRegistry,
) -> Result<SubjectLedger, IntakeError> {
    let content = fs::read_to_string(path).map_err(|source| IntakeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ledger_from_toml(&content, registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ValidationError;

    #[test]
    fn test_parse_subject_arg() {
        assert_eq!(parse_subject_arg("math=65").unwrap(), ("math", "65"));
        assert_eq!(parse_subject_arg(" life-science = 80 ").unwrap(), ("life-science", "80"));
        assert!(matches!(
            parse_subject_arg("math65"),
            Err(IntakeError::Malformed(_))
        ));
    }

    #[test]
    fn test_build_ledger_labels_from_registry() {
        let registry = SubjectRegistry::builtin();
        let ledger = build_ledger(&["math=65", "physical-science=72"], &registry).unwrap();

        assert_eq!(ledger.count(), 2);
        assert_eq!(ledger.entries()[1].display_name, "Physical Sciences");
    }

    #[test]
    fn test_unknown_subject_rejected() {
        let registry = SubjectRegistry::builtin();
        let err = build_ledger(&["astrology=90"], &registry).unwrap_err();

        assert!(matches!(
            err,
            IntakeError::Subject {
                source: LedgerError::Validation(ValidationError::UnknownSubject(_)),
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_argument_rejected() {
        let registry = SubjectRegistry::builtin();
        let err = build_ledger(&["math=65", "math=70"], &registry).unwrap_err();

        assert!(matches!(
            err,
            IntakeError::Subject {
                source: LedgerError::Duplicate(_),
                ..
            }
        ));
        assert_eq!(err.to_string(), "math: Subject 'math' has already been added");
    }

    #[test]
    fn test_ledger_from_toml() {
        let registry = SubjectRegistry::builtin();
        let ledger = ledger_from_toml(
            r#"
[[subjects]]
id = "math"
percentage = 65

[[subjects]]
id = "english"
percentage = "55"
"#,
            &registry,
        )
        .unwrap();

        assert_eq!(ledger.count(), 2);
        assert_eq!(ledger.get("english").unwrap().percentage.value(), 55);
    }

    #[test]
    fn test_ledger_file_rejects_fraction_and_missing() {
        let registry = SubjectRegistry::builtin();
        for body in [
            "[[subjects]]\nid = \"math\"\npercentage = 65.5\n",
            "[[subjects]]\nid = \"math\"\n",
        ] {
            let err = ledger_from_toml(body, &registry).unwrap_err();
            assert!(matches!(
                err,
                IntakeError::Subject {
                    source: LedgerError::Validation(ValidationError::InvalidPercentage(_)),
                    ..
                }
            ));
        }
    }
}
