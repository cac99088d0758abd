//! Subject identifier model

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validated subject identifier (e.g. `math`, `english-fal`, `physical-science`)
///
/// Identifiers are non-empty and made of lowercase ASCII letters, digits and `-`.
/// Program requirements and ledger entries share this type so that a typo in
/// either surfaces when the data is loaded rather than as a silent non-match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectId(String);

impl SubjectId {
    /// Mathematics
    pub const MATH: &'static str = "math";
    /// Mathematical Literacy
    pub const MATH_LIT: &'static str = "math-lit";
    /// English Home Language
    pub const ENGLISH: &'static str = "english";
    /// English First Additional Language
    pub const ENGLISH_FAL: &'static str = "english-fal";

    /// Parse and validate an identifier
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingSubject`] for empty input and
    /// [`ValidationError::InvalidSubjectId`] for malformed input.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingSubject);
        }

        let well_formed = trimmed
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !trimmed.starts_with('-')
            && !trimmed.ends_with('-');
        if !well_formed {
            return Err(ValidationError::InvalidSubjectId(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the Mathematics or English identifier, the two subjects
    /// with dedicated threshold gates
    #[must_use]
    pub fn is_gated(&self) -> bool {
        self.0 == Self::MATH || self.0 == Self::ENGLISH
    }
}

impl FromStr for SubjectId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SubjectId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SubjectId> for String {
    fn from(value: SubjectId) -> Self {
        value.0
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SubjectId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SubjectId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ids() {
        for raw in ["math", "math-lit", "english-fal", "it", "isizulu2"] {
            let id = SubjectId::parse(raw).unwrap();
            assert_eq!(id.as_str(), raw);
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(SubjectId::parse("  accounting ").unwrap(), "accounting");
    }

    #[test]
    fn test_parse_empty_is_missing_subject() {
        assert_eq!(SubjectId::parse(""), Err(ValidationError::MissingSubject));
        assert_eq!(SubjectId::parse("   "), Err(ValidationError::MissingSubject));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["Math", "math lit", "math_lit", "-math", "math-", "wiskunde!"] {
            assert!(
                matches!(
                    SubjectId::parse(raw),
                    Err(ValidationError::InvalidSubjectId(_))
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_is_gated() {
        assert!(SubjectId::parse("math").unwrap().is_gated());
        assert!(SubjectId::parse("english").unwrap().is_gated());
        assert!(!SubjectId::parse("english-fal").unwrap().is_gated());
        assert!(!SubjectId::parse("math-lit").unwrap().is_gated());
    }
}
