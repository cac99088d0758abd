//! Input validation errors shared by subject ids, percentages and the ledger

use std::fmt;

/// Reasons a subject entry was rejected before reaching the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No subject was selected (empty identifier)
    MissingSubject,
    /// Identifier contains characters outside `[a-z0-9-]`
    InvalidSubjectId(String),
    /// Identifier is well formed but not in the subject registry
    UnknownSubject(String),
    /// Percentage was missing, non-numeric, fractional, negative or above 100
    InvalidPercentage(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSubject => write!(f, "Please select a subject"),
            Self::InvalidSubjectId(raw) => write!(
                f,
                "Invalid subject id '{raw}' (use lowercase letters, digits and '-')"
            ),
            Self::UnknownSubject(raw) => write!(f, "Unknown subject '{raw}'"),
            Self::InvalidPercentage(raw) => {
                write!(f, "Please enter a valid percentage (0-100), got '{raw}'")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
