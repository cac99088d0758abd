//! Subject ledger: the learner's declared subjects and marks

use super::{Percentage, SubjectId, ValidationError};
use std::fmt;

/// One subject in the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectEntry {
    /// Subject identifier
    pub subject_id: SubjectId,

    /// Human label (e.g. "Physical Sciences")
    pub display_name: String,

    /// Final mark
    pub percentage: Percentage,
}

impl SubjectEntry {
    /// Create an entry from already validated parts
    #[must_use]
    pub fn new(subject_id: SubjectId, display_name: &str, percentage: Percentage) -> Self {
        Self {
            subject_id,
            display_name: display_name.to_string(),
            percentage,
        }
    }
}

/// Errors raised when adding to the ledger. The ledger is unchanged on error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Malformed subject or percentage
    Validation(ValidationError),
    /// The subject is already in the ledger; remove it first to change its mark
    Duplicate(SubjectId),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate(id) => write!(f, "Subject '{id}' has already been added"),
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Duplicate(_) => None,
        }
    }
}

impl From<ValidationError> for LedgerError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Ordered set of subject entries, at most one per subject id
///
/// Entries keep their insertion order. A ledger is an ordinary owned value;
/// each session or test builds its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectLedger {
    entries: Vec<SubjectEntry>,
}

impl SubjectLedger {
    /// Create an empty ledger
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Validate raw input and append a new entry
    ///
    /// # Arguments
    /// * `subject_id` - Selected subject id (empty means nothing selected)
    /// * `display_name` - Label shown for the subject
    /// * `percentage` - Raw percentage text, must be a whole number 0-100
    ///
    /// # Errors
    /// Returns [`LedgerError::Validation`] for an empty or malformed subject or
    /// percentage, and [`LedgerError::Duplicate`] when the subject is already present.
    pub fn add_subject(
        &mut self,
        subject_id: &str,
        display_name: &str,
        percentage: &str,
    ) -> Result<&SubjectEntry, LedgerError> {
        let subject_id = SubjectId::parse(subject_id)?;
        let percentage = percentage.parse::<Percentage>()?;
        self.add_entry(SubjectEntry::new(subject_id, display_name, percentage))
    }

    /// Append an already validated entry
    ///
    /// # Errors
    /// Returns [`LedgerError::Duplicate`] when the subject is already present.
    pub fn add_entry(&mut self, entry: SubjectEntry) -> Result<&SubjectEntry, LedgerError> {
        if self.contains(entry.subject_id.as_str()) {
            return Err(LedgerError::Duplicate(entry.subject_id));
        }
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Remove the entry for `subject_id`, returning it. Absent ids are a no-op.
    pub fn remove_subject(&mut self, subject_id: &str) -> Option<SubjectEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.subject_id == subject_id)?;
        Some(self.entries.remove(index))
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    #[must_use]
    pub fn entries(&self) -> &[SubjectEntry] {
        &self.entries
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, SubjectEntry> {
        self.entries.iter()
    }

    /// Look up the entry for `subject_id`
    #[must_use]
    pub fn get(&self, subject_id: &str) -> Option<&SubjectEntry> {
        self.entries
            .iter()
            .find(|entry| entry.subject_id == subject_id)
    }

    /// Whether `subject_id` is present
    #[must_use]
    pub fn contains(&self, subject_id: &str) -> bool {
        self.get(subject_id).is_some()
    }

    /// First entry, in ledger order, whose id is any of `subject_ids`
    #[must_use]
    pub fn first_of(&self, subject_ids: &[&str]) -> Option<&SubjectEntry> {
        self.entries
            .iter()
            .find(|entry| subject_ids.contains(&entry.subject_id.as_str()))
    }

    /// Sum of all percentages
    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries
            .iter()
            .map(|entry| u32::from(entry.percentage.value()))
            .sum()
    }

    /// Mean percentage across all entries, `None` when empty
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> Option<f64> {
        if self.entries.is_empty() {
            None
        } else {
            Some(f64::from(self.total()) / self.entries.len() as f64)
        }
    }
}

impl<'a> IntoIterator for &'a SubjectLedger {
    type Item = &'a SubjectEntry;
    type IntoIter = std::slice::Iter<'a, SubjectEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
