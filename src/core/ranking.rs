//! Ranking programs by match score

use crate::core::matching::{calculate_match, MatchResult};
use crate::core::models::{Program, SubjectLedger};
use std::fmt;

/// Subjects a learner must enter before recommendations are offered
pub const DEFAULT_MIN_SUBJECTS: usize = 3;

/// A program paired with its match against one ledger snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedProgram<'a> {
    /// Catalog entry
    pub program: &'a Program,
    /// Freshly computed match
    pub result: MatchResult,
}

/// Match every program against `ledger`, best score first
///
/// The sort is stable: programs with equal scores keep their catalog order.
/// Non-qualifying programs are kept; callers decide how to present them.
#[must_use]
pub fn rank_programs<'a>(catalog: &'a [Program], ledger: &SubjectLedger) -> Vec<RankedProgram<'a>> {
    let mut ranked: Vec<RankedProgram<'a>> = catalog
        .iter()
        .map(|program| RankedProgram {
            program,
            result: calculate_match(program, ledger),
        })
        .collect();
    ranked.sort_by(|a, b| b.result.score.cmp(&a.result.score));
    ranked
}

/// Returned when a ledger is too small to rank against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotEnoughSubjects {
    /// Subjects in the ledger
    pub have: usize,
    /// Subjects required
    pub need: usize,
}

impl NotEnoughSubjects {
    /// How many more subjects must be added
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.need.saturating_sub(self.have)
    }
}

impl fmt::Display for NotEnoughSubjects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Please add at least {} subjects to get recommendations (add {} more subject(s))",
            self.need,
            self.remaining()
        )
    }
}

impl std::error::Error for NotEnoughSubjects {}

/// Minimum-ledger-size gate applied before ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingPolicy {
    /// Fewest subjects allowed
    pub min_subjects: usize,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            min_subjects: DEFAULT_MIN_SUBJECTS,
        }
    }
}

impl RankingPolicy {
    /// Policy requiring `min_subjects` entries
    #[must_use]
    pub const fn new(min_subjects: usize) -> Self {
        Self { min_subjects }
    }

    /// Subjects still needed before ranking is allowed
    #[must_use]
    pub fn remaining(&self, ledger: &SubjectLedger) -> usize {
        self.min_subjects.saturating_sub(ledger.count())
    }

    /// Check the ledger size
    ///
    /// # Errors
    /// Returns [`NotEnoughSubjects`] when the ledger has fewer than `min_subjects` entries.
    pub fn check(&self, ledger: &SubjectLedger) -> Result<(), NotEnoughSubjects> {
        if ledger.count() < self.min_subjects {
            Err(NotEnoughSubjects {
                have: ledger.count(),
                need: self.min_subjects,
            })
        } else {
            Ok(())
        }
    }

    /// Check the ledger, then rank
    ///
    /// # Errors
    /// Returns [`NotEnoughSubjects`] when the ledger is too small.
    pub fn rank<'a>(
        &self,
        catalog: &'a [Program],
        ledger: &SubjectLedger,
    ) -> Result<Vec<RankedProgram<'a>>, NotEnoughSubjects> {
        self.check(ledger)?;
        Ok(rank_programs(catalog, ledger))
    }
}
