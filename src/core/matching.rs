//! Program match scoring
//!
//! [`calculate_match`] scores one program against a learner's ledger. Scoring is
//! additive with fixed weights per requirement category and clamped to 100:
//!
//! | Category | Points |
//! |---|---|
//! | Mathematics at or above threshold | 30 |
//! | Mathematical Literacy accepted in place of Mathematics | 25 |
//! | English at or above threshold | 25 |
//! | Each other required subject present | 20 |
//! | Each recommended subject present | 10 |
//! | Average ≥ 70 / ≥ 60 / ≥ 50 | 15 / 10 / 5 |
//!
//! Mathematics and English are evaluated exactly once, by their threshold gates.
//! Listing either under `required` earns no points and never adds a shortfall.
//! A threshold of 0 sets no gate.

use crate::core::models::{Percentage, Program, Requirements, SubjectId, SubjectLedger};
use std::fmt;

/// Fixed scoring weights
pub mod points {
    /// Mathematics at or above the threshold
    pub const MATH: u32 = 30;
    /// Mathematical Literacy accepted as a substitute
    pub const MATH_LIT_SUBSTITUTE: u32 = 25;
    /// English at or above the threshold
    pub const ENGLISH: u32 = 25;
    /// Each required subject present (other than gated ones)
    pub const REQUIRED_SUBJECT: u32 = 20;
    /// Each recommended subject present
    pub const RECOMMENDED_SUBJECT: u32 = 10;
    /// `(minimum average, bonus)`, checked in order
    pub const AVERAGE_BONUS: [(u32, u32); 3] = [(70, 15), (60, 10), (50, 5)];
}

/// Highest possible score
pub const MAX_SCORE: u8 = 100;

/// Qualitative band derived from the score alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchLevel {
    /// Score below 60
    Fair,
    /// Score 60-79
    Good,
    /// Score 80 or more
    Excellent,
}

impl MatchLevel {
    /// Band for `score`. Independent of qualification, so a close miss can
    /// still show as a good match.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Excellent
        } else if score >= 60 {
            Self::Good
        } else {
            Self::Fair
        }
    }

    /// Lowercase label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
        }
    }
}

impl fmt::Display for MatchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A failed admission gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shortfall {
    /// Mathematics below threshold or missing (and Math Lit not accepted)
    Mathematics {
        /// Program threshold
        required: Percentage,
        /// Learner's Mathematics mark, if any
        actual: Option<Percentage>,
    },
    /// English below threshold or missing
    English {
        /// Program threshold
        required: Percentage,
        /// Learner's English mark, if any
        actual: Option<Percentage>,
    },
    /// A required subject is not in the ledger
    MissingSubject(SubjectId),
}

fn describe(actual: Option<Percentage>) -> String {
    actual.map_or_else(|| "none".to_string(), |p| p.to_string())
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mathematics { required, actual } => write!(
                f,
                "Need Mathematics: {}%+ (you have {})",
                required.value(),
                describe(*actual)
            ),
            Self::English { required, actual } => write!(
                f,
                "Need English: {}%+ (you have {})",
                required.value(),
                describe(*actual)
            ),
            Self::MissingSubject(id) => write!(f, "Missing required subject: {id}"),
        }
    }
}

/// Points earned per category before clamping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// Mathematics gate (30, 25 for Math Lit, or 0)
    pub math: u32,
    /// English gate (25 or 0)
    pub english: u32,
    /// Required subjects other than gated ones
    pub required: u32,
    /// Recommended subjects
    pub recommended: u32,
    /// Average mark bonus
    pub average: u32,
}

impl ScoreBreakdown {
    /// Unclamped sum of all categories
    #[must_use]
    pub const fn raw_total(&self) -> u32 {
        self.math + self.english + self.required + self.recommended + self.average
    }

    /// Sum clamped to [`MAX_SCORE`]
    #[must_use]
    pub fn clamped(&self) -> u8 {
        u8::try_from(self.raw_total().min(u32::from(MAX_SCORE))).unwrap_or(MAX_SCORE)
    }
}

/// Outcome of matching one program against a ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Match quality, 0-100
    pub score: u8,
    /// Whether every gate passed
    pub qualifies: bool,
    /// Failed gates in evaluation order; empty exactly when `qualifies`
    pub reasons: Vec<Shortfall>,
    /// Band derived from `score`
    pub level: MatchLevel,
    /// Per-category points
    pub breakdown: ScoreBreakdown,
}

impl MatchResult {
    /// Human-readable reasons
    #[must_use]
    pub fn reason_messages(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}

/// Score `program` against `ledger`
///
/// Pure and total: ineligibility is reported through `qualifies` and `reasons`,
/// never as an error.
#[must_use]
pub fn calculate_match(program: &Program, ledger: &SubjectLedger) -> MatchResult {
    let requirements = &program.requirements;
    let mut reasons = Vec::new();

    let breakdown = ScoreBreakdown {
        math: math_gate(requirements, ledger, &mut reasons),
        english: english_gate(requirements, ledger, &mut reasons),
        required: required_subjects(requirements, ledger, &mut reasons),
        recommended: recommended_bonus(requirements, ledger),
        average: average_bonus(ledger),
    };

    let score = breakdown.clamped();
    MatchResult {
        score,
        qualifies: reasons.is_empty(),
        reasons,
        level: MatchLevel::from_score(score),
        breakdown,
    }
}

fn math_gate(requirements: &Requirements, ledger: &SubjectLedger, reasons: &mut Vec<Shortfall>) -> u32 {
    let Some(threshold) = requirements.math_threshold() else {
        return 0;
    };

    let math = ledger.get(SubjectId::MATH);
    if math.is_some_and(|entry| entry.percentage >= threshold) {
        return points::MATH;
    }
    if ledger.contains(SubjectId::MATH_LIT) && requirements.accepts_math_lit() {
        return points::MATH_LIT_SUBSTITUTE;
    }

    reasons.push(Shortfall::Mathematics {
        required: threshold,
        actual: math.map(|entry| entry.percentage),
    });
    0
}

fn english_gate(
    requirements: &Requirements,
    ledger: &SubjectLedger,
    reasons: &mut Vec<Shortfall>,
) -> u32 {
    let Some(threshold) = requirements.english_threshold() else {
        return 0;
    };

    // Home Language and First Additional Language are interchangeable here
    let english = ledger.first_of(&[SubjectId::ENGLISH, SubjectId::ENGLISH_FAL]);
    if english.is_some_and(|entry| entry.percentage >= threshold) {
        return points::ENGLISH;
    }

    reasons.push(Shortfall::English {
        required: threshold,
        actual: english.map(|entry| entry.percentage),
    });
    0
}

fn required_subjects(
    requirements: &Requirements,
    ledger: &SubjectLedger,
    reasons: &mut Vec<Shortfall>,
) -> u32 {
    let mut earned = 0;
    for subject in &requirements.required {
        // math and english belong to their gates, never to this category
        if subject.is_gated() {
            continue;
        }
        if ledger.contains(subject.as_str()) {
            earned += points::REQUIRED_SUBJECT;
        } else {
            reasons.push(Shortfall::MissingSubject(subject.clone()));
        }
    }
    earned
}

fn recommended_bonus(requirements: &Requirements, ledger: &SubjectLedger) -> u32 {
    let present = requirements
        .recommended
        .iter()
        .filter(|subject| ledger.contains(subject.as_str()))
        .count();
    u32::try_from(present).map_or(u32::MAX, |n| n.saturating_mul(points::RECOMMENDED_SUBJECT))
}

/// Bonus for the mean of every ledger mark. Compared as `total >= min * count`
/// so no rounding is involved.
fn average_bonus(ledger: &SubjectLedger) -> u32 {
    let Ok(count) = u32::try_from(ledger.count()) else {
        return 0;
    };
    if count == 0 {
        return 0;
    }
    let total = ledger.total();
    points::AVERAGE_BONUS
        .iter()
        .find(|(minimum, _)| total >= minimum * count)
        .map_or(0, |(_, bonus)| *bonus)
}
