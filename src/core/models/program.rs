//! Degree program model

use super::{Percentage, SubjectId};
use serde::{Deserialize, Serialize};

/// Admission rules attached to a program
///
/// Every field is optional in catalog data; a program without a
/// `requirements` table has no gates at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Requirements {
    /// Minimum Mathematics percentage
    pub math: Option<Percentage>,

    /// Minimum English percentage (Home Language or First Additional Language)
    pub english: Option<Percentage>,

    /// Subjects that must be present
    pub required: Vec<SubjectId>,

    /// Subjects that earn bonus points when present
    pub recommended: Vec<SubjectId>,

    /// Explicitly allow or forbid Mathematical Literacy in place of Mathematics.
    /// When unset, Math Lit is accepted for programs whose math threshold is at
    /// most [`Requirements::MATH_LIT_MAX_THRESHOLD`].
    pub math_lit_accepted: Option<bool>,
}

impl Requirements {
    /// Highest math threshold at which Math Lit is inferred to be acceptable
    pub const MATH_LIT_MAX_THRESHOLD: u8 = 40;

    /// Mathematics threshold that is actually enforced. A threshold of 0 sets
    /// no gate.
    #[must_use]
    pub fn math_threshold(&self) -> Option<Percentage> {
        self.math.filter(|threshold| threshold.value() > 0)
    }

    /// English threshold that is actually enforced. A threshold of 0 sets no
    /// gate.
    #[must_use]
    pub fn english_threshold(&self) -> Option<Percentage> {
        self.english.filter(|threshold| threshold.value() > 0)
    }

    /// Whether Mathematical Literacy may stand in for Mathematics
    #[must_use]
    pub fn accepts_math_lit(&self) -> bool {
        match (self.math_lit_accepted, self.math) {
            (Some(explicit), _) => explicit,
            (None, Some(threshold)) => threshold.value() <= Self::MATH_LIT_MAX_THRESHOLD,
            (None, None) => false,
        }
    }

    /// Subjects listed as both required and recommended
    #[must_use]
    pub fn overlapping(&self) -> Vec<&SubjectId> {
        self.recommended
            .iter()
            .filter(|id| self.required.contains(*id))
            .collect()
    }

    /// Every subject id named by these requirements
    pub fn subject_ids(&self) -> impl Iterator<Item = &SubjectId> {
        self.required.iter().chain(self.recommended.iter())
    }
}

/// A degree program in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Unique slug (e.g. `bcom-accounting`)
    pub id: String,

    /// Program title (e.g. "BCom Accounting")
    pub title: String,

    /// Short program code (e.g. "BCOM-ACC")
    pub code: String,

    /// Display icon
    #[serde(default)]
    pub icon: String,

    /// Owning faculty
    #[serde(default)]
    pub faculty: String,

    /// One-line description
    #[serde(default)]
    pub description: String,

    /// Admission rules
    #[serde(default)]
    pub requirements: Requirements,

    /// Summary of the modules covered
    #[serde(default)]
    pub what_youll_study: String,

    /// Career paths, most prominent first
    #[serde(default)]
    pub careers: Vec<String>,

    /// Indicative salary range
    #[serde(default)]
    pub salary_range: String,

    /// Postgraduate options
    #[serde(default)]
    pub further_study: String,

    /// Program length (free text, e.g. "3 years")
    #[serde(default)]
    pub duration: String,

    /// National Qualifications Framework level
    #[serde(default)]
    pub nqf_level: Option<u8>,
}

impl Program {
    /// Create a program with the given identity and no requirements
    #[must_use]
    pub fn new(id: &str, title: &str, code: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            code: code.to_string(),
            icon: String::new(),
            faculty: String::new(),
            description: String::new(),
            requirements: Requirements::default(),
            what_youll_study: String::new(),
            careers: Vec::new(),
            salary_range: String::new(),
            further_study: String::new(),
            duration: String::new(),
            nqf_level: None,
        }
    }

    /// Replace the requirements
    #[must_use]
    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    /// The first `limit` careers
    #[must_use]
    pub fn career_preview(&self, limit: usize) -> &[String] {
        &self.careers[..self.careers.len().min(limit)]
    }
}
