//! Shared library for `ProgramFinder`
//!
//! Matches a learner's final-year subject marks against a catalog of
//! university programs. The CLI binary in `src/cli` is a thin layer over
//! this crate.

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::catalog::Catalog;
pub use crate::core::matching::{calculate_match, MatchLevel, MatchResult, Shortfall};
pub use crate::core::models::{Percentage, Program, Requirements, SubjectId, SubjectLedger};
pub use crate::core::ranking::{rank_programs, RankedProgram, RankingPolicy};
pub use crate::core::registry::SubjectRegistry;
