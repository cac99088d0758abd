//! Core domain: subjects, programs, matching and ranking

pub mod catalog;
pub mod intake;
pub mod matching;
pub mod models;
pub mod ranking;
pub mod registry;
pub mod report;

/// Returns the current version of the `program-finder` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
