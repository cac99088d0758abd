//! Data models for `ProgramFinder`

pub mod ledger;
pub mod percentage;
pub mod program;
pub mod subject;
pub mod validation;

pub use ledger::{LedgerError, SubjectEntry, SubjectLedger};
pub use percentage::{Percentage, PercentageBand};
pub use program::{Program, Requirements};
pub use subject::SubjectId;
pub use validation::ValidationError;
