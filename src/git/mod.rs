//! Read-only git source readers.
//!
//! All version-control access goes through a narrow command-execution
//! capability so history queries can be faked in tests. Nothing in this
//! module ever mutates the repository.

pub mod history;
pub mod runner;

pub use history::GitHistory;
pub use runner::{CommandRunner, SystemGit};
