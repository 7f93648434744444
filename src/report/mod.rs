//! Checkpoint rendering and derived artifacts.
//!
//! Everything in this module is a pure transformation of the report
//! model: the full checkpoint document, the condensed session summary,
//! and the analysis prompt for a downstream agent.

pub mod prompt;
pub mod render;
pub mod summary;

pub use prompt::build_analysis_prompt;
pub use render::{artifact_stamp, render_checkpoint};
pub use summary::render_session_summary;
