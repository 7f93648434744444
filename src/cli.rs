//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Checkpointer - session activity checkpoints for agent workflows
///
/// Collects git history, CLI tool consultations, and Agent Teams
/// activity into a markdown checkpoint, appends a condensed summary to
/// the project summary document, and emits a skill-analysis prompt for
/// a downstream agent.
///
/// Examples:
///   checkpointer
///   checkpointer --since 2026-08-01
///   checkpointer --root ../project --dry-run
///   checkpointer --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Only include activity since this date (YYYY-MM-DD)
    ///
    /// Without this flag, the checkpoint covers all available history
    /// (file changes fall back to a recent baseline).
    #[arg(short, long, value_name = "DATE")]
    pub since: Option<String>,

    /// Project root to checkpoint
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Path to configuration file
    ///
    /// If not specified, looks for .checkpointer.toml in the project root
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Collect and report counts without writing any artifacts
    #[arg(long)]
    pub dry_run: bool,

    /// Skip updating the persistent summary document
    #[arg(long)]
    pub skip_doc_update: bool,

    /// Generate a default .checkpointer.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if !self.root.exists() {
            return Err(format!(
                "Project root does not exist: {}",
                self.root.display()
            ));
        }
        if !self.root.is_dir() {
            return Err(format!(
                "Project root is not a directory: {}",
                self.root.display()
            ));
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
