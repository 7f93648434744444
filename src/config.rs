//! Configuration file handling.
//!
//! This module handles loading configuration from `.checkpointer.toml`
//! files. All paths are resolved relative to the project root, except
//! the team/task directories which default to the user's home.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Source and artifact locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Git query settings.
    #[serde(default)]
    pub git: GitConfig,

    /// Report display settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Source and artifact locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// CLI tool log, relative to the project root.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Directory receiving checkpoint artifacts, relative to the root.
    #[serde(default = "default_checkpoints_dir")]
    pub checkpoints_dir: PathBuf,

    /// Tracked design document whose diff is reported, relative to the root.
    #[serde(default = "default_design_doc")]
    pub design_doc: PathBuf,

    /// Persistent summary document, relative to the root.
    #[serde(default = "default_summary_doc")]
    pub summary_doc: PathBuf,

    /// Agent teams directory. Defaults to `~/.claude/teams`.
    #[serde(default)]
    pub teams_dir: Option<PathBuf>,

    /// Agent tasks directory. Defaults to `~/.claude/tasks`.
    #[serde(default)]
    pub tasks_dir: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            checkpoints_dir: default_checkpoints_dir(),
            design_doc: default_design_doc(),
            summary_doc: default_summary_doc(),
            teams_dir: None,
            tasks_dir: None,
        }
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from(".claude/logs/cli-tools.jsonl")
}

fn default_checkpoints_dir() -> PathBuf {
    PathBuf::from(".claude/checkpoints")
}

fn default_design_doc() -> PathBuf {
    PathBuf::from(".claude/docs/DESIGN.md")
}

fn default_summary_doc() -> PathBuf {
    PathBuf::from("CLAUDE.md")
}

impl PathsConfig {
    /// Effective teams directory.
    pub fn teams_dir(&self) -> PathBuf {
        self.teams_dir
            .clone()
            .unwrap_or_else(|| home_claude_dir("teams"))
    }

    /// Effective tasks directory.
    pub fn tasks_dir(&self) -> PathBuf {
        self.tasks_dir
            .clone()
            .unwrap_or_else(|| home_claude_dir("tasks"))
    }
}

fn home_claude_dir(leaf: &str) -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".claude")
        .join(leaf)
}

/// Git query settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Subprocess timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum commits fetched per run.
    #[serde(default = "default_max_commits")]
    pub max_commits: usize,

    /// Baseline depth (`HEAD~N`) used when no window start is given.
    #[serde(default = "default_baseline_depth")]
    pub baseline_depth: usize,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_commits: default_max_commits(),
            baseline_depth: default_baseline_depth(),
        }
    }
}

fn default_timeout() -> u64 {
    crate::git::runner::GIT_TIMEOUT_SECS
}

fn default_max_commits() -> usize {
    crate::git::history::DEFAULT_MAX_COMMITS
}

fn default_baseline_depth() -> usize {
    crate::git::history::DEFAULT_BASELINE_DEPTH
}

/// Report display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Commits displayed before truncation.
    #[serde(default = "default_commits_shown")]
    pub commits_shown: usize,

    /// Files displayed per change category before truncation.
    #[serde(default = "default_files_per_category")]
    pub files_per_category: usize,

    /// Log entries displayed per tool before truncation.
    #[serde(default = "default_entries_per_tool")]
    pub entries_per_tool: usize,

    /// Characters of each prompt shown in the report.
    #[serde(default = "default_prompt_chars")]
    pub prompt_chars: usize,

    /// Added design-diff lines displayed before truncation.
    #[serde(default = "default_design_lines")]
    pub design_lines: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            commits_shown: default_commits_shown(),
            files_per_category: default_files_per_category(),
            entries_per_tool: default_entries_per_tool(),
            prompt_chars: default_prompt_chars(),
            design_lines: default_design_lines(),
        }
    }
}

fn default_commits_shown() -> usize {
    30
}

fn default_files_per_category() -> usize {
    20
}

fn default_entries_per_tool() -> usize {
    15
}

fn default_prompt_chars() -> usize {
    100
}

fn default_design_lines() -> usize {
    20
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load `.checkpointer.toml` from the project root.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists
    /// but can't be parsed.
    pub fn load_default(root: &Path) -> Result<Option<Self>> {
        let default_path = root.join(".checkpointer.toml");

        if default_path.exists() {
            Ok(Some(Self::load(&default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.git.timeout_seconds, 30);
        assert_eq!(config.git.max_commits, 100);
        assert_eq!(config.git.baseline_depth, 10);
        assert_eq!(config.report.commits_shown, 30);
        assert_eq!(config.paths.summary_doc, PathBuf::from("CLAUDE.md"));
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[paths]
log_file = "logs/tools.jsonl"
summary_doc = "NOTES.md"
teams_dir = "/srv/agents/teams"

[git]
timeout_seconds = 10
max_commits = 50

[report]
commits_shown = 10
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.paths.log_file, PathBuf::from("logs/tools.jsonl"));
        assert_eq!(config.paths.summary_doc, PathBuf::from("NOTES.md"));
        assert_eq!(config.paths.teams_dir(), PathBuf::from("/srv/agents/teams"));
        assert_eq!(config.git.timeout_seconds, 10);
        assert_eq!(config.git.max_commits, 50);
        assert_eq!(config.report.commits_shown, 10);
        // Untouched sections keep their defaults
        assert_eq!(config.report.entries_per_tool, 15);
    }

    #[test]
    fn test_load_default_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_default(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[paths]"));
        assert!(toml_str.contains("[git]"));
        assert!(toml_str.contains("[report]"));
    }
}
