//! Data models for session checkpoints.
//!
//! This module contains the normalized record types produced by the
//! source readers and consumed by the aggregator and renderer.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// A single commit from the project history.
///
/// Commits are kept in the order git returns them (most recent first)
/// and are never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Abbreviated commit hash (7 characters).
    pub hash: String,
    /// Commit date as reported by git.
    pub date: String,
    /// Single-line commit message.
    pub message: String,
}

/// The kind of change a file underwent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

impl ChangeKind {
    /// Map a git name-status letter to a change kind.
    ///
    /// Only additions, modifications, and deletions are tracked; other
    /// statuses (renames, copies, ...) are ignored.
    pub fn from_status(status: &str) -> Option<Self> {
        if status.starts_with('A') {
            Some(ChangeKind::Created)
        } else if status.starts_with('M') {
            Some(ChangeKind::Modified)
        } else if status.starts_with('D') {
            Some(ChangeKind::Deleted)
        } else {
            None
        }
    }

    /// Human-readable label used in report headings.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Created => "Created",
            ChangeKind::Modified => "Modified",
            ChangeKind::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// File changes bucketed by kind, deduplicated by path.
///
/// A path appears in at most one bucket; the first observed status wins.
#[derive(Debug, Clone, Default)]
pub struct FileChanges {
    /// Paths of newly created files.
    pub created: Vec<String>,
    /// Paths of modified files.
    pub modified: Vec<String>,
    /// Paths of deleted files.
    pub deleted: Vec<String>,
    seen: HashSet<String>,
}

impl FileChanges {
    /// Record a change for a path. Returns false if the path was already
    /// recorded under any kind (first-seen wins).
    pub fn record(&mut self, kind: ChangeKind, path: &str) -> bool {
        if !self.seen.insert(path.to_string()) {
            return false;
        }
        self.bucket_mut(kind).push(path.to_string());
        true
    }

    /// The paths recorded under the given kind, in observation order.
    pub fn bucket(&self, kind: ChangeKind) -> &[String] {
        match kind {
            ChangeKind::Created => &self.created,
            ChangeKind::Modified => &self.modified,
            ChangeKind::Deleted => &self.deleted,
        }
    }

    fn bucket_mut(&mut self, kind: ChangeKind) -> &mut Vec<String> {
        match kind {
            ChangeKind::Created => &mut self.created,
            ChangeKind::Modified => &mut self.modified,
            ChangeKind::Deleted => &mut self.deleted,
        }
    }

    /// Total number of changed files across all buckets.
    pub fn total(&self) -> usize {
        self.created.len() + self.modified.len() + self.deleted.len()
    }

    /// True when no file changes were recorded.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Accumulated line counts for one path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStat {
    /// Lines added across all matching history entries.
    pub added: u64,
    /// Lines removed across all matching history entries.
    pub removed: u64,
}

impl FileStat {
    /// Accumulate another diff entry for the same path.
    pub fn accumulate(&mut self, added: u64, removed: u64) {
        self.added += added;
        self.removed += removed;
    }
}

/// One entry from the CLI tool invocation log.
///
/// Entries are line-oriented JSON records; fields beyond the known ones
/// are retained but not interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    /// When the tool was invoked.
    pub timestamp: DateTime<Utc>,
    /// Identifier of the invoked tool (e.g. "codex", "gemini").
    pub tool: String,
    /// Whether the invocation succeeded.
    #[serde(default)]
    pub success: bool,
    /// The prompt text passed to the tool.
    #[serde(default)]
    pub prompt: String,
    /// Arbitrary additional metadata carried by the record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A member of an agent team.
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    /// Member name.
    #[serde(default = "unknown")]
    pub name: String,
    /// Role or agent type of the member.
    #[serde(default, alias = "agent_type")]
    pub role: String,
}

/// A task tracked for an agent team.
///
/// Status is freeform; only "completed" has special meaning.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    /// Short task description.
    #[serde(default = "unknown", alias = "task_subject")]
    pub subject: String,
    /// Task status (pending, in-progress, completed, ...).
    #[serde(default = "unknown")]
    pub status: String,
    /// Teammate the task is assigned to, if any.
    #[serde(default, alias = "teammate_name")]
    pub owner: Option<String>,
}

impl Task {
    /// True when the task has been completed.
    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }

    /// The owner, treating an empty string as unassigned.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref().filter(|o| !o.is_empty())
    }
}

/// An agent team with its members and task list.
///
/// Team state reflects the present, not the report window; a team with
/// no members and no tasks is still valid.
#[derive(Debug, Clone, Default)]
pub struct Team {
    /// Team name, derived from its directory.
    pub name: String,
    /// Team composition.
    pub members: Vec<Member>,
    /// Tasks tracked for this team.
    pub tasks: Vec<Task>,
}

impl Team {
    /// Number of completed tasks.
    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed()).count()
    }
}

/// Invocation tally for one tool from the CLI log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolTally {
    /// Tool identifier.
    pub tool: String,
    /// Total invocations.
    pub total: usize,
    /// Invocations that succeeded.
    pub succeeded: usize,
    /// Invocations that failed.
    pub failed: usize,
}

fn unknown() -> String {
    "unknown".to_string()
}
