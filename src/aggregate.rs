//! Report model aggregation.
//!
//! Pure combination of the normalized reader outputs into one report
//! model plus derived statistics. No I/O happens here, and list-valued
//! fields keep the order their readers produced so rendering is
//! reproducible from identical inputs.

use crate::models::{CommitRecord, FileChanges, FileStat, LogEntry, Team, ToolTally};
use crate::window::TimeWindow;
use std::collections::HashMap;

/// The in-memory aggregate of all records plus derived statistics for
/// one checkpoint run. Rendering is a pure function of this model.
#[derive(Debug, Clone)]
pub struct Report {
    /// The time window this report covers.
    pub window: TimeWindow,
    /// Current branch (a scalar, not time-windowed).
    pub branch: String,
    /// Commits intersecting the window, most recent first.
    pub commits: Vec<CommitRecord>,
    /// Deduplicated file changes.
    pub changes: FileChanges,
    /// Accumulated per-path line stats.
    pub stats: HashMap<String, FileStat>,
    /// CLI log entries inside the window, in append order.
    pub entries: Vec<LogEntry>,
    /// Agent teams with their current members and tasks.
    pub teams: Vec<Team>,
    /// Raw diff of the tracked design document, when non-empty.
    pub design_diff: Option<String>,
    /// Per-tool tallies, in first-seen order.
    pub tool_tallies: Vec<ToolTally>,
    /// Tasks across all teams.
    pub total_tasks: usize,
    /// Completed tasks across all teams.
    pub completed_tasks: usize,
    /// Members across all teams.
    pub total_members: usize,
}

impl Report {
    /// Combine reader outputs and compute derived counts.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        window: TimeWindow,
        branch: String,
        commits: Vec<CommitRecord>,
        changes: FileChanges,
        stats: HashMap<String, FileStat>,
        entries: Vec<LogEntry>,
        teams: Vec<Team>,
        design_diff: Option<String>,
    ) -> Self {
        let mut tool_tallies: Vec<ToolTally> = Vec::new();
        for entry in &entries {
            let idx = match tool_tallies.iter().position(|t| t.tool == entry.tool) {
                Some(i) => i,
                None => {
                    tool_tallies.push(ToolTally {
                        tool: entry.tool.clone(),
                        ..Default::default()
                    });
                    tool_tallies.len() - 1
                }
            };
            let tally = &mut tool_tallies[idx];
            tally.total += 1;
            if entry.success {
                tally.succeeded += 1;
            } else {
                tally.failed += 1;
            }
        }

        let total_tasks = teams.iter().map(|t| t.tasks.len()).sum();
        let completed_tasks = teams.iter().map(|t| t.completed_tasks()).sum();
        let total_members = teams.iter().map(|t| t.members.len()).sum();

        Self {
            window,
            branch,
            commits,
            changes,
            stats,
            entries,
            teams,
            design_diff,
            tool_tallies,
            total_tasks,
            completed_tasks,
            total_members,
        }
    }

    /// Log entries for one tool, in append order.
    pub fn entries_for_tool(&self, tool: &str) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.tool == tool).collect()
    }

    /// Line stats for a path, zero when untracked.
    pub fn stat_for(&self, path: &str) -> FileStat {
        self.stats.get(path).copied().unwrap_or_default()
    }
}
