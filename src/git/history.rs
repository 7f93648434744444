//! Git history readers: commits, file changes, line stats, design diff.
//!
//! Each reader honors the run's time window and returns normalized
//! records, degrading to empty output whenever git is unavailable.
//! Without a window start, the change-oriented readers compare against
//! a fixed recent baseline instead of walking full history.

use crate::models::{ChangeKind, CommitRecord, FileChanges, FileStat};
use crate::window::TimeWindow;
use std::collections::HashMap;
use tracing::debug;

use super::runner::CommandRunner;

/// How many commits the commit reader fetches at most.
pub const DEFAULT_MAX_COMMITS: usize = 100;

/// Baseline depth (`HEAD~N`) used when no window start is given.
pub const DEFAULT_BASELINE_DEPTH: usize = 10;

/// Reads normalized history records through a [`CommandRunner`].
pub struct GitHistory<R> {
    runner: R,
    max_commits: usize,
    baseline_depth: usize,
}

impl<R: CommandRunner> GitHistory<R> {
    /// Create a history reader with explicit commit cap and baseline depth.
    pub fn with_limits(runner: R, max_commits: usize, baseline_depth: usize) -> Self {
        Self {
            runner,
            max_commits,
            baseline_depth,
        }
    }

    /// Current branch name, or "unknown" when git has no answer.
    pub async fn branch(&self) -> String {
        self.runner
            .run(&["branch", "--show-current"])
            .await
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// The most recent commits intersecting the window, capped at the
    /// configured maximum. Malformed log lines are dropped.
    pub async fn commits(&self, window: &TimeWindow) -> Vec<CommitRecord> {
        let limit = self.max_commits.to_string();
        let mut args = vec!["log", "--pretty=format:%H|%ai|%s", "-n", &limit];

        let since = window.since_arg();
        if let Some(ref since) = since {
            args.push("--since");
            args.push(since);
        }

        match self.runner.run(&args).await {
            Some(output) => {
                let commits = parse_commits(&output);
                debug!("Parsed {} commits", commits.len());
                commits
            }
            None => Vec::new(),
        }
    }

    /// Files created, modified, or deleted within the window. Without a
    /// window start, compares the recent baseline to HEAD to bound the
    /// result.
    pub async fn file_changes(&self, window: &TimeWindow) -> FileChanges {
        let output = match window.since_arg() {
            Some(since) => {
                self.runner
                    .run(&["log", "--since", &since, "--name-status", "--pretty=format:"])
                    .await
            }
            None => {
                let base = format!("HEAD~{}", self.baseline_depth);
                self.runner
                    .run(&["diff", "--name-status", &base, "HEAD"])
                    .await
            }
        };

        output.map(|o| parse_name_status(&o)).unwrap_or_default()
    }

    /// Per-path line additions and removals, accumulated across all
    /// matching history entries.
    pub async fn file_stats(&self, window: &TimeWindow) -> HashMap<String, FileStat> {
        let output = match window.since_arg() {
            Some(since) => {
                self.runner
                    .run(&["log", "--since", &since, "--numstat", "--pretty=format:"])
                    .await
            }
            None => {
                let base = format!("HEAD~{}", self.baseline_depth);
                self.runner.run(&["diff", "--numstat", &base, "HEAD"]).await
            }
        };

        output.map(|o| parse_numstat(&o)).unwrap_or_default()
    }

    /// Raw patch text for one tracked document, or `None` when the
    /// window produced no changes to it.
    pub async fn design_diff(&self, window: &TimeWindow, doc: &str) -> Option<String> {
        let output = match window.since_arg() {
            Some(since) => {
                self.runner
                    .run(&["log", "--since", &since, "-p", "--", doc])
                    .await
            }
            None => {
                let base = format!("HEAD~{}", self.baseline_depth);
                self.runner.run(&["diff", &base, "HEAD", "--", doc]).await
            }
        };

        output.filter(|diff| !diff.is_empty())
    }
}

/// Parse `%H|%ai|%s` log lines into commit records.
fn parse_commits(output: &str) -> Vec<CommitRecord> {
    let mut commits = Vec::new();

    for line in output.lines() {
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.splitn(3, '|').collect();
        if parts.len() != 3 {
            continue;
        }
        commits.push(CommitRecord {
            hash: parts[0].chars().take(7).collect(),
            date: parts[1].to_string(),
            message: parts[2].to_string(),
        });
    }

    commits
}

/// Parse name-status output into deduplicated change buckets.
fn parse_name_status(output: &str) -> FileChanges {
    let mut changes = FileChanges::default();

    for line in output.lines() {
        let line = line.trim();
        let Some((status, path)) = line.split_once('\t') else {
            continue;
        };
        let Some(kind) = ChangeKind::from_status(status) else {
            continue;
        };
        changes.record(kind, path.trim());
    }

    changes
}

/// Parse numstat output, accumulating counts for repeated paths.
/// Binary markers ("-") count as zero.
fn parse_numstat(output: &str) -> HashMap<String, FileStat> {
    let mut stats: HashMap<String, FileStat> = HashMap::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != 3 {
            continue;
        }

        let added = match parse_count(parts[0]) {
            Some(n) => n,
            None => continue,
        };
        let removed = match parse_count(parts[1]) {
            Some(n) => n,
            None => continue,
        };

        stats
            .entry(parts[2].to_string())
            .or_default()
            .accumulate(added, removed);
    }

    stats
}

fn parse_count(field: &str) -> Option<u64> {
    if field == "-" {
        Some(0)
    } else {
        field.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as Responses;

    /// In-memory runner keyed on the joined argument list.
    struct FakeGit {
        responses: Responses<String, String>,
    }

    impl FakeGit {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                responses: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            }
        }

        fn empty() -> Self {
            Self::new(&[])
        }
    }

    fn make_history(fake: FakeGit) -> GitHistory<FakeGit> {
        GitHistory::with_limits(fake, DEFAULT_MAX_COMMITS, DEFAULT_BASELINE_DEPTH)
    }

    impl CommandRunner for FakeGit {
        async fn run(&self, args: &[&str]) -> Option<String> {
            self.responses.get(&args.join(" ")).cloned()
        }
    }

    #[test]
    fn test_parse_commits() {
        let output = "\
abc1234def5678|2026-08-20 10:00:00 +0000|fix: handle empty log
fedcba9876543|2026-08-19 09:00:00 +0000|feat: add teams reader";

        let commits = parse_commits(output);
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].hash, "abc1234");
        assert_eq!(commits[0].date, "2026-08-20 10:00:00 +0000");
        assert_eq!(commits[0].message, "fix: handle empty log");
        assert_eq!(commits[1].hash, "fedcba9");
    }

    #[test]
    fn test_parse_commits_drops_malformed_lines() {
        let output = "not a commit line\nabc1234|2026-08-20 10:00:00 +0000|ok\nhash|only-two-fields";
        let commits = parse_commits(output);
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, "ok");
    }

    #[test]
    fn test_parse_commits_keeps_pipes_in_message() {
        let commits = parse_commits("abc1234|2026-08-20|docs: a | b | c");
        assert_eq!(commits[0].message, "docs: a | b | c");
    }

    #[test]
    fn test_parse_name_status() {
        let output = "A\tsrc/new.rs\nM\tsrc/lib.rs\nD\tsrc/old.rs\nR100\tfrom.rs\tto.rs";
        let changes = parse_name_status(output);

        assert_eq!(changes.created, vec!["src/new.rs"]);
        assert_eq!(changes.modified, vec!["src/lib.rs"]);
        assert_eq!(changes.deleted, vec!["src/old.rs"]);
        assert_eq!(changes.total(), 3);
    }

    #[test]
    fn test_parse_name_status_first_seen_wins() {
        let output = "A\tsrc/lib.rs\nM\tsrc/lib.rs";
        let changes = parse_name_status(output);

        assert_eq!(changes.created, vec!["src/lib.rs"]);
        assert!(changes.modified.is_empty());
    }

    #[test]
    fn test_parse_numstat_accumulates_and_zeroes_binary() {
        let output = "10\t2\tsrc/lib.rs\n-\t-\tassets/logo.png\n5\t1\tsrc/lib.rs";
        let stats = parse_numstat(output);

        assert_eq!(
            stats.get("src/lib.rs"),
            Some(&FileStat {
                added: 15,
                removed: 3
            })
        );
        assert_eq!(
            stats.get("assets/logo.png"),
            Some(&FileStat {
                added: 0,
                removed: 0
            })
        );
    }

    #[test]
    fn test_parse_numstat_skips_garbage() {
        let stats = parse_numstat("ten\ttwo\tsrc/lib.rs\nnot-tabular");
        assert!(stats.is_empty());
    }

    #[tokio::test]
    async fn test_branch_falls_back_to_unknown() {
        let history = make_history(FakeGit::empty());
        assert_eq!(history.branch().await, "unknown");
    }

    #[tokio::test]
    async fn test_commits_pass_window_to_git() {
        let fake = FakeGit::new(&[(
            "log --pretty=format:%H|%ai|%s -n 100 --since 2026-08-01",
            "abc1234|2026-08-20 10:00:00 +0000|in window",
        )]);
        let history = make_history(fake);

        let window = TimeWindow::parse(Some("2026-08-01")).unwrap();
        let commits = history.commits(&window).await;
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, "in window");

        // Unbounded query uses different arguments, which the fake
        // does not answer, so the reader degrades to empty.
        assert!(history.commits(&TimeWindow::all()).await.is_empty());
    }

    #[tokio::test]
    async fn test_unbounded_changes_use_recent_baseline() {
        let fake = FakeGit::new(&[(
            "diff --name-status HEAD~10 HEAD",
            "M\tsrc/main.rs",
        )]);
        let history = make_history(fake);

        let changes = history.file_changes(&TimeWindow::all()).await;
        assert_eq!(changes.modified, vec!["src/main.rs"]);
    }

    #[tokio::test]
    async fn test_design_diff_empty_is_none() {
        let fake = FakeGit::new(&[("diff HEAD~10 HEAD -- docs/DESIGN.md", "")]);
        let history = make_history(fake);
        assert_eq!(
            history.design_diff(&TimeWindow::all(), "docs/DESIGN.md").await,
            None
        );
    }
}
