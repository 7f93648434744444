//! Command-execution capability for git queries.
//!
//! The capability is deliberately narrow: arguments in, captured stdout
//! out, with a bounded timeout. Any failure (non-zero exit, timeout,
//! missing executable) yields `None` so the affected reader degrades to
//! empty data instead of aborting the run.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Default timeout for git subprocesses (seconds).
pub const GIT_TIMEOUT_SECS: u64 = 30;

/// Runs read-only git queries.
pub trait CommandRunner {
    /// Run `git` with the given arguments and return trimmed stdout,
    /// or `None` on any failure.
    async fn run(&self, args: &[&str]) -> Option<String>;
}

/// Runs git as a subprocess in a fixed working directory.
#[derive(Debug, Clone)]
pub struct SystemGit {
    root: PathBuf,
    timeout: Duration,
}

impl SystemGit {
    /// Create a runner rooted at the given project directory.
    pub fn new(root: impl Into<PathBuf>, timeout_seconds: u64) -> Self {
        Self {
            root: root.into(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }
}

impl CommandRunner for SystemGit {
    async fn run(&self, args: &[&str]) -> Option<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, output).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!("Failed to run git {}: {}", args.join(" "), e);
                return None;
            }
            Err(_) => {
                warn!(
                    "git {} timed out after {}s",
                    args.join(" "),
                    self.timeout.as_secs()
                );
                return None;
            }
        };

        if !output.status.success() {
            debug!("git {} exited with {}", args.join(" "), output.status);
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
