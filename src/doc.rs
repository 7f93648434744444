//! Persistent summary document updates.
//!
//! The summary document grows strictly: a fixed marker heading is
//! created once, and every later update appends a new block at the end.
//! Existing content is never rewritten or reordered, which keeps the
//! document diffable across runs. Single-writer usage is assumed; there
//! is no locking.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Heading under which session summaries accumulate.
pub const SESSION_HISTORY_MARKER: &str = "## Session History";

/// What an update did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Marker was absent; it was created along with the first block.
    SectionCreated,
    /// Marker already existed; the block was appended after prior content.
    Appended,
    /// The document does not exist; nothing was written.
    Missing,
}

/// The one mutable artifact of a checkpoint run.
#[derive(Debug, Clone)]
pub struct SummaryDoc {
    path: PathBuf,
}

impl SummaryDoc {
    /// Wrap a document path. The file may or may not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a summary block under the marker section, creating the
    /// marker on first use. A missing document is a reported no-op,
    /// never an error.
    pub fn append_section_or_create(&self, block: &str) -> Result<AppendOutcome> {
        if !self.path.exists() {
            return Ok(AppendOutcome::Missing);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let (updated, outcome) = if content.contains(SESSION_HISTORY_MARKER) {
            (
                format!("{}\n\n{}", content.trim_end(), block),
                AppendOutcome::Appended,
            )
        } else {
            (
                format!(
                    "{}\n\n{}\n\n{}",
                    content.trim_end(),
                    SESSION_HISTORY_MARKER,
                    block
                ),
                AppendOutcome::SectionCreated,
            )
        };

        std::fs::write(&self.path, updated)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn doc_with(content: &str) -> (TempDir, SummaryDoc) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CLAUDE.md");
        fs::write(&path, content).unwrap();
        (dir, SummaryDoc::new(path))
    }

    #[test]
    fn test_marker_created_exactly_once() {
        let (_dir, doc) = doc_with("# Project\n\nIntro.\n");

        let outcome = doc.append_section_or_create("### 2026-08-28\n\n- 1 commits\n").unwrap();
        assert_eq!(outcome, AppendOutcome::SectionCreated);

        let outcome = doc.append_section_or_create("### 2026-08-29\n\n- 2 commits\n").unwrap();
        assert_eq!(outcome, AppendOutcome::Appended);

        let content = fs::read_to_string(doc.path()).unwrap();
        assert_eq!(content.matches(SESSION_HISTORY_MARKER).count(), 1);
        assert!(content.contains("### 2026-08-28"));
        assert!(content.contains("### 2026-08-29"));
    }

    #[test]
    fn test_prior_content_is_preserved_in_order() {
        let (_dir, doc) = doc_with("# Project\n\nIntro paragraph.\n");

        doc.append_section_or_create("first block\n").unwrap();
        let after_first = fs::read_to_string(doc.path()).unwrap();

        doc.append_section_or_create("second block\n").unwrap();
        let after_second = fs::read_to_string(doc.path()).unwrap();

        // Strictly growing: each revision is a prefix of the next,
        // modulo trailing whitespace.
        assert!(after_second.starts_with(after_first.trim_end()));
        let first_pos = after_second.find("first block").unwrap();
        let second_pos = after_second.find("second block").unwrap();
        assert!(first_pos < second_pos);
    }

    #[test]
    fn test_missing_document_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CLAUDE.md");
        let doc = SummaryDoc::new(&path);

        let outcome = doc.append_section_or_create("block\n").unwrap();
        assert_eq!(outcome, AppendOutcome::Missing);
        assert!(!path.exists());
    }

    #[test]
    fn test_existing_marker_not_duplicated_mid_document() {
        let (_dir, doc) =
            doc_with("# Project\n\n## Session History\n\n### 2026-08-01\n\n- old entry\n\n## Appendix\n");

        doc.append_section_or_create("### 2026-08-28\n\n- new entry\n").unwrap();

        let content = fs::read_to_string(doc.path()).unwrap();
        assert_eq!(content.matches(SESSION_HISTORY_MARKER).count(), 1);
        // Appends go to the end; earlier sections are not reordered.
        let appendix = content.find("## Appendix").unwrap();
        let new_entry = content.find("### 2026-08-28").unwrap();
        assert!(appendix < new_entry);
    }
}
