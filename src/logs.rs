//! CLI tool invocation log reader.
//!
//! The log is a line-oriented, append-only JSONL file; each line is one
//! self-contained record. A missing file means no consultations. Lines
//! that are blank, not valid UTF-8, or fail to deserialize are skipped
//! individually; a partial trailing write never aborts the read.

use crate::models::LogEntry;
use crate::window::TimeWindow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Read all log entries inside the window, in file append order.
pub fn read_log(path: &Path, window: &TimeWindow) -> Vec<LogEntry> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => {
            debug!("No CLI log at {}", path.display());
            return Vec::new();
        }
    };

    let mut reader = BufReader::new(file);
    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut skipped = 0usize;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Stopping log read at {}: {}", path.display(), e);
                break;
            }
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(s) => s.trim(),
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<LogEntry>(line) {
            Ok(entry) => {
                if window.contains(entry.timestamp) {
                    entries.push(entry);
                }
            }
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} unparsable log lines", skipped);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_fixture(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_missing_file_is_empty() {
        let entries = read_log(Path::new("/nonexistent/cli-tools.jsonl"), &TimeWindow::all());
        assert!(entries.is_empty());
    }

    #[test]
    fn test_reads_in_append_order() {
        let fixture = write_fixture(&[
            r#"{"timestamp":"2026-08-20T10:00:00Z","tool":"codex","success":true,"prompt":"first"}"#,
            r#"{"timestamp":"2026-08-20T11:00:00Z","tool":"gemini","success":false,"prompt":"second"}"#,
        ]);

        let entries = read_log(fixture.path(), &TimeWindow::all());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].prompt, "first");
        assert_eq!(entries[1].prompt, "second");
        assert!(!entries[1].success);
    }

    #[test]
    fn test_corrupt_lines_skipped_individually() {
        let fixture = write_fixture(&[
            "not json at all",
            r#"{"timestamp":"2026-08-20T10:00:00Z","tool":"codex","prompt":"survives"}"#,
            r#"{"tool":"codex","prompt":"no timestamp"}"#,
            r#"{"timestamp":"2026-08-20T12:00:00Z","prompt":"no tool"}"#,
        ]);

        let entries = read_log(fixture.path(), &TimeWindow::all());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].prompt, "survives");
    }

    #[test]
    fn test_invalid_utf8_line_skipped() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0xfd, b'\n']).unwrap();
        writeln!(
            file,
            r#"{{"timestamp":"2026-08-20T10:00:00Z","tool":"codex","prompt":"ok"}}"#
        )
        .unwrap();

        let entries = read_log(file.path(), &TimeWindow::all());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].prompt, "ok");
    }

    #[test]
    fn test_window_filters_before_aggregation() {
        let fixture = write_fixture(&[
            r#"{"timestamp":"2026-07-01T10:00:00Z","tool":"codex","prompt":"old"}"#,
            r#"{"timestamp":"2026-08-20T10:00:00Z","tool":"codex","prompt":"recent"}"#,
        ]);

        let window = TimeWindow::parse(Some("2026-08-01")).unwrap();
        let entries = read_log(fixture.path(), &window);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].prompt, "recent");
    }

    #[test]
    fn test_blank_lines_ignored() {
        let fixture = write_fixture(&[
            "",
            "   ",
            r#"{"timestamp":"2026-08-20T10:00:00Z","tool":"gemini","prompt":"ok"}"#,
        ]);

        let entries = read_log(fixture.path(), &TimeWindow::all());
        assert_eq!(entries.len(), 1);
    }
}
