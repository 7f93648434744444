//! Condensed session summary.
//!
//! The short per-day block appended to the persistent summary document.
//! One heading per day plus a handful of count lines; the full detail
//! lives in the checkpoint artifact.

use crate::aggregate::Report;
use chrono::NaiveDate;

/// Render the condensed summary block for one day.
pub fn render_session_summary(report: &Report, today: NaiveDate) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("### {}", today.format("%Y-%m-%d")));
    lines.push(String::new());
    lines.push(format!(
        "- {} commits, {} files changed",
        report.commits.len(),
        report.changes.total()
    ));

    for tally in &report.tool_tallies {
        lines.push(format!("- {}: {} consultations", tally.tool, tally.total));
    }

    for team in &report.teams {
        lines.push(format!(
            "- Agent Teams: {} ({} teammates, {}/{} tasks)",
            team.name,
            team.members.len(),
            team.completed_tasks(),
            team.tasks.len()
        ));
    }

    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileChanges, LogEntry, Team};
    use crate::window::TimeWindow;
    use std::collections::HashMap;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()
    }

    fn report_with(entries: Vec<LogEntry>, teams: Vec<Team>) -> Report {
        Report::build(
            TimeWindow::all(),
            "main".to_string(),
            Vec::new(),
            FileChanges::default(),
            HashMap::new(),
            entries,
            teams,
            None,
        )
    }

    #[test]
    fn test_minimal_summary() {
        let summary = render_session_summary(&report_with(Vec::new(), Vec::new()), today());
        assert_eq!(summary, "### 2026-08-28\n\n- 0 commits, 0 files changed\n");
    }

    #[test]
    fn test_tool_and_team_lines() {
        let entries = vec![
            serde_json::from_str::<LogEntry>(
                r#"{"timestamp":"2026-08-28T10:00:00Z","tool":"codex","success":true}"#,
            )
            .unwrap(),
            serde_json::from_str::<LogEntry>(
                r#"{"timestamp":"2026-08-28T11:00:00Z","tool":"codex","success":true}"#,
            )
            .unwrap(),
        ];
        let teams = vec![Team {
            name: "crew".to_string(),
            members: vec![serde_json::from_str(r#"{"name":"a"}"#).unwrap()],
            tasks: vec![
                serde_json::from_str(r#"{"subject":"t","status":"completed"}"#).unwrap(),
                serde_json::from_str(r#"{"subject":"u","status":"pending"}"#).unwrap(),
            ],
        }];

        let summary = render_session_summary(&report_with(entries, teams), today());
        assert!(summary.contains("- codex: 2 consultations"));
        assert!(summary.contains("- Agent Teams: crew (1 teammates, 1/2 tasks)"));
        assert!(summary.ends_with('\n'));
    }

    #[test]
    fn test_unused_tools_are_omitted() {
        let summary = render_session_summary(&report_with(Vec::new(), Vec::new()), today());
        assert!(!summary.contains("consultations"));
    }
}
