//! Markdown checkpoint rendering.
//!
//! Deterministic builder for the full checkpoint document. Section
//! order is fixed, list caps carry exact overflow trailers, and empty
//! collections render an explicit sentence instead of a bare heading,
//! so downstream consumers can rely on a stable shape.

use crate::aggregate::Report;
use crate::config::ReportConfig;
use crate::models::{ChangeKind, LogEntry};
use chrono::{DateTime, Utc};

/// Render the full checkpoint document.
///
/// Pure function of the report model, the generation instant, and the
/// display caps; no further source queries happen here. The footer
/// carries the compact form of `generated_at` that also names the
/// checkpoint artifact.
pub fn render_checkpoint(
    report: &Report,
    generated_at: DateTime<Utc>,
    opts: &ReportConfig,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# Checkpoint: {} UTC\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    output.push_str(&summary_section(report));
    output.push_str(&git_history_section(report, opts));
    output.push_str(&consultations_section(report, opts));
    output.push_str(&teams_section(report));
    output.push_str(&design_section(report, opts));
    output.push_str(&footer(generated_at));

    output
}

/// Compact timestamp used for artifact filenames and the footer.
pub fn artifact_stamp(generated_at: DateTime<Utc>) -> String {
    generated_at.format("%Y-%m-%d-%H%M%S").to_string()
}

fn summary_section(report: &Report) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str(&format!("- **Branch**: `{}`\n", report.branch));
    section.push_str(&format!("- **Commits**: {}\n", report.commits.len()));
    section.push_str(&format!(
        "- **Files changed**: {} ({} modified, {} created, {} deleted)\n",
        report.changes.total(),
        report.changes.modified.len(),
        report.changes.created.len(),
        report.changes.deleted.len()
    ));

    for tally in &report.tool_tallies {
        if tally.failed > 0 {
            section.push_str(&format!(
                "- **{} consultations**: {} ({} failed)\n",
                title_case(&tally.tool),
                tally.total,
                tally.failed
            ));
        } else {
            section.push_str(&format!(
                "- **{} consultations**: {}\n",
                title_case(&tally.tool),
                tally.total
            ));
        }
    }

    if !report.teams.is_empty() {
        section.push_str(&format!(
            "- **Agent Teams sessions**: {} ({} teammates)\n",
            report.teams.len(),
            report.total_members
        ));
        section.push_str(&format!(
            "- **Tasks**: {}/{} completed\n",
            report.completed_tasks, report.total_tasks
        ));
    }

    if let Some(since) = report.window.since_arg() {
        section.push_str(&format!("- **Since**: {}\n", since));
    }
    section.push('\n');

    section
}

fn git_history_section(report: &Report, opts: &ReportConfig) -> String {
    let mut section = String::new();

    section.push_str("## Git History\n\n");

    if report.commits.is_empty() {
        section.push_str("No commits recorded.\n\n");
    } else {
        section.push_str("### Commits\n\n");
        for commit in report.commits.iter().take(opts.commits_shown) {
            section.push_str(&format!("- `{}` {}\n", commit.hash, commit.message));
        }
        if report.commits.len() > opts.commits_shown {
            section.push_str(&format!(
                "- ...and {} more commits\n",
                report.commits.len() - opts.commits_shown
            ));
        }
        section.push('\n');
    }

    section.push_str("### File Changes\n\n");

    if report.changes.is_empty() {
        section.push_str("No file changes detected.\n\n");
        return section;
    }

    for kind in [ChangeKind::Created, ChangeKind::Modified, ChangeKind::Deleted] {
        let files = report.changes.bucket(kind);
        if files.is_empty() {
            continue;
        }

        section.push_str(&format!("**{}:**\n", kind.label()));
        for path in files.iter().take(opts.files_per_category) {
            if kind == ChangeKind::Deleted {
                section.push_str(&format!("- `{}`\n", path));
            } else {
                let stat = report.stat_for(path);
                section.push_str(&format!(
                    "- `{}` (+{}, -{})\n",
                    path, stat.added, stat.removed
                ));
            }
        }
        if files.len() > opts.files_per_category {
            section.push_str(&format!(
                "- ...and {} more files\n",
                files.len() - opts.files_per_category
            ));
        }
        section.push('\n');
    }

    section
}

fn consultations_section(report: &Report, opts: &ReportConfig) -> String {
    let mut section = String::new();

    section.push_str("## CLI Consultations\n\n");

    if report.entries.is_empty() {
        section.push_str("No CLI consultations recorded.\n\n");
        return section;
    }

    for tally in &report.tool_tallies {
        let entries = report.entries_for_tool(&tally.tool);

        section.push_str(&format!(
            "### {} ({} consultations)\n\n",
            title_case(&tally.tool),
            entries.len()
        ));
        for entry in entries.iter().take(opts.entries_per_tool) {
            section.push_str(&format!("- {}\n", consultation_line(entry, opts.prompt_chars)));
        }
        if entries.len() > opts.entries_per_tool {
            section.push_str(&format!(
                "- ...and {} more\n",
                entries.len() - opts.entries_per_tool
            ));
        }
        section.push('\n');
    }

    section
}

fn consultation_line(entry: &LogEntry, prompt_chars: usize) -> String {
    let status = if entry.success { "✓" } else { "✗" };
    format!("{} {}", status, display_prompt(&entry.prompt, prompt_chars))
}

/// Truncate a prompt for single-line display: first `max_chars`
/// characters, embedded line breaks collapsed to spaces, with an
/// ellipsis marker when text was cut.
fn display_prompt(prompt: &str, max_chars: usize) -> String {
    let shown: String = prompt.chars().take(max_chars).collect();
    let mut shown = shown.replace('\n', " ");
    if prompt.chars().count() > max_chars {
        shown.push_str("...");
    }
    shown
}

fn teams_section(report: &Report) -> String {
    if report.teams.is_empty() {
        return "No agent team activity recorded.\n\n".to_string();
    }

    let mut section = String::new();
    section.push_str("## Agent Teams Activity\n\n");

    for team in &report.teams {
        section.push_str(&format!("### Team: {}\n\n", team.name));

        if !team.members.is_empty() {
            section.push_str("**Composition:**\n");
            for member in &team.members {
                section.push_str(&format!("- {} ({})\n", member.name, member.role));
            }
            section.push('\n');
        }

        if !team.tasks.is_empty() {
            section.push_str("**Task List:**\n");
            for task in &team.tasks {
                let checkbox = if task.is_completed() { "x" } else { " " };
                match task.owner() {
                    Some(owner) => section.push_str(&format!(
                        "- [{}] {} ({})\n",
                        checkbox, task.subject, owner
                    )),
                    None => {
                        section.push_str(&format!("- [{}] {}\n", checkbox, task.subject))
                    }
                }
            }
            section.push('\n');

            section.push_str("**Effectiveness:**\n");
            section.push_str(&format!(
                "- Tasks: {}/{} completed\n\n",
                team.completed_tasks(),
                team.tasks.len()
            ));
        }
    }

    section
}

fn design_section(report: &Report, opts: &ReportConfig) -> String {
    let diff = match &report.design_diff {
        Some(diff) => diff,
        None => return String::new(),
    };

    let mut section = String::new();
    section.push_str("## Design Decisions (Changes)\n\n");

    let added = diff
        .lines()
        .filter(|line| line.starts_with('+') && !line.starts_with("+++"))
        .map(|line| line[1..].trim())
        .filter(|line| !line.is_empty());

    for line in added.take(opts.design_lines) {
        section.push_str(&format!("- {}\n", line));
    }
    section.push('\n');

    section
}

fn footer(generated_at: DateTime<Utc>) -> String {
    format!(
        "---\n*Generated by checkpointer at {}*\n",
        artifact_stamp(generated_at)
    )
}

fn title_case(tool: &str) -> String {
    let mut chars = tool.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
