//! Agent team and task state reader.
//!
//! Teams are directories under the teams dir; each may carry a
//! `config.json` with a member list, and a parallel directory of task
//! records under the tasks dir. Both sides are optional and degrade
//! independently: a missing or malformed file empties that list, never
//! the team. Team state reflects the present and is not time-filtered.

use crate::models::{Member, Task, Team};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// On-disk shape of a team's `config.json`.
#[derive(Debug, Default, Deserialize)]
struct TeamConfig {
    #[serde(default)]
    members: Vec<Member>,
}

/// Enumerate all teams, sorted by name for deterministic rendering.
pub fn read_teams(teams_dir: &Path, tasks_dir: &Path) -> Vec<Team> {
    if !teams_dir.is_dir() {
        return Vec::new();
    }

    let mut teams = Vec::new();
    for entry in WalkDir::new(teams_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let members = read_members(&entry.path().join("config.json"));
        let tasks = read_tasks(&tasks_dir.join(&name));
        teams.push(Team {
            name,
            members,
            tasks,
        });
    }

    teams
}

fn read_members(config: &Path) -> Vec<Member> {
    let content = match std::fs::read_to_string(config) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    match serde_json::from_str::<TeamConfig>(&content) {
        Ok(cfg) => cfg.members,
        Err(e) => {
            warn!("Malformed team config {}: {}", config.display(), e);
            Vec::new()
        }
    }
}

fn read_tasks(dir: &Path) -> Vec<Task> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut tasks = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to read task file {}: {}", path.display(), e);
                continue;
            }
        };
        match serde_json::from_str::<Task>(&content) {
            Ok(task) => tasks.push(task),
            Err(e) => {
                warn!("Malformed task file {}: {}", path.display(), e);
            }
        }
    }

    tasks
}
