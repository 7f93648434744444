//! Checkpointer - session activity aggregator
//!
//! A CLI tool that reconciles git history, the CLI tool log, and Agent
//! Teams state into a point-in-time checkpoint, updates the project
//! summary document, and emits a skill-analysis prompt.
//!
//! Exit codes:
//!   0 - Checkpoint written (or dry run completed)
//!   1 - Runtime error (bad arguments, rendering or write failure)

mod aggregate;
mod cli;
mod config;
mod doc;
mod git;
mod logs;
mod models;
mod report;
mod teams;
mod window;

use aggregate::Report;
use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::Config;
use doc::{AppendOutcome, SummaryDoc};
use git::{GitHistory, SystemGit};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use window::TimeWindow;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config(&args);
    }

    // Initialize logging
    init_logging(&args);

    info!("Checkpointer v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the checkpoint
    match run_checkpoint(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Checkpoint failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .checkpointer.toml.
fn handle_init_config(args: &Args) -> Result<()> {
    let path = args.root.join(".checkpointer.toml");

    if path.exists() {
        eprintln!("⚠️  .checkpointer.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(&path, &content).context("Failed to write .checkpointer.toml")?;

    println!("✅ Created {} with default settings.", path.display());
    println!("   Edit it to customize paths, git limits, and display caps.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete checkpoint workflow.
///
/// Sources are read sequentially and degrade to empty data on their own
/// failures; nothing is written until the whole report has rendered.
async fn run_checkpoint(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let window = TimeWindow::parse(args.since.as_deref())?;

    println!("Collecting session data...");

    // Step 1: Collect everything
    let runner = SystemGit::new(&args.root, config.git.timeout_seconds);
    let history = GitHistory::with_limits(runner, config.git.max_commits, config.git.baseline_depth);

    let branch = history.branch().await;
    let commits = history.commits(&window).await;
    let changes = history.file_changes(&window).await;
    let stats = history.file_stats(&window).await;

    let design_doc = args.root.join(&config.paths.design_doc);
    let design_diff = if design_doc.exists() {
        let design_rel = config.paths.design_doc.to_string_lossy();
        history.design_diff(&window, &design_rel).await
    } else {
        None
    };

    let log_path = args.root.join(&config.paths.log_file);
    let entries = logs::read_log(&log_path, &window);
    let teams = teams::read_teams(&config.paths.teams_dir(), &config.paths.tasks_dir());

    println!("  Git: {} commits, {} files", commits.len(), changes.total());
    println!("  CLI: {} consultations", entries.len());
    println!("  Agent Teams: {} teams", teams.len());

    // Step 2: Aggregate into the report model
    let report = Report::build(
        window,
        branch,
        commits,
        changes,
        stats,
        entries,
        teams,
        design_diff,
    );

    if args.dry_run {
        println!("\n✅ Dry run complete. No artifacts were written.");
        return Ok(());
    }

    // Step 3: Render every artifact before touching the filesystem
    let now = Utc::now();
    let checkpoint = report::render_checkpoint(&report, now, &config.report);
    let summary = report::render_session_summary(&report, now.date_naive());
    let prompt = report::build_analysis_prompt(&checkpoint);

    // Step 4: Write the checkpoint file
    let checkpoints_dir = args.root.join(&config.paths.checkpoints_dir);
    std::fs::create_dir_all(&checkpoints_dir)
        .with_context(|| format!("Failed to create {}", checkpoints_dir.display()))?;

    let stamp = report::artifact_stamp(now);
    let checkpoint_file = checkpoints_dir.join(format!("{}.md", stamp));
    std::fs::write(&checkpoint_file, &checkpoint)
        .with_context(|| format!("Failed to write {}", checkpoint_file.display()))?;
    println!("\nCheckpoint: {}", checkpoint_file.display());

    // Step 5: Append the condensed summary to the summary document
    if args.skip_doc_update {
        debug!("Summary document update skipped");
    } else {
        let doc = SummaryDoc::new(args.root.join(&config.paths.summary_doc));
        match doc.append_section_or_create(&summary)? {
            AppendOutcome::Missing => {
                println!(
                    "Session history: {} not found, update skipped",
                    doc.path().display()
                );
            }
            AppendOutcome::SectionCreated | AppendOutcome::Appended => {
                println!("Session history: {}", doc.path().display());
            }
        }
    }

    // Step 6: Write the analysis prompt
    let prompt_file = checkpoints_dir.join(format!("{}.analyze-prompt.md", stamp));
    std::fs::write(&prompt_file, &prompt)
        .with_context(|| format!("Failed to write {}", prompt_file.display()))?;
    println!("Analysis prompt: {}", prompt_file.display());

    println!("\n✅ Done. Next: spawn a subagent to analyze the prompt file for skill patterns.");
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try the project root
    match Config::load_default(&args.root) {
        Ok(Some(config)) => {
            info!("Loaded config from .checkpointer.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
