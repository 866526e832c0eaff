//! Run command implementation.

use anyhow::{Context, Result};
use humansize::{format_size, BINARY};
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;
use walkdir::WalkDir;

use crate::activity::ActivityTracker;
use crate::cleanup::{Cleanup, CleanupOutcome, ExecuteOptions, RefreshPolicy};
use crate::cli::RunArgs;
use crate::commands::load_collection;
use crate::config::Config;
use crate::item::FileItem;

/// Run the run command.
///
/// `config_path` is where the updated activity points are saved, if that
/// file exists.
pub fn run(args: RunArgs, mut config: Config, config_path: Option<&Path>) -> Result<()> {
    let path = args
        .path
        .canonicalize()
        .with_context(|| format!("Cannot access {}", args.path.display()))?;

    let item = if args.dot_entry {
        FileItem::dot_entry(&path)
    } else {
        FileItem::from_path(&path)?
    };

    let mut collection = load_collection(&config)?;
    let tracker = Rc::new(ActivityTracker::with_sum(
        config.general.activity_threshold,
        config.general.activity_points,
    ));
    collection.subscribe(ActivityTracker::listener(tracker.clone()));
    collection.selection_changed(Some(&item));
    let reached_before = tracker.threshold_reached();

    let Some(cleanup) = collection.cleanup(&args.id) else {
        eprintln!("Error: No cleanup with id '{}'", args.id);
        eprintln!("Valid ids: {}", collection.ids().join(", "));
        std::process::exit(2);
    };

    let size_before = match cleanup.refresh_policy {
        RefreshPolicy::AssumeDeleted if !args.dry_run => Some(tree_size(&item.path)),
        _ => None,
    };

    let force = args.force;
    let options = ExecuteOptions {
        dry_run: args.dry_run,
    };
    let outcome = collection.execute(&args.id, &item, &options, |cleanup, item| {
        force || prompt_confirmation(cleanup, item)
    })?;

    match outcome {
        CleanupOutcome::Executed {
            commands, refresh, ..
        } => {
            if args.dry_run {
                println!("[DRY RUN] Would run:");
                for command in &commands {
                    println!("  {}", command);
                }
                return Ok(());
            }

            println!("Ran '{}' on {}", args.id, item.path.display());
            match refresh {
                RefreshPolicy::AssumeDeleted => {
                    println!(
                        "  Freed:   {}",
                        format_size(size_before.unwrap_or(0), BINARY)
                    );
                }
                RefreshPolicy::RefreshParent => println!("  Parent directory changed"),
                RefreshPolicy::RefreshThis => println!("  Contents changed"),
                RefreshPolicy::NoRefresh => {}
            }

            if threshold_crossed(reached_before, &tracker) {
                println!("  Activity threshold reached ({} points)", tracker.sum());
            }
            save_activity(&mut config, config_path, tracker.sum())?;
        }
        CleanupOutcome::Skipped { reason, .. } => {
            eprintln!("Skipped: {}", reason);
            std::process::exit(3);
        }
        CleanupOutcome::Cancelled { .. } => {
            println!("Aborted.");
        }
    }

    Ok(())
}

fn prompt_confirmation(cleanup: &Cleanup, item: &FileItem) -> bool {
    print!(
        "\n{}\n  {}\nProceed? [y/N] ",
        cleanup.title,
        item.path.display()
    );
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    input.trim().eq_ignore_ascii_case("y")
}

/// True only for the run that took the tracker past its threshold.
fn threshold_crossed(reached_before: bool, tracker: &ActivityTracker) -> bool {
    !reached_before && tracker.threshold_reached()
}

fn save_activity(config: &mut Config, config_path: Option<&Path>, points: u64) -> Result<()> {
    let Some(path) = config_path.filter(|p| p.exists()) else {
        return Ok(());
    };

    config.general.activity_points = points;
    config.save(path)?;
    tracing::debug!(points, path = %path.display(), "Saved activity points");

    Ok(())
}

fn tree_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .flatten()
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}
