//! List command implementation.

use anyhow::Result;

use crate::cleanup::Cleanup;
use crate::cli::ListArgs;
use crate::commands::load_collection;
use crate::config::Config;

/// Run the list command.
pub fn run(args: ListArgs, config: &Config) -> Result<()> {
    let collection = load_collection(config)?;
    let cleanups: Vec<&Cleanup> = collection
        .iter()
        .filter(|c| args.all || c.enabled)
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cleanups)?);
        return Ok(());
    }

    if cleanups.is_empty() {
        println!("No enabled cleanups. Use --all to show disabled ones.");
        return Ok(());
    }

    println!("  {:<30} {:<32} {}", "ID", "TITLE", "APPLIES TO");
    println!("  {}", "-".repeat(76));
    for cleanup in cleanups {
        println!(
            "  {:<30} {:<32} {}",
            cleanup.id(),
            cleanup.title,
            applies_to(cleanup)
        );
    }

    Ok(())
}

/// Short description of the item kinds a cleanup works for.
pub fn applies_to(cleanup: &Cleanup) -> String {
    if !cleanup.enabled {
        return "(disabled)".to_string();
    }

    let mut kinds = Vec::new();
    if cleanup.works_for_dir {
        kinds.push("dirs");
    }
    if cleanup.works_for_file {
        kinds.push("files");
    }
    if cleanup.works_for_dot_entry {
        kinds.push("dot entries");
    }
    if kinds.is_empty() {
        kinds.push("nothing");
    }

    let mut text = kinds.join(", ");
    if cleanup.ask_for_confirmation {
        text.push_str(" [confirm]");
    }
    text
}
