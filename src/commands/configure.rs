//! Configure command implementation.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use crate::cleanup::{Cleanup, CleanupCollection};
use crate::cli::ConfigureArgs;
use crate::commands::load_collection;
use crate::config::Config;
use crate::error::CleanupError;

/// Run the configure command, saving to `config_path` or the default location.
pub fn run(args: ConfigureArgs, mut config: Config, config_path: Option<&Path>) -> Result<()> {
    let path: PathBuf = match config_path {
        Some(p) => p.to_path_buf(),
        None => Config::default_path().ok_or_else(|| anyhow!("No configuration directory"))?,
    };

    let mut collection = load_collection(&config)?;
    apply(&mut collection, &args)?;

    collection.save_config(&mut config);
    config.validate()?;
    config.save(&path)?;

    if let Some(cleanup) = collection.cleanup(&args.id) {
        println!("Saved '{}' ({}) to {}", cleanup.title, cleanup.id(), path.display());
    }

    Ok(())
}

/// Edit a snapshot of the collection and restore it once every change applied.
///
/// An unknown id leaves the collection untouched.
pub fn apply(collection: &mut CleanupCollection, args: &ConfigureArgs) -> crate::Result<()> {
    let mut snapshot = collection.snapshot();
    let cleanup = snapshot
        .cleanup_mut(&args.id)
        .ok_or_else(|| CleanupError::UnknownId(args.id.clone()))?;

    edit(cleanup, args);
    tracing::debug!(id = %args.id, "Edited cleanup settings");
    collection.restore(&snapshot);

    Ok(())
}

fn edit(cleanup: &mut Cleanup, args: &ConfigureArgs) {
    if let Some(title) = &args.title {
        cleanup.title = title.clone();
    }
    if let Some(command) = &args.command {
        cleanup.command = command.clone();
    }
    if args.enable {
        cleanup.enabled = true;
    }
    if args.disable {
        cleanup.enabled = false;
    }
    if let Some(recurse) = args.recurse {
        cleanup.recurse = recurse;
    }
    if let Some(confirm) = args.confirm {
        cleanup.ask_for_confirmation = confirm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(id: &str) -> ConfigureArgs {
        ConfigureArgs {
            id: id.to_string(),
            title: None,
            command: None,
            enable: false,
            disable: false,
            recurse: None,
            confirm: None,
        }
    }

    #[test]
    fn test_apply_edits_user_cleanup() {
        let mut collection = load_collection(&Config::default()).unwrap();
        let args = ConfigureArgs {
            command: Some("du -sh %p".into()),
            enable: true,
            ..args("cleanup_user_defined_2")
        };

        apply(&mut collection, &args).unwrap();

        let cleanup = collection.cleanup("cleanup_user_defined_2").unwrap();
        assert!(cleanup.enabled);
        assert_eq!(cleanup.command, "du -sh %p");
    }

    #[test]
    fn test_apply_unknown_id_changes_nothing() {
        let mut collection = load_collection(&Config::default()).unwrap();
        let before = collection.snapshot();

        let result = apply(&mut collection, &args("cleanup_nope"));

        assert!(matches!(result, Err(CleanupError::UnknownId(_))));
        assert_eq!(collection.snapshot(), before);
    }

    #[test]
    fn test_apply_keeps_menu_order() {
        let mut collection = load_collection(&Config::default()).unwrap();
        let ids_before: Vec<String> = collection.ids().iter().map(|s| s.to_string()).collect();

        apply(&mut collection, &ConfigureArgs {
            disable: true,
            ..args("cleanup_make_clean")
        })
        .unwrap();

        assert_eq!(collection.ids(), ids_before);
        assert!(!collection.cleanup("cleanup_make_clean").unwrap().enabled);
    }
}
