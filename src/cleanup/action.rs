//! A single cleanup action and the result of running it.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::cleanup::command;
use crate::config::CleanupSettings;
use crate::error::{CleanupError, Result};
use crate::item::FileItem;

/// What the host should do with its view of the tree after a cleanup ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RefreshPolicy {
    /// Nothing changed on disk.
    #[default]
    NoRefresh,
    /// Re-read the item the cleanup ran on.
    RefreshThis,
    /// Re-read the item's parent.
    RefreshParent,
    /// The item is gone; drop it without re-reading.
    AssumeDeleted,
}

/// Options for [`Cleanup::execute`].
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// If true, expand commands but don't run them.
    pub dry_run: bool,
}

/// Result of executing a cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The command ran (or would have, in a dry run).
    Executed {
        id: String,
        target: PathBuf,
        refresh: RefreshPolicy,
        /// Expanded commands in execution order
        commands: Vec<String>,
    },
    /// The cleanup does not apply to the item.
    Skipped { id: String, reason: String },
    /// The user declined the confirmation.
    Cancelled { id: String },
}

/// A named command applicable to a selected file, directory or dot entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cleanup {
    id: String,
    pub title: String,
    pub command: String,
    pub enabled: bool,
    pub works_for_dir: bool,
    pub works_for_file: bool,
    pub works_for_dot_entry: bool,
    pub works_local_only: bool,
    pub recurse: bool,
    pub ask_for_confirmation: bool,
    pub refresh_policy: RefreshPolicy,
    pub shortcut: Option<String>,

    #[serde(skip)]
    selection: Option<FileItem>,
    #[serde(skip)]
    active: bool,
}

impl Cleanup {
    /// Create an enabled cleanup that works for directories and files.
    pub fn new(id: impl Into<String>, title: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            command: command.into(),
            enabled: true,
            works_for_dir: true,
            works_for_file: true,
            works_for_dot_entry: false,
            works_local_only: true,
            recurse: false,
            ask_for_confirmation: false,
            refresh_policy: RefreshPolicy::NoRefresh,
            shortcut: None,
            selection: None,
            active: false,
        }
    }

    /// Internal name, fixed at construction.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Check whether this cleanup can be applied to `item`.
    pub fn works_for(&self, item: &FileItem) -> bool {
        if !self.enabled || self.command.trim().is_empty() {
            return false;
        }

        if self.works_local_only && !item.is_local {
            return false;
        }

        if item.is_dot_entry {
            self.works_for_dot_entry
        } else if item.is_dir {
            self.works_for_dir
        } else {
            self.works_for_file
        }
    }

    /// Remember the current selection and recompute [`is_active`](Self::is_active).
    pub fn selection_changed(&mut self, item: Option<&FileItem>) {
        self.selection = item.cloned();
        self.refresh_active();
    }

    pub fn selection(&self) -> Option<&FileItem> {
        self.selection.as_ref()
    }

    /// Whether the cleanup applies to the current selection.
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn refresh_active(&mut self) {
        self.active = self
            .selection
            .as_ref()
            .is_some_and(|item| self.works_for(item));
    }

    /// Drop the runtime state, leaving only the definition.
    pub(crate) fn detached(&self) -> Self {
        Self {
            selection: None,
            active: false,
            ..self.clone()
        }
    }

    /// Run the cleanup on `item`.
    ///
    /// `confirm` is only consulted when `ask_for_confirmation` is set.
    pub fn execute<F>(
        &self,
        item: &FileItem,
        options: &ExecuteOptions,
        confirm: F,
    ) -> Result<CleanupOutcome>
    where
        F: FnOnce(&Cleanup, &FileItem) -> bool,
    {
        if !self.works_for(item) {
            return Ok(CleanupOutcome::Skipped {
                id: self.id.clone(),
                reason: format!("'{}' does not apply to {}", self.title, item.path.display()),
            });
        }

        if self.ask_for_confirmation && !confirm(self, item) {
            tracing::info!(id = %self.id, path = %item.path.display(), "Cleanup cancelled");
            return Ok(CleanupOutcome::Cancelled {
                id: self.id.clone(),
            });
        }

        let mut commands = Vec::new();
        for target in self.targets(item)? {
            let expanded = command::expand(&self.command, &target);
            if !options.dry_run {
                command::run(&expanded, target.working_dir())?;
            }
            commands.push(expanded);
        }

        tracing::info!(
            id = %self.id,
            path = %item.path.display(),
            commands = commands.len(),
            dry_run = options.dry_run,
            "Cleanup executed"
        );

        Ok(CleanupOutcome::Executed {
            id: self.id.clone(),
            target: item.path.clone(),
            refresh: self.refresh_policy,
            commands,
        })
    }

    /// Items the command runs on: sub-directories deepest first when
    /// recursing, always ending with `item` itself.
    fn targets(&self, item: &FileItem) -> Result<Vec<FileItem>> {
        if !self.recurse || !item.is_dir {
            return Ok(vec![item.clone()]);
        }

        let mut targets = Vec::new();
        for entry in WalkDir::new(&item.path)
            .min_depth(1)
            .follow_links(false)
            .contents_first(true)
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&item.path).to_path_buf();
                CleanupError::Io {
                    path,
                    source: e.into(),
                }
            })?;

            if entry.file_type().is_dir() {
                targets.push(FileItem {
                    path: entry.path().to_path_buf(),
                    name: entry.file_name().to_string_lossy().into_owned(),
                    is_dir: true,
                    is_dot_entry: false,
                    is_local: item.is_local,
                });
            }
        }
        targets.push(item.clone());

        Ok(targets)
    }

    /// Overwrite every field `settings` names.
    pub fn apply_settings(&mut self, settings: &CleanupSettings) {
        if let Some(v) = settings.enabled {
            self.enabled = v;
        }
        if let Some(v) = &settings.title {
            self.title = v.clone();
        }
        if let Some(v) = &settings.command {
            self.command = v.clone();
        }
        if let Some(v) = settings.works_for_dir {
            self.works_for_dir = v;
        }
        if let Some(v) = settings.works_for_file {
            self.works_for_file = v;
        }
        if let Some(v) = settings.works_for_dot_entry {
            self.works_for_dot_entry = v;
        }
        if let Some(v) = settings.works_local_only {
            self.works_local_only = v;
        }
        if let Some(v) = settings.recurse {
            self.recurse = v;
        }
        if let Some(v) = settings.ask_for_confirmation {
            self.ask_for_confirmation = v;
        }
        if let Some(v) = settings.refresh_policy {
            self.refresh_policy = v;
        }
        self.refresh_active();
    }

    /// Full settings of this cleanup, suitable for saving.
    pub fn settings(&self) -> CleanupSettings {
        CleanupSettings {
            enabled: Some(self.enabled),
            title: Some(self.title.clone()),
            command: Some(self.command.clone()),
            works_for_dir: Some(self.works_for_dir),
            works_for_file: Some(self.works_for_file),
            works_for_dot_entry: Some(self.works_for_dot_entry),
            works_local_only: Some(self.works_local_only),
            recurse: Some(self.recurse),
            ask_for_confirmation: Some(self.ask_for_confirmation),
            refresh_policy: Some(self.refresh_policy),
        }
    }
}
