//! Ordered, id-indexed set of cleanups with event dispatch.

use indexmap::IndexMap;
use std::rc::{Rc, Weak};

use crate::cleanup::action::{Cleanup, CleanupOutcome, ExecuteOptions};
use crate::cleanup::host::ActionHost;
use crate::cleanup::standard::std_cleanups;
use crate::config::Config;
use crate::error::{CleanupError, Result};
use crate::events::{CleanupEvent, CleanupListener, EventBus, SubscriptionId};
use crate::item::FileItem;

/// Activity points reported each time a cleanup is executed.
pub const USER_ACTIVITY_POINTS: u32 = 10;

/// Set of predefined and user defined cleanups.
///
/// Cleanups keep their insertion order, which is the order they appear in
/// menus. The collection owns its cleanups but never its host.
pub struct CleanupCollection {
    host: Option<Weak<dyn ActionHost>>,
    next_user_cleanup_no: u32,
    cleanups: IndexMap<String, Cleanup>,
    selection: Option<FileItem>,
    events: EventBus,
}

impl CleanupCollection {
    /// Create an empty collection without a host.
    pub fn new() -> Self {
        Self {
            host: None,
            next_user_cleanup_no: 0,
            cleanups: IndexMap::new(),
            selection: None,
            events: EventBus::new(),
        }
    }

    /// Create an empty collection reporting to `host`.
    pub fn with_host<H: ActionHost + 'static>(host: &Rc<H>) -> Self {
        let host: Rc<dyn ActionHost> = host.clone();
        Self {
            host: Some(Rc::downgrade(&host)),
            ..Self::new()
        }
    }

    pub fn has_host(&self) -> bool {
        self.host().is_some()
    }

    fn host(&self) -> Option<Rc<dyn ActionHost>> {
        self.host.as_ref().and_then(Weak::upgrade)
    }

    /// Add the standard cleanups.
    pub fn add_std_cleanups(&mut self) -> Result<()> {
        for cleanup in std_cleanups() {
            self.add(cleanup)?;
        }
        Ok(())
    }

    /// Add `number` disabled user defined cleanups.
    ///
    /// Numbers already taken by a cleanup with the same id are skipped.
    pub fn add_user_cleanups(&mut self, number: u32) {
        let mut added = 0;
        while added < number {
            let no = self.next_user_cleanup_no;
            self.next_user_cleanup_no += 1;

            let id = user_cleanup_id(no);
            if self.cleanups.contains_key(&id) {
                tracing::debug!(%id, "User cleanup id taken, skipping");
                continue;
            }

            let mut cleanup = Cleanup::new(id, format!("User Defined Cleanup #{}", no), "");
            cleanup.enabled = false;
            if no <= 9 {
                cleanup.shortcut = Some(format!("Ctrl+{}", no));
            }

            // The id is free, so this cannot fail.
            if self.add(cleanup).is_ok() {
                added += 1;
            }
        }
    }

    /// Add one cleanup, taking ownership of it.
    ///
    /// A cleanup whose id is already present is rejected and the collection
    /// is left unchanged.
    pub fn add(&mut self, mut cleanup: Cleanup) -> Result<()> {
        if self.cleanups.contains_key(cleanup.id()) {
            return Err(CleanupError::DuplicateId(cleanup.id().to_string()));
        }

        tracing::debug!(id = %cleanup.id(), "Adding cleanup");
        cleanup.selection_changed(self.selection.as_ref());
        if let Some(host) = self.host() {
            host.action_added(&cleanup);
        }
        self.cleanups.insert(cleanup.id().to_string(), cleanup);

        Ok(())
    }

    /// Get a cleanup by id.
    pub fn cleanup(&self, id: &str) -> Option<&Cleanup> {
        self.cleanups.get(id)
    }

    /// Alias for [`cleanup`](Self::cleanup).
    pub fn get(&self, id: &str) -> Option<&Cleanup> {
        self.cleanup(id)
    }

    pub fn cleanup_mut(&mut self, id: &str) -> Option<&mut Cleanup> {
        self.cleanups.get_mut(id)
    }

    /// Remove all cleanups. The user cleanup counter keeps its value.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.cleanups.len(), "Clearing cleanups");
        if let Some(host) = self.host() {
            for id in self.cleanups.keys() {
                host.action_removed(id);
            }
        }
        self.cleanups.clear();
    }

    /// The cleanups in menu order.
    pub fn cleanup_list(&self) -> Vec<&Cleanup> {
        self.cleanups.values().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cleanup> {
        self.cleanups.values()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.cleanups.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.cleanups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleanups.is_empty()
    }

    /// Number the next user defined cleanup will get.
    pub fn next_user_cleanup_no(&self) -> u32 {
        self.next_user_cleanup_no
    }

    pub fn subscribe(&mut self, listener: impl CleanupListener + 'static) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Pass a new selection to every cleanup.
    pub fn selection_changed(&mut self, item: Option<&FileItem>) {
        self.selection = item.cloned();
        let host = self.host();
        for cleanup in self.cleanups.values_mut() {
            cleanup.selection_changed(item);
            if let Some(host) = &host {
                host.action_changed(cleanup);
            }
        }
        self.events
            .publish(&CleanupEvent::SelectionChanged(item.cloned()));
    }

    /// Apply the stored settings to every cleanup.
    pub fn read_config(&mut self, config: &Config) {
        let host = self.host();
        for (id, cleanup) in self.cleanups.iter_mut() {
            if let Some(settings) = config.cleanups.get(id) {
                cleanup.apply_settings(settings);
                if let Some(host) = &host {
                    host.action_changed(cleanup);
                }
            }
        }
        self.events.publish(&CleanupEvent::ReadConfig);
    }

    /// Store the settings of every cleanup in `config`.
    pub fn save_config(&self, config: &mut Config) {
        for (id, cleanup) in &self.cleanups {
            config.cleanups.insert(id.clone(), cleanup.settings());
        }
        self.events.publish(&CleanupEvent::SaveConfig);
    }

    /// Execute the cleanup `id` on `item`.
    pub fn execute<F>(
        &self,
        id: &str,
        item: &FileItem,
        options: &ExecuteOptions,
        confirm: F,
    ) -> Result<CleanupOutcome>
    where
        F: FnOnce(&Cleanup, &FileItem) -> bool,
    {
        let cleanup = self
            .cleanup(id)
            .ok_or_else(|| CleanupError::UnknownId(id.to_string()))?;

        let outcome = cleanup.execute(item, options, confirm)?;
        if !options.dry_run && matches!(outcome, CleanupOutcome::Executed { .. }) {
            self.cleanup_executed();
        }

        Ok(outcome)
    }

    fn cleanup_executed(&self) {
        self.events
            .publish(&CleanupEvent::UserActivity(USER_ACTIVITY_POINTS));
    }

    /// Deep copy of the cleanups, for editing and restoring later.
    pub fn snapshot(&self) -> CleanupSnapshot {
        CleanupSnapshot {
            next_user_cleanup_no: self.next_user_cleanup_no,
            cleanups: self
                .cleanups
                .iter()
                .map(|(id, c)| (id.clone(), c.detached()))
                .collect(),
        }
    }

    /// Replace the cleanups with those of `snapshot`.
    ///
    /// The host, listeners and current selection of this collection stay in
    /// place.
    pub fn restore(&mut self, snapshot: &CleanupSnapshot) {
        self.clear();
        let host = self.host();
        for (id, cleanup) in &snapshot.cleanups {
            let mut cleanup = cleanup.clone();
            cleanup.selection_changed(self.selection.as_ref());
            if let Some(host) = &host {
                host.action_added(&cleanup);
            }
            self.cleanups.insert(id.clone(), cleanup);
        }
        debug_assert_eq!(self.cleanups.len(), snapshot.cleanups.len());
        self.next_user_cleanup_no = self.next_user_cleanup_no.max(snapshot.next_user_cleanup_no);
        tracing::debug!(count = self.cleanups.len(), "Restored cleanups from snapshot");
    }
}

impl Default for CleanupCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CleanupCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupCollection")
            .field("has_host", &self.has_host())
            .field("next_user_cleanup_no", &self.next_user_cleanup_no)
            .field("cleanups", &self.ids())
            .field("events", &self.events)
            .finish()
    }
}

/// Detached copy of a collection's cleanups.
///
/// Has no host and no listeners; it exists to be edited and handed back to
/// [`CleanupCollection::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupSnapshot {
    next_user_cleanup_no: u32,
    cleanups: IndexMap<String, Cleanup>,
}

impl CleanupSnapshot {
    pub fn cleanup(&self, id: &str) -> Option<&Cleanup> {
        self.cleanups.get(id)
    }

    pub fn cleanup_mut(&mut self, id: &str) -> Option<&mut Cleanup> {
        self.cleanups.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cleanup> {
        self.cleanups.values()
    }

    pub fn len(&self) -> usize {
        self.cleanups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleanups.is_empty()
    }

    pub fn next_user_cleanup_no(&self) -> u32 {
        self.next_user_cleanup_no
    }

    /// Turn the snapshot into a host-less collection.
    pub fn into_collection(self) -> CleanupCollection {
        CleanupCollection {
            next_user_cleanup_no: self.next_user_cleanup_no,
            cleanups: self.cleanups,
            ..CleanupCollection::new()
        }
    }
}

/// Id of the user defined cleanup number `no`.
pub fn user_cleanup_id(no: u32) -> String {
    format!("cleanup_user_defined_{}", no)
}
