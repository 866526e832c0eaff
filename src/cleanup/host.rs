use crate::cleanup::action::Cleanup;

/// Trait for the facility that renders cleanups as menu or toolbar entries.
///
/// A collection only keeps a weak reference to its host.
pub trait ActionHost {
    /// A cleanup was added to the collection.
    fn action_added(&self, cleanup: &Cleanup);

    /// The cleanup with `id` was removed from the collection.
    fn action_removed(&self, id: &str);

    /// The cleanup's settings or enablement changed.
    fn action_changed(&self, cleanup: &Cleanup);
}
