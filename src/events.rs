//! Same-thread notifications between a cleanup collection and its listeners.

use crate::item::FileItem;

/// Notification published by a [`CleanupCollection`](crate::cleanup::CleanupCollection).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupEvent {
    /// The selected item changed; `None` when the selection was cleared.
    SelectionChanged(Option<FileItem>),
    /// Every cleanup re-read its settings.
    ReadConfig,
    /// Every cleanup wrote its settings.
    SaveConfig,
    /// The user executed a cleanup, worth the given activity points.
    UserActivity(u32),
}

/// Trait for event receivers
pub trait CleanupListener {
    fn notify(&self, event: &CleanupEvent);
}

impl<F> CleanupListener for F
where
    F: Fn(&CleanupEvent),
{
    fn notify(&self, event: &CleanupEvent) {
        self(event)
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of listeners.
///
/// Events are delivered synchronously, in subscription order.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Box<dyn CleanupListener>)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl CleanupListener + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn publish(&self, event: &CleanupEvent) {
        tracing::trace!(?event, listeners = self.listeners.len(), "Publishing event");
        for (_, listener) in &self.listeners {
            listener.notify(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
