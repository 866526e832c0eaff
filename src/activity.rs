//! Accumulates user activity points until a threshold is reached.

use std::cell::Cell;
use std::rc::Rc;

use crate::events::CleanupEvent;

/// Counts activity points reported through [`CleanupEvent::UserActivity`].
#[derive(Debug)]
pub struct ActivityTracker {
    threshold: u64,
    sum: Cell<u64>,
    reached: Cell<bool>,
}

impl ActivityTracker {
    pub fn new(threshold: u64) -> Self {
        Self::with_sum(threshold, 0)
    }

    /// Resume from a previously saved sum.
    ///
    /// A sum already past the threshold does not fire again.
    pub fn with_sum(threshold: u64, sum: u64) -> Self {
        Self {
            threshold,
            sum: Cell::new(sum),
            reached: Cell::new(sum >= threshold),
        }
    }

    /// Add `points`. Returns true when this call crossed the threshold.
    pub fn track_activity(&self, points: u32) -> bool {
        let sum = self.sum.get().saturating_add(u64::from(points));
        self.sum.set(sum);

        if !self.reached.get() && sum >= self.threshold {
            self.reached.set(true);
            tracing::info!(sum, threshold = self.threshold, "Activity threshold reached");
            return true;
        }

        false
    }

    pub fn sum(&self) -> u64 {
        self.sum.get()
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn threshold_reached(&self) -> bool {
        self.reached.get()
    }

    pub fn reset(&self) {
        self.sum.set(0);
        self.reached.set(false);
    }

    /// Listener feeding activity events into `tracker`.
    pub fn listener(tracker: Rc<Self>) -> impl Fn(&CleanupEvent) + 'static {
        move |event: &CleanupEvent| {
            if let CleanupEvent::UserActivity(points) = event {
                tracker.track_activity(*points);
            }
        }
    }
}
