//! Cleanup actions and the collection that owns them.
//!
//! This module provides:
//! - The [`Cleanup`] action with its applicability rules and execution
//! - The predefined standard cleanups
//! - [`CleanupCollection`], the ordered registry that relays events

mod action;
mod collection;
pub mod command;
mod host;
pub mod standard;

pub use action::{Cleanup, CleanupOutcome, ExecuteOptions, RefreshPolicy};
pub use collection::{user_cleanup_id, CleanupCollection, CleanupSnapshot, USER_ACTIVITY_POINTS};
pub use host::ActionHost;
pub use standard::std_cleanups;
