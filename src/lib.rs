//! Sweeper Actions - cleanup actions for a Linux disk usage utility
//!
//! This crate provides functionality for:
//! - Defining cleanup commands applicable to files and directories
//! - Managing standard and user defined cleanups in one ordered collection
//! - Relaying selection, configuration and activity events to listeners

pub mod activity;
pub mod cleanup;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod item;

// Re-export commonly used types
pub use cleanup::{Cleanup, CleanupCollection, CleanupSnapshot};
pub use config::Config;
pub use error::{CleanupError, Result};
pub use item::FileItem;
