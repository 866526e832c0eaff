//! Subcommand implementations.

pub mod configure;
pub mod list;
pub mod run;

use crate::cleanup::CleanupCollection;
use crate::config::Config;
use crate::error::Result;

/// Build the collection described by `config`: the standard cleanups, the
/// configured number of user cleanups, then the stored settings on top.
pub fn load_collection(config: &Config) -> Result<CleanupCollection> {
    let mut collection = CleanupCollection::new();
    collection.add_std_cleanups()?;
    collection.add_user_cleanups(config.general.user_cleanups);
    collection.read_config(config);

    tracing::debug!(cleanups = collection.len(), "Loaded cleanup collection");
    Ok(collection)
}
