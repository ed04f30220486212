//! Content loaders for reading combat data from files.
//!
//! Loaders convert RON/TOML files into the combat-core types the runtime
//! feeds to an encounter: skill books, actor templates, balance tables and
//! pacing configuration.

pub mod actors;
pub mod config;
pub mod factory;
pub mod skills;
pub mod tables;

pub use actors::{ActorCatalog, ActorLoader};
pub use config::ConfigLoader;
pub use factory::{ContentFactory, EncounterRequest};
pub use skills::SkillLoader;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
