//! Balance tables loader.

use std::path::Path;

use combat_core::BalanceTables;

use crate::loaders::{LoadResult, read_file};

/// Loader for balance tables from TOML files.
///
/// Every key is optional; missing ones keep the combat-core defaults, so an
/// empty file is a valid (default) table set.
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<BalanceTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BalanceTables> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse tables TOML: {}", e))
    }
}
