//! Actor template loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::CombatantSpec;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Actor catalog structure for RON files: one player template plus named
/// enemy templates an encounter request instantiates by name and count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorCatalog {
    pub player: CombatantSpec,
    pub enemies: BTreeMap<String, CombatantSpec>,
}

impl ActorCatalog {
    pub fn enemy(&self, template: &str) -> Option<&CombatantSpec> {
        self.enemies.get(template)
    }
}

/// Loader for actor templates from RON files.
pub struct ActorLoader;

impl ActorLoader {
    /// Load player and enemy templates from a RON file.
    pub fn load(path: &Path) -> LoadResult<ActorCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ActorCatalog> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor catalog RON: {}", e))
    }
}
