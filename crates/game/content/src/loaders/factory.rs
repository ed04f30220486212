//! Content factory for building encounters from a data directory.

use std::path::{Path, PathBuf};

use combat_core::{BalanceTables, CombatConfig, CombatantSpec, EncounterSetup, SkillBook};

use crate::loaders::{ActorCatalog, ActorLoader, ConfigLoader, LoadResult, SkillLoader, TablesLoader};

/// How an overworld trigger describes the fight it wants.
///
/// The enemy roster is explicit — template names and counts — so nothing
/// about encounter size leaks through ambient state.
#[derive(Clone, Debug)]
pub struct EncounterRequest {
    /// Identifier of the non-combat context to return to afterwards.
    pub return_destination: String,
    /// `(template, count)` pairs resolved against the actor catalog.
    pub enemies: Vec<(String, u32)>,
    /// Seed for deterministic random target sampling.
    pub seed: u64,
}

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tables.toml
/// ├── skills.ron
/// └── actors.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load pacing configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load balance tables from `tables.toml`.
    pub fn load_tables(&self) -> LoadResult<BalanceTables> {
        TablesLoader::load(&self.data_dir.join("tables.toml"))
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillBook> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load actor templates from `actors.ron`.
    pub fn load_actors(&self) -> LoadResult<ActorCatalog> {
        ActorLoader::load(&self.data_dir.join("actors.ron"))
    }

    /// Expand an encounter request against the actor catalog.
    ///
    /// Template instances get numbered names (`Withered Husk 2`) when a
    /// request asks for more than one, so combat logs stay readable.
    pub fn build_encounter(
        catalog: &ActorCatalog,
        request: EncounterRequest,
    ) -> LoadResult<EncounterSetup> {
        let mut enemies: Vec<CombatantSpec> = Vec::new();

        for (template, count) in &request.enemies {
            let spec = catalog
                .enemy(template)
                .ok_or_else(|| anyhow::anyhow!("Unknown enemy template '{}'", template))?;
            for index in 0..*count {
                let mut instance = spec.clone();
                if *count > 1 {
                    instance.name = format!("{} {}", spec.name, index + 1);
                }
                enemies.push(instance);
            }
        }

        Ok(EncounterSetup {
            return_destination: request.return_destination,
            player: catalog.player.clone(),
            enemies,
            seed: request.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;

    use combat_core::{AbilityOracle, StatPoolSpec};

    fn catalog() -> ActorCatalog {
        let mut enemies = BTreeMap::new();
        enemies.insert(
            "husk".to_string(),
            CombatantSpec {
                name: "Withered Husk".into(),
                stats: StatPoolSpec::default(),
                known_skills: Vec::new(),
            },
        );
        ActorCatalog {
            player: CombatantSpec {
                name: "Wanderer".into(),
                stats: StatPoolSpec::default(),
                known_skills: Vec::new(),
            },
            enemies,
        }
    }

    #[test]
    fn build_encounter_expands_counts_with_numbered_names() {
        let setup = ContentFactory::build_encounter(
            &catalog(),
            EncounterRequest {
                return_destination: "verdant-crossing".into(),
                enemies: vec![("husk".into(), 2)],
                seed: 11,
            },
        )
        .unwrap();

        assert_eq!(setup.enemies.len(), 2);
        assert_eq!(setup.enemies[0].name, "Withered Husk 1");
        assert_eq!(setup.enemies[1].name, "Withered Husk 2");
        assert_eq!(setup.return_destination, "verdant-crossing");
    }

    #[test]
    fn single_instances_keep_the_template_name() {
        let setup = ContentFactory::build_encounter(
            &catalog(),
            EncounterRequest {
                return_destination: "verdant-crossing".into(),
                enemies: vec![("husk".into(), 1)],
                seed: 11,
            },
        )
        .unwrap();

        assert_eq!(setup.enemies[0].name, "Withered Husk");
    }

    #[test]
    fn unknown_templates_are_an_error() {
        let err = ContentFactory::build_encounter(
            &catalog(),
            EncounterRequest {
                return_destination: "verdant-crossing".into(),
                enemies: vec![("wisp".into(), 1)],
                seed: 11,
            },
        );
        assert!(err.is_err());
    }

    #[test]
    fn factory_loads_a_full_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "attack_delay_secs = 0.5\n").unwrap();
        fs::write(dir.path().join("tables.toml"), "defense_weight = 0.5\n").unwrap();
        fs::write(
            dir.path().join("skills.ron"),
            r#"SkillCatalog(skills: [])"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("actors.ron"),
            r#"ActorCatalog(
                player: CombatantSpec(name: "Wanderer", stats: StatPoolSpec()),
                enemies: {},
            )"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().attack_delay_secs, 0.5);
        assert_eq!(factory.load_tables().unwrap().defense_weight, 0.5);
        assert!(factory.load_skills().unwrap().is_empty());
        assert!(factory.load_actors().unwrap().enemies.is_empty());
    }
}
