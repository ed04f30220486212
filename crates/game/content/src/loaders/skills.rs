//! Skill catalog loader.

use std::path::Path;

use combat_core::{SkillBook, SkillDefinition, SkillId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One catalog row: an explicit id plus the definition it addresses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    pub id: u16,
    pub skill: SkillDefinition,
}

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillEntry>,
}

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill book from a RON file. Duplicate ids keep the last
    /// definition, matching `SkillBook::insert`.
    pub fn load(path: &Path) -> LoadResult<SkillBook> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SkillBook> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        Ok(catalog
            .skills
            .into_iter()
            .map(|entry| (SkillId(entry.id), entry.skill))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{AbilityCategory, AbilityOracle, AttackKind, TargetMode, TargetType};

    const CATALOG: &str = r#"
SkillCatalog(
    skills: [
        SkillEntry(
            id: 1,
            skill: SkillDefinition(
                name: "Cinder Strike",
                description: "A burning physical blow against one enemy.",
                base_magnitude: 20.0,
                technique_cost: 8.0,
                attack_kind: Physical,
                category: Offensive,
                target_type: Enemy,
                target_mode: Single,
                cast_duration: 1.0,
            ),
        ),
        SkillEntry(
            id: 2,
            skill: SkillDefinition(
                name: "Stonehide",
                description: "Hardens an ally's skin for a few turns.",
                base_magnitude: 0.0,
                technique_cost: 6.0,
                attack_kind: Physical,
                category: Buff,
                target_type: Ally,
                target_mode: Single,
                cast_duration: 1.5,
                modifier: Some(ModifierSpec(
                    stat: PhysicalDefense,
                    value: 0.25,
                    kind: Percentage,
                    duration_turns: 3,
                )),
            ),
        ),
    ],
)
"#;

    #[test]
    fn parses_a_two_skill_catalog() {
        let book = SkillLoader::parse(CATALOG).unwrap();
        assert_eq!(book.len(), 2);

        let strike = book.skill(SkillId(1)).unwrap();
        assert_eq!(strike.name, "Cinder Strike");
        assert_eq!(strike.attack_kind, AttackKind::Physical);
        assert_eq!(strike.category, AbilityCategory::Offensive);
        assert_eq!(strike.target_type, TargetType::Enemy);
        assert_eq!(strike.target_mode, TargetMode::Single);
        assert!(strike.modifier.is_none());

        let stonehide = book.skill(SkillId(2)).unwrap();
        let modifier = stonehide.modifier.unwrap();
        assert_eq!(modifier.duration_turns, 3);
    }

    #[test]
    fn rejects_malformed_catalogs() {
        assert!(SkillLoader::parse("SkillCatalog(skills: [oops])").is_err());
    }
}
