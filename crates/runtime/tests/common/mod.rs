//! Shared fixtures for session integration tests.
#![allow(dead_code)]

use combat_core::{
    AbilityCategory, AttackKind, BalanceTables, CombatConfig, CombatantSpec, EncounterSetup,
    ModifierSpec, SkillBook, SkillDefinition, SkillId, StatPoolSpec, TargetMode, TargetType,
};
use combat_core::{CombatStat, ModifierKind};

pub const EMBER_WAVE: SkillId = SkillId(1);
pub const STONE_LANCE: SkillId = SkillId(2);
pub const WAR_CRY: SkillId = SkillId(3);
pub const TIDE_CALL: SkillId = SkillId(4);

pub fn skill_book() -> SkillBook {
    let mut book = SkillBook::new();
    book.insert(
        EMBER_WAVE,
        SkillDefinition {
            name: "Ember Wave".into(),
            description: "Scorches every enemy.".into(),
            base_magnitude: 20.0,
            technique_cost: 15.0,
            attack_kind: AttackKind::Magical,
            category: AbilityCategory::Offensive,
            target_type: TargetType::Enemy,
            target_mode: TargetMode::All,
            cast_duration: 0.0,
            modifier: None,
        },
    );
    book.insert(
        STONE_LANCE,
        SkillDefinition {
            name: "Stone Lance".into(),
            description: "Hurls a lance at a random enemy.".into(),
            base_magnitude: 30.0,
            technique_cost: 20.0,
            attack_kind: AttackKind::Physical,
            category: AbilityCategory::Offensive,
            target_type: TargetType::Enemy,
            target_mode: TargetMode::Random,
            cast_duration: 0.0,
            modifier: None,
        },
    );
    book.insert(
        TIDE_CALL,
        SkillDefinition {
            name: "Tide Call".into(),
            description: "A deluge far beyond a novice's reserves.".into(),
            base_magnitude: 120.0,
            technique_cost: 60.0,
            attack_kind: AttackKind::Magical,
            category: AbilityCategory::Offensive,
            target_type: TargetType::Enemy,
            target_mode: TargetMode::All,
            cast_duration: 0.0,
            modifier: None,
        },
    );
    book.insert(
        WAR_CRY,
        SkillDefinition {
            name: "War Cry".into(),
            description: "Bolsters the caster's strikes.".into(),
            base_magnitude: 0.0,
            technique_cost: 5.0,
            attack_kind: AttackKind::Physical,
            category: AbilityCategory::Buff,
            target_type: TargetType::Caster,
            target_mode: TargetMode::Single,
            cast_duration: 0.0,
            modifier: Some(ModifierSpec {
                stat: CombatStat::PhysicalAttack,
                value: 0.2,
                kind: ModifierKind::Percentage,
                duration_turns: 2,
            }),
        },
    );
    book
}

pub fn player_spec() -> CombatantSpec {
    CombatantSpec {
        name: "Wanderer".into(),
        stats: StatPoolSpec {
            max_health: 250.0,
            max_technique_points: 50.0,
            physical_attack: 50.0,
            magical_attack: 50.0,
            physical_defense: 0.0,
            magical_defense: 0.0,
            speed: 80.0,
            ..StatPoolSpec::default()
        },
        known_skills: vec![EMBER_WAVE, STONE_LANCE, WAR_CRY, TIDE_CALL],
    }
}

pub fn enemy_spec(name: &str, speed: f32, attack: f32, health: f32) -> CombatantSpec {
    CombatantSpec {
        name: name.into(),
        stats: StatPoolSpec {
            max_health: health,
            physical_attack: attack,
            physical_defense: 0.0,
            magical_defense: 0.0,
            speed,
            ..StatPoolSpec::default()
        },
        known_skills: Vec::new(),
    }
}

pub fn setup(enemies: Vec<CombatantSpec>) -> EncounterSetup {
    EncounterSetup {
        return_destination: "verdant-crossing".into(),
        player: player_spec(),
        enemies,
        seed: 7,
    }
}

pub fn instant_config() -> CombatConfig {
    CombatConfig::instant()
}

pub fn tables() -> BalanceTables {
    BalanceTables::default()
}
