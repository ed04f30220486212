//! Canonical damage formulas.

use crate::catalog::{AttackKind, SkillDefinition};
use crate::env::BalanceTables;
use crate::stats::StatPool;

/// Resolve damage for a skill or raw strike.
///
/// # Formula
///
/// ```text
/// raw     = base_magnitude + attacker.attack(kind)
/// reduced = raw - defender.defense(kind) * defense_weight
/// damage  = max(damage_floor, reduced)
/// ```
///
/// Defense is subtracted here and nowhere else; the defender-side
/// defending-stance multiplier is a separate, later step inside
/// `StatPool::apply_damage`. The floor keeps every hit meaningful so combat
/// always terminates.
pub fn skill_damage(
    attacker: &StatPool,
    defender: &StatPool,
    base_magnitude: f32,
    kind: AttackKind,
    tables: &BalanceTables,
) -> f32 {
    let raw = base_magnitude + attacker.attack(kind);
    let reduced = raw - defender.defense(kind) * tables.defense_weight;
    reduced.max(tables.damage_floor)
}

/// Resolve the default attack: a zero-magnitude physical strike, so the
/// attacker's physical attack stat is the raw damage.
pub fn attack_damage(attacker: &StatPool, defender: &StatPool, tables: &BalanceTables) -> f32 {
    skill_damage(attacker, defender, 0.0, AttackKind::Physical, tables)
}

/// Heal abilities restore the skill's base magnitude directly; no defense
/// term is involved.
pub fn heal_amount(skill: &SkillDefinition) -> f32 {
    skill.base_magnitude.max(0.0)
}
