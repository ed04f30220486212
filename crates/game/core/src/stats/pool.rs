//! Per-combatant mutable stat state.

use arrayvec::ArrayVec;

use crate::catalog::AttackKind;
use crate::config::CombatConfig;
use crate::env::BalanceTables;

use super::{CombatStat, ModifierKind, StatModifier};

/// The five recalculated combat stats as one value block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub physical_attack: f32,
    pub magical_attack: f32,
    pub physical_defense: f32,
    pub magical_defense: f32,
    pub speed: f32,
}

impl StatBlock {
    pub fn get(&self, stat: CombatStat) -> f32 {
        match stat {
            CombatStat::PhysicalAttack => self.physical_attack,
            CombatStat::MagicalAttack => self.magical_attack,
            CombatStat::PhysicalDefense => self.physical_defense,
            CombatStat::MagicalDefense => self.magical_defense,
            CombatStat::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: CombatStat, value: f32) {
        match stat {
            CombatStat::PhysicalAttack => self.physical_attack = value,
            CombatStat::MagicalAttack => self.magical_attack = value,
            CombatStat::PhysicalDefense => self.physical_defense = value,
            CombatStat::MagicalDefense => self.magical_defense = value,
            CombatStat::Speed => self.speed = value,
        }
    }

    fn clamped(self, cap: f32) -> Self {
        Self {
            physical_attack: self.physical_attack.clamp(0.0, cap),
            magical_attack: self.magical_attack.clamp(0.0, cap),
            physical_defense: self.physical_defense.clamp(0.0, cap),
            magical_defense: self.magical_defense.clamp(0.0, cap),
            speed: self.speed.clamp(0.0, cap),
        }
    }
}

/// Authoring-side description of a stat pool, as it appears in actor
/// templates. Construction clamps everything into the sane ranges from the
/// balance tables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatPoolSpec {
    pub max_health: f32,
    pub max_technique_points: f32,
    pub physical_attack: f32,
    pub magical_attack: f32,
    pub physical_defense: f32,
    pub magical_defense: f32,
    pub speed: f32,
    pub is_boss: bool,
    pub defense_reduction_factor: f32,
}

impl Default for StatPoolSpec {
    fn default() -> Self {
        Self {
            max_health: 250.0,
            max_technique_points: 50.0,
            physical_attack: 0.0,
            magical_attack: 0.0,
            physical_defense: 30.0,
            magical_defense: 30.0,
            speed: 80.0,
            is_boss: false,
            defense_reduction_factor: BalanceTables::DEFAULT_DEFEND_REDUCTION_FACTOR,
        }
    }
}

/// Mutable numeric state owned by exactly one combatant.
///
/// Base stats are snapshotted at construction and never touched again; the
/// effective block is recomputed from the modifier ledger whenever it
/// changes. Health and technique points clamp on every mutation:
/// `0 ≤ health ≤ health_ceiling` and `0 ≤ technique_points ≤ max`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatPool {
    health: f32,
    max_health: f32,
    technique_points: f32,
    max_technique_points: f32,
    base: StatBlock,
    effective: StatBlock,
    is_boss: bool,
    is_defending: bool,
    defense_reduction_factor: f32,
    modifiers: ArrayVec<StatModifier, { CombatConfig::MAX_ACTIVE_MODIFIERS }>,
}

impl StatPool {
    pub fn new(spec: StatPoolSpec, tables: &BalanceTables) -> Self {
        let max_health = if spec.is_boss {
            spec.max_health.max(0.0)
        } else {
            spec.max_health.clamp(0.0, tables.health_cap)
        };
        let max_technique_points = spec.max_technique_points.clamp(0.0, tables.stat_cap);
        let base = StatBlock {
            physical_attack: spec.physical_attack,
            magical_attack: spec.magical_attack,
            physical_defense: spec.physical_defense,
            magical_defense: spec.magical_defense,
            speed: spec.speed,
        }
        .clamped(tables.stat_cap);

        Self {
            health: max_health,
            max_health,
            technique_points: max_technique_points,
            max_technique_points,
            base,
            effective: base,
            is_boss: spec.is_boss,
            is_defending: false,
            defense_reduction_factor: spec.defense_reduction_factor.clamp(0.0, 1.0),
            modifiers: ArrayVec::new(),
        }
    }

    // ===== resource accessors =====

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn technique_points(&self) -> f32 {
        self.technique_points
    }

    pub fn max_technique_points(&self) -> f32 {
        self.max_technique_points
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn is_boss(&self) -> bool {
        self.is_boss
    }

    pub fn is_defending(&self) -> bool {
        self.is_defending
    }

    pub fn defense_reduction_factor(&self) -> f32 {
        self.defense_reduction_factor
    }

    /// Upper clamp for health. Bosses are allowed past the global cap.
    pub fn health_ceiling(&self, tables: &BalanceTables) -> f32 {
        if self.is_boss {
            self.max_health
        } else {
            self.max_health.min(tables.health_cap)
        }
    }

    // ===== effective stat accessors =====

    pub fn stat(&self, stat: CombatStat) -> f32 {
        self.effective.get(stat)
    }

    pub fn base_stat(&self, stat: CombatStat) -> f32 {
        self.base.get(stat)
    }

    pub fn attack(&self, kind: AttackKind) -> f32 {
        match kind {
            AttackKind::Physical => self.effective.physical_attack,
            AttackKind::Magical => self.effective.magical_attack,
        }
    }

    pub fn defense(&self, kind: AttackKind) -> f32 {
        match kind {
            AttackKind::Physical => self.effective.physical_defense,
            AttackKind::Magical => self.effective.magical_defense,
        }
    }

    pub fn speed(&self) -> f32 {
        self.effective.speed
    }

    // ===== resource mutation =====

    /// Apply already-resolved damage.
    ///
    /// Defense mitigation happens exactly once, in damage resolution; the
    /// only adjustment here is the defending-stance multiplier. Returns the
    /// damage actually applied after that multiplier.
    pub fn apply_damage(&mut self, amount: f32, tables: &BalanceTables) -> f32 {
        let effective = if self.is_defending {
            amount * (1.0 - self.defense_reduction_factor)
        } else {
            amount
        };

        self.health = (self.health - effective).clamp(0.0, self.health_ceiling(tables));
        effective
    }

    /// Restore health, clamped to the ceiling. Returns the amount actually
    /// restored.
    pub fn heal(&mut self, amount: f32, tables: &BalanceTables) -> f32 {
        let before = self.health;
        self.health = (self.health + amount.max(0.0)).clamp(0.0, self.health_ceiling(tables));
        self.health - before
    }

    /// Spend technique points. Insufficient points clamp to zero without
    /// error; ability execution is responsible for the affordability check.
    pub fn use_technique_points(&mut self, amount: f32) {
        self.technique_points =
            (self.technique_points - amount).clamp(0.0, self.max_technique_points);
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.technique_points >= cost
    }

    pub fn set_defending(&mut self, defending: bool) {
        self.is_defending = defending;
    }

    // ===== modifier ledger =====

    /// Append a modifier and recalculate the affected stat immediately.
    ///
    /// Returns false when the ledger is full; the modifier is dropped and
    /// nothing changes.
    pub fn apply_modifier(&mut self, modifier: StatModifier) -> bool {
        let stat = modifier.stat;
        if self.modifiers.try_push(modifier).is_err() {
            return false;
        }
        self.recalculate(stat);
        true
    }

    /// Decrement every modifier's remaining duration, dropping the expired
    /// ones. Called exactly once per completed round, before the next
    /// round's ordering is computed. Returns the stats that lost a modifier
    /// so callers can surface notifications.
    pub fn decrement_modifiers(&mut self) -> Vec<CombatStat> {
        let mut expired: Vec<CombatStat> = Vec::new();

        for modifier in &mut self.modifiers {
            modifier.remaining_turns = modifier.remaining_turns.saturating_sub(1);
            if modifier.remaining_turns == 0 && !expired.contains(&modifier.stat) {
                expired.push(modifier.stat);
            }
        }

        self.modifiers.retain(|modifier| modifier.remaining_turns > 0);
        for &stat in &expired {
            self.recalculate(stat);
        }

        expired
    }

    pub fn active_modifiers(&self) -> &[StatModifier] {
        &self.modifiers
    }

    /// Recompute one effective stat from its base and the live ledger.
    ///
    /// The stacked value is floored at zero but deliberately not re-clamped
    /// against the stat cap: buffs may push an effective stat past it.
    fn recalculate(&mut self, stat: CombatStat) {
        let base = self.base.get(stat);
        let stacked = StatModifier::stack(
            base,
            self.modifiers.iter().copied().filter(|m| m.stat == stat),
        );
        self.effective.set(stat, stacked.max(0.0));
    }
}

/// Convenience constructor for modifiers built from skill data.
impl StatPool {
    pub fn apply_timed_modifier(
        &mut self,
        stat: CombatStat,
        value: f32,
        kind: ModifierKind,
        duration_turns: u32,
    ) -> bool {
        self.apply_modifier(StatModifier::new(stat, value, kind, duration_turns))
    }
}
