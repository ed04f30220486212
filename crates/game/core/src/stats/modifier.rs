//! Timed stat modifiers (buffs and debuffs).

/// The recalculated combat stats a modifier can touch.
///
/// Health and technique points are resource pools, not stats, and cannot be
/// modified through the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatStat {
    PhysicalAttack,
    MagicalAttack,
    PhysicalDefense,
    MagicalDefense,
    Speed,
}

impl CombatStat {
    /// All modifiable stats, in recalculation order.
    pub const ALL: [CombatStat; 5] = [
        CombatStat::PhysicalAttack,
        CombatStat::MagicalAttack,
        CombatStat::PhysicalDefense,
        CombatStat::MagicalDefense,
        CombatStat::Speed,
    ];
}

/// How a modifier's value combines with the base stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKind {
    /// Fraction of the base value: `0.2` is +20%, `-0.2` is -20%.
    /// All percentage modifiers on a stat are summed before multiplying.
    Percentage,
    /// Absolute addition applied after the percentage product.
    Flat,
}

/// One active buff or debuff on a single stat.
///
/// Lives in its owner's ledger; `remaining_turns` is decremented once per
/// completed round and the modifier is dropped when it reaches zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: CombatStat,
    pub value: f32,
    pub kind: ModifierKind,
    pub remaining_turns: u32,
}

impl StatModifier {
    pub fn new(stat: CombatStat, value: f32, kind: ModifierKind, duration_turns: u32) -> Self {
        Self {
            stat,
            value,
            kind,
            remaining_turns: duration_turns,
        }
    }

    /// Stacking contribution of one ledger over a base value:
    /// `base * (1 + Σ percentage) + Σ flat`.
    pub fn stack(base: f32, modifiers: impl Iterator<Item = Self>) -> f32 {
        let mut percentage_sum = 0.0f32;
        let mut flat_sum = 0.0f32;

        for modifier in modifiers {
            match modifier.kind {
                ModifierKind::Percentage => percentage_sum += modifier.value,
                ModifierKind::Flat => flat_sum += modifier.value,
            }
        }

        base * (1.0 + percentage_sum) + flat_sum
    }
}
