//! Balance tables: the numeric constants of the damage and clamping model.
//!
//! Everything here is data-driven; the content crate deserializes a
//! `tables.toml` into this struct and unspecified keys fall back to the
//! defaults below.

/// Tunable balance parameters shared by damage resolution and stat pools.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceTables {
    /// Fraction of the defender's matching defense subtracted from raw
    /// damage. The canonical mitigation point: defense is applied here and
    /// nowhere else.
    pub defense_weight: f32,

    /// Lower bound on any resolved damage value. Keeping this at 1 or above
    /// guarantees every encounter terminates.
    pub damage_floor: f32,

    /// Health ceiling for non-boss combatants. Bosses clamp to their own
    /// `max_health` instead.
    pub health_cap: f32,

    /// Upper clamp for base attack/defense/speed stats.
    pub stat_cap: f32,

    /// Incoming-damage multiplier complement while defending:
    /// effective damage is `amount * (1 - defend_reduction_factor)`.
    pub defend_reduction_factor: f32,
}

impl BalanceTables {
    pub const DEFAULT_DEFENSE_WEIGHT: f32 = 0.5;
    pub const DEFAULT_DAMAGE_FLOOR: f32 = 1.0;
    pub const DEFAULT_HEALTH_CAP: f32 = 10_000.0;
    pub const DEFAULT_STAT_CAP: f32 = 1_000.0;
    pub const DEFAULT_DEFEND_REDUCTION_FACTOR: f32 = 0.3;

    pub fn new() -> Self {
        Self {
            defense_weight: Self::DEFAULT_DEFENSE_WEIGHT,
            damage_floor: Self::DEFAULT_DAMAGE_FLOOR,
            health_cap: Self::DEFAULT_HEALTH_CAP,
            stat_cap: Self::DEFAULT_STAT_CAP,
            defend_reduction_factor: Self::DEFAULT_DEFEND_REDUCTION_FACTOR,
        }
    }
}

impl Default for BalanceTables {
    fn default() -> Self {
        Self::new()
    }
}
