/// Combat configuration constants and tunable pacing parameters.
///
/// Numeric balance values (defense weight, damage floor, clamp ceilings) live
/// in [`crate::env::BalanceTables`]; this struct carries the engine-level
/// knobs that shape an encounter's flow rather than its arithmetic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Cosmetic delay between confirming a default attack and its impact.
    pub attack_delay_secs: f32,

    /// Cosmetic delay before an enemy's attack lands on its turn.
    pub enemy_attack_delay_secs: f32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of combatants in one encounter (player + enemies).
    pub const MAX_COMBATANTS: usize = 9;
    /// Maximum number of stat modifiers active on a single combatant.
    pub const MAX_ACTIVE_MODIFIERS: usize = 16;
    /// Maximum number of skills a combatant can know.
    pub const MAX_KNOWN_SKILLS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTACK_DELAY_SECS: f32 = 1.0;
    pub const DEFAULT_ENEMY_ATTACK_DELAY_SECS: f32 = 1.2;

    pub fn new() -> Self {
        Self {
            attack_delay_secs: Self::DEFAULT_ATTACK_DELAY_SECS,
            enemy_attack_delay_secs: Self::DEFAULT_ENEMY_ATTACK_DELAY_SECS,
        }
    }

    /// Zero-delay configuration, useful for headless simulation and tests.
    pub fn instant() -> Self {
        Self {
            attack_delay_secs: 0.0,
            enemy_attack_delay_secs: 0.0,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
