//! Error types for encounter setup and action resolution.
//!
//! Nothing in this crate is fatal: action errors reject the intent and leave
//! state untouched so the caller can re-prompt, and turn errors degrade to a
//! skipped step so the encounter can always terminate.

use crate::catalog::SkillId;
use crate::state::EntityId;

/// Rejected player intents. No state is mutated and the turn does not
/// advance; the caller is expected to re-prompt.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("it is not the player's turn")]
    NotPlayersTurn,

    #[error("the encounter has already ended")]
    CombatOver,

    #[error("a staged action is still resolving; input is ignored until it lands")]
    CastInProgress,

    #[error("no target selection is in progress")]
    NotSelecting,

    #[error("no target is locked")]
    NoTargetLocked,

    #[error("{0} is not a valid target for this action")]
    InvalidTarget(EntityId),

    #[error("no valid targets are available")]
    NoValidTargets,

    #[error("insufficient technique points: have {available}, need {required}")]
    InsufficientTechniquePoints { available: f32, required: f32 },

    #[error("{0} is not in the encounter catalog or not known by the caster")]
    UnknownSkill(SkillId),

    #[error("no staged action is pending")]
    NothingStaged,
}

/// Turn scheduling failures. Recoverable by skipping the affected step.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("the encounter has already ended")]
    EncounterOver,

    #[error("a staged action is still resolving")]
    ActionPending,

    #[error("combatant {0} is missing from the encounter state")]
    MissingActor(EntityId),

    #[error("expected an enemy turn but {0} is acting")]
    NotAnEnemyTurn(EntityId),
}

/// Encounter construction failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("an encounter needs at least one enemy")]
    NoEnemies,

    #[error("too many combatants: {count} exceeds the limit of {max}")]
    TooManyCombatants { count: usize, max: usize },
}
