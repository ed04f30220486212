//! Deterministic turn-based combat rules shared across clients.
//!
//! `combat-core` defines the canonical combat model (stat pools, modifiers,
//! damage resolution, targeting, turn scheduling) and exposes pure APIs that
//! can be reused by both the runtime and offline balance tools. All state
//! mutation flows through [`orchestrator::CombatOrchestrator`], and
//! supporting crates depend on the types re-exported here.
pub mod catalog;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod event;
pub mod orchestrator;
pub mod scheduler;
pub mod state;
pub mod stats;
pub mod targeting;

pub use catalog::{
    AbilityCategory, AbilityOracle, AttackKind, ModifierSpec, SkillBook, SkillDefinition, SkillId,
    TargetMode, TargetType,
};
pub use config::CombatConfig;
pub use env::{BalanceTables, CombatEnv, PcgRng, RngOracle, compute_seed};
pub use error::{ActionError, SetupError, TurnError};
pub use event::{CombatEvent, EventQueue, SkipReason};
pub use orchestrator::{CombatOrchestrator, EncounterResult, EncounterSetup, StagedCast};
pub use scheduler::{CombatOutcome, RoundFlags, TurnScheduler};
pub use state::{CombatState, Combatant, CombatantSpec, EntityId, Side};
pub use stats::{CombatStat, ModifierKind, StatBlock, StatModifier, StatPool, StatPoolSpec};
pub use targeting::{ResolvedTargets, SelectionIntent, TargetSelector, TargetingState};
