//! Presentation events.
//!
//! The core never calls into UI code. Every externally visible change is
//! recorded as a [`CombatEvent`] in the orchestrator's queue; the runtime
//! drains the queue after each call and rebroadcasts on its event bus.
//! Fire-and-forget: the core neither waits for nor hears back from
//! subscribers.

use crate::catalog::{AttackKind, SkillId};
use crate::scheduler::CombatOutcome;
use crate::state::EntityId;
use crate::stats::{CombatStat, ModifierKind};

/// Why a scheduled turn was skipped instead of resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    /// The combatant died earlier in the round.
    Defeated,
    /// The combatant could not be found in the encounter state.
    Missing,
}

/// One externally visible change in the encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    RoundStarted {
        round: u32,
    },
    /// Emitted whenever the upcoming turn order is (re)computed.
    TurnOrderChanged {
        order: Vec<EntityId>,
    },
    TurnStarted {
        entity: EntityId,
    },
    TurnSkipped {
        entity: EntityId,
        reason: SkipReason,
    },
    /// Target lock moved during selection. `current: None` means selection
    /// ended and any feedback should be cleared.
    TargetChanged {
        previous: Option<EntityId>,
        current: Option<EntityId>,
    },
    SkillCast {
        caster: EntityId,
        skill: SkillId,
    },
    DamageDealt {
        attacker: EntityId,
        target: EntityId,
        amount: f32,
        kind: AttackKind,
    },
    Healed {
        source: EntityId,
        target: EntityId,
        amount: f32,
    },
    HealthChanged {
        entity: EntityId,
        current: f32,
        maximum: f32,
    },
    TechniquePointsChanged {
        entity: EntityId,
        current: f32,
        maximum: f32,
    },
    StatChanged {
        entity: EntityId,
        stat: CombatStat,
        value: f32,
    },
    ModifierApplied {
        entity: EntityId,
        stat: CombatStat,
        value: f32,
        kind: ModifierKind,
        duration_turns: u32,
    },
    ModifierExpired {
        entity: EntityId,
        stat: CombatStat,
    },
    DefendRaised {
        entity: EntityId,
    },
    FleeAttempted {
        entity: EntityId,
    },
    EnemyDefeated {
        entity: EntityId,
    },
    /// Warning-level: an action resolved to nothing (unhandled ability
    /// category, overflowing modifier ledger, ...). The turn is still spent.
    ActionIgnored {
        entity: EntityId,
        reason: String,
    },
    CombatEnded {
        outcome: CombatOutcome,
    },
}

/// FIFO queue of pending presentation events.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<CombatEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
