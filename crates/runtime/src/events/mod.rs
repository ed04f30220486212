//! Topic-based rebroadcast of combat events.
//!
//! The core queues [`CombatEvent`]s; the session drains them after every call
//! and publishes each on the bus under a coarse topic so presentation
//! consumers (HUD, combat log, overworld transition) only receive what they
//! care about.

mod bus;

pub use bus::EventBus;

use combat_core::CombatEvent;
use serde::{Deserialize, Serialize};

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Health, technique points, modifiers, damage and healing.
    Stats,
    /// Round/turn progression, targeting feedback and action warnings.
    Turn,
    /// Encounter termination.
    Outcome,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Stats, Topic::Turn, Topic::Outcome];

    /// Which topic an event is published under.
    pub fn of(event: &CombatEvent) -> Topic {
        match event {
            CombatEvent::DamageDealt { .. }
            | CombatEvent::Healed { .. }
            | CombatEvent::HealthChanged { .. }
            | CombatEvent::TechniquePointsChanged { .. }
            | CombatEvent::StatChanged { .. }
            | CombatEvent::ModifierApplied { .. }
            | CombatEvent::ModifierExpired { .. } => Topic::Stats,

            CombatEvent::RoundStarted { .. }
            | CombatEvent::TurnOrderChanged { .. }
            | CombatEvent::TurnStarted { .. }
            | CombatEvent::TurnSkipped { .. }
            | CombatEvent::TargetChanged { .. }
            | CombatEvent::SkillCast { .. }
            | CombatEvent::DefendRaised { .. }
            | CombatEvent::FleeAttempted { .. }
            | CombatEvent::EnemyDefeated { .. }
            | CombatEvent::ActionIgnored { .. } => Topic::Turn,

            CombatEvent::CombatEnded { .. } => Topic::Outcome,
        }
    }
}
