//! Shared session-facing types.

use combat_core::{CombatOutcome, CombatState, EntityId, Side, SkillId};
use serde::{Deserialize, Serialize};

/// One player action fed into the session.
///
/// Mirrors the combat menu: attack and skills run through the targeting
/// flow (`HoverTarget`/`ConfirmTarget`), defend and flee resolve at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIntent {
    Attack,
    CastSkill(SkillId),
    HoverTarget(EntityId),
    ConfirmTarget,
    Defend,
    Flee,
}

/// HUD-facing vitals for one combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantVitals {
    pub id: EntityId,
    pub name: String,
    pub side: Side,
    pub health: f32,
    pub max_health: f32,
    pub technique_points: f32,
    pub max_technique_points: f32,
}

/// Point-in-time view of the session for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub round: u32,
    pub current_actor: Option<EntityId>,
    pub is_player_turn: bool,
    pub outcome: Option<CombatOutcome>,
    pub combatants: Vec<CombatantVitals>,
}

impl SessionSnapshot {
    pub(crate) fn capture(
        round: u32,
        current_actor: Option<EntityId>,
        outcome: Option<CombatOutcome>,
        state: &CombatState,
    ) -> Self {
        Self {
            round,
            current_actor,
            is_player_turn: current_actor.is_some_and(EntityId::is_player),
            outcome,
            combatants: state
                .iter()
                .map(|combatant| CombatantVitals {
                    id: combatant.id,
                    name: combatant.name.clone(),
                    side: combatant.side,
                    health: combatant.stats.health(),
                    max_health: combatant.stats.max_health(),
                    technique_points: combatant.stats.technique_points(),
                    max_technique_points: combatant.stats.max_technique_points(),
                })
                .collect(),
        }
    }

    pub fn vitals(&self, id: EntityId) -> Option<&CombatantVitals> {
        self.combatants.iter().find(|vitals| vitals.id == id)
    }
}
