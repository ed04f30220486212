//! Encounter state: the live combatants and their lookup surface.

mod combatant;

pub use combatant::{Combatant, CombatantSpec, EntityId, Side};

use crate::config::CombatConfig;
use crate::env::BalanceTables;
use crate::error::SetupError;

/// All combatants of one encounter.
///
/// Owned exclusively by the orchestrator; ordering and turn bookkeeping live
/// in the scheduler, which holds entity ids, never references into this
/// collection.
#[derive(Clone, Debug)]
pub struct CombatState {
    combatants: Vec<Combatant>,
}

impl CombatState {
    /// Build the roster from specs: the player first (always present), then
    /// enemies with sequentially assigned ids.
    pub fn new(
        player: CombatantSpec,
        enemies: Vec<CombatantSpec>,
        tables: &BalanceTables,
    ) -> Result<Self, SetupError> {
        let total = 1 + enemies.len();
        if total > CombatConfig::MAX_COMBATANTS {
            return Err(SetupError::TooManyCombatants {
                count: total,
                max: CombatConfig::MAX_COMBATANTS,
            });
        }
        if enemies.is_empty() {
            return Err(SetupError::NoEnemies);
        }

        let mut combatants = Vec::with_capacity(total);
        combatants.push(Combatant::new(EntityId::PLAYER, Side::Player, player, tables));
        for (index, spec) in enemies.into_iter().enumerate() {
            combatants.push(Combatant::new(
                EntityId(index as u32 + 1),
                Side::Enemy,
                spec,
                tables,
            ));
        }

        Ok(Self { combatants })
    }

    pub fn combatant(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn player(&self) -> Option<&Combatant> {
        self.combatant(EntityId::PLAYER)
    }

    pub fn player_mut(&mut self) -> Option<&mut Combatant> {
        self.combatant_mut(EntityId::PLAYER)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.iter_mut()
    }

    /// Ids of all living combatants, player first, in spawn order.
    pub fn living(&self) -> Vec<EntityId> {
        self.combatants
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| c.id)
            .collect()
    }

    /// Ids of living combatants on one side, in spawn order.
    pub fn living_on_side(&self, side: Side) -> Vec<EntityId> {
        self.combatants
            .iter()
            .filter(|c| c.side == side && c.is_alive())
            .map(|c| c.id)
            .collect()
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.combatant(id).is_some_and(Combatant::is_alive)
    }

    /// Remove defeated enemies from the encounter. The player is never
    /// removed; defeat is an outcome, not a despawn. Returns the removed ids
    /// so callers can surface destruction to the presentation layer.
    pub fn remove_dead_enemies(&mut self) -> Vec<EntityId> {
        let dead: Vec<EntityId> = self
            .combatants
            .iter()
            .filter(|c| c.side == Side::Enemy && !c.is_alive())
            .map(|c| c.id)
            .collect();
        self.combatants
            .retain(|c| c.side == Side::Player || c.is_alive());
        dead
    }
}
