//! Turn scheduling and the round state machine.
//!
//! The scheduler owns the per-round turn order (a list of entity ids) and
//! the cursor into it. It never touches stat pools except through the
//! round-end bookkeeping it is explicitly responsible for: modifier decay,
//! corpse removal and outcome evaluation.
//!
//! # Round lifecycle
//!
//! ```text
//! start_round ── settle/advance per turn ──▶ round exhausted
//!      ▲                                          │
//!      └── end_round: decay, cleanup, outcome? ───┘
//! ```

use crate::event::{CombatEvent, EventQueue, SkipReason};
use crate::state::{CombatState, EntityId, Side};

/// Terminal result of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
}

/// Round-scoped flags the orchestrator accumulates and hands to
/// [`TurnScheduler::end_round`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundFlags {
    /// The player chose to flee at some point this round.
    pub player_fled: bool,
    /// The player defended this round and therefore opens the next one,
    /// regardless of speed.
    pub player_defended: bool,
}

/// Owns the turn order, the cursor and round progression.
#[derive(Clone, Debug, Default)]
pub struct TurnScheduler {
    order: Vec<EntityId>,
    cursor: usize,
    round: u32,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed-round counter; the first round is 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Zero-based index of the current turn within the round.
    pub fn turn_index(&self) -> u32 {
        self.cursor as u32
    }

    /// Whose turn the cursor points at, if the round is not exhausted.
    pub fn current(&self) -> Option<EntityId> {
        self.order.get(self.cursor).copied()
    }

    /// The not-yet-acted tail of the round, current actor included.
    pub fn remaining(&self) -> &[EntityId] {
        &self.order[self.cursor.min(self.order.len())..]
    }

    pub fn round_exhausted(&self) -> bool {
        self.cursor >= self.order.len()
    }

    /// Gather the living roster and open a new round.
    ///
    /// Ordering is a stable descending sort on current speed, so equal-speed
    /// combatants keep their prior relative order. When `player_first` is
    /// set (the player defended last round), the player opens the round and
    /// everyone else follows in speed order.
    pub fn start_round(
        &mut self,
        state: &CombatState,
        player_first: bool,
        events: &mut EventQueue,
    ) {
        self.order = state.living();
        sort_by_speed(&mut self.order, state);

        if player_first {
            if let Some(position) = self.order.iter().position(|id| id.is_player()) {
                let player = self.order.remove(position);
                self.order.insert(0, player);
            }
        }

        self.cursor = 0;
        self.round += 1;

        events.push(CombatEvent::RoundStarted { round: self.round });
        events.push(CombatEvent::TurnOrderChanged {
            order: self.order.clone(),
        });
    }

    /// Resolve who acts now, skipping combatants that died earlier in the
    /// round or vanished from the state. Returns `None` once the round is
    /// exhausted.
    pub fn settle_current(
        &mut self,
        state: &CombatState,
        events: &mut EventQueue,
    ) -> Option<EntityId> {
        while let Some(id) = self.current() {
            match state.combatant(id) {
                Some(combatant) if combatant.is_alive() => return Some(id),
                Some(_) => {
                    events.push(CombatEvent::TurnSkipped {
                        entity: id,
                        reason: SkipReason::Defeated,
                    });
                    self.cursor += 1;
                }
                None => {
                    events.push(CombatEvent::TurnSkipped {
                        entity: id,
                        reason: SkipReason::Missing,
                    });
                    self.cursor += 1;
                }
            }
        }
        None
    }

    /// Move past the acting combatant and re-sort the not-yet-acted tail by
    /// current speed, so a mid-round speed change reorders upcoming turns
    /// but never the ones already taken.
    pub fn advance(&mut self, state: &CombatState, events: &mut EventQueue) {
        self.cursor += 1;

        if self.cursor < self.order.len() {
            let before = self.order[self.cursor..].to_vec();
            sort_by_speed(&mut self.order[self.cursor..], state);
            if self.order[self.cursor..] != before[..] {
                events.push(CombatEvent::TurnOrderChanged {
                    order: self.order[self.cursor..].to_vec(),
                });
            }
        }
    }

    /// Close the exhausted round: decay modifiers, clear corpses, evaluate
    /// the outcome, and either open the next round or return the terminal
    /// result.
    ///
    /// Evaluation order is fixed: player defeat, then flee, then victory,
    /// then continuation. Flee therefore never rescues a dead player, and a
    /// fleeing player forfeits a simultaneous victory.
    pub fn end_round(
        &mut self,
        state: &mut CombatState,
        flags: RoundFlags,
        events: &mut EventQueue,
    ) -> Option<CombatOutcome> {
        self.decay_modifiers(state, events);

        if !state.player().is_some_and(|p| p.is_alive()) {
            return Some(CombatOutcome::Defeat);
        }

        if flags.player_fled {
            return Some(CombatOutcome::Fled);
        }

        for id in state.remove_dead_enemies() {
            events.push(CombatEvent::EnemyDefeated { entity: id });
        }
        if state.living_on_side(Side::Enemy).is_empty() {
            return Some(CombatOutcome::Victory);
        }

        // Defend stance lasts exactly one round, for every combatant.
        for combatant in state.iter_mut() {
            combatant.stats.set_defending(false);
        }

        self.start_round(state, flags.player_defended, events);
        None
    }

    /// Tick every living combatant's modifier ledger down one round.
    fn decay_modifiers(&mut self, state: &mut CombatState, events: &mut EventQueue) {
        for combatant in state.iter_mut() {
            if !combatant.is_alive() {
                continue;
            }
            let id = combatant.id;
            for stat in combatant.stats.decrement_modifiers() {
                events.push(CombatEvent::ModifierExpired { entity: id, stat });
                events.push(CombatEvent::StatChanged {
                    entity: id,
                    stat,
                    value: combatant.stats.stat(stat),
                });
            }
        }
    }
}

/// Stable descending sort by current speed; ties keep their prior order.
fn sort_by_speed(order: &mut [EntityId], state: &CombatState) {
    order.sort_by(|a, b| {
        let speed_of = |id: &EntityId| {
            state
                .combatant(*id)
                .map(|c| c.stats.speed())
                .unwrap_or(0.0)
        };
        speed_of(b).total_cmp(&speed_of(a))
    });
}
