//! Target acquisition for player-initiated actions.
//!
//! A small state machine — `Idle → Selecting → Locked → (confirm) → Idle` —
//! that turns an attack or skill intent plus the live roster into the
//! concrete set of entities the action will affect. Enemy AI never goes
//! through here; its target is fixed (the player).
//!
//! Visual feedback (indicator widgets, highlight materials) belongs to the
//! presentation layer; this module only reports lock movement through
//! [`CombatEvent::TargetChanged`].

use crate::catalog::{SkillId, TargetMode, TargetType};
use crate::env::RngOracle;
use crate::error::ActionError;
use crate::event::{CombatEvent, EventQueue};
use crate::state::{CombatState, EntityId, Side};

/// Public phase of the selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetingState {
    /// No selection in progress.
    Idle,
    /// An intent is active but nothing confirmable is locked yet.
    Selecting,
    /// A target (or target set) is locked and can be confirmed.
    Locked,
}

/// What the player is aiming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionIntent {
    /// The default physical attack: single enemy target.
    DefaultAttack,
    /// A catalog skill with its own target rules.
    Skill(SkillId),
}

/// Everything confirm produces: the originating intent and the resolved
/// actor set, in roster spawn order (Random mode yields exactly one).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTargets {
    pub intent: SelectionIntent,
    pub targets: Vec<EntityId>,
}

/// Target acquisition state machine.
#[derive(Clone, Debug, Default)]
pub struct TargetSelector {
    intent: Option<SelectionIntent>,
    mode: Option<TargetMode>,
    locked: Option<EntityId>,
    candidates: Vec<EntityId>,
}

impl TargetSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TargetingState {
        match (&self.intent, &self.locked, self.candidates.is_empty()) {
            (None, ..) => TargetingState::Idle,
            (Some(_), Some(_), _) => TargetingState::Locked,
            // All/Random lock their whole candidate set without a hover step.
            (Some(_), None, false) if self.locks_full_set() => TargetingState::Locked,
            (Some(_), None, _) => TargetingState::Selecting,
        }
    }

    pub fn intent(&self) -> Option<SelectionIntent> {
        self.intent
    }

    pub fn locked_target(&self) -> Option<EntityId> {
        self.locked
    }

    /// Enter selection for the default attack: one enemy target.
    pub fn begin_attack(
        &mut self,
        caster: EntityId,
        state: &CombatState,
        events: &mut EventQueue,
    ) -> Result<(), ActionError> {
        self.begin(
            SelectionIntent::DefaultAttack,
            TargetType::Enemy,
            TargetMode::Single,
            caster,
            state,
            events,
        )
    }

    /// Enter selection for a skill with the given target rules.
    pub fn begin_skill(
        &mut self,
        skill: SkillId,
        target_type: TargetType,
        target_mode: TargetMode,
        caster: EntityId,
        state: &CombatState,
        events: &mut EventQueue,
    ) -> Result<(), ActionError> {
        self.begin(
            SelectionIntent::Skill(skill),
            target_type,
            target_mode,
            caster,
            state,
            events,
        )
    }

    fn begin(
        &mut self,
        intent: SelectionIntent,
        target_type: TargetType,
        target_mode: TargetMode,
        caster: EntityId,
        state: &CombatState,
        events: &mut EventQueue,
    ) -> Result<(), ActionError> {
        let candidates = Self::candidates_for(target_type, caster, state);
        if candidates.is_empty() {
            return Err(ActionError::NoValidTargets);
        }

        self.intent = Some(intent);
        self.mode = Some(target_mode);
        self.candidates = candidates;
        self.locked = None;

        match target_mode {
            // Auto-select the first valid candidate; a pointing device can
            // re-lock through hover().
            TargetMode::Single | TargetMode::Multiple => {
                let first = self.candidates[0];
                self.locked = Some(first);
                events.push(CombatEvent::TargetChanged {
                    previous: None,
                    current: Some(first),
                });
            }
            // The full matching set is the lock; Random samples from it at
            // confirmation time.
            TargetMode::All | TargetMode::Random => {}
        }

        Ok(())
    }

    /// Hover-select a different candidate. Only meaningful for modes with a
    /// single visual anchor; re-locking the same target is a no-op.
    pub fn hover(
        &mut self,
        candidate: EntityId,
        state: &CombatState,
        events: &mut EventQueue,
    ) -> Result<(), ActionError> {
        let mode = self.mode.ok_or(ActionError::NotSelecting)?;
        if !matches!(mode, TargetMode::Single | TargetMode::Multiple) {
            // Set-locked modes have nothing to hover.
            return Ok(());
        }
        if !self.candidates.contains(&candidate) || !state.is_alive(candidate) {
            return Err(ActionError::InvalidTarget(candidate));
        }

        if self.locked != Some(candidate) {
            events.push(CombatEvent::TargetChanged {
                previous: self.locked,
                current: Some(candidate),
            });
            self.locked = Some(candidate);
        }

        Ok(())
    }

    /// Confirm the locked selection into a concrete target set.
    ///
    /// Not reachable without a lock. The selector stays armed until
    /// [`reset`](Self::reset); the orchestrator clears it when the action is
    /// staged.
    pub fn confirm(&mut self, seed: u64, rng: &dyn RngOracle) -> Result<ResolvedTargets, ActionError> {
        let intent = self.intent.ok_or(ActionError::NotSelecting)?;
        let mode = self.mode.ok_or(ActionError::NotSelecting)?;

        let targets = match mode {
            TargetMode::Single => {
                let target = self.locked.ok_or(ActionError::NoTargetLocked)?;
                vec![target]
            }
            // Multiple resolves to the whole matching side; the lock is only
            // the feedback anchor.
            TargetMode::Multiple | TargetMode::All => self.candidates.clone(),
            TargetMode::Random => {
                let index = rng.pick_index(seed, self.candidates.len());
                vec![self.candidates[index]]
            }
        };

        if targets.is_empty() {
            return Err(ActionError::NoValidTargets);
        }

        Ok(ResolvedTargets { intent, targets })
    }

    /// Abandon the current selection, clearing any lock feedback.
    pub fn reset(&mut self, events: &mut EventQueue) {
        if self.intent.is_some() && self.locked.is_some() {
            events.push(CombatEvent::TargetChanged {
                previous: self.locked,
                current: None,
            });
        }
        self.intent = None;
        self.mode = None;
        self.locked = None;
        self.candidates.clear();
    }

    fn locks_full_set(&self) -> bool {
        matches!(self.mode, Some(TargetMode::All | TargetMode::Random))
    }

    /// Valid candidates for a target type, in roster spawn order.
    fn candidates_for(
        target_type: TargetType,
        caster: EntityId,
        state: &CombatState,
    ) -> Vec<EntityId> {
        let caster_side = state
            .combatant(caster)
            .map(|c| c.side)
            .unwrap_or(Side::Player);

        match target_type {
            TargetType::Enemy => state.living_on_side(caster_side.opposite()),
            TargetType::Ally => state.living_on_side(caster_side),
            TargetType::Caster => {
                if state.is_alive(caster) {
                    vec![caster]
                } else {
                    Vec::new()
                }
            }
        }
    }
}
