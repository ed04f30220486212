//! Encounter orchestration: the action entry points external callers drive.
//!
//! The orchestrator wires the scheduler, the target selector and the damage
//! model together. Player input and enemy AI both funnel through it, one
//! intent at a time; every call either rejects cleanly with an
//! [`ActionError`] or mutates state and queues presentation events.
//!
//! Confirmed attacks and skills are *staged*, not applied: the caller
//! receives a [`StagedCast`] with the cosmetic delay, runs its timer, and
//! then calls [`CombatOrchestrator::resolve_staged`]. While a staged action
//! is outstanding every new intent is rejected, which is what makes the
//! delay window idempotent.

use crate::catalog::{AbilityCategory, AttackKind, SkillId};
use crate::combat::{attack_damage, heal_amount, skill_damage};
use crate::config::CombatConfig;
use crate::env::{BalanceTables, CombatEnv, compute_seed};
use crate::error::{ActionError, SetupError, TurnError};
use crate::event::{CombatEvent, EventQueue};
use crate::scheduler::{CombatOutcome, RoundFlags, TurnScheduler};
use crate::state::{CombatState, CombatantSpec, EntityId};
use crate::targeting::{SelectionIntent, TargetSelector, TargetingState};

// ============================================================================
// Setup and result types
// ============================================================================

/// Everything needed to open an encounter.
///
/// The enemy roster is an explicit constructor parameter — how many enemies
/// the overworld wants is decided by the caller, never read from ambient
/// state.
#[derive(Clone, Debug)]
pub struct EncounterSetup {
    /// Identifier of the non-combat context to return to on exit.
    pub return_destination: String,
    pub player: CombatantSpec,
    pub enemies: Vec<CombatantSpec>,
    /// Seed for deterministic random target sampling.
    pub seed: u64,
}

/// Terminal summary surfaced exactly once per encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterResult {
    pub outcome: CombatOutcome,
    pub return_destination: String,
}

/// A confirmed action waiting out its cosmetic delay.
///
/// Carries no gameplay state beyond "input is blocked until this elapses".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StagedCast {
    pub delay_secs: f32,
}

#[derive(Clone, Debug)]
enum StagedKind {
    PlayerAttack { target: EntityId },
    PlayerSkill { skill: SkillId, targets: Vec<EntityId> },
    EnemyAttack { attacker: EntityId },
}

#[derive(Clone, Debug)]
struct StagedAction {
    kind: StagedKind,
    delay_secs: f32,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Top-level coordinator for one encounter.
pub struct CombatOrchestrator {
    state: CombatState,
    scheduler: TurnScheduler,
    selector: TargetSelector,
    staged: Option<StagedAction>,
    events: EventQueue,
    config: CombatConfig,
    seed: u64,
    return_destination: String,
    flags: RoundFlags,
    outcome: Option<CombatOutcome>,
}

impl CombatOrchestrator {
    pub fn new(
        setup: EncounterSetup,
        config: CombatConfig,
        tables: &BalanceTables,
    ) -> Result<Self, SetupError> {
        let state = CombatState::new(setup.player, setup.enemies, tables)?;
        Ok(Self {
            state,
            scheduler: TurnScheduler::new(),
            selector: TargetSelector::new(),
            staged: None,
            events: EventQueue::new(),
            config,
            seed: setup.seed,
            return_destination: setup.return_destination,
            flags: RoundFlags::default(),
            outcome: None,
        })
    }

    /// Open the first round. Call once before feeding intents.
    pub fn begin(&mut self) {
        self.scheduler.start_round(&self.state, false, &mut self.events);
        self.open_turn();
    }

    // ===== introspection =====

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn round(&self) -> u32 {
        self.scheduler.round()
    }

    pub fn current_actor(&self) -> Option<EntityId> {
        self.scheduler.current()
    }

    pub fn is_player_turn(&self) -> bool {
        self.current_actor().is_some_and(EntityId::is_player)
    }

    pub fn targeting_state(&self) -> TargetingState {
        self.selector.state()
    }

    pub fn has_staged_action(&self) -> bool {
        self.staged.is_some()
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    pub fn return_destination(&self) -> &str {
        &self.return_destination
    }

    /// The encounter result, once an outcome exists.
    pub fn result(&self) -> Option<EncounterResult> {
        self.outcome.map(|outcome| EncounterResult {
            outcome,
            return_destination: self.return_destination.clone(),
        })
    }

    /// Take all queued presentation events, oldest first.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.events.drain()
    }

    // ===== player intents =====

    /// Start default-attack target selection.
    pub fn attack(&mut self) -> Result<(), ActionError> {
        self.ensure_player_input_allowed()?;
        self.selector
            .begin_attack(EntityId::PLAYER, &self.state, &mut self.events)
    }

    /// Start skill target selection.
    ///
    /// Affordability is pre-checked here so the menu can reject early; the
    /// authoritative check and the cost deduction happen at execution.
    pub fn cast_skill(&mut self, env: &CombatEnv<'_>, skill: SkillId) -> Result<(), ActionError> {
        self.ensure_player_input_allowed()?;

        let definition = env
            .catalog()
            .skill(skill)
            .ok_or(ActionError::UnknownSkill(skill))?;
        let player = self
            .state
            .player()
            .ok_or(ActionError::UnknownSkill(skill))?;
        if !player.knows_skill(skill) {
            return Err(ActionError::UnknownSkill(skill));
        }
        if !player.stats.can_afford(definition.technique_cost) {
            return Err(ActionError::InsufficientTechniquePoints {
                available: player.stats.technique_points(),
                required: definition.technique_cost,
            });
        }

        self.selector.begin_skill(
            skill,
            definition.target_type,
            definition.target_mode,
            EntityId::PLAYER,
            &self.state,
            &mut self.events,
        )
    }

    /// Hover-select a different candidate during selection.
    pub fn hover_target(&mut self, candidate: EntityId) -> Result<(), ActionError> {
        self.ensure_player_input_allowed()?;
        self.selector.hover(candidate, &self.state, &mut self.events)
    }

    /// Confirm the locked target set and stage the action behind its
    /// cosmetic delay.
    pub fn confirm_target(&mut self, env: &CombatEnv<'_>) -> Result<StagedCast, ActionError> {
        self.ensure_player_input_allowed()?;

        let seed = compute_seed(
            self.seed,
            self.scheduler.round(),
            self.scheduler.turn_index(),
            EntityId::PLAYER.0,
        );
        let resolved = self.selector.confirm(seed, env.rng())?;

        let staged = match resolved.intent {
            SelectionIntent::DefaultAttack => StagedAction {
                kind: StagedKind::PlayerAttack {
                    target: resolved.targets[0],
                },
                delay_secs: self.config.attack_delay_secs,
            },
            SelectionIntent::Skill(skill) => {
                let definition = env
                    .catalog()
                    .skill(skill)
                    .ok_or(ActionError::UnknownSkill(skill))?;
                let player = self.state.player().ok_or(ActionError::UnknownSkill(skill))?;
                if !player.stats.can_afford(definition.technique_cost) {
                    return Err(ActionError::InsufficientTechniquePoints {
                        available: player.stats.technique_points(),
                        required: definition.technique_cost,
                    });
                }
                StagedAction {
                    kind: StagedKind::PlayerSkill {
                        skill,
                        targets: resolved.targets,
                    },
                    delay_secs: definition.cast_duration.max(0.0),
                }
            }
        };

        let cast = StagedCast {
            delay_secs: staged.delay_secs,
        };
        self.staged = Some(staged);
        self.selector.reset(&mut self.events);
        Ok(cast)
    }

    /// Raise the defend stance and end the turn immediately.
    pub fn defend(&mut self) -> Result<(), ActionError> {
        self.ensure_player_input_allowed()?;
        self.selector.reset(&mut self.events);

        if let Some(player) = self.state.player_mut() {
            player.stats.set_defending(true);
        }
        self.flags.player_defended = true;
        self.events.push(CombatEvent::DefendRaised {
            entity: EntityId::PLAYER,
        });

        self.finish_turn();
        Ok(())
    }

    /// Mark the flee flag and end the turn; the encounter exits at the next
    /// round boundary (a dead player still loses first).
    pub fn flee(&mut self) -> Result<(), ActionError> {
        self.ensure_player_input_allowed()?;
        self.selector.reset(&mut self.events);

        self.flags.player_fled = true;
        self.events.push(CombatEvent::FleeAttempted {
            entity: EntityId::PLAYER,
        });

        self.finish_turn();
        Ok(())
    }

    // ===== enemy AI =====

    /// Stage the acting enemy's default attack against the player.
    pub fn enemy_take_turn(&mut self) -> Result<StagedCast, TurnError> {
        if self.outcome.is_some() {
            return Err(TurnError::EncounterOver);
        }
        if self.staged.is_some() {
            return Err(TurnError::ActionPending);
        }
        let actor = self
            .scheduler
            .current()
            .ok_or(TurnError::MissingActor(EntityId::PLAYER))?;
        if actor.is_player() {
            return Err(TurnError::NotAnEnemyTurn(actor));
        }

        let staged = StagedAction {
            kind: StagedKind::EnemyAttack { attacker: actor },
            delay_secs: self.config.enemy_attack_delay_secs,
        };
        let cast = StagedCast {
            delay_secs: staged.delay_secs,
        };
        self.staged = Some(staged);
        Ok(cast)
    }

    // ===== staged resolution =====

    /// Apply the staged action's effect and hand the turn off.
    ///
    /// Called by the session once the cosmetic delay has elapsed (or
    /// immediately when pacing is disabled).
    pub fn resolve_staged(&mut self, env: &CombatEnv<'_>) -> Result<(), ActionError> {
        if self.outcome.is_some() {
            return Err(ActionError::CombatOver);
        }
        let staged = self.staged.take().ok_or(ActionError::NothingStaged)?;

        match staged.kind {
            StagedKind::PlayerAttack { target } => {
                self.execute_attack(EntityId::PLAYER, target, env);
            }
            StagedKind::PlayerSkill { skill, targets } => {
                self.execute_skill(EntityId::PLAYER, skill, &targets, env)?;
            }
            StagedKind::EnemyAttack { attacker } => {
                self.execute_attack(attacker, EntityId::PLAYER, env);
            }
        }

        self.finish_turn();
        Ok(())
    }

    fn execute_attack(&mut self, attacker: EntityId, target: EntityId, env: &CombatEnv<'_>) {
        let tables = env.tables();

        let Some(attacker_ref) = self.state.combatant(attacker) else {
            self.events.push(CombatEvent::ActionIgnored {
                entity: attacker,
                reason: "attacker is missing from the encounter".into(),
            });
            return;
        };
        let Some(target_ref) = self.state.combatant(target) else {
            self.events.push(CombatEvent::ActionIgnored {
                entity: attacker,
                reason: "target is missing from the encounter".into(),
            });
            return;
        };
        if !attacker_ref.is_alive() || !target_ref.is_alive() {
            self.events.push(CombatEvent::ActionIgnored {
                entity: attacker,
                reason: "attack resolved after a combatant was defeated".into(),
            });
            return;
        }

        let damage = attack_damage(&attacker_ref.stats, &target_ref.stats, tables);
        self.apply_damage_to(attacker, target, damage, AttackKind::Physical, tables);
    }

    fn execute_skill(
        &mut self,
        caster: EntityId,
        skill: SkillId,
        targets: &[EntityId],
        env: &CombatEnv<'_>,
    ) -> Result<(), ActionError> {
        let tables = env.tables();

        let Some(definition) = env.catalog().skill(skill) else {
            // Catalog data vanished between confirm and resolution; treat as
            // unrecognized data, spend the turn.
            self.events.push(CombatEvent::ActionIgnored {
                entity: caster,
                reason: format!("{skill} is no longer in the catalog"),
            });
            return Ok(());
        };
        let definition = definition.clone();

        // Affordability is authoritative here: deduct first, then branch.
        {
            let Some(combatant) = self.state.combatant_mut(caster) else {
                self.events.push(CombatEvent::ActionIgnored {
                    entity: caster,
                    reason: "caster is missing from the encounter".into(),
                });
                return Ok(());
            };
            if !combatant.stats.can_afford(definition.technique_cost) {
                return Err(ActionError::InsufficientTechniquePoints {
                    available: combatant.stats.technique_points(),
                    required: definition.technique_cost,
                });
            }
            combatant.stats.use_technique_points(definition.technique_cost);
            let (current, maximum) = (
                combatant.stats.technique_points(),
                combatant.stats.max_technique_points(),
            );
            self.events.push(CombatEvent::TechniquePointsChanged {
                entity: caster,
                current,
                maximum,
            });
        }
        self.events.push(CombatEvent::SkillCast { caster, skill });

        match definition.category {
            AbilityCategory::Offensive => {
                for &target in targets {
                    let Some((caster_ref, target_ref)) =
                        self.state.combatant(caster).zip(self.state.combatant(target))
                    else {
                        continue;
                    };
                    if !target_ref.is_alive() || !caster_ref.is_alive() {
                        continue;
                    }
                    let damage = skill_damage(
                        &caster_ref.stats,
                        &target_ref.stats,
                        definition.base_magnitude,
                        definition.attack_kind,
                        tables,
                    );
                    self.apply_damage_to(caster, target, damage, definition.attack_kind, tables);
                }
            }
            AbilityCategory::Heal => {
                let amount = heal_amount(&definition);
                for &target in targets {
                    let Some(target_ref) = self.state.combatant_mut(target) else {
                        continue;
                    };
                    if !target_ref.is_alive() {
                        continue;
                    }
                    let restored = target_ref.stats.heal(amount, tables);
                    let (current, maximum) =
                        (target_ref.stats.health(), target_ref.stats.max_health());
                    self.events.push(CombatEvent::Healed {
                        source: caster,
                        target,
                        amount: restored,
                    });
                    self.events.push(CombatEvent::HealthChanged {
                        entity: target,
                        current,
                        maximum,
                    });
                }
            }
            AbilityCategory::Buff | AbilityCategory::Debuff => match definition.modifier {
                Some(spec) => {
                    for &target in targets {
                        let Some(target_ref) = self.state.combatant_mut(target) else {
                            continue;
                        };
                        if !target_ref.is_alive() {
                            continue;
                        }
                        if target_ref.stats.apply_timed_modifier(
                            spec.stat,
                            spec.value,
                            spec.kind,
                            spec.duration_turns,
                        ) {
                            let value = target_ref.stats.stat(spec.stat);
                            self.events.push(CombatEvent::ModifierApplied {
                                entity: target,
                                stat: spec.stat,
                                value: spec.value,
                                kind: spec.kind,
                                duration_turns: spec.duration_turns,
                            });
                            self.events.push(CombatEvent::StatChanged {
                                entity: target,
                                stat: spec.stat,
                                value,
                            });
                        } else {
                            self.events.push(CombatEvent::ActionIgnored {
                                entity: target,
                                reason: "modifier ledger is full".into(),
                            });
                        }
                    }
                }
                None => {
                    self.events.push(CombatEvent::ActionIgnored {
                        entity: caster,
                        reason: format!("{} skill carries no modifier payload", definition.category),
                    });
                }
            },
            AbilityCategory::Defensive | AbilityCategory::Utility => {
                self.events.push(CombatEvent::ActionIgnored {
                    entity: caster,
                    reason: format!("unhandled ability category {}", definition.category),
                });
            }
        }

        Ok(())
    }

    fn apply_damage_to(
        &mut self,
        attacker: EntityId,
        target: EntityId,
        damage: f32,
        kind: AttackKind,
        tables: &BalanceTables,
    ) {
        let Some(target_ref) = self.state.combatant_mut(target) else {
            return;
        };
        let applied = target_ref.stats.apply_damage(damage, tables);
        let (current, maximum) = (target_ref.stats.health(), target_ref.stats.max_health());

        self.events.push(CombatEvent::DamageDealt {
            attacker,
            target,
            amount: applied,
            kind,
        });
        self.events.push(CombatEvent::HealthChanged {
            entity: target,
            current,
            maximum,
        });
    }

    // ===== turn flow =====

    fn ensure_player_input_allowed(&self) -> Result<(), ActionError> {
        if self.outcome.is_some() {
            return Err(ActionError::CombatOver);
        }
        if self.staged.is_some() {
            return Err(ActionError::CastInProgress);
        }
        if !self.is_player_turn() {
            return Err(ActionError::NotPlayersTurn);
        }
        Ok(())
    }

    /// Hand the turn to the next combatant, closing the round (and possibly
    /// the encounter) when it is exhausted.
    fn finish_turn(&mut self) {
        self.staged = None;
        self.selector.reset(&mut self.events);
        self.scheduler.advance(&self.state, &mut self.events);
        self.open_turn();
    }

    /// Settle who acts next; rounds roll over until an actor is found or an
    /// outcome ends the encounter.
    fn open_turn(&mut self) {
        loop {
            if self.outcome.is_some() {
                return;
            }
            match self.scheduler.settle_current(&self.state, &mut self.events) {
                Some(actor) => {
                    self.events.push(CombatEvent::TurnStarted { entity: actor });
                    return;
                }
                None => self.close_round(),
            }
        }
    }

    fn close_round(&mut self) {
        let flags = core::mem::take(&mut self.flags);
        if let Some(outcome) = self
            .scheduler
            .end_round(&mut self.state, flags, &mut self.events)
        {
            self.outcome = Some(outcome);
            self.events.push(CombatEvent::CombatEnded { outcome });
        }
    }
}

#[cfg(test)]
mod tests;
