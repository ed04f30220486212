//! Combat session worker: the async loop that owns one encounter.
//!
//! The worker serializes all access to the orchestrator. Player commands
//! arrive on an mpsc channel; enemy turns and staged-action delays are
//! driven internally. While a staged action waits out its cosmetic delay,
//! incoming intents are answered with `CastInProgress` instead of being
//! queued, which makes the delay window idempotent.

use std::sync::Arc;
use std::time::Duration;

use combat_core::{
    ActionError, BalanceTables, CombatConfig, CombatEnv, CombatOrchestrator, CombatOutcome,
    EncounterResult, EncounterSetup, PcgRng, SetupError, SkillBook, StagedCast,
};
use combat_content::{ContentFactory, EncounterRequest};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::error::{Result, RuntimeError};
use crate::events::EventBus;
use crate::handle::SessionHandle;
use crate::types::{PlayerIntent, SessionSnapshot};

/// Commands the handle sends to the worker.
pub(crate) enum Command {
    Intent {
        intent: PlayerIntent,
        reply: oneshot::Sender<Result<()>>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Entry point for running encounters on the tokio runtime.
pub struct CombatSession;

impl CombatSession {
    /// Spawn a session worker for one encounter.
    ///
    /// Returns the handle for feeding intents plus the join handle that
    /// yields the [`EncounterResult`] when the encounter exits.
    pub fn spawn(
        setup: EncounterSetup,
        config: CombatConfig,
        skills: SkillBook,
        tables: BalanceTables,
    ) -> std::result::Result<(SessionHandle, JoinHandle<EncounterResult>), SetupError> {
        let destination = setup.return_destination.clone();
        let orchestrator = CombatOrchestrator::new(setup, config, &tables)?;

        let (command_tx, command_rx) = mpsc::channel(16);
        let bus = Arc::new(EventBus::new());

        let worker = SessionWorker {
            orchestrator,
            skills,
            tables,
            rng: PcgRng,
            bus: Arc::clone(&bus),
            command_rx,
        };

        let span = tracing::info_span!("combat_session", destination = %destination);
        let join = tokio::spawn(worker.run().instrument(span));

        Ok((SessionHandle::new(command_tx, bus), join))
    }

    /// Load everything an encounter needs from a data directory and spawn a
    /// session for the requested fight.
    pub fn spawn_from_content(
        factory: &ContentFactory,
        request: EncounterRequest,
    ) -> Result<(SessionHandle, JoinHandle<EncounterResult>)> {
        let config = factory.load_config()?;
        let tables = factory.load_tables()?;
        let skills = factory.load_skills()?;
        let actors = factory.load_actors()?;
        let setup = ContentFactory::build_encounter(&actors, request)?;

        Ok(Self::spawn(setup, config, skills, tables)?)
    }
}

struct SessionWorker {
    orchestrator: CombatOrchestrator,
    skills: SkillBook,
    tables: BalanceTables,
    rng: PcgRng,
    bus: Arc<EventBus>,
    command_rx: mpsc::Receiver<Command>,
}

impl SessionWorker {
    async fn run(mut self) -> EncounterResult {
        self.orchestrator.begin();
        self.publish_events();

        loop {
            if let Some(result) = self.orchestrator.result() {
                tracing::info!(outcome = %result.outcome, "encounter finished");
                return result;
            }

            if !self.orchestrator.is_player_turn() {
                if !self.run_enemy_turn().await {
                    break;
                }
                continue;
            }

            match self.command_rx.recv().await {
                Some(command) => self.handle_command(command).await,
                None => {
                    // Every handle is gone; withdraw so the encounter still
                    // reaches a clean outcome instead of parking forever.
                    tracing::info!("all session handles dropped, fleeing the encounter");
                    if self.orchestrator.flee().is_err() {
                        break;
                    }
                    self.publish_events();
                }
            }
        }

        // Unreachable in practice; a last-resort exit that honors the
        // "combat always returns control to the overworld" policy.
        self.orchestrator.result().unwrap_or_else(|| EncounterResult {
            outcome: CombatOutcome::Fled,
            return_destination: self.orchestrator.return_destination().to_string(),
        })
    }

    /// Stage and resolve the acting enemy's attack. Returns false when the
    /// turn could not be staged at all.
    async fn run_enemy_turn(&mut self) -> bool {
        match self.orchestrator.enemy_take_turn() {
            Ok(staged) => {
                self.publish_events();
                self.wait_out(staged).await;
                self.resolve_staged();
                true
            }
            Err(error) => {
                tracing::warn!(%error, "enemy turn could not be staged");
                false
            }
        }
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            Command::Intent { intent, reply } => match self.apply_intent(intent) {
                Ok(staged) => {
                    let _ = reply.send(Ok(()));
                    self.publish_events();
                    if let Some(staged) = staged {
                        self.wait_out(staged).await;
                        self.resolve_staged();
                    }
                }
                Err(error) => {
                    tracing::debug!(?intent, %error, "intent rejected");
                    let _ = reply.send(Err(error));
                    self.publish_events();
                }
            },
        }
    }

    /// Feed one intent to the orchestrator. `ConfirmTarget` is the only
    /// intent that stages a delayed action.
    fn apply_intent(&mut self, intent: PlayerIntent) -> Result<Option<StagedCast>> {
        let env = CombatEnv::new(&self.skills, &self.tables, &self.rng);
        let staged = match intent {
            PlayerIntent::Attack => {
                self.orchestrator.attack()?;
                None
            }
            PlayerIntent::CastSkill(skill) => {
                self.orchestrator.cast_skill(&env, skill)?;
                None
            }
            PlayerIntent::HoverTarget(target) => {
                self.orchestrator.hover_target(target)?;
                None
            }
            PlayerIntent::ConfirmTarget => Some(self.orchestrator.confirm_target(&env)?),
            PlayerIntent::Defend => {
                self.orchestrator.defend()?;
                None
            }
            PlayerIntent::Flee => {
                self.orchestrator.flee()?;
                None
            }
        };
        Ok(staged)
    }

    /// Sleep through a staged action's cosmetic delay, answering every
    /// intent that arrives in the window with `CastInProgress`.
    async fn wait_out(&mut self, staged: StagedCast) {
        if staged.delay_secs <= 0.0 {
            return;
        }

        let sleep = tokio::time::sleep(Duration::from_secs_f32(staged.delay_secs));
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                () = &mut sleep => return,
                command = self.command_rx.recv() => match command {
                    Some(Command::Intent { reply, .. }) => {
                        let _ = reply.send(Err(RuntimeError::Action(ActionError::CastInProgress)));
                    }
                    Some(Command::Snapshot { reply }) => {
                        let _ = reply.send(self.snapshot());
                    }
                    // Handles are gone; land the effect now and let run()
                    // wind the encounter down.
                    None => return,
                },
            }
        }
    }

    fn resolve_staged(&mut self) {
        let env = CombatEnv::new(&self.skills, &self.tables, &self.rng);
        if let Err(error) = self.orchestrator.resolve_staged(&env) {
            tracing::warn!(%error, "staged action fizzled");
        }
        self.publish_events();
    }

    fn publish_events(&mut self) {
        for event in self.orchestrator.drain_events() {
            tracing::trace!(?event, "combat event");
            self.bus.publish(event);
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(
            self.orchestrator.round(),
            self.orchestrator.current_actor(),
            self.orchestrator.outcome(),
            self.orchestrator.state(),
        )
    }
}
