//! Client-facing handle to a running combat session.

use std::sync::Arc;

use combat_core::{CombatEvent, EntityId, SkillId};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::error::{Result, RuntimeError};
use crate::events::{EventBus, Topic};
use crate::session::Command;
use crate::types::{PlayerIntent, SessionSnapshot};

/// Cheap-to-clone handle for feeding intents and observing a session.
///
/// Intents resolve to `Ok(())` when the core accepted them; rejections come
/// back as [`RuntimeError::Action`] with the precise reason, ready to
/// re-prompt the player.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    bus: Arc<EventBus>,
}

impl SessionHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, bus: Arc<EventBus>) -> Self {
        Self { command_tx, bus }
    }

    pub async fn attack(&self) -> Result<()> {
        self.send_intent(PlayerIntent::Attack).await
    }

    pub async fn cast_skill(&self, skill: SkillId) -> Result<()> {
        self.send_intent(PlayerIntent::CastSkill(skill)).await
    }

    pub async fn hover_target(&self, target: EntityId) -> Result<()> {
        self.send_intent(PlayerIntent::HoverTarget(target)).await
    }

    pub async fn confirm_target(&self) -> Result<()> {
        self.send_intent(PlayerIntent::ConfirmTarget).await
    }

    pub async fn defend(&self) -> Result<()> {
        self.send_intent(PlayerIntent::Defend).await
    }

    pub async fn flee(&self) -> Result<()> {
        self.send_intent(PlayerIntent::Flee).await
    }

    /// Capture a point-in-time view of the encounter for HUD rendering.
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::SessionClosed)?;
        reply_rx.await.map_err(|_| RuntimeError::SessionClosed)
    }

    /// Subscribe to one event topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CombatEvent> {
        self.bus.subscribe(topic)
    }

    async fn send_intent(&self, intent: PlayerIntent) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Intent {
                intent,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::SessionClosed)?;
        reply_rx.await.map_err(|_| RuntimeError::SessionClosed)?
    }
}
