//! Async driver for combat encounters.
//!
//! `combat-runtime` hosts one [`session::CombatSession`] per encounter: a
//! tokio task that owns the combat-core orchestrator, feeds it player
//! intents from a command channel, paces enemy turns and cast delays with
//! timers, and rebroadcasts presentation events on a topic bus.

pub mod error;
pub mod events;
pub mod handle;
pub mod session;
pub mod types;

pub use error::{Result, RuntimeError};
pub use events::{EventBus, Topic};
pub use handle::SessionHandle;
pub use session::CombatSession;
pub use types::{CombatantVitals, PlayerIntent, SessionSnapshot};

/// Roll a fresh encounter seed for random target sampling.
///
/// Seeds are the only nondeterministic input a session takes; everything
/// downstream of one is replayable.
pub fn random_encounter_seed() -> u64 {
    rand::random()
}
