//! Stat system: per-combatant pools and timed modifiers.
//!
//! # Architecture
//!
//! ```text
//! [ Base stats ]  snapshotted once at combat start
//!      ↓
//! [ Modifier ledger ]  percentage + flat stacking, per-round decay
//!      ↓
//! [ Effective stats ]  what damage resolution and turn ordering read
//! ```
//!
//! Base values are never mutated after construction; every "current" read of
//! attack/defense/speed goes through the recalculated effective block.
//! Resource pools (health, technique points) are stored directly and clamped
//! on every mutation.

mod modifier;
mod pool;

pub use modifier::{CombatStat, ModifierKind, StatModifier};
pub use pool::{StatBlock, StatPool, StatPoolSpec};
