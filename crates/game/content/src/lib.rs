//! Data-driven combat content and its loaders.
//!
//! This crate houses the read-only records an encounter consumes and the
//! loaders that build them from data files:
//! - Skill catalogs (data-driven via RON)
//! - Actor templates, player and enemy (data-driven via RON)
//! - Balance tables (data-driven via TOML)
//! - Engine pacing configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime through combat-core's oracle traits
//! and never appears in encounter state. All loaders deserialize directly
//! into combat-core types with serde.

pub mod loaders;

pub use loaders::{
    ActorCatalog, ActorLoader, ConfigLoader, ContentFactory, EncounterRequest, SkillLoader,
    TablesLoader,
};
