//! Encounter environment: read-only collaborators the core resolves against.
//!
//! The orchestrator never owns content or randomness. Both are borrowed per
//! call through [`CombatEnv`], which bundles the ability catalog, the balance
//! tables and the RNG oracle into one parameter.

mod rng;
mod tables;

pub use rng::{PcgRng, RngOracle, compute_seed};
pub use tables::BalanceTables;

use crate::catalog::AbilityOracle;

/// Borrowed bundle of encounter collaborators.
///
/// Cheap to construct; callers build one per orchestrator call (or hold one
/// for the whole session) from whatever storage they own.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    catalog: &'a dyn AbilityOracle,
    tables: &'a BalanceTables,
    rng: &'a dyn RngOracle,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        catalog: &'a dyn AbilityOracle,
        tables: &'a BalanceTables,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            catalog,
            tables,
            rng,
        }
    }

    pub fn catalog(&self) -> &dyn AbilityOracle {
        self.catalog
    }

    pub fn tables(&self) -> &BalanceTables {
        self.tables
    }

    pub fn rng(&self) -> &dyn RngOracle {
        self.rng
    }
}
