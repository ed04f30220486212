//! Combatant identity and ownership of its stat pool.

use core::fmt;

use crate::catalog::SkillId;
use crate::env::BalanceTables;
use crate::stats::{StatPool, StatPoolSpec};

/// Unique identifier for a combatant within one encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the encounter a combatant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Authoring-side description of one combatant, expanded from actor
/// templates by the content layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSpec {
    pub name: String,
    pub stats: StatPoolSpec,
    /// Skills this combatant may cast, resolved against the encounter's
    /// catalog.
    #[cfg_attr(feature = "serde", serde(default))]
    pub known_skills: Vec<SkillId>,
}

/// One participant in the encounter: identity plus exactly one owned
/// [`StatPool`].
#[derive(Clone, Debug)]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub side: Side,
    pub stats: StatPool,
    known_skills: Vec<SkillId>,
}

impl Combatant {
    pub fn new(id: EntityId, side: Side, spec: CombatantSpec, tables: &BalanceTables) -> Self {
        Self {
            id,
            name: spec.name,
            side,
            stats: StatPool::new(spec.stats, tables),
            known_skills: spec.known_skills,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn knows_skill(&self, skill: SkillId) -> bool {
        self.known_skills.contains(&skill)
    }

    pub fn known_skills(&self) -> &[SkillId] {
        &self.known_skills
    }
}
