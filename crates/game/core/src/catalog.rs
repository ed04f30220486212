//! Skill catalog types and the read-only ability oracle.
//!
//! Skill definitions are opaque content records: the core never creates or
//! mutates them, it only reads them through [`AbilityOracle`]. Loaders in the
//! content crate deserialize catalogs from data files into a [`SkillBook`].

use core::fmt;

use crate::stats::{CombatStat, ModifierKind};

// ============================================================================
// Identifiers
// ============================================================================

/// Stable identifier of a skill within the encounter's catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(pub u16);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skill#{}", self.0)
    }
}

// ============================================================================
// Skill classification enums
// ============================================================================

/// Whether an effect scales against physical or magical defense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackKind {
    Physical,
    Magical,
}

/// Broad dispatch category for ability execution.
///
/// `Defensive` and `Utility` are carried for content compatibility but have
/// no execution branch; casting one is a warned no-op that still spends the
/// turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityCategory {
    Offensive,
    Defensive,
    Buff,
    Debuff,
    Heal,
    Utility,
}

/// Which side of the encounter a skill may affect, relative to the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    Ally,
    Enemy,
    Caster,
}

/// How many members of the matching side a skill affects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetMode {
    /// Exactly the locked target.
    Single,
    /// The full matching side; the hover-locked member is only a visual
    /// anchor for multi-target feedback.
    Multiple,
    /// The full matching side, locked without a selection step.
    All,
    /// One member sampled from the matching side at confirmation time.
    Random,
}

// ============================================================================
// Skill definition
// ============================================================================

/// Buff/debuff payload attached to a skill.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierSpec {
    pub stat: CombatStat,
    pub value: f32,
    pub kind: ModifierKind,
    pub duration_turns: u32,
}

/// One skill record as authored in content data.
///
/// Read-only for the whole encounter. `base_magnitude` is damage for
/// offensive skills and the direct heal amount for heal skills; buff/debuff
/// skills carry their payload in `modifier`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub name: String,
    pub description: String,
    pub base_magnitude: f32,
    pub technique_cost: f32,
    pub attack_kind: AttackKind,
    pub category: AbilityCategory,
    pub target_type: TargetType,
    pub target_mode: TargetMode,
    /// Cast pacing in seconds; cosmetic only, no gameplay state.
    pub cast_duration: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifier: Option<ModifierSpec>,
}

// ============================================================================
// Ability oracle
// ============================================================================

/// Read-only access to skill definitions.
///
/// The capability seam between the combat core and the content layer: the
/// orchestrator resolves skills exclusively through this trait and never
/// assumes how the catalog is stored or loaded.
pub trait AbilityOracle {
    /// Look up one skill by id. `None` for ids the catalog does not carry.
    fn skill(&self, id: SkillId) -> Option<&SkillDefinition>;

    /// Number of skills in the catalog.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory skill catalog keyed by [`SkillId`].
///
/// The standard oracle implementation; content loaders fill one from RON
/// data, tests build one by hand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillBook {
    skills: Vec<(SkillId, SkillDefinition)>,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a skill, replacing any previous definition under the same id.
    pub fn insert(&mut self, id: SkillId, skill: SkillDefinition) {
        match self.skills.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = skill,
            None => self.skills.push((id, skill)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillId, &SkillDefinition)> {
        self.skills.iter().map(|(id, skill)| (*id, skill))
    }
}

impl FromIterator<(SkillId, SkillDefinition)> for SkillBook {
    fn from_iter<T: IntoIterator<Item = (SkillId, SkillDefinition)>>(iter: T) -> Self {
        let mut book = Self::new();
        for (id, skill) in iter {
            book.insert(id, skill);
        }
        book
    }
}

impl AbilityOracle for SkillBook {
    fn skill(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, skill)| skill)
    }

    fn len(&self) -> usize {
        self.skills.len()
    }
}
