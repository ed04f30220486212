//! Damage resolution.
//!
//! Pure functions only: they read attacker/defender pools and skill
//! parameters and return an effect value, never mutating state. Ability
//! execution applies the results through [`crate::stats::StatPool`].

mod damage;

pub use damage::{attack_damage, heal_amount, skill_damage};
