//! Damage resolution: turning a weapon hit into per-channel damage on one ship.
//!
//! A [`DamageProfile`] is built once per impact event (projectile hit,
//! explosion or hazard pulse) and then evaluated against every ship the
//! event reaches. Evaluation is pure; applying the result is the caller's job.

mod profile;
mod resolve;

pub use profile::{BlastCoefficients, DamageProfile, HazardImpact, ImpactInfo};
pub use resolve::{populate, scale_type, shield_block};
