//! Projectile guidance and damage resolution for FLAK.
//!
//! Owns the hecs world of ships, flies projectiles one tick at a time and
//! resolves their impacts into per-channel damage.

pub mod damage;
pub mod engine;
pub mod guidance;
pub mod lock;
pub mod projectile;
pub mod systems;

pub use engine::{SimConfig, SimulationEngine};
pub use flak_core as core;
