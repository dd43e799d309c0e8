//! Systems run by the engine each tick.
//!
//! Systems are plain functions over the ship world and the projectile list.
//! They do not own state; buffers they need are passed in by the engine.

pub mod anti_missile;
pub mod cleanup;
pub mod collision;
pub mod damage;
pub mod projectiles;
