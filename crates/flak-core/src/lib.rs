//! Core types and definitions for the FLAK combat simulation.
//!
//! This crate defines the vocabulary shared by the simulation crate:
//! weapon parameter tables, ship components, damage results, visual
//! spawn records, and tuning constants. It has no dependency on the ECS
//! or on any random number source.

pub mod components;
pub mod constants;
pub mod damage;
pub mod enums;
pub mod events;
pub mod types;
pub mod weapon;

#[cfg(test)]
mod tests;
