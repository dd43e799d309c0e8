//! ECS components for ship entities.
//!
//! Components are plain data. The simulation reads them through the
//! entity handle a projectile holds and writes them only when applying a
//! resolved hit.

use std::collections::HashMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::types::{Angle, Government};

/// Named numeric ship attributes ("hull", "radar jamming", ...).
/// A name that was never set reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(HashMap<String, f64>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> f64 {
        self.0.get(name).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, name: &str, value: f64) {
        self.0.insert(name.to_string(), value);
    }

    /// Builder-style `set`.
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }
}

/// Damage-over-time and special status accumulators on a ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusLevels {
    pub discharge: f64,
    pub corrosion: f64,
    pub ion: f64,
    pub scrambling: f64,
    pub burn: f64,
    pub leak: f64,
    pub disruption: f64,
    pub slowing: f64,
}

/// A ship: anything projectiles can target and damage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ship {
    pub government: Government,
    pub position: DVec2,
    pub velocity: DVec2,
    pub heading: Angle,
    pub mass: f64,
    /// Radius of the collision mask, used to estimate the closest point.
    pub mask_radius: f64,
    /// Whether this ship can currently be targeted (cloaked, landed and
    /// departed ships are not).
    pub targetable: bool,

    pub shields: f64,
    pub hull: f64,
    /// Hull level at which the ship becomes disabled.
    pub minimum_hull: f64,
    pub energy: f64,
    pub fuel: f64,
    pub heat: f64,
    pub maximum_heat: f64,
    pub status: StatusLevels,

    pub attributes: Attributes,
}

impl Ship {
    /// Heat as a fraction of maximum heat.
    pub fn heat_fraction(&self) -> f64 {
        if self.maximum_heat <= 0.0 {
            return 0.0;
        }
        self.heat / self.maximum_heat
    }

    /// Hull that can be lost before the ship is disabled.
    pub fn hull_until_disabled(&self) -> f64 {
        (self.hull - self.minimum_hull).max(0.0)
    }

    pub fn is_disabled(&self) -> bool {
        self.hull < self.minimum_hull
    }

    pub fn attribute(&self, name: &str) -> f64 {
        self.attributes.get(name)
    }
}
