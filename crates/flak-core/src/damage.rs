//! Result of resolving one weapon hit against one ship.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Per-channel damage to apply to a ship, plus knockback.
///
/// Produced by the damage resolver; applying it is up to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageDealt {
    /// Overall scale (blast falloff and dropoff) the channels were computed at.
    pub scaling: f64,

    pub shield: f64,
    pub hull: f64,
    pub energy: f64,
    pub heat: f64,
    pub fuel: f64,

    pub discharge: f64,
    pub corrosion: f64,
    pub ion: f64,
    pub scrambling: f64,
    pub burn: f64,
    pub leak: f64,

    pub disruption: f64,
    pub slowing: f64,

    /// Push to apply to the ship, away from the impact point.
    pub force: DVec2,
}

impl DamageDealt {
    pub fn new(scaling: f64) -> Self {
        Self {
            scaling,
            ..Default::default()
        }
    }

    /// True when every channel is zero.
    pub fn is_empty(&self) -> bool {
        [
            self.shield,
            self.hull,
            self.energy,
            self.heat,
            self.fuel,
            self.discharge,
            self.corrosion,
            self.ion,
            self.scrambling,
            self.burn,
            self.leak,
            self.disruption,
            self.slowing,
        ]
        .iter()
        .all(|&v| v == 0.0)
            && self.force == DVec2::ZERO
    }
}
