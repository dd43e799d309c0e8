//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Guidance sophistication of a weapon, from unguided to full intercept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Homing {
    /// Level 0: never locks, never steers.
    #[default]
    None,
    /// Level 1: steers, but gives up for good once pointed away.
    Dumb,
    /// Level 2: steers toward the target's current position.
    Pursuit,
    /// Level 3: pursuit, and holds thrust until facing the target.
    Throttled,
    /// Level 4: throttled, and leads the target's motion.
    Predictive,
}

impl Homing {
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn is_homing(self) -> bool {
        self != Homing::None
    }
}

impl TryFrom<u8> for Homing {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Homing::None),
            1 => Ok(Homing::Dumb),
            2 => Ok(Homing::Pursuit),
            3 => Ok(Homing::Throttled),
            4 => Ok(Homing::Predictive),
            other => Err(format!("homing level {other} is outside 0..=4")),
        }
    }
}

impl From<Homing> for u8 {
    fn from(homing: Homing) -> u8 {
        homing.level()
    }
}

/// Lifecycle of a projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileState {
    /// In flight with lifetime remaining.
    #[default]
    Flying,
    /// Forced to zero remaining ticks; dies a natural death on the next advance.
    Expiring,
    /// Resolved. No further effects fire; awaiting removal.
    Dead,
}
