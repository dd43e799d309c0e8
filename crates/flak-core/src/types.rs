//! Fundamental geometric types.
//!
//! Positions and velocities are `glam::DVec2` in world units (per tick for
//! velocities). Headings are an [`Angle`] measured in degrees.

use std::ops::{Add, AddAssign, Neg, Sub};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A heading in degrees. Positive rotation turns from +x toward +y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(f64);

impl Angle {
    pub fn new(degrees: f64) -> Self {
        Self(degrees)
    }

    /// Build the angle a vector points along. The zero vector maps to 0°.
    pub fn from_vector(v: DVec2) -> Self {
        if v == DVec2::ZERO {
            return Self(0.0);
        }
        Self(v.y.atan2(v.x).to_degrees())
    }

    pub fn degrees(&self) -> f64 {
        self.0
    }

    /// Unit vector pointing along this heading.
    pub fn unit(&self) -> DVec2 {
        DVec2::from_angle(self.0.to_radians())
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Angle) {
        self.0 += rhs.0;
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

/// Government (allegiance) of a ship or projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Government(pub u32);
