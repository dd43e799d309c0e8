//! Records emitted by the simulation for the effect layer.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::types::Angle;

/// A request to instantiate a visual effect from a named template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub effect: String,
    pub position: DVec2,
    pub velocity: DVec2,
    pub heading: Angle,
    /// Draw beneath ships rather than above them.
    pub draw_under: bool,
    /// Velocity of the body that was struck, for hit effects. Zero otherwise.
    pub hit_velocity: DVec2,
}
