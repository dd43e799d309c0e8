//! Collision system: finds which ship, if any, each projectile strikes
//! during its next step.

use glam::DVec2;
use hecs::{Entity, World};

use flak_core::components::Ship;
use flak_core::types::Government;

use crate::projectile::Projectile;

/// A projectile striking a ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index into the projectile list.
    pub projectile: usize,
    pub ship: Entity,
    /// Fraction of the step travelled before contact, in `[0, 1]`.
    pub intersection: f64,
}

/// First fraction `t` in `[0, 1]` at which `start + t * step` lies within
/// `radius` of `center`. A segment that starts inside hits at 0.
pub fn segment_circle(start: DVec2, step: DVec2, center: DVec2, radius: f64) -> Option<f64> {
    let offset = start - center;
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let a = step.length_squared();
    if a == 0.0 {
        return None;
    }
    let b = offset.dot(step);
    let discriminant = b * b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / a;
    (0.0..=1.0).contains(&t).then_some(t)
}

fn is_hostile(ship: &Ship, government: Government) -> bool {
    ship.targetable && ship.government != government
}

/// Earliest hit for one projectile, or `None` if it flies clear.
pub fn check(projectile: &Projectile, world: &World) -> Option<(Entity, f64)> {
    if projectile.is_dead() {
        return None;
    }
    let government = projectile.government();
    let trigger_radius = projectile.weapon().trigger_radius;
    let mut best: Option<(Entity, f64)> = None;

    let mut query = world.query::<&Ship>();
    for (entity, ship) in query.iter() {
        if !is_hostile(ship, government) {
            continue;
        }
        // Proximity fuse: detonate before contact.
        if trigger_radius > 0.0
            && projectile.position().distance(ship.position) - ship.mask_radius <= trigger_radius
        {
            return Some((entity, 0.0));
        }
        let Some(t) = segment_circle(
            projectile.position(),
            projectile.velocity(),
            ship.position,
            ship.mask_radius,
        ) else {
            continue;
        };
        if best.map_or(true, |(_, closest)| t < closest) {
            best = Some((entity, t));
        }
    }
    best
}

/// Collect hits for every live projectile.
pub fn run(projectiles: &[Projectile], world: &World) -> Vec<Hit> {
    projectiles
        .iter()
        .enumerate()
        .filter_map(|(index, projectile)| {
            check(projectile, world).map(|(ship, intersection)| Hit {
                projectile: index,
                ship,
                intersection,
            })
        })
        .collect()
}
