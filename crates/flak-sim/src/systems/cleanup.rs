//! Cleanup system: drops projectiles that have finished.

use crate::projectile::Projectile;

/// Remove dead projectiles. Returns how many were removed.
pub fn run(projectiles: &mut Vec<Projectile>) -> usize {
    let before = projectiles.len();
    projectiles.retain(|p| !p.is_dead());
    before - projectiles.len()
}
