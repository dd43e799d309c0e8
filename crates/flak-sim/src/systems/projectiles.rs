//! Projectile advance system: moves every projectile one tick.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use flak_core::events::Visual;

use crate::projectile::Projectile;

/// Advance all projectiles in order. Sub-munitions collect in
/// `spawn_buffer` and join the active list after the pass, so they first
/// move on the next tick. Returns how many were spawned.
pub fn run(
    projectiles: &mut Vec<Projectile>,
    world: &World,
    rng: &mut ChaCha8Rng,
    visuals: &mut Vec<Visual>,
    spawn_buffer: &mut Vec<Projectile>,
) -> usize {
    spawn_buffer.clear();
    for projectile in projectiles.iter_mut() {
        projectile.advance(world, rng, visuals, spawn_buffer);
    }
    let spawned = spawn_buffer.len();
    projectiles.append(spawn_buffer);
    spawned
}
