//! Target-lock probability model for homing projectiles.
//!
//! Each tracking channel a weapon has votes independently; the projectile
//! holds a lock for the next second if any channel succeeds. Tracking
//! coefficients are the chance of holding a lock across a five-evaluation
//! window, so a single evaluation tests against the fifth root.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use flak_core::components::Ship;
use flak_core::constants::*;
use flak_core::weapon::Weapon;

/// Tracking channels a weapon can lock with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingChannel {
    Tracking,
    Optical,
    Infrared,
    Radar,
}

/// Chance that one evaluation keeps (or gains) a lock, given the channel's
/// windowed probability and the base for the current lock state.
pub fn acquisition_chance(probability: f64, base: f64) -> f64 {
    base * probability.powf(1.0 / LOCK_WINDOW_EVALUATIONS)
}

/// Base factor for an evaluation: lenient when already locked.
pub fn lock_base(locked: bool) -> f64 {
    if locked {
        LOCK_BASE_LOCKED
    } else {
        LOCK_BASE_UNLOCKED
    }
}

/// Windowed lock probability of every channel the weapon has, against
/// this target. Channels with a zero coefficient are omitted.
pub fn channel_probabilities(weapon: &Weapon, target: &Ship) -> Vec<(TrackingChannel, f64)> {
    let mut channels = Vec::with_capacity(4);
    if weapon.tracking != 0.0 {
        channels.push((TrackingChannel::Tracking, weapon.tracking));
    }
    if weapon.optical_tracking != 0.0 {
        // Small, light targets are hard to see.
        let weight = target.mass * target.mass;
        let p = weapon.optical_tracking * weight / (OPTICAL_MASS_CONSTANT + weight);
        channels.push((TrackingChannel::Optical, p));
    }
    if weapon.infrared_tracking != 0.0 {
        let heat = (target.heat_fraction() + INFRARED_HEAT_FLOOR).min(1.0);
        channels.push((TrackingChannel::Infrared, weapon.infrared_tracking * heat));
    }
    if weapon.radar_tracking != 0.0 {
        // Jamming of 1 halves the chance.
        let jamming = target.attribute(attr::RADAR_JAMMING);
        channels.push((TrackingChannel::Radar, weapon.radar_tracking / (1.0 + jamming)));
    }
    channels
}

/// Evaluate the lock once. Every channel is rolled even after one succeeds.
pub fn check_lock(weapon: &Weapon, target: &Ship, locked: bool, rng: &mut ChaCha8Rng) -> bool {
    let base = lock_base(locked);
    let mut has_lock = false;
    for (_, probability) in channel_probabilities(weapon, target) {
        let roll: f64 = rng.gen();
        has_lock |= roll < acquisition_chance(probability, base);
    }
    has_lock
}
