//! Projectile flight: launch, per-tick advance, expiry and splitting.
//!
//! A [`Projectile`] references its target through a `hecs::Entity`. The
//! handle is looked up again every tick, so a ship despawned elsewhere in
//! the world is simply no longer tracked.

use std::sync::Arc;

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use flak_core::components::Ship;
use flak_core::constants::{EXPIRE_NOW, LOCK_CHECK_ODDS};
use flak_core::enums::ProjectileState;
use flak_core::events::Visual;
use flak_core::types::{Angle, Government};
use flak_core::weapon::{EffectSpawn, Weapon};

use crate::damage::ImpactInfo;
use crate::guidance::{launch_error, steer, Seeker, Steering};
use crate::lock::check_lock;

/// What a ship is aiming at. Attach to ships that fire homing weapons.
#[derive(Debug, Clone, Copy, Default)]
pub struct Targeting {
    pub target: Option<Entity>,
    /// Ships boarding their target never fire on it.
    pub boarding: bool,
}

/// The firing side of a launch.
#[derive(Debug, Clone, Copy, Default)]
pub struct Launcher {
    pub government: Government,
    pub velocity: DVec2,
    pub target: Option<Entity>,
    pub boarding: bool,
}

impl Launcher {
    pub fn from_ship(ship: &Ship, targeting: Option<&Targeting>) -> Self {
        let targeting = targeting.copied().unwrap_or_default();
        Self {
            government: ship.government,
            velocity: ship.velocity,
            target: targeting.target,
            boarding: targeting.boarding,
        }
    }
}

/// A single projectile in flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    weapon: Arc<Weapon>,
    position: DVec2,
    velocity: DVec2,
    heading: Angle,
    government: Government,
    target: Option<Entity>,
    target_government: Government,
    remaining: i32,
    state: ProjectileState,
    has_lock: bool,
    draw_under: bool,
    clip: f64,
    distance_traveled: f64,
}

impl Projectile {
    /// Launch a projectile from a ship.
    pub fn fire(
        launcher: &Launcher,
        position: DVec2,
        angle: Angle,
        draw_under: bool,
        weapon: Arc<Weapon>,
        world: &World,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let mut target = if launcher.boarding { None } else { launcher.target };
        let mut target_government = Government::default();
        if let Some(entity) = target {
            match world.get::<&Ship>(entity) {
                Ok(ship) => target_government = ship.government,
                Err(_) => target = None,
            }
        }

        let mut heading = angle;
        if weapon.inaccuracy != 0.0 {
            heading += launch_error(weapon.inaccuracy, rng);
        }
        let velocity = launcher.velocity + heading.unit() * exit_speed(&weapon, rng);
        let remaining = initial_lifetime(&weapon, rng);

        Self {
            weapon,
            position,
            velocity,
            heading,
            government: launcher.government,
            target,
            target_government,
            remaining,
            state: ProjectileState::Flying,
            has_lock: target.is_some(),
            draw_under,
            clip: 1.0,
            distance_traveled: 0.0,
        }
    }

    /// Spawn one sub-munition of an expiring parent, one tick ahead of it.
    ///
    /// When the parent never thrusts, its momentum is all the sub-munition
    /// gets: the parent's velocity is turned onto the new heading and the
    /// sub-munition's stated velocity is ignored.
    pub fn submunition(parent: &Projectile, weapon: Arc<Weapon>, rng: &mut ChaCha8Rng) -> Self {
        let mut heading = parent.heading;
        if weapon.inaccuracy != 0.0 {
            heading += launch_error(weapon.inaccuracy, rng);
        }
        let velocity = if parent.weapon.acceleration == 0.0 {
            let spread = (heading - parent.heading).degrees().to_radians();
            DVec2::from_angle(spread).rotate(parent.velocity)
        } else {
            parent.velocity + heading.unit() * exit_speed(&weapon, rng)
        };
        let remaining = initial_lifetime(&weapon, rng);

        Self {
            weapon,
            position: parent.position + parent.velocity,
            velocity,
            heading,
            government: parent.government,
            target: parent.target,
            target_government: parent.target_government,
            remaining,
            state: ProjectileState::Flying,
            has_lock: parent.target.is_some(),
            draw_under: parent.draw_under,
            clip: 1.0,
            distance_traveled: 0.0,
        }
    }

    /// A stationary marker for a ship explosion. It never moves or emits
    /// anything; it only carries the blast weapon and origin.
    pub fn explosion(position: DVec2, weapon: Arc<Weapon>) -> Self {
        Self {
            weapon,
            position,
            velocity: DVec2::ZERO,
            heading: Angle::default(),
            government: Government::default(),
            target: None,
            target_government: Government::default(),
            remaining: 0,
            state: ProjectileState::Dead,
            has_lock: false,
            draw_under: false,
            clip: 1.0,
            distance_traveled: 0.0,
        }
    }

    /// Advance one tick. Death effects and sub-munitions are appended to
    /// `visuals` and `spawned`.
    pub fn advance(
        &mut self,
        world: &World,
        rng: &mut ChaCha8Rng,
        visuals: &mut Vec<Visual>,
        spawned: &mut Vec<Projectile>,
    ) {
        if self.state == ProjectileState::Dead {
            return;
        }
        self.remaining -= 1;
        if self.remaining <= 0 {
            self.expire(rng, visuals, spawned);
            return;
        }

        let weapon = Arc::clone(&self.weapon);
        for spawn in &weapon.live_effects {
            if spawn.count > 0 && rng.gen_range(0..spawn.count) == 0 {
                visuals.push(self.visual(&spawn.effect));
            }
        }

        // Drop targets that left the world, went dark or changed sides.
        let target_ref = self.target.and_then(|entity| world.get::<&Ship>(entity).ok());
        let target_government = self.target_government;
        let target = target_ref
            .as_deref()
            .filter(|ship| ship.targetable && ship.government == target_government);
        if self.target.is_some() && target.is_none() {
            log::debug!("projectile lost its target");
            self.target = None;
        }

        let homing = weapon.homing;
        match target {
            Some(ship) if homing.is_homing() && rng.gen_range(0..LOCK_CHECK_ODDS) == 0 => {
                let locked = check_lock(&weapon, ship, self.has_lock, rng);
                if locked != self.has_lock {
                    log::trace!("projectile lock {}", if locked { "acquired" } else { "lost" });
                }
                self.has_lock = locked;
            }
            Some(_) => {}
            None => self.has_lock = false,
        }

        let mut turn = 0.0;
        let mut accel = weapon.acceleration;
        if let Some(ship) = target.filter(|_| homing.is_homing() && self.has_lock) {
            let seeker = Seeker {
                position: self.position,
                velocity: self.velocity,
                heading: self.heading,
                acceleration: weapon.acceleration,
                drag: weapon.drag,
                turn_rate: weapon.turn,
            };
            match steer(homing, &seeker, ship.position, ship.velocity) {
                Steering::Abandon => {
                    log::debug!("projectile facing away from its target, abandoning");
                    self.target = None;
                    self.has_lock = false;
                }
                Steering::Turn { degrees, thrust } => {
                    turn = degrees;
                    if !thrust {
                        accel = 0.0;
                    }
                }
            }
        }

        if turn != 0.0 {
            self.heading += Angle::new(turn);
        }
        if accel != 0.0 {
            self.velocity *= 1.0 - weapon.drag;
            self.velocity += accel * self.heading.unit();
        }
        self.position += self.velocity;
        self.distance_traveled += self.velocity.length();

        if let Some(ship) = target {
            if self.position.distance(ship.position) < weapon.split_range {
                self.remaining = EXPIRE_NOW;
                self.state = ProjectileState::Expiring;
            }
        }
    }

    /// Natural death: death effects and sub-munitions, exactly once.
    fn expire(&mut self, rng: &mut ChaCha8Rng, visuals: &mut Vec<Visual>, spawned: &mut Vec<Projectile>) {
        let weapon = Arc::clone(&self.weapon);
        self.emit_all(&weapon.die_effects, visuals);
        let mut count = 0;
        for sub in &weapon.submunitions {
            for _ in 0..sub.count {
                spawned.push(Projectile::submunition(self, Arc::clone(&sub.weapon), rng));
                count += 1;
            }
        }
        if count > 0 {
            log::debug!("projectile split into {count} sub-munitions");
        }
        self.state = ProjectileState::Dead;
    }

    /// This projectile struck something `intersection` of the way through
    /// its current step. Hit effects only; no death effects or sub-munitions.
    pub fn explode(&mut self, visuals: &mut Vec<Visual>, intersection: f64, hit_velocity: DVec2) {
        self.clip = intersection;
        let at = self.position + self.velocity * intersection;
        for spawn in &self.weapon.hit_effects {
            for _ in 0..spawn.count {
                visuals.push(Visual {
                    position: at,
                    hit_velocity,
                    ..self.visual(&spawn.effect)
                });
            }
        }
        self.remaining = EXPIRE_NOW;
        self.state = ProjectileState::Dead;
    }

    /// Shot down. The projectile dies naturally on its next advance.
    pub fn kill(&mut self) {
        if self.state != ProjectileState::Dead {
            self.remaining = EXPIRE_NOW;
            self.state = ProjectileState::Expiring;
        }
    }

    fn emit_all(&self, spawns: &[EffectSpawn], visuals: &mut Vec<Visual>) {
        for spawn in spawns {
            for _ in 0..spawn.count {
                visuals.push(self.visual(&spawn.effect));
            }
        }
    }

    fn visual(&self, effect: &str) -> Visual {
        Visual {
            effect: effect.to_string(),
            position: self.position,
            velocity: self.velocity,
            heading: self.heading,
            draw_under: self.draw_under,
            hit_velocity: DVec2::ZERO,
        }
    }

    /// Impact description for building a damage profile.
    pub fn impact_info(&self) -> ImpactInfo {
        ImpactInfo {
            weapon: Arc::clone(&self.weapon),
            position: self.position + self.velocity * self.clip,
            distance_traveled: self.distance_traveled,
        }
    }

    pub fn weapon(&self) -> &Arc<Weapon> {
        &self.weapon
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn heading(&self) -> Angle {
        self.heading
    }

    pub fn government(&self) -> Government {
        self.government
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    pub fn state(&self) -> ProjectileState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state == ProjectileState::Dead
    }

    /// Locked on, for homing weapons only.
    pub fn has_lock(&self) -> bool {
        self.weapon.homing.is_homing() && self.has_lock
    }

    pub fn draw_under(&self) -> bool {
        self.draw_under
    }

    /// Fraction of the last step travelled before impact. 1 until it hits.
    pub fn clip(&self) -> f64 {
        self.clip
    }

    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
    }

    pub fn missile_strength(&self) -> u32 {
        self.weapon.missile_strength
    }
}

fn exit_speed(weapon: &Weapon, rng: &mut ChaCha8Rng) -> f64 {
    weapon.velocity + rng.gen::<f64>() * weapon.random_velocity
}

fn initial_lifetime(weapon: &Weapon, rng: &mut ChaCha8Rng) -> i32 {
    if weapon.random_lifetime > 0 {
        weapon.lifetime + rng.gen_range(0..=weapon.random_lifetime)
    } else {
        weapon.lifetime
    }
}
