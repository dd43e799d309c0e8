//! Simulation engine: the outer loop around projectiles and ships.
//!
//! `SimulationEngine` owns the hecs world of ships, the active projectile
//! list and the visuals spawned since they were last taken. Each tick it
//! advances projectiles, resolves collisions into damage and removes
//! projectiles that have finished.

use std::sync::Arc;

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use flak_core::components::Ship;
use flak_core::events::Visual;
use flak_core::types::{Angle, Government};
use flak_core::weapon::Weapon;

use crate::damage::{DamageProfile, HazardImpact};
use crate::projectile::{Launcher, Projectile, Targeting};
use crate::systems;
use crate::systems::damage::HitReport;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. Without one the generator is seeded from entropy.
    pub seed: Option<u64>,
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub tick: u64,
    pub hits: Vec<HitReport>,
    /// Sub-munitions spawned.
    pub spawned: usize,
    /// Projectiles removed after dying.
    pub removed: usize,
}

/// The simulation engine. Owns the ship world and all projectiles.
pub struct SimulationEngine {
    world: World,
    projectiles: Vec<Projectile>,
    visuals: Vec<Visual>,
    rng: ChaCha8Rng,
    tick: u64,
    spawn_buffer: Vec<Projectile>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            world: World::new(),
            projectiles: Vec::new(),
            visuals: Vec::new(),
            rng,
            tick: 0,
            spawn_buffer: Vec::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn spawn_ship(&mut self, ship: Ship) -> Entity {
        self.world.spawn((ship,))
    }

    /// Point a ship's weapons at `targeting.target`. Returns false if the
    /// ship is gone.
    pub fn set_targeting(&mut self, ship: Entity, targeting: Targeting) -> bool {
        match self.world.insert_one(ship, targeting) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("cannot set targeting on {ship:?}: {err}");
                false
            }
        }
    }

    /// Fire `weapon` from ship `source`. Returns false if the ship is gone.
    pub fn fire(
        &mut self,
        source: Entity,
        weapon: Arc<Weapon>,
        position: DVec2,
        angle: Angle,
        draw_under: bool,
    ) -> bool {
        let launcher = {
            let Ok(ship) = self.world.get::<&Ship>(source) else {
                return false;
            };
            let targeting = self.world.get::<&Targeting>(source).ok();
            Launcher::from_ship(&ship, targeting.as_deref())
        };
        let projectile = Projectile::fire(
            &launcher,
            position,
            angle,
            draw_under,
            weapon,
            &self.world,
            &mut self.rng,
        );
        self.projectiles.push(projectile);
        true
    }

    /// Add an already-built projectile to the active list.
    pub fn launch(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    /// Detonate `weapon` at `position`, e.g. a ship exploding. Every ship
    /// within the blast radius takes falloff-scaled damage.
    pub fn spawn_explosion(&mut self, position: DVec2, weapon: Arc<Weapon>) -> Vec<HitReport> {
        let marker = Projectile::explosion(position, weapon);
        let profile = DamageProfile::from_impact(marker.impact_info());
        systems::damage::run(&mut self.world, &profile, None)
    }

    /// Apply one pulse of an environmental hazard.
    pub fn apply_hazard(&mut self, weapon: Arc<Weapon>, position: DVec2, scale: f64) -> Vec<HitReport> {
        let profile = DamageProfile::from_hazard(HazardImpact {
            weapon,
            position,
            scale,
        });
        systems::damage::run(&mut self.world, &profile, None)
    }

    /// One point-defense shot. Returns true if a missile was shot down.
    pub fn fire_anti_missile(
        &mut self,
        position: DVec2,
        range: f64,
        anti: u32,
        government: Government,
    ) -> bool {
        systems::anti_missile::run(
            &mut self.projectiles,
            position,
            range,
            anti,
            government,
            &mut self.rng,
        )
        .is_some()
    }

    /// Visuals spawned since the last call.
    pub fn take_visuals(&mut self) -> Vec<Visual> {
        std::mem::take(&mut self.visuals)
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            ..Default::default()
        };

        // 1. Projectile flight, expiry and splitting
        report.spawned = systems::projectiles::run(
            &mut self.projectiles,
            &self.world,
            &mut self.rng,
            &mut self.visuals,
            &mut self.spawn_buffer,
        );
        // 2. Collisions into damage
        for hit in systems::collision::run(&self.projectiles, &self.world) {
            let hit_velocity = match self.world.get::<&Ship>(hit.ship) {
                Ok(ship) => ship.velocity,
                Err(_) => continue,
            };
            let projectile = &mut self.projectiles[hit.projectile];
            projectile.explode(&mut self.visuals, hit.intersection, hit_velocity);
            let profile = DamageProfile::from_impact(projectile.impact_info());
            report
                .hits
                .extend(systems::damage::run(&mut self.world, &profile, Some(hit.ship)));
        }
        // 3. Cleanup
        report.removed = systems::cleanup::run(&mut self.projectiles);

        if !report.hits.is_empty() {
            log::trace!("tick {}: {} ships damaged", self.tick, report.hits.len());
        }
        report
    }
}
