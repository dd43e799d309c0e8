//! Damage system: resolves an impact against the ships it reaches and
//! applies the result.

use hecs::{Entity, World};

use flak_core::components::Ship;
use flak_core::damage::DamageDealt;

use crate::damage::DamageProfile;

/// Damage applied to one ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitReport {
    pub target: Entity,
    pub damage: DamageDealt,
}

/// Apply resolved damage to a ship.
pub fn apply(ship: &mut Ship, damage: &DamageDealt) {
    ship.shields = (ship.shields - damage.shield).max(0.0);
    ship.hull -= damage.hull;
    ship.energy = (ship.energy - damage.energy).max(0.0);
    ship.fuel = (ship.fuel - damage.fuel).max(0.0);
    ship.heat += damage.heat;

    let status = &mut ship.status;
    status.discharge += damage.discharge;
    status.corrosion += damage.corrosion;
    status.ion += damage.ion;
    status.scrambling += damage.scrambling;
    status.burn += damage.burn;
    status.leak += damage.leak;
    status.disruption += damage.disruption;
    status.slowing += damage.slowing;

    if ship.mass > 0.0 {
        ship.velocity += damage.force / ship.mass;
    }
}

/// Ships an impact reaches: everything within the blast radius for blast
/// weapons, otherwise only the ship that was struck. Hazards without a
/// blast radius reach every ship.
fn reached(world: &World, profile: &DamageProfile, struck: Option<Entity>) -> Vec<Entity> {
    if profile.is_blast() {
        let radius = profile.weapon().blast_radius;
        let mut query = world.query::<&Ship>();
        return query
            .iter()
            .filter(|(_, ship)| {
                ship.targetable && profile.position().distance(ship.position) - ship.mask_radius <= radius
            })
            .map(|(entity, _)| entity)
            .collect();
    }
    if profile.is_hazard() {
        let mut query = world.query::<&Ship>();
        return query
            .iter()
            .filter(|(_, ship)| ship.targetable)
            .map(|(entity, _)| entity)
            .collect();
    }
    struck.into_iter().collect()
}

/// Resolve `profile` against every ship it reaches, then apply. All damage
/// is computed before any is applied. `struck` takes no blast falloff.
pub fn run(world: &mut World, profile: &DamageProfile, struck: Option<Entity>) -> Vec<HitReport> {
    let reports: Vec<HitReport> = reached(world, profile, struck)
        .into_iter()
        .filter_map(|entity| {
            let ship = world.get::<&Ship>(entity).ok()?;
            let damage = profile.calculate_damage(&ship, Some(entity) == struck);
            Some(HitReport { target: entity, damage })
        })
        .collect();

    for report in &reports {
        if let Ok(mut ship) = world.get::<&mut Ship>(report.target) {
            let was_disabled = ship.is_disabled();
            apply(&mut ship, &report.damage);
            if !was_disabled && ship.is_disabled() {
                log::debug!("ship {:?} disabled", report.target);
            }
        }
    }
    reports
}
