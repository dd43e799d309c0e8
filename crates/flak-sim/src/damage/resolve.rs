use glam::DVec2;

use flak_core::components::Ship;
use flak_core::constants::*;
use flak_core::damage::DamageDealt;
use flak_core::weapon::Weapon;

/// Damage multiplier for one channel.
///
/// `blocked` is the nominal fraction the channel loses to shields
/// (0, 0.5 or 1); `shield_block` is how much of that the target's shields
/// actually stop right now.
pub fn scale_type(scale: f64, shield_block: f64, blocked: f64, protection: f64) -> f64 {
    scale * (1.0 - blocked * shield_block) / (1.0 + protection)
}

/// Fraction of blockable damage the target's shields stop before the
/// overflow cap. Zero when the ship has no shields up.
pub fn shield_block(weapon: &Weapon, ship: &Ship) -> f64 {
    if ship.shields <= 0.0 {
        return 0.0;
    }
    let piercing = (weapon.damage.piercing / (1.0 + ship.attribute(attr::PIERCING_PROTECTION))
        - ship.attribute(attr::PIERCING_RESISTANCE))
    .clamp(0.0, 1.0);
    (1.0 - piercing) / (1.0 + ship.status.disruption * DISRUPTION_SHIELD_FACTOR)
}

/// [`scale_type`] for a channel whose protection is the named ship attribute.
fn channel_scale(scale: f64, shield_block: f64, ship: &Ship, blocked: f64, protection: &str) -> f64 {
    scale_type(scale, shield_block, blocked, ship.attribute(protection))
}

/// Fill in every damage channel for `ship` at overall `scale`.
///
/// `origin` is where the damage comes from; hit force pushes the ship
/// directly away from it.
pub fn populate(weapon: &Weapon, origin: DVec2, scale: f64, ship: &Ship) -> DamageDealt {
    let coeff = &weapon.damage;
    let mut damage = DamageDealt::new(scale);

    let mut block = shield_block(weapon, ship);
    if ship.shields > 0.0 {
        damage.shield = (coeff.shield + coeff.relative_shield * ship.attribute(attr::SHIELDS))
            * scale_type(scale, block, SHIELD_BLOCK_NONE, ship.attribute(attr::SHIELD_PROTECTION));
        // Shields that are about to collapse cannot block the full share.
        if damage.shield > ship.shields {
            block = block.min(ship.shields / damage.shield);
        }
    }
    damage.shield *= block;

    let hull_scale = channel_scale(scale, block, ship, SHIELD_BLOCK_FULL, attr::HULL_PROTECTION);
    damage.hull = (coeff.hull + coeff.relative_hull * ship.attribute(attr::HULL)) * hull_scale;
    let hull_left = ship.hull_until_disabled();
    if damage.hull > hull_left {
        // Past the disable threshold the weapon deals its disabled damage.
        let hull_fraction = hull_left / damage.hull;
        let disabled = (coeff.disabled + coeff.relative_disabled * ship.attribute(attr::HULL)) * hull_scale;
        damage.hull = damage.hull * hull_fraction + disabled * (1.0 - hull_fraction);
    }

    damage.energy = (coeff.energy + coeff.relative_energy * ship.attribute(attr::ENERGY_CAPACITY))
        * channel_scale(scale, block, ship, SHIELD_BLOCK_HALF, attr::ENERGY_PROTECTION);
    damage.heat = (coeff.heat + coeff.relative_heat * ship.maximum_heat)
        * channel_scale(scale, block, ship, SHIELD_BLOCK_HALF, attr::HEAT_PROTECTION);
    damage.fuel = (coeff.fuel + coeff.relative_fuel * ship.attribute(attr::FUEL_CAPACITY))
        * channel_scale(scale, block, ship, SHIELD_BLOCK_HALF, attr::FUEL_PROTECTION);

    damage.discharge = coeff.discharge * channel_scale(scale, block, ship, SHIELD_BLOCK_NONE, attr::DISCHARGE_PROTECTION);
    damage.corrosion = coeff.corrosion * channel_scale(scale, block, ship, SHIELD_BLOCK_FULL, attr::CORROSION_PROTECTION);
    damage.ion = coeff.ion * channel_scale(scale, block, ship, SHIELD_BLOCK_HALF, attr::ION_PROTECTION);
    damage.scrambling = coeff.scrambling * channel_scale(scale, block, ship, SHIELD_BLOCK_HALF, attr::SCRAMBLE_PROTECTION);
    damage.burn = coeff.burn * channel_scale(scale, block, ship, SHIELD_BLOCK_HALF, attr::BURN_PROTECTION);
    damage.leak = coeff.leak * channel_scale(scale, block, ship, SHIELD_BLOCK_FULL, attr::LEAK_PROTECTION);

    damage.disruption = coeff.disruption * channel_scale(scale, block, ship, SHIELD_BLOCK_HALF, attr::DISRUPTION_PROTECTION);
    damage.slowing = coeff.slowing * channel_scale(scale, block, ship, SHIELD_BLOCK_HALF, attr::SLOWING_PROTECTION);

    let hit_force = coeff.hit_force * channel_scale(scale, block, ship, SHIELD_BLOCK_NONE, attr::FORCE_PROTECTION);
    if hit_force != 0.0 {
        let d = ship.position - origin;
        let distance = d.length();
        if distance > 0.0 {
            damage.force = (hit_force / distance) * d;
        }
    }
    damage
}
