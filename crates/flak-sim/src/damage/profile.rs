use std::sync::Arc;

use glam::DVec2;

use flak_core::components::Ship;
use flak_core::constants::{MIN_BLAST_RADIUS, TRIGGER_RADIUS_FACTOR};
use flak_core::damage::DamageDealt;
use flak_core::weapon::Weapon;

use super::resolve::populate;

/// A projectile striking something.
#[derive(Debug, Clone)]
pub struct ImpactInfo {
    pub weapon: Arc<Weapon>,
    pub position: DVec2,
    /// How far the projectile flew before impact, for damage dropoff.
    pub distance_traveled: f64,
}

/// One pulse of an environmental hazard.
#[derive(Debug, Clone)]
pub struct HazardImpact {
    pub weapon: Arc<Weapon>,
    pub position: DVec2,
    /// Hazard strength multiplier for this pulse.
    pub scale: f64,
}

/// Blast falloff constants shared by every ship one explosion reaches.
///
/// `scale = k / (1 + r⁴)²` where `r = distance / blast_radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastCoefficients {
    /// Trigger-radius correction.
    pub k: f64,
    /// `1 / blast_radius²`.
    pub r_squared: f64,
}

impl Default for BlastCoefficients {
    fn default() -> Self {
        Self {
            k: 1.0,
            r_squared: 0.0,
        }
    }
}

impl BlastCoefficients {
    /// Coefficients for a weapon whose blast damage scales with distance.
    pub fn for_weapon(weapon: &Weapon) -> Self {
        let blast_radius = weapon.blast_radius.max(MIN_BLAST_RADIUS);
        let ratio = weapon.trigger_radius / blast_radius;
        let k = if ratio == 0.0 {
            1.0
        } else {
            1.0 + TRIGGER_RADIUS_FACTOR * ratio * ratio
        };
        Self {
            k,
            r_squared: 1.0 / (blast_radius * blast_radius),
        }
    }

    /// Scale multiplier at `distance` from the blast origin.
    pub fn falloff(&self, distance: f64) -> f64 {
        let r = distance * distance * self.r_squared;
        let denom = 1.0 + r * r;
        self.k / (denom * denom)
    }
}

/// Everything about an impact event that does not depend on the target.
#[derive(Debug, Clone)]
pub struct DamageProfile {
    weapon: Arc<Weapon>,
    position: DVec2,
    is_blast: bool,
    is_hazard: bool,
    input_scale: f64,
    blast: BlastCoefficients,
}

impl DamageProfile {
    /// Profile for a projectile impact. Distance travelled is the same for
    /// every ship this impact reaches, so dropoff is folded in here.
    pub fn from_impact(info: ImpactInfo) -> Self {
        let mut input_scale = 1.0;
        if info.weapon.has_damage_dropoff() {
            input_scale *= info.weapon.damage_dropoff(info.distance_traveled);
        }
        Self::new(info.weapon, info.position, false, input_scale)
    }

    /// Profile for a hazard pulse. Dropoff waits until a target is known.
    pub fn from_hazard(info: HazardImpact) -> Self {
        Self::new(info.weapon, info.position, true, info.scale)
    }

    fn new(weapon: Arc<Weapon>, position: DVec2, is_hazard: bool, input_scale: f64) -> Self {
        let is_blast = weapon.is_blast();
        let blast = calculate_blast(&weapon, is_blast);
        Self {
            weapon,
            position,
            is_blast,
            is_hazard,
            input_scale,
            blast,
        }
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn is_blast(&self) -> bool {
        self.is_blast
    }

    pub fn is_hazard(&self) -> bool {
        self.is_hazard
    }

    pub fn input_scale(&self) -> f64 {
        self.input_scale
    }

    pub fn blast(&self) -> BlastCoefficients {
        self.blast
    }

    /// Damage this event deals to `ship`. `ignore_blast` suppresses blast
    /// falloff, e.g. for the ship a blast weapon struck directly.
    pub fn calculate_damage(&self, ship: &Ship, ignore_blast: bool) -> DamageDealt {
        let blast = self.is_blast && !ignore_blast;
        let scale = self.scale(ship, blast);
        populate(&self.weapon, self.position, scale, ship)
    }

    /// Overall damage scale against `ship`.
    pub fn scale(&self, ship: &Ship, blast: bool) -> f64 {
        let mut scale = self.input_scale;
        // Estimate the closest point on the ship using its mask radius.
        let distance = (self.position.distance(ship.position) - ship.mask_radius).max(0.0);
        if blast && self.weapon.damage_scaled {
            scale *= self.blast.falloff(distance);
        }
        if self.is_hazard && self.weapon.has_damage_dropoff() {
            scale *= self.weapon.damage_dropoff(distance);
        }
        scale
    }
}

/// Blast constants for this weapon, or the identity when it does not scale.
fn calculate_blast(weapon: &Weapon, is_blast: bool) -> BlastCoefficients {
    if is_blast && weapon.damage_scaled {
        BlastCoefficients::for_weapon(weapon)
    } else {
        BlastCoefficients::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flak_core::weapon::DamageDropoff;

    fn blast_weapon(blast_radius: f64, trigger_radius: f64) -> Arc<Weapon> {
        let mut weapon = Weapon {
            blast_radius,
            trigger_radius,
            damage_scaled: true,
            ..Default::default()
        };
        weapon.damage.hull = 100.0;
        Arc::new(weapon)
    }

    fn ship_at(x: f64, radius: f64) -> Ship {
        Ship {
            position: DVec2::new(x, 0.0),
            mask_radius: radius,
            targetable: true,
            hull: 1_000.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_blast_coefficients() {
        let c = BlastCoefficients::for_weapon(&blast_weapon(50.0, 0.0));
        assert_eq!(c.k, 1.0);
        assert!((c.r_squared - 1.0 / 2_500.0).abs() < 1e-15);

        let c = BlastCoefficients::for_weapon(&blast_weapon(50.0, 25.0));
        assert!((c.k - 1.0625).abs() < 1e-12);
    }

    #[test]
    fn test_tiny_blast_radius_is_floored() {
        let c = BlastCoefficients::for_weapon(&blast_weapon(0.25, 0.0));
        assert_eq!(c.r_squared, 1.0);
    }

    #[test]
    fn test_falloff_is_one_at_blast_radius_quarter() {
        let c = BlastCoefficients::for_weapon(&blast_weapon(100.0, 0.0));
        assert_eq!(c.falloff(0.0), 1.0);
        // r = 1 at the blast radius: 1 / (1 + 1)² = 0.25
        assert!((c.falloff(100.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_blast_scale_strictly_decreases_with_distance() {
        let weapon = blast_weapon(80.0, 30.0);
        let profile = DamageProfile::from_impact(ImpactInfo {
            weapon,
            position: DVec2::ZERO,
            distance_traveled: 0.0,
        });
        let mut last = f64::MAX;
        for step in 0..60 {
            let x = 40.0 + step as f64 * 5.0;
            let scale = profile.scale(&ship_at(x, 10.0), true);
            assert!(scale < last, "scale must fall at {x}: {scale} >= {last}");
            last = scale;
        }
    }

    #[test]
    fn test_mask_radius_shortens_distance_but_not_below_zero() {
        let profile = DamageProfile::from_impact(ImpactInfo {
            weapon: blast_weapon(50.0, 0.0),
            position: DVec2::ZERO,
            distance_traveled: 0.0,
        });
        let inside = profile.scale(&ship_at(5.0, 40.0), true);
        assert_eq!(inside, 1.0);
        let edge = profile.scale(&ship_at(90.0, 40.0), true);
        assert!((edge - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_ignore_blast_uses_full_scale() {
        let profile = DamageProfile::from_impact(ImpactInfo {
            weapon: blast_weapon(50.0, 0.0),
            position: DVec2::ZERO,
            distance_traveled: 0.0,
        });
        let far = ship_at(200.0, 0.0);
        assert!(profile.calculate_damage(&far, false).hull < 1.0);
        assert_eq!(profile.calculate_damage(&far, true).hull, 100.0);
    }

    #[test]
    fn test_unscaled_blast_has_no_falloff() {
        let mut weapon = (*blast_weapon(50.0, 0.0)).clone();
        weapon.damage_scaled = false;
        let profile = DamageProfile::from_impact(ImpactInfo {
            weapon: Arc::new(weapon),
            position: DVec2::ZERO,
            distance_traveled: 0.0,
        });
        assert_eq!(profile.blast(), BlastCoefficients::default());
        assert_eq!(profile.scale(&ship_at(45.0, 0.0), true), 1.0);
    }

    #[test]
    fn test_projectile_dropoff_uses_distance_traveled() {
        let weapon = Arc::new(Weapon {
            damage_dropoff: Some(DamageDropoff {
                start: 100.0,
                end: 200.0,
                modifier: 0.2,
            }),
            ..Default::default()
        });
        let profile = DamageProfile::from_impact(ImpactInfo {
            weapon,
            position: DVec2::ZERO,
            distance_traveled: 150.0,
        });
        assert!((profile.input_scale() - 0.6).abs() < 1e-12);
        // Target distance is irrelevant for projectiles.
        assert!((profile.scale(&ship_at(1_000.0, 0.0), false) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_hazard_dropoff_uses_target_distance() {
        let weapon = Arc::new(Weapon {
            damage_dropoff: Some(DamageDropoff {
                start: 0.0,
                end: 100.0,
                modifier: 0.0,
            }),
            ..Default::default()
        });
        let profile = DamageProfile::from_hazard(HazardImpact {
            weapon,
            position: DVec2::ZERO,
            scale: 2.0,
        });
        assert!(profile.is_hazard());
        assert!((profile.scale(&ship_at(25.0, 0.0), false) - 1.5).abs() < 1e-12);
        assert!((profile.scale(&ship_at(60.0, 10.0), false) - 1.0).abs() < 1e-12);
        assert_eq!(profile.scale(&ship_at(500.0, 0.0), false), 0.0);
    }
}
