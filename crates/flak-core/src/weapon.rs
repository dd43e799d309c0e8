//! Weapon parameter tables.
//!
//! A [`Weapon`] is immutable once loaded and shared through `Arc` by every
//! projectile fired from it. Weapons are loaded from JSON into a
//! [`WeaponTable`], which resolves sub-munition references by name.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::enums::Homing;

/// Per-channel damage coefficients. Absolute values are applied as-is;
/// `relative_*` values are multiplied by the matching target attribute.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DamageCoefficients {
    pub shield: f64,
    pub hull: f64,
    /// Hull damage dealt once the target is past its disable threshold.
    pub disabled: f64,
    pub energy: f64,
    pub heat: f64,
    pub fuel: f64,
    pub discharge: f64,
    pub corrosion: f64,
    pub ion: f64,
    pub scrambling: f64,
    pub burn: f64,
    pub leak: f64,
    pub disruption: f64,
    pub slowing: f64,
    pub hit_force: f64,
    pub piercing: f64,

    pub relative_shield: f64,
    pub relative_hull: f64,
    pub relative_disabled: f64,
    pub relative_energy: f64,
    pub relative_heat: f64,
    pub relative_fuel: f64,
}

/// Linear damage dropoff by distance: full damage up to `start`,
/// `modifier` times damage from `end` onward.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DamageDropoff {
    pub start: f64,
    pub end: f64,
    pub modifier: f64,
}

impl DamageDropoff {
    pub fn at(&self, distance: f64) -> f64 {
        if distance <= self.start {
            return 1.0;
        }
        if distance >= self.end {
            return self.modifier;
        }
        let slope = (1.0 - self.modifier) / (self.start - self.end);
        slope * (distance - self.start) + 1.0
    }
}

/// A visual effect template and how many to spawn per event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EffectSpawn {
    pub effect: String,
    pub count: u32,
}

/// A resolved sub-munition: the weapon it fires and how many.
#[derive(Debug, Clone)]
pub struct Submunition {
    pub weapon: Arc<Weapon>,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct SubmunitionRef {
    weapon: String,
    count: u32,
}

/// Static parameters of a weapon.
///
/// Velocities and accelerations are per tick, angles in degrees, lifetimes
/// in ticks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Weapon {
    pub velocity: f64,
    pub random_velocity: f64,
    pub acceleration: f64,
    pub drag: f64,
    /// Maximum turn per tick, degrees.
    pub turn: f64,
    /// Maximum heading error applied at launch, degrees.
    pub inaccuracy: f64,
    pub lifetime: i32,
    pub random_lifetime: i32,

    pub homing: Homing,
    pub tracking: f64,
    pub optical_tracking: f64,
    pub infrared_tracking: f64,
    pub radar_tracking: f64,

    pub blast_radius: f64,
    pub trigger_radius: f64,
    pub split_range: f64,
    /// Whether blast damage falls off with distance from the blast origin.
    pub damage_scaled: bool,
    pub damage_dropoff: Option<DamageDropoff>,
    /// Resistance to anti-missile fire. Zero means it cannot be shot down.
    pub missile_strength: u32,

    pub damage: DamageCoefficients,

    pub die_effects: Vec<EffectSpawn>,
    pub hit_effects: Vec<EffectSpawn>,
    pub live_effects: Vec<EffectSpawn>,

    #[serde(skip)]
    pub submunitions: Vec<Submunition>,
}

/// On-disk form of a weapon: its parameters plus sub-munitions by name.
#[derive(Debug, Clone, Deserialize)]
struct WeaponDef {
    #[serde(flatten)]
    weapon: Weapon,
    #[serde(default)]
    submunitions: Vec<SubmunitionRef>,
}

impl Weapon {
    pub fn is_blast(&self) -> bool {
        self.blast_radius > 0.0
    }

    pub fn has_damage_dropoff(&self) -> bool {
        self.damage_dropoff.is_some()
    }

    /// Damage multiplier at the given distance. 1 without a dropoff curve.
    pub fn damage_dropoff(&self, distance: f64) -> f64 {
        self.damage_dropoff.map_or(1.0, |d| d.at(distance))
    }
}

/// Errors raised while loading a weapon table.
#[derive(Debug, Error)]
pub enum WeaponTableError {
    #[error("invalid weapon table JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("weapon `{weapon}` fires unknown sub-munition `{submunition}`")]
    UnknownSubmunition { weapon: String, submunition: String },
    #[error("sub-munition chain through `{0}` is cyclic")]
    Cycle(String),
}

/// All weapons known to the simulation, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct WeaponTable {
    weapons: HashMap<String, Arc<Weapon>>,
}

enum Visit {
    InProgress,
    Done(Arc<Weapon>),
}

impl WeaponTable {
    /// Parse a JSON object of `name -> weapon` and resolve sub-munitions.
    pub fn from_json(json: &str) -> Result<Self, WeaponTableError> {
        let raw: HashMap<String, WeaponDef> = serde_json::from_str(json)?;
        Self::link(raw)
    }

    fn link(raw: HashMap<String, WeaponDef>) -> Result<Self, WeaponTableError> {
        let mut visits: HashMap<String, Visit> = HashMap::with_capacity(raw.len());
        let mut names: Vec<&String> = raw.keys().collect();
        names.sort();
        for name in names {
            resolve(name, None, &raw, &mut visits)?;
        }

        let weapons = visits
            .into_iter()
            .filter_map(|(name, visit)| match visit {
                Visit::Done(weapon) => Some((name, weapon)),
                Visit::InProgress => None,
            })
            .collect::<HashMap<_, _>>();
        let children: HashSet<&str> = raw
            .values()
            .flat_map(|def| def.submunitions.iter().map(|sub| sub.weapon.as_str()))
            .collect();
        for (name, weapon) in &weapons {
            for issue in lint(name, weapon, children.contains(name.as_str())) {
                log::warn!("{issue}");
            }
        }
        log::debug!("loaded {} weapons", weapons.len());
        Ok(Self { weapons })
    }

    pub fn get(&self, name: &str) -> Option<Arc<Weapon>> {
        self.weapons.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.weapons.keys().map(String::as_str)
    }
}

fn resolve(
    name: &str,
    referrer: Option<&str>,
    raw: &HashMap<String, WeaponDef>,
    visits: &mut HashMap<String, Visit>,
) -> Result<Arc<Weapon>, WeaponTableError> {
    match visits.get(name) {
        Some(Visit::Done(weapon)) => return Ok(Arc::clone(weapon)),
        Some(Visit::InProgress) => return Err(WeaponTableError::Cycle(name.to_string())),
        None => {}
    }
    let Some(def) = raw.get(name) else {
        return Err(WeaponTableError::UnknownSubmunition {
            weapon: referrer.unwrap_or(name).to_string(),
            submunition: name.to_string(),
        });
    };
    visits.insert(name.to_string(), Visit::InProgress);

    let mut submunitions = Vec::with_capacity(def.submunitions.len());
    for sub in &def.submunitions {
        let weapon = resolve(&sub.weapon, Some(name), raw, visits)?;
        submunitions.push(Submunition {
            weapon,
            count: sub.count,
        });
    }

    let mut weapon = def.weapon.clone();
    weapon.submunitions = submunitions;
    let weapon = Arc::new(weapon);
    visits.insert(name.to_string(), Visit::Done(Arc::clone(&weapon)));
    Ok(weapon)
}

/// Warn about definitions that load fine but probably do not behave as intended.
/// Definitions that load but cannot behave as written. Lifetime only
/// matters for weapons that fly: fired with speed or thrust, or spawned as
/// a sub-munition. Explosion and hazard weapons never advance.
fn lint(name: &str, weapon: &Weapon, submunition: bool) -> Vec<String> {
    let mut issues = Vec::new();
    if weapon.homing.is_homing() && weapon.turn <= 0.0 {
        issues.push(format!("weapon `{name}` homes but has no turn rate; it will never steer"));
    }
    if weapon.homing.is_homing()
        && weapon.tracking + weapon.optical_tracking + weapon.infrared_tracking + weapon.radar_tracking
            <= 0.0
    {
        issues.push(format!("weapon `{name}` homes but has no tracking; it will never lock"));
    }
    if weapon.damage_scaled && !weapon.is_blast() {
        issues.push(format!("weapon `{name}` scales damage by blast but has no blast radius"));
    }
    let flies = weapon.velocity > 0.0 || weapon.acceleration > 0.0 || submunition;
    if flies && weapon.lifetime <= 0 {
        issues.push(format!(
            "weapon `{name}` has lifetime {}; it dies on its first tick",
            weapon.lifetime
        ));
    }
    issues
}
