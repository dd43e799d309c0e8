//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz). Weapon velocities and turn rates are per tick.
pub const TICK_RATE: u32 = 60;

// --- Lifecycle ---

/// Remaining-ticks value a projectile is forced to when it should die on
/// its next advance (kill, split range).
pub const EXPIRE_NOW: i32 = 0;

// --- Lock acquisition ---

/// A homing projectile re-evaluates its lock with odds of one in this many
/// per tick, roughly once per second.
pub const LOCK_CHECK_ODDS: u32 = TICK_RATE;

/// Tracking coefficients are the chance of holding a lock over this many
/// evaluations; each evaluation uses the corresponding root.
pub const LOCK_WINDOW_EVALUATIONS: f64 = 5.0;

/// Base acquisition factor when the projectile does not hold a lock.
pub const LOCK_BASE_UNLOCKED: f64 = 0.5;

/// Base retention factor when the projectile already holds a lock.
pub const LOCK_BASE_LOCKED: f64 = 1.0;

/// Mass² constant of the optical tracking curve. Interceptors sit near 15%,
/// medium warships near 75%.
pub const OPTICAL_MASS_CONSTANT: f64 = 200_000.0;

/// Infrared tracking floor: a stone-cold target still reads at 10%.
pub const INFRARED_HEAT_FLOOR: f64 = 0.1;

// --- Guidance ---

/// Homing level 3+ stops thrusting when turning to face the target would
/// take longer than this multiple of the ticks needed to reach it.
pub const TURN_BEFORE_THRUST_MARGIN: f64 = 1.5;

// --- Damage ---

/// Nominal fraction blocked by shields for channels shields do not stop.
pub const SHIELD_BLOCK_NONE: f64 = 0.0;

/// Nominal fraction blocked by shields for half-blocked channels.
pub const SHIELD_BLOCK_HALF: f64 = 0.5;

/// Nominal fraction blocked by shields for fully blocked channels.
pub const SHIELD_BLOCK_FULL: f64 = 1.0;

/// How strongly target disruption weakens shield blocking, per point.
pub const DISRUPTION_SHIELD_FACTOR: f64 = 0.01;

/// Blast falloff correction: k = 1 + this * (trigger / blast)².
pub const TRIGGER_RADIUS_FACTOR: f64 = 0.25;

/// Blast radii below this are treated as this value.
pub const MIN_BLAST_RADIUS: f64 = 1.0;

/// Named ship attributes read by the damage model and lock model.
pub mod attr {
    pub const SHIELDS: &str = "shields";
    pub const HULL: &str = "hull";
    pub const ENERGY_CAPACITY: &str = "energy capacity";
    pub const FUEL_CAPACITY: &str = "fuel capacity";
    pub const RADAR_JAMMING: &str = "radar jamming";
    pub const PIERCING_PROTECTION: &str = "piercing protection";
    pub const PIERCING_RESISTANCE: &str = "piercing resistance";

    pub const SHIELD_PROTECTION: &str = "shield protection";
    pub const HULL_PROTECTION: &str = "hull protection";
    pub const ENERGY_PROTECTION: &str = "energy protection";
    pub const HEAT_PROTECTION: &str = "heat protection";
    pub const FUEL_PROTECTION: &str = "fuel protection";
    pub const DISCHARGE_PROTECTION: &str = "discharge protection";
    pub const CORROSION_PROTECTION: &str = "corrosion protection";
    pub const ION_PROTECTION: &str = "ion protection";
    pub const SCRAMBLE_PROTECTION: &str = "scramble protection";
    pub const BURN_PROTECTION: &str = "burn protection";
    pub const LEAK_PROTECTION: &str = "leak protection";
    pub const DISRUPTION_PROTECTION: &str = "disruption protection";
    pub const SLOWING_PROTECTION: &str = "slowing protection";
    pub const FORCE_PROTECTION: &str = "force protection";
}
