//! Guidance algorithms for homing projectiles.
//!
//! Provides launch inaccuracy, pursuit steering with a turn-rate clamp,
//! lead compensation for the highest homing level, and the
//! turn-before-thrust throttle that keeps slow turners from orbiting.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use flak_core::constants::TURN_BEFORE_THRUST_MARGIN;
use flak_core::enums::Homing;
use flak_core::types::Angle;

/// Random heading error for a launch: the difference of two independent
/// draws in `[0, inaccuracy)`, giving a triangular spread around zero.
pub fn launch_error(inaccuracy: f64, rng: &mut ChaCha8Rng) -> Angle {
    let a: f64 = rng.gen();
    let b: f64 = rng.gen();
    Angle::new(a * inaccuracy) - Angle::new(b * inaccuracy)
}

/// What a locked projectile should do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steering {
    /// Give up on the target for good.
    Abandon,
    /// Rotate by `degrees` and thrust only if `thrust` is set.
    Turn { degrees: f64, thrust: bool },
}

/// Kinematic state of the projectile being steered.
#[derive(Debug, Clone, Copy)]
pub struct Seeker {
    pub position: DVec2,
    pub velocity: DVec2,
    pub heading: Angle,
    pub acceleration: f64,
    pub drag: f64,
    /// Maximum turn per tick, degrees.
    pub turn_rate: f64,
}

impl Seeker {
    /// Speed the projectile settles at: terminal velocity under thrust and
    /// drag, or its current speed if it has no drag.
    pub fn cruise_speed(&self) -> f64 {
        if self.drag > 0.0 {
            self.acceleration / self.drag
        } else {
            self.velocity.length()
        }
    }
}

/// Ticks needed to cover `distance` at `speed`. Infinite when not moving.
fn ticks_to_cover(distance: f64, speed: f64) -> f64 {
    if speed > 0.0 {
        distance / speed
    } else {
        f64::INFINITY
    }
}

/// Compute steering toward a target for one tick.
///
/// Only meaningful for homing levels 1 and up; the caller skips steering
/// entirely for unguided weapons and for projectiles without a lock.
pub fn steer(homing: Homing, seeker: &Seeker, target_position: DVec2, target_velocity: DVec2) -> Steering {
    let mut d = target_position - seeker.position;
    let mut unit = d.normalize_or_zero();
    let speed = seeker.cruise_speed();
    let mut ticks_to_reach = ticks_to_cover(d.length(), speed);
    let facing_away = d.dot(seeker.heading.unit()) < 0.0;

    if homing >= Homing::Predictive {
        if unit.dot(target_velocity) < 0.0 {
            // Target closing: fly the course on which both have the same
            // velocity normal to the line of sight.
            let normal = DVec2::new(unit.y, -unit.x);
            let v_normal = normal.dot(target_velocity);
            let v_along = (speed * speed - v_normal * v_normal).max(0.0).sqrt();
            d = v_along * unit + v_normal * normal;
        } else if ticks_to_reach.is_finite() {
            // Aim where the target will be when we get there.
            d += ticks_to_reach * target_velocity;
            ticks_to_reach = ticks_to_cover(d.length(), speed);
        }
        unit = d.normalize_or_zero();
    }

    if facing_away && homing == Homing::Dumb {
        return Steering::Abandon;
    }

    let cross = seeker.heading.unit().perp_dot(unit).clamp(-1.0, 1.0);
    let desired = cross.asin().to_degrees();
    let turn = if desired.abs() > seeker.turn_rate {
        seeker.turn_rate.copysign(desired)
    } else {
        desired
    };

    let mut thrust = true;
    if homing >= Homing::Throttled && turn != 0.0 {
        let ticks_to_face = desired / turn;
        if ticks_to_face * TURN_BEFORE_THRUST_MARGIN > ticks_to_reach {
            thrust = false;
        }
    }

    Steering::Turn {
        degrees: turn,
        thrust,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn seeker(position: DVec2, velocity: DVec2, heading: f64) -> Seeker {
        Seeker {
            position,
            velocity,
            heading: Angle::new(heading),
            acceleration: 0.5,
            drag: 0.05,
            turn_rate: 4.0,
        }
    }

    /// Integrate a seeker the way a projectile does: turn, thrust+drag, move.
    fn fly(s: &mut Seeker, homing: Homing, target_pos: DVec2, target_vel: DVec2) {
        let mut accel = s.acceleration;
        match steer(homing, s, target_pos, target_vel) {
            Steering::Abandon => {}
            Steering::Turn { degrees, thrust } => {
                s.heading += Angle::new(degrees);
                if !thrust {
                    accel = 0.0;
                }
            }
        }
        if accel != 0.0 {
            s.velocity *= 1.0 - s.drag;
            s.velocity += accel * s.heading.unit();
        }
        s.position += s.velocity;
    }

    #[test]
    fn test_launch_error_is_bounded_and_centered() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut sum = 0.0;
        for _ in 0..10_000 {
            let e = launch_error(6.0, &mut rng).degrees();
            assert!(e > -6.0 && e < 6.0);
            sum += e;
        }
        assert!((sum / 10_000.0).abs() < 0.2, "spread should center on zero");
    }

    #[test]
    fn test_zero_inaccuracy_is_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(launch_error(0.0, &mut rng).degrees(), 0.0);
    }

    #[test]
    fn test_turn_is_clamped_to_turn_rate() {
        // Target directly to the left: wants +90°, may only turn 4°.
        let s = seeker(DVec2::ZERO, DVec2::new(5.0, 0.0), 0.0);
        match steer(Homing::Pursuit, &s, DVec2::new(0.0, 500.0), DVec2::ZERO) {
            Steering::Turn { degrees, thrust } => {
                assert!((degrees - 4.0).abs() < 1e-9);
                assert!(thrust, "pursuit never throttles");
            }
            Steering::Abandon => panic!("pursuit should not abandon"),
        }
    }

    #[test]
    fn test_small_turn_is_exact() {
        let s = seeker(DVec2::ZERO, DVec2::new(5.0, 0.0), 0.0);
        let target = Angle::new(2.5).unit() * 1_000.0;
        match steer(Homing::Pursuit, &s, target, DVec2::ZERO) {
            Steering::Turn { degrees, .. } => assert!((degrees - 2.5).abs() < 1e-9),
            Steering::Abandon => panic!("pursuit should not abandon"),
        }
    }

    #[test]
    fn test_dumb_homing_abandons_when_facing_away() {
        let s = seeker(DVec2::ZERO, DVec2::new(5.0, 0.0), 0.0);
        let behind = DVec2::new(-300.0, 10.0);
        assert_eq!(steer(Homing::Dumb, &s, behind, DVec2::ZERO), Steering::Abandon);
        assert!(matches!(
            steer(Homing::Pursuit, &s, behind, DVec2::ZERO),
            Steering::Turn { .. }
        ));
    }

    #[test]
    fn test_throttled_holds_thrust_while_turning() {
        // Close target abeam: over 20 ticks to face, two to reach.
        let s = seeker(DVec2::ZERO, DVec2::new(10.0, 0.0), 0.0);
        let abeam = DVec2::new(0.0, 20.0);
        match steer(Homing::Throttled, &s, abeam, DVec2::ZERO) {
            Steering::Turn { thrust, .. } => assert!(!thrust),
            Steering::Abandon => panic!("throttled homing should not abandon"),
        }
        // Same bearing far away: plenty of time to turn, keep thrusting.
        let far = DVec2::new(0.0, 20_000.0);
        match steer(Homing::Throttled, &s, far, DVec2::ZERO) {
            Steering::Turn { thrust, .. } => assert!(thrust),
            Steering::Abandon => panic!("throttled homing should not abandon"),
        }
    }

    #[test]
    fn test_pursuit_reaches_stationary_target() {
        let mut s = seeker(DVec2::ZERO, DVec2::new(0.0, 10.0), 90.0);
        let target = DVec2::new(1_500.0, 400.0);
        let mut min_range = f64::MAX;
        for _ in 0..600 {
            fly(&mut s, Homing::Pursuit, target, DVec2::ZERO);
            min_range = min_range.min(s.position.distance(target));
            if min_range < 15.0 {
                break;
            }
        }
        assert!(min_range < 15.0, "pursuit should converge, min range: {min_range:.1}");
    }

    #[test]
    fn test_predictive_intercepts_crossing_target() {
        let mut s = seeker(DVec2::ZERO, DVec2::new(10.0, 0.0), 0.0);
        let mut target = DVec2::new(1_200.0, -600.0);
        let target_vel = DVec2::new(0.0, 3.0);
        let mut min_range = f64::MAX;
        for _ in 0..600 {
            fly(&mut s, Homing::Predictive, target, target_vel);
            target += target_vel;
            min_range = min_range.min(s.position.distance(target));
            if min_range < 20.0 {
                break;
            }
        }
        assert!(
            min_range < 20.0,
            "predictive homing should intercept a crossing target, min range: {min_range:.1}"
        );
    }

    #[test]
    fn test_predictive_leads_receding_target() {
        // Target dead ahead, sliding sideways: not closing, so level 4
        // aims where it will be, level 3 aims where it is.
        let mut s = seeker(DVec2::ZERO, DVec2::new(10.0, 0.0), 0.0);
        s.turn_rate = 90.0;
        let target = DVec2::new(1_000.0, 0.0);
        let target_vel = DVec2::new(0.0, 5.0);

        match steer(Homing::Predictive, &s, target, target_vel) {
            Steering::Turn { degrees, thrust } => {
                // 100 ticks to reach: aim at (1000, 500).
                let expected = 0.5f64.atan().to_degrees();
                assert!((degrees - expected).abs() < 1e-9, "lead turn {degrees}");
                assert!(thrust);
            }
            Steering::Abandon => panic!("predictive homing should not abandon"),
        }
        match steer(Homing::Throttled, &s, target, target_vel) {
            Steering::Turn { degrees, .. } => assert_eq!(degrees, 0.0),
            Steering::Abandon => panic!("throttled homing should not abandon"),
        }
    }

    #[test]
    fn test_predictive_intercepts_receding_target() {
        let mut s = seeker(DVec2::ZERO, DVec2::new(10.0, 0.0), 0.0);
        let mut target = DVec2::new(600.0, 0.0);
        let target_vel = DVec2::new(1.0, 3.0);
        let mut min_range = f64::MAX;
        for _ in 0..600 {
            fly(&mut s, Homing::Predictive, target, target_vel);
            target += target_vel;
            min_range = min_range.min(s.position.distance(target));
            if min_range < 20.0 {
                break;
            }
        }
        assert!(
            min_range < 20.0,
            "predictive homing should run down a receding target, min range: {min_range:.1}"
        );
    }

    #[test]
    fn test_cruise_speed_without_drag_uses_current_speed() {
        let mut s = seeker(DVec2::ZERO, DVec2::new(3.0, 4.0), 0.0);
        s.drag = 0.0;
        assert_eq!(s.cruise_speed(), 5.0);
        s.drag = 0.1;
        assert!((s.cruise_speed() - 5.0).abs() < 1e-12);
    }
}
