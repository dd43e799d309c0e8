#[cfg(test)]
mod tests {
    use glam::DVec2;

    use crate::components::Ship;
    use crate::damage::DamageDealt;
    use crate::enums::*;
    use crate::events::Visual;
    use crate::types::{Angle, Government};

    /// Verify enums round-trip through serde_json.
    #[test]
    fn test_homing_serde_as_level() {
        let variants = vec![
            Homing::None,
            Homing::Dumb,
            Homing::Pursuit,
            Homing::Throttled,
            Homing::Predictive,
        ];
        for (level, v) in variants.into_iter().enumerate() {
            let json = serde_json::to_string(&v).unwrap();
            assert_eq!(json, level.to_string());
            let back: Homing = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_homing_levels_are_ordered() {
        assert!(Homing::Predictive > Homing::Throttled);
        assert!(Homing::Throttled >= Homing::Throttled);
        assert!(Homing::Dumb < Homing::Pursuit);
        assert!(!Homing::None.is_homing());
    }

    #[test]
    fn test_projectile_state_serde() {
        for v in [ProjectileState::Flying, ProjectileState::Expiring, ProjectileState::Dead] {
            let json = serde_json::to_string(&v).unwrap();
            let back: ProjectileState = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_damage_dealt_defaults_to_empty() {
        let d = DamageDealt::new(0.7);
        assert!(d.is_empty());
        assert_eq!(d.scaling, 0.7);

        let json = serde_json::to_string(&d).unwrap();
        let back: DamageDealt = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);
    }

    #[test]
    fn test_ship_from_json_with_attributes() {
        let json = r#"{
            "government": 3,
            "position": [10.0, -4.0],
            "velocity": [0.0, 0.0],
            "heading": 90.0,
            "mass": 250.0,
            "mask_radius": 30.0,
            "targetable": true,
            "shields": 1000.0,
            "hull": 800.0,
            "minimum_hull": 120.0,
            "energy": 500.0,
            "fuel": 300.0,
            "heat": 0.0,
            "maximum_heat": 900.0,
            "status": {
                "discharge": 0.0, "corrosion": 0.0, "ion": 0.0, "scrambling": 0.0,
                "burn": 0.0, "leak": 0.0, "disruption": 0.0, "slowing": 0.0
            },
            "attributes": { "radar jamming": 2.0 }
        }"#;
        let ship: Ship = serde_json::from_str(json).unwrap();
        assert_eq!(ship.government, Government(3));
        assert_eq!(ship.position, DVec2::new(10.0, -4.0));
        assert_eq!(ship.heading, Angle::new(90.0));
        assert_eq!(ship.attribute("radar jamming"), 2.0);
        assert_eq!(ship.hull_until_disabled(), 680.0);
    }

    #[test]
    fn test_visual_serde() {
        let v = Visual {
            effect: "blaster impact".to_string(),
            position: DVec2::new(1.0, 2.0),
            velocity: DVec2::new(0.5, 0.0),
            heading: Angle::new(45.0),
            draw_under: false,
            hit_velocity: DVec2::ZERO,
        };
        let json = serde_json::to_string(&v).unwrap();
        let back: Visual = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
