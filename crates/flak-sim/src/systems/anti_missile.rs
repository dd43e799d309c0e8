//! Anti-missile system: point defense shooting down projectiles.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use flak_core::types::Government;

use crate::projectile::Projectile;

/// Roll one anti-missile shot against a missile. Succeeds when a draw in
/// `[0, anti)` beats a draw in `[0, strength)`. Missiles with no strength
/// cannot be shot down.
pub fn try_intercept(anti: u32, strength: u32, rng: &mut ChaCha8Rng) -> bool {
    if anti == 0 || strength == 0 {
        return false;
    }
    rng.gen_range(0..anti) > rng.gen_range(0..strength)
}

/// Fire one anti-missile shot from `position` at the nearest hostile
/// missile within `range`. Returns the index of the missile killed.
pub fn run(
    projectiles: &mut [Projectile],
    position: DVec2,
    range: f64,
    anti: u32,
    government: Government,
    rng: &mut ChaCha8Rng,
) -> Option<usize> {
    let (index, _) = projectiles
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_dead() && p.missile_strength() > 0 && p.government() != government)
        .map(|(i, p)| (i, p.position().distance(position)))
        .filter(|&(_, distance)| distance <= range)
        .min_by(|a, b| a.1.total_cmp(&b.1))?;

    let projectile = &mut projectiles[index];
    if try_intercept(anti, projectile.missile_strength(), rng) {
        log::debug!("anti-missile shot down projectile {index}");
        projectile.kill();
        Some(index)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_unshootable_missile_survives() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!((0..1_000).all(|_| !try_intercept(100, 0, &mut rng)));
        assert!((0..1_000).all(|_| !try_intercept(0, 10, &mut rng)));
    }

    #[test]
    fn test_intercept_odds_follow_strength() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let strong = (0..10_000).filter(|_| try_intercept(10, 40, &mut rng)).count();
        let weak = (0..10_000).filter(|_| try_intercept(40, 10, &mut rng)).count();
        assert!(weak > strong * 3, "weak {weak}, strong {strong}");

        // Against strength 1 the roll needs anything above zero.
        let even = (0..10_000).filter(|_| try_intercept(2, 1, &mut rng)).count();
        assert!((4_700..5_300).contains(&even), "even odds gave {even}");
    }
}
