//! Procedural obstacle and coin generation
//!
//! All randomness comes from the caller's seeded RNG so runs replay
//! deterministically under test.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Obstacle, Pickup, Viewport};
use crate::consts::*;

/// Spawn decision for one tick.
///
/// Triggers strictly once the timer exceeds the interval (the caller resets
/// the timer on a spawn). The obstacle enters just past the right viewport
/// edge resting on the ground line; with [`PICKUP_CHANCE`] a coin rides
/// above it, centered horizontally.
pub fn maybe_spawn(
    timer: u32,
    interval: u32,
    rng: &mut Pcg32,
    viewport: Viewport,
) -> Option<(Obstacle, Option<Pickup>)> {
    if timer <= interval {
        return None;
    }

    let height = rng.random_range(OBSTACLE_HEIGHT_MIN..OBSTACLE_HEIGHT_MAX);
    let width = rng.random_range(OBSTACLE_WIDTH_MIN..OBSTACLE_WIDTH_MAX);
    let x = viewport.width + SPAWN_X_MARGIN;

    let obstacle = Obstacle {
        pos: Vec2::new(x, viewport.ground_y() - height),
        size: Vec2::new(width, height),
        passed: false,
    };

    let pickup = rng.random_bool(PICKUP_CHANCE).then(|| Pickup {
        pos: Vec2::new(x + width / 2.0, viewport.ground_y() - height - PICKUP_RISE),
        radius: PICKUP_RADIUS,
        collected: false,
    });

    Some((obstacle, pickup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const VIEW: Viewport = Viewport {
        width: 1280.0,
        height: 720.0,
    };

    #[test]
    fn test_trigger_boundary() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(maybe_spawn(SPAWN_INTERVAL, SPAWN_INTERVAL, &mut rng, VIEW).is_none());
        assert!(maybe_spawn(SPAWN_INTERVAL + 1, SPAWN_INTERVAL, &mut rng, VIEW).is_some());
    }

    #[test]
    fn test_no_spawn_leaves_rng_untouched() {
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        assert!(maybe_spawn(0, SPAWN_INTERVAL, &mut a, VIEW).is_none());
        // A declined spawn must not advance the stream
        let (oa, _) = maybe_spawn(SPAWN_INTERVAL + 1, SPAWN_INTERVAL, &mut a, VIEW).unwrap();
        let (ob, _) = maybe_spawn(SPAWN_INTERVAL + 1, SPAWN_INTERVAL, &mut b, VIEW).unwrap();
        assert_eq!(oa.size, ob.size);
    }

    #[test]
    fn test_spawn_geometry() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..200 {
            let (obstacle, pickup) =
                maybe_spawn(SPAWN_INTERVAL + 1, SPAWN_INTERVAL, &mut rng, VIEW).unwrap();

            assert!((OBSTACLE_HEIGHT_MIN..OBSTACLE_HEIGHT_MAX).contains(&obstacle.size.y));
            assert!((OBSTACLE_WIDTH_MIN..OBSTACLE_WIDTH_MAX).contains(&obstacle.size.x));
            // Enters off the right edge, resting on the ground line
            assert_eq!(obstacle.pos.x, VIEW.width + SPAWN_X_MARGIN);
            assert!((obstacle.pos.y + obstacle.size.y - VIEW.ground_y()).abs() < 1e-3);
            assert!(!obstacle.passed);

            if let Some(coin) = pickup {
                assert_eq!(coin.radius, PICKUP_RADIUS);
                assert_eq!(coin.pos.x, obstacle.pos.x + obstacle.size.x / 2.0);
                assert_eq!(coin.pos.y, obstacle.pos.y - PICKUP_RISE);
                assert!(!coin.collected);
            }
        }
    }

    #[test]
    fn test_pickup_rate_roughly_matches_chance() {
        let mut rng = Pcg32::seed_from_u64(1234);
        let coins = (0..1000)
            .filter_map(|_| {
                maybe_spawn(SPAWN_INTERVAL + 1, SPAWN_INTERVAL, &mut rng, VIEW)
                    .and_then(|(_, pickup)| pickup)
            })
            .count();
        assert!((300..500).contains(&coins), "coin count {coins} out of range");
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..50 {
            let (oa, ca) = maybe_spawn(SPAWN_INTERVAL + 1, SPAWN_INTERVAL, &mut a, VIEW).unwrap();
            let (ob, cb) = maybe_spawn(SPAWN_INTERVAL + 1, SPAWN_INTERVAL, &mut b, VIEW).unwrap();
            assert_eq!(oa.size, ob.size);
            assert_eq!(ca.is_some(), cb.is_some());
        }
    }
}
