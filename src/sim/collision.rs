//! Overlap tests between the player and world entities
//!
//! Pure predicates only; the tick applies damage, scoring and removal.

use super::state::{Obstacle, Pickup, Player};

/// Axis-aligned bounding-box overlap between the player and an obstacle
pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle) -> bool {
    player.pos.x < obstacle.pos.x + obstacle.size.x
        && player.pos.x + player.size.x > obstacle.pos.x
        && player.pos.y < obstacle.pos.y + obstacle.size.y
        && player.pos.y + player.size.y > obstacle.pos.y
}

/// Player-vs-coin test. The circle is approximated by its bounding square;
/// at coin radius the difference is not noticeable in play.
pub fn player_collects_pickup(player: &Player, pickup: &Pickup) -> bool {
    player.pos.x < pickup.pos.x + pickup.radius
        && player.pos.x + player.size.x > pickup.pos.x - pickup.radius
        && player.pos.y < pickup.pos.y + pickup.radius
        && player.pos.y + player.size.y > pickup.pos.y - pickup.radius
}
