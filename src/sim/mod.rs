//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One fixed step per driver frame
//! - Seeded RNG only
//! - Removal-safe reverse iteration over entity collections
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{player_collects_pickup, player_hits_obstacle};
pub use spawn::maybe_spawn;
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Pickup, Player, Viewport};
pub use tick::{TickInput, tick};
