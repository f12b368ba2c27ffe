//! Per-frame simulation tick
//!
//! Advances the world deterministically. The external driver calls [`tick`]
//! once per display frame; all motion constants are calibrated per tick, so
//! there is no dt parameter.

use super::collision::{player_collects_pickup, player_hits_obstacle};
use super::spawn::maybe_spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input sampled for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump pressed this frame; the first press also leaves the title screen
    pub jump: bool,
    /// Jump input currently held (variable jump height)
    pub jump_held: bool,
}

/// Advance the game by one tick.
///
/// Two ordered phases: the jump-sustain adjustment runs first and in every
/// phase (it checks the velocity sign, so it is inert unless a jump is in
/// flight), then the scrolling world advances, gated on `Running`.
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.player.sustain(input.jump_held);

    match state.phase {
        GamePhase::NotStarted => {
            // The starting press is consumed by the transition; it does not
            // also jump.
            if input.jump {
                state.phase = GamePhase::Running;
            }
            return;
        }
        GamePhase::GameOver => return,
        GamePhase::Running => {}
    }

    state.time_ticks += 1;

    if input.jump && state.player.jump() {
        state.events.push(GameEvent::Jump);
    }

    let ground_y = state.viewport.ground_y();
    state.player.apply_gravity(ground_y);

    // Linear difficulty ramp
    state.speed += SPEED_RAMP;

    state.spawn_timer += 1;
    if let Some((obstacle, pickup)) = maybe_spawn(
        state.spawn_timer,
        SPAWN_INTERVAL,
        &mut state.rng,
        state.viewport,
    ) {
        state.obstacles.push(obstacle);
        state.pickups.extend(pickup);
        state.spawn_timer = 0;
    }

    advance_obstacles(state);
    advance_pickups(state);
}

/// Scroll, score and collide the obstacle stream.
///
/// Reverse index order keeps removal safe mid-pass; every obstacle
/// overlapping the player this tick applies its full effect independently.
fn advance_obstacles(state: &mut GameState) {
    let speed = state.speed;
    let player_x = state.player.pos.x;

    for i in (0..state.obstacles.len()).rev() {
        let obstacle = &mut state.obstacles[i];
        obstacle.pos.x -= speed;
        let right = obstacle.right_edge();

        // Score exactly once, the moment the trailing edge clears the player
        if !obstacle.passed && right < player_x {
            obstacle.passed = true;
            state.score += PASS_POINTS;
        }

        if right < DESPAWN_X {
            state.obstacles.remove(i);
            continue;
        }

        if player_hits_obstacle(&state.player, &state.obstacles[i]) {
            state.events.push(GameEvent::Hit);
            state.player.lives = state.player.lives.saturating_sub(1);
            // Removed on hit so the same obstacle cannot damage twice
            state.obstacles.remove(i);
            if state.player.lives == 0 {
                state.phase = GamePhase::GameOver;
            }
        }
    }
}

/// Scroll and collect the coin stream. Collected coins keep scrolling
/// (skipped by the renderer) until the normal off-screen prune removes them.
fn advance_pickups(state: &mut GameState) {
    let speed = state.speed;

    for i in (0..state.pickups.len()).rev() {
        state.pickups[i].pos.x -= speed;

        if !state.pickups[i].collected
            && player_collects_pickup(&state.player, &state.pickups[i])
        {
            state.pickups[i].collected = true;
            state.score += PICKUP_POINTS;
        }

        if state.pickups[i].trailing_edge() < DESPAWN_X {
            state.pickups.remove(i);
        }
    }
}
