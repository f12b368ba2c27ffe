//! Game state and core simulation types
//!
//! Coordinates are canvas-style: y grows downward, the ground line sits at
//! 90% of the viewport height, and the world scrolls right-to-left.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the first press
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended, waiting for an explicit reset
    GameOver,
}

/// Fire-and-forget notifications emitted by the tick, drained by the
/// platform layer each frame. Playback failures never reach the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A jump fired (budget was available)
    Jump,
    /// The player collided with an obstacle
    Hit,
}

/// Viewport dimensions supplied by the resize collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fixed y below which the player cannot fall
    pub fn ground_y(&self) -> f32 {
        self.height * GROUND_FRACTION
    }
}

/// The controllable runner
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Width/height, fixed once the sprite aspect is known
    pub size: Vec2,
    /// Vertical velocity (negative = rising)
    pub vy: f32,
    /// Remaining jumps before the next ground contact
    pub jumps_left: u8,
    pub lives: u8,
}

impl Player {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pos: Vec2::new(viewport.width * PLAYER_X_FRACTION, viewport.height * 0.7),
            size: Vec2::new(PLAYER_DEFAULT_WIDTH, PLAYER_DEFAULT_HEIGHT),
            vy: 0.0,
            jumps_left: MAX_JUMPS,
            lives: START_LIVES,
        }
    }

    /// Integrate one tick of vertical motion and resolve against the ground.
    /// Ground contact zeroes velocity and restores the jump budget.
    pub fn apply_gravity(&mut self, ground_y: f32) {
        self.vy += GRAVITY;
        self.pos.y += self.vy;
        if self.pos.y + self.size.y > ground_y {
            self.pos.y = ground_y - self.size.y;
            self.vy = 0.0;
            self.jumps_left = MAX_JUMPS;
        }
    }

    /// Start a jump if budget remains. Returns whether a jump fired so the
    /// tick can emit the notification; an exhausted budget is a silent no-op.
    pub fn jump(&mut self) -> bool {
        if self.jumps_left == 0 {
            return false;
        }
        self.vy = JUMP_IMPULSE;
        self.jumps_left -= 1;
        true
    }

    /// Variable jump height: while the hold input is active and a jump is in
    /// flight (vy < 0), ease the deceleration. Inert otherwise, so it is safe
    /// to run in every phase.
    pub fn sustain(&mut self, held: bool) {
        if held && self.vy < 0.0 {
            self.vy += JUMP_SUSTAIN_BIAS;
        }
    }

    /// Recompute size and resting position from the viewport and the loaded
    /// sprite's aspect ratio (width / height).
    pub fn apply_layout(&mut self, viewport: Viewport, sprite_aspect: f32) {
        let h = viewport.height * PLAYER_HEIGHT_FRACTION;
        self.size = Vec2::new(h * sprite_aspect * PLAYER_WIDTH_SCALE, h);
        self.pos.x = viewport.width * PLAYER_X_FRACTION;
        self.pos.y = viewport.ground_y() - h - PLAYER_GROUND_GAP;
    }
}

/// A scrolling pillar
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Set once the trailing edge crosses the player's leading edge;
    /// guards the one-time pass score.
    pub passed: bool,
}

impl Obstacle {
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// A collectible coin
#[derive(Debug, Clone)]
pub struct Pickup {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    /// Collected coins keep scrolling (invisible) until pruned off-screen
    pub collected: bool,
}

impl Pickup {
    pub fn trailing_edge(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// Complete simulation state, owned by one controller and mutated only by
/// the tick.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// All spawn randomness flows through this
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// World scroll speed; only ever increases
    pub speed: f32,
    /// Ticks since the last obstacle spawn
    pub spawn_timer: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub viewport: Viewport,
    /// Sprite width/height ratio, known once the asset loads
    pub sprite_aspect: Option<f32>,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub pickups: Vec<Pickup>,
    /// Out-queue drained by the platform layer after each tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh state on the title screen
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            score: 0,
            speed: START_SPEED,
            spawn_timer: 0,
            time_ticks: 0,
            viewport,
            sprite_aspect: None,
            player: Player::new(viewport),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Restart after a game over: world and player state are reinitialized,
    /// entity collections cleared, and play resumes immediately (the title
    /// screen is not revisited).
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.pickups.clear();
        self.events.clear();
        self.spawn_timer = 0;
        self.time_ticks = 0;
        self.score = 0;
        self.speed = START_SPEED;
        self.player.pos.y = self.viewport.height * 0.7;
        self.player.vy = 0.0;
        self.player.jumps_left = MAX_JUMPS;
        self.player.lives = START_LIVES;
        self.phase = GamePhase::Running;
    }

    /// Resize notification from the platform layer
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        if let Some(aspect) = self.sprite_aspect {
            self.player.apply_layout(self.viewport, aspect);
        }
    }

    /// Sprite-load notification; fixes the player's box from the asset
    pub fn set_sprite_aspect(&mut self, aspect: f32) {
        self.sprite_aspect = Some(aspect);
        self.player.apply_layout(self.viewport, aspect);
    }

    /// Take the events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
