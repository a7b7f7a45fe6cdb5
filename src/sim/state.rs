//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::scene::{Color, ObjectId};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Scene is built, waiting for the first click
    AwaitingStart,
    /// Active gameplay
    Playing,
    /// Out of lives or out of bricks
    GameOver,
}

/// The ball. `pos` is the top-left corner of its bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball centered in a `width` x `height` field
    pub fn centered(width: f32, height: f32, vel: Vec2) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel,
            radius: BALL_RADIUS,
        };
        ball.recenter(width, height);
        ball
    }

    /// Move back to the middle of the field, keeping the velocity
    pub fn recenter(&mut self, width: f32, height: f32) {
        self.pos = Vec2::new(width / 2.0 - self.radius, height / 2.0 - self.radius);
    }

    pub fn size(&self) -> Vec2 {
        Vec2::splat(2.0 * self.radius)
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + 2.0 * self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + 2.0 * self.radius
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }

    /// Bounding-box corners in probe order: top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Vec2; 4] {
        let d = 2.0 * self.radius;
        [
            self.pos,
            self.pos + Vec2::new(d, 0.0),
            self.pos + Vec2::new(0.0, d),
            self.pos + Vec2::new(d, d),
        ]
    }
}

/// The player's paddle. `pos` is its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    /// Paddle centered horizontally, resting `PADDLE_BOTTOM_GAP` above the bottom edge
    pub fn new(width: f32, height: f32) -> Self {
        let size = Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT);
        Self {
            pos: Vec2::new((width - size.x) / 2.0, height - size.y - PADDLE_BOTTOM_GAP),
            size,
        }
    }

    /// Horizontal shift that puts the paddle's center under `cursor_x`
    pub fn delta_to(&self, cursor_x: f32) -> f32 {
        cursor_x - self.pos.x - self.size.x / 2.0
    }

    /// Shift along x only. No clamping: the paddle may leave the window.
    pub fn translate_x(&mut self, dx: f32) {
        self.pos.x += dx;
    }
}

/// Index of a brick in the grid, `row * COLS + col`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrickId(pub usize);

impl BrickId {
    pub fn new(row: usize, col: usize) -> Self {
        Self(row * COLS + col)
    }

    pub fn row(self) -> usize {
        self.0 / COLS
    }

    pub fn col(self) -> usize {
        self.0 % COLS
    }
}

/// A brick record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brick {
    pub id: BrickId,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    /// Scene object drawing this brick
    pub object: ObjectId,
    /// False once destroyed; bricks never come back
    pub present: bool,
}

impl Brick {
    /// Top-left corner of the brick at `id` in the fixed layout
    pub fn layout_pos(id: BrickId) -> Vec2 {
        Vec2::new(
            BRICK_ORIGIN_X + id.col() as f32 * BRICK_STEP_X,
            BRICK_ORIGIN_Y + id.row() as f32 * BRICK_STEP_Y,
        )
    }
}

/// Fixed arena of `ROWS * COLS` bricks
#[derive(Debug, Clone)]
pub struct BrickGrid {
    bricks: [Brick; BRICK_COUNT],
}

impl BrickGrid {
    /// Build the grid, calling `make` once per brick in row-major order
    pub fn from_fn(mut make: impl FnMut(BrickId) -> Brick) -> Self {
        Self {
            bricks: std::array::from_fn(|i| make(BrickId(i))),
        }
    }

    pub fn get(&self, id: BrickId) -> Option<&Brick> {
        self.bricks.get(id.0)
    }

    /// Mark a brick destroyed. Returns its scene object if it was still present.
    pub fn destroy(&mut self, id: BrickId) -> Option<ObjectId> {
        let brick = self.bricks.get_mut(id.0)?;
        if !brick.present {
            return None;
        }
        brick.present = false;
        Some(brick.object)
    }

    /// Number of bricks still standing
    pub fn present_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.present).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Player lives
    pub lives: u32,
    /// Bricks not yet destroyed
    pub bricks_remaining: u32,
    /// Score; one point per brick
    pub points: u32,
    /// Simulation tick counter
    pub ticks: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
}

impl GameState {
    /// Fresh state for a `width` x `height` field. The ball's velocity is drawn from `seed`.
    pub fn new(seed: u64, width: f32, height: f32, bricks: BrickGrid) -> Self {
        Self {
            seed,
            phase: GamePhase::AwaitingStart,
            lives: LIVES,
            bricks_remaining: BRICK_COUNT as u32,
            points: 0,
            ticks: 0,
            ball: Ball::centered(width, height, initial_velocity(seed)),
            paddle: Paddle::new(width, height),
            bricks,
        }
    }

    /// Whether the run has ended
    pub fn is_over(&self) -> bool {
        self.lives == 0 || self.bricks_remaining == 0
    }
}

/// Launch velocity: each component uniform in `[BALL_MIN_SPEED, BALL_MAX_SPEED)`,
/// so the ball always starts moving right and down
pub fn initial_velocity(seed: u64) -> Vec2 {
    let mut rng = Pcg32::seed_from_u64(seed);
    let vx = rng.random_range(BALL_MIN_SPEED..BALL_MAX_SPEED);
    let vy = rng.random_range(BALL_MIN_SPEED..BALL_MAX_SPEED);
    Vec2::new(vx, vy)
}
