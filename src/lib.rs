//! Breakout - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Simulation (scene graph, physics, collisions, game state)
//! - `platform`: Toolkit abstraction (input, pacing, presentation) and the blocking driver
//! - `renderer`: WebGPU rendering of the scene graph
//! - `settings`: Presentation settings (colors, scoreboard font)

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use platform::{HeadlessToolkit, Toolkit, ToolkitError, run};
pub use settings::{Settings, SettingsError};
pub use sim::{Game, RunSummary, Session};

/// Game configuration constants
pub mod consts {
    /// Window dimensions (logical units)
    pub const WINDOW_WIDTH: f32 = 400.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Brick grid
    pub const ROWS: usize = 5;
    pub const COLS: usize = 10;
    pub const BRICK_COUNT: usize = ROWS * COLS;
    pub const BRICK_WIDTH: f32 = 36.0;
    pub const BRICK_HEIGHT: f32 = 12.0;
    /// Distance between the top-left corners of neighbouring bricks
    pub const BRICK_STEP_X: f32 = 40.0;
    pub const BRICK_STEP_Y: f32 = 16.0;
    /// Top-left corner of the first brick
    pub const BRICK_ORIGIN_X: f32 = 2.0;
    pub const BRICK_ORIGIN_Y: f32 = 25.0;

    /// Ball radius; its bounding box is 2 * BALL_RADIUS on each side
    pub const BALL_RADIUS: f32 = 10.0;
    /// Initial velocity components are drawn from [min, max)
    pub const BALL_MIN_SPEED: f32 = 1.0;
    pub const BALL_MAX_SPEED: f32 = 3.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 90.0;
    pub const PADDLE_HEIGHT: f32 = 6.0;
    /// Gap between the paddle's bottom edge and the window's bottom edge
    pub const PADDLE_BOTTOM_GAP: f32 = 30.0;

    pub const LIVES: u32 = 3;

    /// Pause at the end of every tick
    pub const TICK_PAUSE_MS: u64 = 5;
    /// Tick length in seconds, for frame-driven frontends
    pub const SIM_DT: f32 = TICK_PAUSE_MS as f32 / 1000.0;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Scoreboard font, in `Family-Size` form
    pub const SCOREBOARD_FONT: &str = "SansSerif-36";
}
