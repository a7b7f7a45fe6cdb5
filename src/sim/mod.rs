//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed per-tick steps only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod game;
pub mod scene;
pub mod session;
pub mod setup;
pub mod state;
pub mod tick;

pub use collision::{Collision, detect_collision};
pub use game::Game;
pub use scene::{Color, Font, ObjectId, ObjectTag, Scene, SceneObject, Shape};
pub use session::{RunSummary, Session, Wait};
pub use setup::{init_ball, init_bricks, init_paddle, init_scoreboard, update_scoreboard};
pub use state::{Ball, Brick, BrickGrid, BrickId, GamePhase, GameState, Paddle, initial_velocity};
pub use tick::{TickInput, TickOutcome, bounce_off_walls, tick};
