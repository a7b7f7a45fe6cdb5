//! Platform abstraction layer
//!
//! The game consumes a windowing toolkit through [`Toolkit`]:
//! - Input events (mouse moves, clicks)
//! - Time (fixed pauses between ticks)
//! - Presentation of the scene
//!
//! [`run`] is the blocking game loop built on top of it.

pub mod headless;

pub use headless::HeadlessToolkit;

use thiserror::Error;

use crate::consts::TICK_PAUSE_MS;
use crate::sim::{RunSummary, Scene, Session, TickInput, Wait};

#[derive(Debug, Error)]
pub enum ToolkitError {
    /// The window or its scene could not be created
    #[error("window unavailable: {0}")]
    WindowUnavailable(String),
    /// The window went away while the game was still running
    #[error("window closed")]
    Closed,
}

/// A mouse-move event, in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMove {
    pub x: f32,
    pub y: f32,
}

/// Windowing collaborator
pub trait Toolkit {
    /// Next pending mouse-move event, without blocking
    fn poll_mouse_move(&mut self) -> Option<MouseMove>;

    /// Block until the player clicks
    fn wait_for_click(&mut self) -> Result<(), ToolkitError>;

    /// Sleep for `millis` milliseconds
    fn pause(&mut self, millis: u64);

    /// Draw the current scene
    fn present(&mut self, scene: &Scene) -> Result<(), ToolkitError>;
}

/// Play one session to the end.
///
/// Waits for the start click, then ticks with a fixed pause after each
/// tick. A lost ball blocks on a click before the ball is re-centered. After
/// game over one more click ends the run.
pub fn run<T: Toolkit + ?Sized>(toolkit: &mut T, session: &mut Session) -> Result<RunSummary, ToolkitError> {
    toolkit.present(session.game().scene())?;

    while !session.is_finished() {
        if session.waiting_for().is_some() {
            toolkit.wait_for_click()?;
            session.click();
            continue;
        }

        let input = TickInput {
            cursor_x: toolkit.poll_mouse_move().map(|m| m.x),
        };
        session.step(&input);
        toolkit.present(session.game().scene())?;

        if session.waiting_for() == Some(Wait::Respawn) {
            toolkit.wait_for_click()?;
            session.click();
            toolkit.present(session.game().scene())?;
        }

        toolkit.pause(TICK_PAUSE_MS);
    }

    Ok(session.summary())
}
