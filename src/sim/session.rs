//! Game session: a game plus the click it is waiting for
//!
//! The simulation never blocks. Where the game has to wait for the player
//! (before the first serve, after a lost ball, after game over) the session
//! records the pending wait and the driver resolves it with [`Session::click`].

use serde::Serialize;

use super::game::Game;
use super::tick::{TickInput, TickOutcome, tick};

/// Why the session is waiting for a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    /// Scene is up; the first click starts play
    Start,
    /// Ball was lost; the next click re-centers it
    Respawn,
    /// Game over; the next click ends the session
    Exit,
}

/// Final numbers of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub points: u32,
    pub lives: u32,
    pub bricks_remaining: u32,
    pub ticks: u64,
}

#[derive(Debug, Clone)]
pub struct Session {
    game: Game,
    waiting: Option<Wait>,
    finished: bool,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            waiting: Some(Wait::Start),
            finished: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn waiting_for(&self) -> Option<Wait> {
        self.waiting
    }

    /// True once the game-over click has been received
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Resolve the pending wait, if any. Clicks while playing are ignored.
    pub fn click(&mut self) {
        match self.waiting.take() {
            Some(Wait::Start) => self.game.start(),
            Some(Wait::Respawn) => self.game.recenter_ball(),
            Some(Wait::Exit) => {
                self.finished = true;
                log::info!("Session finished");
            }
            None => {}
        }
    }

    /// Run one tick unless a click is pending. Returns `None` when nothing ran.
    pub fn step(&mut self, input: &TickInput) -> Option<TickOutcome> {
        if self.finished || self.waiting.is_some() {
            return None;
        }
        let outcome = tick(&mut self.game, input);
        match outcome {
            TickOutcome::LifeLost => self.waiting = Some(Wait::Respawn),
            TickOutcome::GameOver => self.waiting = Some(Wait::Exit),
            _ => {}
        }
        Some(outcome)
    }

    pub fn summary(&self) -> RunSummary {
        let state = &self.game.state;
        RunSummary {
            seed: state.seed,
            points: state.points,
            lives: state.lives,
            bricks_remaining: state.bricks_remaining,
            ticks: state.ticks,
        }
    }
}
