//! Windowless toolkit
//!
//! Drives the game without a display: input comes from a script or from an
//! autopilot that keeps the paddle under the ball. Clicks are answered
//! immediately.

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;

use super::{MouseMove, Toolkit, ToolkitError};
use crate::sim::{ObjectTag, Scene};

/// Where mouse moves come from
#[derive(Debug, Clone)]
enum Pilot {
    /// One entry per poll; `None` means no event that tick. Silent once exhausted.
    Scripted(VecDeque<Option<f32>>),
    /// Track the ball's last presented position
    Autopilot,
}

#[derive(Debug, Clone)]
pub struct HeadlessToolkit {
    pilot: Pilot,
    /// Actually sleep in `pause`
    realtime: bool,
    /// Report the window closed after this many frames
    frame_limit: Option<u64>,
    ball_center: Option<Vec2>,
    polls: u64,
    clicks: u64,
    pauses: u64,
    frames: u64,
}

impl HeadlessToolkit {
    fn with_pilot(pilot: Pilot) -> Self {
        Self {
            pilot,
            realtime: true,
            frame_limit: None,
            ball_center: None,
            polls: 0,
            clicks: 0,
            pauses: 0,
            frames: 0,
        }
    }

    /// Replay cursor positions, one per tick
    pub fn scripted(moves: impl IntoIterator<Item = Option<f32>>) -> Self {
        Self::with_pilot(Pilot::Scripted(moves.into_iter().collect()))
    }

    /// Keep the paddle under the ball
    pub fn autopilot() -> Self {
        Self::with_pilot(Pilot::Autopilot)
    }

    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Clicks answered so far
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    pub fn pauses(&self) -> u64 {
        self.pauses
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Toolkit for HeadlessToolkit {
    fn poll_mouse_move(&mut self) -> Option<MouseMove> {
        self.polls += 1;
        match &mut self.pilot {
            Pilot::Scripted(moves) => moves.pop_front().flatten().map(|x| MouseMove { x, y: 0.0 }),
            Pilot::Autopilot => {
                let center = self.ball_center?;
                // Wander a little around the ball so rallies don't repeat exactly
                let t = self.polls as f32 * 0.01;
                let offset = t.sin() * 15.0 + (t * 0.7).sin() * 10.0;
                Some(MouseMove {
                    x: center.x + offset,
                    y: center.y,
                })
            }
        }
    }

    fn wait_for_click(&mut self) -> Result<(), ToolkitError> {
        self.clicks += 1;
        Ok(())
    }

    fn pause(&mut self, millis: u64) {
        self.pauses += 1;
        if self.realtime {
            std::thread::sleep(Duration::from_millis(millis));
        }
    }

    fn present(&mut self, scene: &Scene) -> Result<(), ToolkitError> {
        self.frames += 1;
        if let Some(limit) = self.frame_limit {
            if self.frames > limit {
                return Err(ToolkitError::Closed);
            }
        }
        self.ball_center = scene
            .find_tagged(ObjectTag::Ball)
            .map(|ball| ball.pos + ball.size / 2.0);
        Ok(())
    }
}
