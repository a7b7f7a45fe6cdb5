//! Collision detection against the scene graph
//!
//! The ball is probed at the four corners of its bounding box. Those corners
//! lie outside the ball's own ellipse, so the ball never hits itself.

use super::scene::{ObjectTag, Scene};
use super::state::{Ball, BrickId};

/// What the ball ran into this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    None,
    Paddle,
    /// The scoreboard label; never scores, never bounces
    Label,
    Brick(BrickId),
}

impl From<ObjectTag> for Collision {
    fn from(tag: ObjectTag) -> Self {
        match tag {
            ObjectTag::Paddle => Collision::Paddle,
            ObjectTag::Label => Collision::Label,
            ObjectTag::Brick(id) => Collision::Brick(id),
            ObjectTag::Ball => Collision::None,
        }
    }
}

/// First object hit by a corner of the ball's bounding box.
///
/// Corners are probed top-left, top-right, bottom-left, bottom-right; the
/// first one that lands on an object decides, even if later corners would
/// hit something else.
pub fn detect_collision(scene: &Scene, ball: &Ball) -> Collision {
    ball.corners()
        .into_iter()
        .filter_map(|corner| scene.object_at(corner))
        .find(|object| object.tag != ObjectTag::Ball)
        .map_or(Collision::None, |object| object.tag.into())
}
