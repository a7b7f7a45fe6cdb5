//! Scene setup: registers the initial drawables

use glam::Vec2;

use super::scene::{Color, Font, ObjectId, ObjectTag, Scene};
use super::state::{Ball, Brick, BrickGrid, Paddle};
use crate::consts::*;

/// Lay out the `ROWS` x `COLS` brick grid, one palette color per row
pub fn init_bricks(scene: &mut Scene, palette: &[Color; ROWS]) -> BrickGrid {
    BrickGrid::from_fn(|id| {
        let pos = Brick::layout_pos(id);
        let size = Vec2::new(BRICK_WIDTH, BRICK_HEIGHT);
        let color = palette[id.row() % palette.len()];
        let object = scene.add_rect(ObjectTag::Brick(id), pos, size, color);
        Brick {
            id,
            pos,
            size,
            color,
            object,
            present: true,
        }
    })
}

/// Register the ball as a filled circle over its bounding box
pub fn init_ball(scene: &mut Scene, ball: &Ball, color: Color) -> ObjectId {
    scene.add_oval(ObjectTag::Ball, ball.pos, ball.size(), color)
}

pub fn init_paddle(scene: &mut Scene, paddle: &Paddle, color: Color) -> ObjectId {
    scene.add_rect(ObjectTag::Paddle, paddle.pos, paddle.size, color)
}

/// Register the scoreboard label showing "0". Call [`update_scoreboard`] to center it.
pub fn init_scoreboard(scene: &mut Scene, font: Font, color: Color) -> ObjectId {
    scene.add_label(ObjectTag::Label, "0", font, Vec2::ZERO, color)
}

/// Show `points` on the label and re-center it, since its width follows the digit count
pub fn update_scoreboard(scene: &mut Scene, label: ObjectId, points: u32) {
    scene.set_label_text(label, &points.to_string());
    if let Some(size) = scene.object_size(label) {
        let pos = (scene.size() - size) / 2.0;
        scene.set_location(label, pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scene::Shape;
    use crate::sim::state::BrickId;

    fn palette() -> [Color; ROWS] {
        [Color::RED, Color::BLUE, Color::ORANGE, Color::GREEN, Color::YELLOW]
    }

    #[test]
    fn test_init_bricks_registers_full_grid() {
        let mut scene = Scene::new(WINDOW_WIDTH, WINDOW_HEIGHT);
        let grid = init_bricks(&mut scene, &palette());

        assert_eq!(scene.len(), BRICK_COUNT);
        assert_eq!(grid.present_count(), BRICK_COUNT);

        let last = grid.get(BrickId::new(4, 9)).unwrap();
        assert_eq!(last.pos, Vec2::new(362.0, 89.0));
        assert_eq!(last.color, Color::YELLOW);
        assert_eq!(grid.get(BrickId::new(1, 0)).unwrap().color, Color::BLUE);

        let object = scene.get(last.object).unwrap();
        assert_eq!(object.tag, ObjectTag::Brick(BrickId::new(4, 9)));
        assert_eq!(object.size, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT));
        assert_eq!(object.shape, Shape::Rect);
    }

    #[test]
    fn test_update_scoreboard_recenters_label() {
        let mut scene = Scene::new(WINDOW_WIDTH, WINDOW_HEIGHT);
        let font = Font::parse(SCOREBOARD_FONT).unwrap();
        let label = init_scoreboard(&mut scene, font, Color::GRAY);

        update_scoreboard(&mut scene, label, 0);
        let one = scene.get(label).unwrap().clone();
        assert_eq!(one.text(), Some("0"));
        assert!((one.pos.x + one.size.x / 2.0 - WINDOW_WIDTH / 2.0).abs() < 0.001);
        assert!((one.pos.y + one.size.y / 2.0 - WINDOW_HEIGHT / 2.0).abs() < 0.001);

        update_scoreboard(&mut scene, label, 42);
        let two = scene.get(label).unwrap();
        assert_eq!(two.text(), Some("42"));
        assert!(two.pos.x < one.pos.x);
        assert!((two.pos.x + two.size.x / 2.0 - WINDOW_WIDTH / 2.0).abs() < 0.001);
    }
}
