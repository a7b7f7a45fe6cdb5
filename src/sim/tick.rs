//! One simulation step
//!
//! Input, ball advance, collision, walls, floor: strictly in that order.

use super::collision::{Collision, detect_collision};
use super::game::Game;
use super::state::{Ball, GamePhase};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Cursor x from a mouse-move event, if one arrived
    pub cursor_x: Option<f32>,
}

/// What happened during a tick, for the driver to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing advanced
    Idle,
    /// Normal tick
    Continued,
    /// Ball touched the scoreboard; the rest of the tick was skipped
    LabelPause,
    /// Ball reached the floor with lives left. The driver waits for a click,
    /// then re-centers the ball.
    LifeLost,
    /// Lives or bricks ran out this tick
    GameOver,
}

/// Advance the game by one tick
pub fn tick(game: &mut Game, input: &TickInput) -> TickOutcome {
    if game.state.phase != GamePhase::Playing {
        return TickOutcome::Idle;
    }

    game.state.ticks += 1;

    // Recenter the paddle under the cursor, applied as a delta
    if let Some(cursor_x) = input.cursor_x {
        let dx = game.state.paddle.delta_to(cursor_x);
        game.move_paddle(dx);
    }

    let vel = game.state.ball.vel;
    game.move_ball(vel);

    let collision = detect_collision(game.scene(), &game.state.ball);
    if collision == Collision::Label {
        return TickOutcome::LabelPause;
    }
    resolve_collision(game, collision);

    let size = game.scene().size();
    bounce_off_walls(&mut game.state.ball, size.x);

    let mut outcome = TickOutcome::Continued;
    if game.state.ball.bottom() >= size.y {
        game.state.lives = game.state.lives.saturating_sub(1);
        log::info!("Ball lost, {} lives left", game.state.lives);
        outcome = TickOutcome::LifeLost;
    }

    if game.state.is_over() {
        game.state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks: {} points, {} lives, {} bricks left",
            game.state.ticks,
            game.state.points,
            game.state.lives,
            game.state.bricks_remaining
        );
        return TickOutcome::GameOver;
    }

    outcome
}

/// Apply the effect of whatever the ball hit. The label is handled by the caller.
fn resolve_collision(game: &mut Game, collision: Collision) {
    match collision {
        Collision::Paddle => {
            game.state.ball.vel.y *= -1.0;
        }
        Collision::Brick(id) => {
            if game.destroy_brick(id) {
                game.state.points += 1;
                game.update_scoreboard();
                game.state.ball.vel.y *= -1.0;
                game.state.bricks_remaining -= 1;
                log::debug!(
                    "Brick ({}, {}) destroyed, {} points, {} left",
                    id.row(),
                    id.col(),
                    game.state.points,
                    game.state.bricks_remaining
                );
            }
        }
        Collision::Label | Collision::None => {}
    }
}

/// Reflect off the side walls and the ceiling.
///
/// The horizontal and vertical checks are independent; both can fire in the
/// same tick.
pub fn bounce_off_walls(ball: &mut Ball, width: f32) {
    if ball.right() >= width || ball.left() <= 0.0 {
        ball.vel.x *= -1.0;
    }
    if ball.top() <= 0.0 {
        ball.vel.y *= -1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::scene::ObjectTag;
    use crate::sim::state::BrickId;
    use glam::Vec2;
    use proptest::prelude::*;

    fn playing_game(seed: u64) -> Game {
        let mut game = Game::new(seed, &Settings::default());
        game.start();
        game
    }

    fn brick_objects(game: &Game) -> usize {
        game.scene()
            .objects()
            .filter(|o| matches!(o.tag, ObjectTag::Brick(_)))
            .count()
    }

    #[test]
    fn test_tick_idle_until_started() {
        let mut game = Game::new(1, &Settings::default());
        let before = game.state.ball.pos;
        assert_eq!(tick(&mut game, &TickInput::default()), TickOutcome::Idle);
        assert_eq!(game.state.ball.pos, before);
        assert_eq!(game.state.ticks, 0);
    }

    #[test]
    fn test_first_tick_touches_scoreboard() {
        // The ball starts under the centered label
        let mut game = playing_game(1);
        let vel = game.state.ball.vel;
        assert_eq!(tick(&mut game, &TickInput::default()), TickOutcome::LabelPause);
        assert_eq!(game.state.ball.vel, vel);
        assert_eq!(game.state.points, 0);
        assert_eq!(game.state.ball.pos, Vec2::new(190.0, 290.0) + vel);
    }

    #[test]
    fn test_label_hit_skips_wall_bounce() {
        let mut game = playing_game(1);
        game.place_ball(Vec2::new(395.0, 400.0), Vec2::new(2.0, 1.0));
        // Covers the ball's top-left corner after the move to (397, 401)
        game.place_label(Vec2::new(380.0, 390.0));

        assert_eq!(tick(&mut game, &TickInput::default()), TickOutcome::LabelPause);
        assert!(game.state.ball.right() >= WINDOW_WIDTH);
        assert_eq!(game.state.ball.vel, Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_label_hit_skips_floor() {
        let mut game = playing_game(1);
        game.place_ball(Vec2::new(200.0, 590.0), Vec2::new(1.0, 2.0));
        game.place_label(Vec2::new(190.0, 580.0));

        assert_eq!(tick(&mut game, &TickInput::default()), TickOutcome::LabelPause);
        assert!(game.state.ball.bottom() >= WINDOW_HEIGHT);
        assert_eq!(game.state.lives, LIVES);
        assert_eq!(game.state.ball.vel, Vec2::new(1.0, 2.0));
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_paddle_delta_translation() {
        let mut game = playing_game(1);
        game.place_paddle(100.0);
        // Cursor 20 units right of the paddle's center
        let cursor_x = 100.0 + PADDLE_WIDTH / 2.0 + 20.0;
        tick(&mut game, &TickInput { cursor_x: Some(cursor_x) });
        assert_eq!(game.state.paddle.pos.x, 120.0);
        assert_eq!(game.scene().position(game.paddle_object()).unwrap().x, 120.0);
    }

    #[test]
    fn test_paddle_is_not_clamped() {
        let mut game = playing_game(1);
        tick(&mut game, &TickInput { cursor_x: Some(-300.0) });
        assert_eq!(game.state.paddle.pos.x, -300.0 - PADDLE_WIDTH / 2.0);
        assert_eq!(game.state.paddle.pos.y, 564.0);
    }

    #[test]
    fn test_paddle_bounce() {
        let mut game = playing_game(1);
        game.place_ball(Vec2::new(180.0, 543.0), Vec2::new(1.0, 2.0));
        assert_eq!(tick(&mut game, &TickInput::default()), TickOutcome::Continued);
        assert_eq!(game.state.ball.vel, Vec2::new(1.0, -2.0));
        assert_eq!(game.state.points, 0);
        assert_eq!(game.state.lives, LIVES);
    }

    #[test]
    fn test_brick_hit_scores_and_removes() {
        let mut game = playing_game(1);
        game.place_ball(Vec2::new(125.0, 102.0), Vec2::new(1.0, -2.0));
        assert_eq!(tick(&mut game, &TickInput::default()), TickOutcome::Continued);

        let id = BrickId::new(4, 3);
        assert!(!game.state.bricks.get(id).unwrap().present);
        assert_eq!(game.state.points, 1);
        assert_eq!(game.state.bricks_remaining, BRICK_COUNT as u32 - 1);
        assert_eq!(game.state.ball.vel, Vec2::new(1.0, 2.0));
        assert_eq!(brick_objects(&game), BRICK_COUNT - 1);

        let label = game.scene().get(game.label_object()).unwrap();
        assert_eq!(label.text(), Some("1"));
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut ball = Ball {
            pos: Vec2::new(0.0, 100.0),
            vel: Vec2::new(-1.0, 1.0),
            radius: BALL_RADIUS,
        };
        bounce_off_walls(&mut ball, WINDOW_WIDTH);
        assert_eq!(ball.vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_corner_bounce_flips_both_axes() {
        let mut ball = Ball {
            pos: Vec2::new(0.0, 0.0),
            vel: Vec2::new(-2.0, -1.5),
            radius: BALL_RADIUS,
        };
        bounce_off_walls(&mut ball, WINDOW_WIDTH);
        assert_eq!(ball.vel, Vec2::new(2.0, 1.5));

        let mut ball = Ball {
            pos: Vec2::new(WINDOW_WIDTH - 2.0 * BALL_RADIUS, 300.0),
            vel: Vec2::new(2.0, 1.0),
            radius: BALL_RADIUS,
        };
        bounce_off_walls(&mut ball, WINDOW_WIDTH);
        assert_eq!(ball.vel, Vec2::new(-2.0, 1.0));
    }

    #[test]
    fn test_left_wall_bounce_in_tick() {
        let mut game = playing_game(1);
        game.place_ball(Vec2::new(1.0, 300.0), Vec2::new(-1.0, 1.0));
        assert_eq!(tick(&mut game, &TickInput::default()), TickOutcome::Continued);
        assert_eq!(game.state.ball.pos, Vec2::new(0.0, 301.0));
        assert_eq!(game.state.ball.vel, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_floor_with_lives_left() {
        let mut game = playing_game(1);
        game.place_ball(Vec2::new(100.0, 578.0), Vec2::new(1.0, 2.0));
        assert_eq!(tick(&mut game, &TickInput::default()), TickOutcome::LifeLost);
        assert_eq!(game.state.lives, LIVES - 1);
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_last_life_ends_game_in_place() {
        let mut game = playing_game(1);
        game.state.lives = 1;
        game.place_ball(Vec2::new(100.0, 585.0), Vec2::new(1.0, 2.0));
        assert_eq!(tick(&mut game, &TickInput::default()), TickOutcome::GameOver);
        assert_eq!(game.state.lives, 0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        // Not re-centered
        assert_eq!(game.state.ball.pos, Vec2::new(101.0, 587.0));

        assert_eq!(tick(&mut game, &TickInput::default()), TickOutcome::Idle);
    }

    #[test]
    fn test_clearing_all_bricks_ends_game() {
        let mut game = playing_game(1);
        let targets: Vec<_> = game.state.bricks.iter().map(|b| b.pos).collect();

        for (i, brick_pos) in targets.into_iter().enumerate() {
            assert_eq!(game.phase(), GamePhase::Playing);
            game.place_ball(brick_pos + Vec2::splat(1.0), Vec2::ZERO);
            let outcome = tick(&mut game, &TickInput::default());
            if i + 1 < BRICK_COUNT {
                assert_eq!(outcome, TickOutcome::Continued);
            } else {
                assert_eq!(outcome, TickOutcome::GameOver);
            }
        }

        assert_eq!(game.state.bricks_remaining, 0);
        assert_eq!(game.state.points, BRICK_COUNT as u32);
        assert_eq!(game.state.lives, LIVES);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(brick_objects(&game), 0);
    }

    #[test]
    fn test_tracking_paddle_keeps_ball_in_play() {
        let mut game = playing_game(2024);
        for _ in 0..2000 {
            let cursor_x = Some(game.state.ball.center().x);
            let outcome = tick(&mut game, &TickInput { cursor_x });
            assert_ne!(outcome, TickOutcome::LifeLost);
            if outcome == TickOutcome::GameOver {
                break;
            }
        }
        assert_eq!(game.state.lives, LIVES);
        assert!(game.state.points > 0);
        assert_eq!(game.state.points + game.state.bricks_remaining, BRICK_COUNT as u32);
    }

    proptest! {
        #[test]
        fn prop_paddle_moves_by_pure_delta(start in -500.0f32..900.0, cursor in -500.0f32..900.0) {
            let mut game = playing_game(5);
            game.place_paddle(start);
            tick(&mut game, &TickInput { cursor_x: Some(cursor) });
            let expected = cursor - PADDLE_WIDTH / 2.0;
            prop_assert!((game.state.paddle.pos.x - expected).abs() < 1e-3);
            prop_assert_eq!(game.state.paddle.pos.y, WINDOW_HEIGHT - PADDLE_HEIGHT - PADDLE_BOTTOM_GAP);
        }

        #[test]
        fn prop_score_mirrors_destroyed_bricks(
            seed in any::<u64>(),
            cursors in prop::collection::vec(prop::option::of(-100.0f32..500.0), 1..600),
        ) {
            let mut game = playing_game(seed);
            let mut last_points = 0;
            let mut last_remaining = BRICK_COUNT as u32;

            for cursor_x in cursors {
                let outcome = tick(&mut game, &TickInput { cursor_x });
                let state = &game.state;

                prop_assert!(state.points >= last_points);
                prop_assert!(state.points - last_points <= 1);
                prop_assert!(state.bricks_remaining <= last_remaining);
                prop_assert_eq!(state.points + state.bricks_remaining, BRICK_COUNT as u32);
                prop_assert_eq!(state.bricks.present_count() as u32, state.bricks_remaining);
                prop_assert_eq!(brick_objects(&game) as u32, state.bricks_remaining);
                prop_assert_eq!(outcome == TickOutcome::GameOver, game.state.is_over());

                last_points = game.state.points;
                last_remaining = game.state.bricks_remaining;
                match outcome {
                    TickOutcome::LifeLost => game.recenter_ball(),
                    TickOutcome::GameOver => break,
                    _ => {}
                }
            }
        }
    }
}
