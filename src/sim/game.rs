//! A game: state plus the scene it is drawn into

use glam::Vec2;

use super::scene::{ObjectId, Scene};
use super::setup::{init_ball, init_bricks, init_paddle, init_scoreboard, update_scoreboard};
use super::state::{BrickId, GamePhase, GameState};
use crate::consts::*;
use crate::settings::Settings;

/// Owns the game state and the scene. Moves go through here so the two stay in sync.
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    scene: Scene,
    ball: ObjectId,
    paddle: ObjectId,
    label: ObjectId,
}

impl Game {
    /// Build the scene and a fresh state whose launch velocity comes from `seed`
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let mut scene = Scene::new(WINDOW_WIDTH, WINDOW_HEIGHT);
        let bricks = init_bricks(&mut scene, &settings.brick_palette);
        let state = GameState::new(seed, scene.width(), scene.height(), bricks);
        let ball = init_ball(&mut scene, &state.ball, settings.ball_color);
        let paddle = init_paddle(&mut scene, &state.paddle, settings.paddle_color);
        let label = init_scoreboard(&mut scene, settings.font(), settings.label_color);

        let mut game = Self {
            state,
            scene,
            ball,
            paddle,
            label,
        };
        game.update_scoreboard();

        log::info!(
            "Game initialized with seed {} (velocity {:?})",
            seed,
            game.state.ball.vel
        );
        game
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn ball_object(&self) -> ObjectId {
        self.ball
    }

    pub fn paddle_object(&self) -> ObjectId {
        self.paddle
    }

    pub fn label_object(&self) -> ObjectId {
        self.label
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// AwaitingStart -> Playing
    pub fn start(&mut self) {
        if self.state.phase == GamePhase::AwaitingStart {
            self.state.phase = GamePhase::Playing;
            log::info!("Game started");
        }
    }

    /// Redraw the score and keep the label centered
    pub fn update_scoreboard(&mut self) {
        update_scoreboard(&mut self.scene, self.label, self.state.points);
    }

    pub(crate) fn move_paddle(&mut self, dx: f32) {
        self.state.paddle.translate_x(dx);
        self.scene.set_location(self.paddle, self.state.paddle.pos);
    }

    pub(crate) fn move_ball(&mut self, delta: Vec2) {
        self.state.ball.pos += delta;
        self.scene.set_location(self.ball, self.state.ball.pos);
    }

    /// Put the ball back in the middle of the field, velocity unchanged
    pub fn recenter_ball(&mut self) {
        let size = self.scene.size();
        self.state.ball.recenter(size.x, size.y);
        self.scene.set_location(self.ball, self.state.ball.pos);
    }

    /// Remove a brick for good. Returns false if it was already gone.
    pub(crate) fn destroy_brick(&mut self, id: BrickId) -> bool {
        match self.state.bricks.destroy(id) {
            Some(object) => {
                self.scene.remove(object);
                true
            }
            None => false,
        }
    }

    /// Place the ball at `pos` with velocity `vel`
    pub fn place_ball(&mut self, pos: Vec2, vel: Vec2) {
        self.state.ball.pos = pos;
        self.state.ball.vel = vel;
        self.scene.set_location(self.ball, pos);
    }

    /// Place the paddle's top-left corner at `x`, keeping its height
    pub fn place_paddle(&mut self, x: f32) {
        self.state.paddle.pos.x = x;
        self.scene.set_location(self.paddle, self.state.paddle.pos);
    }

    /// Move the scoreboard label without re-centering it
    pub(crate) fn place_label(&mut self, pos: Vec2) {
        self.scene.set_location(self.label, pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scene::{Font, ObjectTag};

    #[test]
    fn test_new_game_layout() {
        let game = Game::new(7, &Settings::default());
        let scene = game.scene();

        // 50 bricks, ball, paddle, label
        assert_eq!(scene.len(), BRICK_COUNT + 3);
        assert_eq!(game.phase(), GamePhase::AwaitingStart);
        assert_eq!(game.state.lives, LIVES);
        assert_eq!(game.state.bricks_remaining, BRICK_COUNT as u32);
        assert_eq!(game.state.points, 0);

        assert_eq!(scene.position(game.ball_object()), Some(Vec2::new(190.0, 290.0)));
        assert_eq!(scene.position(game.paddle_object()), Some(Vec2::new(155.0, 564.0)));
        assert_eq!(scene.get(game.label_object()).and_then(|o| o.text()), Some("0"));

        // Label is painted last, so it wins hit-tests where it overlaps the ball
        let topmost = scene.objects().last().unwrap();
        assert_eq!(topmost.tag, ObjectTag::Label);
    }

    #[test]
    fn test_start_only_from_awaiting_start() {
        let mut game = Game::new(7, &Settings::default());
        game.start();
        assert_eq!(game.phase(), GamePhase::Playing);

        game.state.phase = GamePhase::GameOver;
        game.start();
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_destroy_brick_is_permanent() {
        let mut game = Game::new(7, &Settings::default());
        let id = BrickId::new(0, 0);
        let object = game.state.bricks.get(id).unwrap().object;
        assert!(game.scene().contains_object(object));
        assert!(game.destroy_brick(id));
        assert!(!game.scene().contains_object(object));
        assert!(!game.destroy_brick(id));
        assert_eq!(game.scene().len(), BRICK_COUNT + 2);
        assert!(!game.state.bricks.get(id).unwrap().present);
    }

    #[test]
    fn test_oversized_font_uses_default_label() {
        let settings = Settings {
            scoreboard_font: "SansSerif-2000".to_string(),
            ..Settings::default()
        };
        let game = Game::new(7, &settings);
        let label = game.scene().get(game.label_object()).unwrap();
        assert_eq!(label.size, Font::new("SansSerif", 36.0).measure("0"));
    }
}
