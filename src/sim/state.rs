//! Game state and phase machine
//!
//! All mutation happens synchronously inside one tick's resolver pass;
//! input events only flip the paddle's direction flag or the phase, so no
//! locking is needed when events and ticks share a thread.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::brick::BrickField;
use super::level::{Layout, LayoutError};
use super::paddle::{Direction, Paddle};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Tick loop suspended; also entered after a non-fatal life loss
    Paused,
    /// Active gameplay
    Running,
    /// Every breakable brick destroyed; terminal for this tick loop
    NextLevel,
    /// Out of lives; terminal until restart
    GameOver,
}

/// Fire-and-forget cues produced during a tick, consumed by the audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WallBounce,
    PaddleBounce,
    /// Brick hit without breaking
    Crack,
    /// Brick destroyed
    Break,
    /// Ball fell past the bottom boundary
    Death,
}

/// Logical input commands; key-code mapping happens at the platform layer
/// and unrecognized codes never reach the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    TogglePause,
}

/// Complete game state for one session
pub struct GameState {
    layouts: Vec<Layout>,
    pub level: usize,
    pub cell: f32,
    pub width_units: u32,
    pub height_units: u32,
    pub field: BrickField,
    pub paddle: Paddle,
    pub ball: Ball,
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
    /// Ticks elapsed since construction or full reset
    pub ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub(super) rng: Pcg32,
}

impl GameState {
    /// Create a session over a rotation of layouts. Layouts are validated
    /// up front; a malformed set is a configuration error.
    pub fn new(layouts: Vec<Layout>, seed: u64) -> Result<Self, LayoutError> {
        if layouts.is_empty() {
            return Err(LayoutError::NoRows);
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        // Quantized opening serve: one of seven downward angles
        let angle = (rng.random_range(0..=6) * 15 + 225) as f32;
        let (field, paddle, ball, width_units, height_units) =
            Self::build_stage(&layouts[0], CELL_SIZE, angle);

        log::info!(
            "new game: {} layouts, stage {}x{} cells, seed {}",
            layouts.len(),
            width_units,
            height_units,
            seed
        );

        Ok(Self {
            layouts,
            level: 0,
            cell: CELL_SIZE,
            width_units,
            height_units,
            field,
            paddle,
            ball,
            score: 0,
            high_score: 0,
            phase: GamePhase::Paused,
            ticks: 0,
            events: Vec::new(),
            rng,
        })
    }

    fn build_stage(
        layout: &Layout,
        cell: f32,
        ball_angle: f32,
    ) -> (BrickField, Paddle, Ball, u32, u32) {
        let width_units = layout.width_units();
        let height_units = layout.height_units();
        let stage_w = width_units as f32 * cell;

        let field = BrickField::from_layout(layout, cell);
        let paddle = Paddle::new(
            stage_w / 2.0 - cell,
            height_units as f32 * cell,
            PADDLE_WIDTH_CELLS * cell,
            cell / 2.0,
            PADDLE_MAX_SPEED,
        );
        let ball = Ball::new(
            Vec2::new(stage_w / 2.0, (height_units as f32 - 0.5) * cell),
            BALL_RADIUS_FRAC * cell,
            ball_angle,
            BALL_SPEED_FRAC * cell,
            BALL_MAX_SPEED_FRAC * cell,
            START_LIVES,
        );

        (field, paddle, ball, width_units, height_units)
    }

    /// Stage width in pixels
    pub fn stage_width(&self) -> f32 {
        self.width_units as f32 * self.cell
    }

    /// Bottom boundary used for wall tests; half a cell below the paddle row
    pub fn stage_height(&self) -> f32 {
        (self.height_units as f32 + 0.5) * self.cell
    }

    /// Full drawable height including the status line row
    pub fn screen_height(&self) -> f32 {
        (self.height_units as f32 + 1.0) * self.cell
    }

    /// Soft or hard reset: fold the score into the session high score, then
    /// either restart from the first layout (`full`) or advance cyclically
    /// to the next one
    pub fn reset(&mut self, full: bool) {
        self.high_score = self.high_score.max(self.score);
        if full {
            self.score = 0;
            self.level = 0;
            self.ticks = 0;
        } else {
            self.level = (self.level + 1) % self.layouts.len();
        }

        let angle = self.rng.random_range(225..=315) as f32;
        let layout = &self.layouts[self.level];
        let (field, paddle, ball, width_units, height_units) =
            Self::build_stage(layout, self.cell, angle);
        self.field = field;
        self.paddle = paddle;
        self.ball = ball;
        self.width_units = width_units;
        self.height_units = height_units;
        self.events.clear();
        self.phase = GamePhase::Paused;

        log::info!(
            "stage reset (full={}): level {}, high score {}",
            full,
            self.level + 1,
            self.high_score
        );
    }

    /// Handle a logical key-down
    pub fn key_pressed(&mut self, cmd: Command) {
        match cmd {
            Command::MoveLeft => self.paddle.set_direction(Direction::Left),
            Command::MoveRight => self.paddle.set_direction(Direction::Right),
            Command::TogglePause => match self.phase {
                GamePhase::Running => self.phase = GamePhase::Paused,
                GamePhase::Paused => self.phase = GamePhase::Running,
                GamePhase::GameOver => self.reset(true),
                GamePhase::NextLevel => {}
            },
        }
    }

    /// Handle a logical key-up
    pub fn key_released(&mut self, cmd: Command) {
        match cmd {
            Command::MoveLeft => self.paddle.release(Direction::Left),
            Command::MoveRight => self.paddle.release(Direction::Right),
            Command::TogglePause => {}
        }
    }
}
