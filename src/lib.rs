//! Breakwall - a classic brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `render`: Frame composition consumed by an external drawing surface
//! - `audio`: Sound cues (procedural Web Audio on wasm)
//! - `settings`: User preferences
//! - `highscores`: In-memory session leaderboard

pub mod audio;
pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Side length of one grid cell in pixels
    pub const CELL_SIZE: f32 = 48.0;
    /// Fixed simulation tick interval in milliseconds
    pub const TICK_MS: u32 = 28;
    /// Fixed simulation timestep in seconds (for frame accumulators)
    pub const TICK_DT: f32 = TICK_MS as f32 / 1000.0;
    /// Maximum ticks consumed per animation frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 8;

    /// Paddle peak speed in velocity units (reached after holding a key)
    pub const PADDLE_MAX_SPEED: i32 = 14;
    /// Paddle width in cells
    pub const PADDLE_WIDTH_CELLS: f32 = 2.0;
    /// Pixels moved per tick at full paddle speed
    pub const PADDLE_STRIDE: f32 = 8.0;

    /// Ball radius as a fraction of the cell size
    pub const BALL_RADIUS_FRAC: f32 = 0.4;
    /// Ball cruise speed as a fraction of the cell size
    pub const BALL_SPEED_FRAC: f32 = 1.0 / 9.0;
    /// Ball speed cap as a fraction of the cell size
    pub const BALL_MAX_SPEED_FRAC: f32 = 1.0 / 5.0;
    /// Lives per game
    pub const START_LIVES: u32 = 3;

    /// Rows of open travel space added below the brick rows
    pub const STAGE_MARGIN_ROWS: u32 = 4;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_deg(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}
