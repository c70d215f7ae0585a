//! Invaders - a deterministic Space Invaders simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, wave control)
//! - `config`: Difficulty presets and level parameter validation
//! - `events`: Draw directives and audio tags for external collaborators
//! - `highscores`: High score load/save

pub mod config;
pub mod events;
pub mod highscores;
pub mod sim;

pub use config::{Difficulty, GameConfig, LevelParams};
pub use highscores::{FileHighScore, HighScoreStore};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Screen dimensions, origin at center, y up
    pub const SCREEN_WIDTH: f32 = 960.0;
    pub const SCREEN_HEIGHT: f32 = 1024.0;
    pub const WALL_LEFT: f32 = -SCREEN_WIDTH / 2.0;
    pub const WALL_RIGHT: f32 = SCREEN_WIDTH / 2.0;
    pub const WALL_TOP: f32 = SCREEN_HEIGHT / 2.0;
    pub const WALL_BOTTOM: f32 = -SCREEN_HEIGHT / 2.0;

    /// Player ship defaults - parked 15% of screen height above the bottom
    pub const PLAYER_Y: f32 = WALL_BOTTOM + SCREEN_HEIGHT * 0.15;
    pub const PLAYER_HALF_WIDTH: f32 = SCREEN_WIDTH * 0.12 / 2.0;
    pub const PLAYER_HALF_HEIGHT: f32 = SCREEN_HEIGHT * 0.015 / 2.0;
    pub const PLAYER_SPEED: f32 = 600.0;

    /// Projectile defaults (both sides share speed and size)
    pub const PROJECTILE_SPEED: f32 = 500.0;
    pub const PROJECTILE_HALF_WIDTH: f32 = 3.0;
    pub const PROJECTILE_HALF_HEIGHT: f32 = 8.0;

    /// Alien formation layout
    pub const ALIEN_SPACING_X: f32 = 60.0;
    pub const ALIEN_SPACING_Y: f32 = 50.0;
    pub const ALIEN_HALF_WIDTH: f32 = 20.0;
    pub const ALIEN_HALF_HEIGHT: f32 = 15.0;
    /// Top formation row sits this far below the top wall
    pub const FORMATION_TOP_OFFSET: f32 = 100.0;
    /// Formation reverses when an alien gets this close to a side wall
    pub const FORMATION_SIDE_MARGIN: f32 = 40.0;
    pub const FORMATION_STEP_X: f32 = 10.0;
    pub const FORMATION_STEP_Y: f32 = 10.0;

    /// Shield bunkers
    pub const BLOCK_SIZE: f32 = 25.0;
    pub const SHIELD_Y: f32 = WALL_BOTTOM + SCREEN_HEIGHT * 0.25;

    /// Boss saucer that crosses the top of the screen
    pub const BOSS_SPEED: f32 = 250.0;
    pub const BOSS_Y: f32 = WALL_TOP - 40.0;
    pub const BOSS_HALF_WIDTH: f32 = 35.0;
    pub const BOSS_HALF_HEIGHT: f32 = 15.0;
    pub const BOSS_POINTS: u32 = 300;
    /// Boss appearance delay range (seconds)
    pub const BOSS_MIN_DELAY: f32 = 15.0;
    pub const BOSS_MAX_DELAY: f32 = 30.0;

    /// Pause between level clear and next wave (2 seconds at 60 Hz)
    pub const BREATHER_DURATION_TICKS: u32 = 2 * 60;
}
