//! Difficulty presets and per-level parameters
//!
//! Level parameters are derived once at level start from the selected
//! difficulty and the level index, and stay immutable for the level.
//! Malformed configuration is fatal at construction time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors, surfaced before any tick runs
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("alien grid is empty ({rows} rows x {cols} cols)")]
    EmptyWave { rows: u32, cols: u32 },
    #[error("starting lives must be at least 1")]
    ZeroLives,
    #[error("max lives {max} is below starting lives {start}")]
    MaxLivesBelowStart { max: u8, start: u8 },
    #[error("shield block hp must be at least 1")]
    ZeroBlockHp,
    #[error("player projectile cap must be at least 1")]
    ZeroPlayerCap,
    #[error("player fire cooldown must be non-negative, got {0}")]
    NegativeCooldown(f32),
}

/// Difficulty selected at startup, fixes the base level parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Seconds between formation steps on level 1
    pub fn base_move_interval(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.30,
            Difficulty::Medium => 0.20,
            Difficulty::Hard => 0.12,
        }
    }

    /// Expected alien shots per second (whole wave) on level 1
    pub fn base_fire_rate(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.4,
            Difficulty::Medium => 0.7,
            Difficulty::Hard => 1.0,
        }
    }

    /// Multiplier applied to the step interval per level
    pub fn speed_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.95,
            Difficulty::Medium => 0.90,
            Difficulty::Hard => 0.85,
        }
    }

    /// Fire rate added per level (shots per second)
    pub fn fire_rate_increment(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.05,
            Difficulty::Medium => 0.08,
            Difficulty::Hard => 0.12,
        }
    }
}

/// Floor for the formation step interval regardless of level
pub const MIN_MOVE_INTERVAL: f32 = 0.05;
/// Ceiling for the aggregate alien fire rate
pub const MAX_FIRE_RATE: f32 = 2.5;

/// Whole-run configuration, validated once at game construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub starting_lives: u8,
    pub max_lives: u8,
    /// Points between extra-life awards
    pub bonus_life_threshold: u32,
    /// Max simultaneous in-flight player projectiles
    pub player_projectile_cap: usize,
    /// Max simultaneous in-flight alien projectiles (whole wave)
    pub alien_projectile_cap: usize,
    /// Seconds between player shots
    pub player_cooldown: f32,
    pub shield_count: u32,
    pub shield_block_hp: u8,
    pub alien_rows: u32,
    pub alien_cols: u32,
    /// Run ends in GameOver once this level is cleared (None = endless)
    pub max_level: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            starting_lives: 3,
            max_lives: 5,
            bonus_life_threshold: 2000,
            player_projectile_cap: 3,
            alien_projectile_cap: 3,
            player_cooldown: 0.5,
            shield_count: 4,
            shield_block_hp: 3,
            alien_rows: 5,
            alien_cols: 11,
            max_level: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alien_rows == 0 || self.alien_cols == 0 {
            return Err(ConfigError::EmptyWave {
                rows: self.alien_rows,
                cols: self.alien_cols,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if self.max_lives < self.starting_lives {
            return Err(ConfigError::MaxLivesBelowStart {
                max: self.max_lives,
                start: self.starting_lives,
            });
        }
        if self.shield_block_hp == 0 {
            return Err(ConfigError::ZeroBlockHp);
        }
        if self.player_projectile_cap == 0 {
            return Err(ConfigError::ZeroPlayerCap);
        }
        if self.player_cooldown < 0.0 || !self.player_cooldown.is_finite() {
            return Err(ConfigError::NegativeCooldown(self.player_cooldown));
        }
        Ok(())
    }
}

/// Parameters of the active level, immutable while the level runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    /// Seconds between formation steps
    pub move_interval: f32,
    /// Expected alien shots per second for the whole wave
    pub fire_rate: f32,
    /// Horizontal pixels per formation step
    pub step_x: f32,
    /// Descent pixels on direction reversal
    pub step_y: f32,
}

impl LevelParams {
    /// Compute the parameters for a 1-based level index.
    ///
    /// The interval shrinks geometrically and the fire rate grows linearly
    /// with the level, both clamped so extreme levels stay playable.
    pub fn for_level(config: &GameConfig, level: u32) -> Self {
        let d = config.difficulty;
        let steps = level.saturating_sub(1);
        let interval =
            (d.base_move_interval() * d.speed_factor().powi(steps as i32)).max(MIN_MOVE_INTERVAL);
        let fire_rate =
            (d.base_fire_rate() + d.fire_rate_increment() * steps as f32).min(MAX_FIRE_RATE);
        Self {
            move_interval: interval,
            fire_rate,
            step_x: crate::consts::FORMATION_STEP_X,
            step_y: crate::consts::FORMATION_STEP_Y,
        }
    }
}
