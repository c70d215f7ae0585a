//! Game state and core simulation types
//!
//! All state that drives the deterministic tick lives here. There are no
//! process-wide singletons: score, lives and the RNG are fields of
//! `GameState` and flow through the tick functions explicitly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use super::{shields, wave};
use crate::config::{ConfigError, GameConfig, LevelParams};
use crate::consts::*;
use crate::events::AudioEvent;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen; nothing advances until resumed
    Paused,
    /// Wave destroyed, short rest before the next level spawns
    LevelCleared,
    /// Run ended
    GameOver,
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Alien,
}

/// A laser shot in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: Owner,
    /// Cleared the instant the shot collides or leaves the screen; dead
    /// shots are skipped by every later check and removed at end of tick
    pub alive: bool,
}

impl Projectile {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            self.pos,
            Vec2::new(PROJECTILE_HALF_WIDTH, PROJECTILE_HALF_HEIGHT),
        )
    }
}

/// Alien variants, one per formation band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlienKind {
    /// Bottom two rows
    Drone,
    /// Middle two rows
    Saucer,
    /// Top row
    Predator,
}

impl AlienKind {
    pub fn point_value(&self) -> u32 {
        match self {
            AlienKind::Drone => 20,
            AlienKind::Saucer => 25,
            AlienKind::Predator => 30,
        }
    }

    pub fn sprite(&self) -> &'static str {
        match self {
            AlienKind::Drone => "alien",
            AlienKind::Saucer => "ufo",
            AlienKind::Predator => "predator",
        }
    }

    /// Kind for a formation row, counted from the top (row 0)
    pub fn for_row(row: u32, rows: u32) -> Self {
        // Mirror the classic layout: predators on top, drones at the bottom
        if row == 0 {
            AlienKind::Predator
        } else if row * 2 < rows {
            AlienKind::Saucer
        } else {
            AlienKind::Drone
        }
    }
}

/// One member of the marching formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alien {
    pub id: u32,
    pub kind: AlienKind,
    pub pos: Vec2,
    /// Cleared on death within the tick; removed at end of tick
    pub alive: bool,
}

impl Alien {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(ALIEN_HALF_WIDTH, ALIEN_HALF_HEIGHT))
    }
}

/// A destructible block belonging to a shield bunker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldBlock {
    pub id: u32,
    pub pos: Vec2,
    pub hp: u8,
}

impl ShieldBlock {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(BLOCK_SIZE / 2.0))
    }

    pub fn destroyed(&self) -> bool {
        self.hp == 0
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub lives: u8,
    pub alive: bool,
    /// Ticks until the next shot is allowed
    pub cooldown_ticks: u32,
    /// Points earned since the last extra life was awarded
    pub points_since_extra_life: u32,
}

impl Player {
    pub fn new(lives: u8) -> Self {
        Self {
            pos: Vec2::new(0.0, PLAYER_Y),
            lives,
            alive: true,
            cooldown_ticks: 0,
            points_since_extra_life: 0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(PLAYER_HALF_WIDTH, PLAYER_HALF_HEIGHT))
    }

    /// Recenter after losing a life
    pub fn reset_position(&mut self) {
        self.pos = Vec2::new(0.0, PLAYER_Y);
    }
}

/// The bonus saucer that crosses the top of the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub active: bool,
    pub moving_right: bool,
}

impl Boss {
    pub fn parked() -> Self {
        Self {
            pos: Vec2::new(0.0, BOSS_Y),
            active: false,
            moving_right: true,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(BOSS_HALF_WIDTH, BOSS_HALF_HEIGHT))
    }
}

/// Shared movement state of the alien formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    /// 1.0 marching right, -1.0 marching left
    pub direction: f32,
    /// Seconds accumulated toward the next step
    pub step_timer: f32,
}

impl Default for Formation {
    fn default() -> Self {
        Self {
            direction: 1.0,
            step_timer: 0.0,
        }
    }
}

/// Discrete outputs of a tick, drained by the shell (fire-and-forget)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Audio(AudioEvent),
    BlockDamaged { id: u32, hp: u8 },
    BlockDestroyed { id: u32 },
    AlienDestroyed { id: u32, points: u32 },
    BossDestroyed { points: u32 },
    PlayerHit { lives_left: u8 },
    ExtraLife { lives: u8 },
    LevelCleared { level: u32 },
    GameOver { score: u32 },
    NewHighScore { score: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; the only source of randomness in the simulation
    pub rng: Pcg32,
    /// Current level (1-based)
    pub level: u32,
    /// Parameters of the active level, immutable until the next level
    pub params: LevelParams,
    pub score: u32,
    /// Best score seen, loaded from the store at startup
    pub high_score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Ticks remaining in the LevelCleared rest period
    pub breather_ticks: u32,
    pub player: Player,
    pub aliens: Vec<Alien>,
    pub shields: Vec<ShieldBlock>,
    pub projectiles: Vec<Projectile>,
    pub boss: Boss,
    /// Seconds until the next boss appearance
    pub boss_timer: f32,
    pub formation: Formation,
    /// Events emitted this tick, drained by the caller
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new run. Fails fast on malformed configuration.
    pub fn new(seed: u64, config: GameConfig, high_score: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(seed, config, high_score))
    }

    /// Build a run from a config known to be valid
    fn from_validated(seed: u64, config: GameConfig, high_score: u32) -> Self {
        let params = LevelParams::for_level(&config, 1);
        let lives = config.starting_lives;
        let mut state = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            params,
            score: 0,
            high_score,
            time_ticks: 0,
            phase: GamePhase::Playing,
            breather_ticks: 0,
            player: Player::new(lives),
            aliens: Vec::new(),
            shields: Vec::new(),
            projectiles: Vec::new(),
            boss: Boss::parked(),
            boss_timer: 0.0,
            formation: Formation::default(),
            events: Vec::new(),
            next_id: 1,
        };
        wave::spawn_wave(&mut state);
        shields::rebuild_shields(&mut state);
        wave::reschedule_boss(&mut state);
        state
    }

    /// Start over after GameOver: score and lives reset, high score kept
    pub fn reset_run(&mut self) {
        let config = self.config.clone();
        let high_score = self.high_score;
        *self = Self::from_validated(self.seed.wrapping_add(1), config, high_score);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn push_audio(&mut self, audio: AudioEvent) {
        self.events.push(GameEvent::Audio(audio));
    }

    /// Drain this tick's events for the external sinks
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// In-flight projectile count for one side, used for the fire caps
    pub fn live_projectiles(&self, owner: Owner) -> usize {
        self.projectiles
            .iter()
            .filter(|p| p.alive && p.owner == owner)
            .count()
    }

    /// Drop dead projectiles, dead aliens and destroyed blocks.
    /// Runs once at the end of each tick so mid-tick checks can still see
    /// the `alive` flags.
    pub fn sweep_dead(&mut self) {
        self.projectiles.retain(|p| p.alive);
        self.aliens.retain(|a| a.alive);
        self.shields.retain(|b| !b.destroyed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_run_spawns_full_wave_and_shields() {
        let config = GameConfig::default();
        let state = GameState::new(7, config.clone(), 0).unwrap();
        assert_eq!(
            state.aliens.len(),
            (config.alien_rows * config.alien_cols) as usize
        );
        assert!(!state.shields.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.lives, config.starting_lives);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig {
            alien_cols: 0,
            ..Default::default()
        };
        assert!(GameState::new(1, config, 0).is_err());
    }

    #[test]
    fn entity_ids_are_unique() {
        let state = GameState::new(3, GameConfig::default(), 0).unwrap();
        let mut ids: Vec<u32> = state.aliens.iter().map(|a| a.id).collect();
        ids.extend(state.shields.iter().map(|b| b.id));
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn aabb_follows_position() {
        let mut alien = Alien {
            id: 1,
            kind: AlienKind::Drone,
            pos: Vec2::new(0.0, 0.0),
            alive: true,
        };
        let before = alien.aabb();
        alien.pos.x += 100.0;
        let after = alien.aabb();
        assert_eq!(after.center.x, before.center.x + 100.0);
    }

    #[test]
    fn kind_for_row_matches_band_layout() {
        assert_eq!(AlienKind::for_row(0, 5), AlienKind::Predator);
        assert_eq!(AlienKind::for_row(1, 5), AlienKind::Saucer);
        assert_eq!(AlienKind::for_row(2, 5), AlienKind::Saucer);
        assert_eq!(AlienKind::for_row(3, 5), AlienKind::Drone);
        assert_eq!(AlienKind::for_row(4, 5), AlienKind::Drone);
    }

    #[test]
    fn reset_run_keeps_high_score() {
        let mut state = GameState::new(9, GameConfig::default(), 0).unwrap();
        state.score = 500;
        state.high_score = 500;
        state.phase = GamePhase::GameOver;
        state.reset_run();
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 500);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
    }
}
