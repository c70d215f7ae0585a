//! Interfaces to the external collaborators
//!
//! The simulation never talks to a window, a speaker or a disk. Rendering
//! reads the state through [`draw_commands`]; audio consumes the
//! fire-and-forget [`AudioEvent`] tags drained from the tick's event list.
//! Dropping either output never affects the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{shields, GamePhase, GameState, Owner};

/// Sound cue tags handed to the audio sink. Playback failures are the
/// sink's problem; the simulation has already moved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioEvent {
    LaserFire,
    Explosion,
    ShieldHit,
    PlayerHit,
    ExtraLife,
    LevelClear,
    GameOver,
    BossEvent,
}

impl AudioEvent {
    /// Stable string tag, doubles as the sound asset key
    pub fn tag(&self) -> &'static str {
        match self {
            AudioEvent::LaserFire => "laser_fire",
            AudioEvent::Explosion => "explosion",
            AudioEvent::ShieldHit => "shield_hit",
            AudioEvent::PlayerHit => "player_hit",
            AudioEvent::ExtraLife => "extra_life",
            AudioEvent::LevelClear => "level_clear",
            AudioEvent::GameOver => "game_over",
            AudioEvent::BossEvent => "boss_event",
        }
    }
}

/// What category of thing a draw command describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Alien,
    Shield,
    Projectile,
    Boss,
    Ui,
}

/// One renderer directive. Positions are world coordinates (origin at
/// screen center, y up); mapping to pixels is the renderer's business.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub sprite: &'static str,
    /// Set for Ui commands only
    pub text: Option<String>,
}

impl DrawCommand {
    fn entity(kind: EntityKind, pos: Vec2, sprite: &'static str) -> Self {
        Self {
            kind,
            pos,
            sprite,
            text: None,
        }
    }

    fn ui(pos: Vec2, sprite: &'static str, text: String) -> Self {
        Self {
            kind: EntityKind::Ui,
            pos,
            sprite,
            text: Some(text),
        }
    }
}

/// Flatten the state into an ordered draw list. Pure read, callable any
/// number of times per tick (or skipped entirely) without side effects.
pub fn draw_commands(state: &GameState) -> Vec<DrawCommand> {
    use crate::consts::*;

    let mut out = Vec::with_capacity(
        1 + state.aliens.len() + state.shields.len() + state.projectiles.len() + 4,
    );

    if state.player.alive {
        out.push(DrawCommand::entity(
            EntityKind::Player,
            state.player.pos,
            "ship",
        ));
    }
    for alien in state.aliens.iter().filter(|a| a.alive) {
        out.push(DrawCommand::entity(
            EntityKind::Alien,
            alien.pos,
            alien.kind.sprite(),
        ));
    }
    for block in state.shields.iter().filter(|b| !b.destroyed()) {
        out.push(DrawCommand::entity(
            EntityKind::Shield,
            block.pos,
            shields::block_sprite(block.hp),
        ));
    }
    if state.boss.active {
        out.push(DrawCommand::entity(EntityKind::Boss, state.boss.pos, "boss"));
    }
    for p in state.projectiles.iter().filter(|p| p.alive) {
        let sprite = match p.owner {
            Owner::Player => "laser_player",
            Owner::Alien => "laser_alien",
        };
        out.push(DrawCommand::entity(EntityKind::Projectile, p.pos, sprite));
    }

    let hud_y = WALL_TOP - 20.0;
    out.push(DrawCommand::ui(
        Vec2::new(WALL_LEFT + 20.0, hud_y),
        "hud",
        format!("Score: {}  Hi: {}", state.score, state.high_score),
    ));
    out.push(DrawCommand::ui(
        Vec2::new(WALL_RIGHT - 20.0, hud_y),
        "hud",
        format!("Lives: {}  Level: {}", state.player.lives, state.level),
    ));
    match state.phase {
        GamePhase::Paused => {
            out.push(DrawCommand::ui(Vec2::ZERO, "banner", "PAUSED".to_string()));
        }
        GamePhase::GameOver => {
            out.push(DrawCommand::ui(
                Vec2::ZERO,
                "banner",
                "GAME OVER".to_string(),
            ));
        }
        GamePhase::LevelCleared => {
            out.push(DrawCommand::ui(
                Vec2::ZERO,
                "banner",
                format!("LEVEL {} CLEARED", state.level),
            ));
        }
        GamePhase::Playing => {}
    }

    out
}
