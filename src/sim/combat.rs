//! Projectile lifecycle and collision resolution
//!
//! A projectile is Spawned, flies, and ends Collided or Expired. Terminal
//! shots are flagged dead immediately so nothing else resolves against them
//! in the same tick; `GameState::sweep_dead` removes them afterwards.
//!
//! Per-owner caps are the simulation's only backpressure: a fire request at
//! the cap (or during the player's cooldown) is refused silently.

use glam::Vec2;

use super::shields;
use super::state::{GameState, Owner, Projectile};
use crate::consts::*;
use crate::events::AudioEvent;
use crate::sim::GameEvent;

/// Ticks of cooldown imposed after a player shot
fn cooldown_ticks(state: &GameState) -> u32 {
    (state.config.player_cooldown / SIM_DT).round() as u32
}

/// Fire a player shot from the ship's nose.
/// Refused while the cooldown runs or the player cap is reached.
pub fn try_player_fire(state: &mut GameState) -> bool {
    if state.player.cooldown_ticks > 0 {
        return false;
    }
    if state.live_projectiles(Owner::Player) >= state.config.player_projectile_cap {
        return false;
    }
    let origin = state.player.pos + Vec2::new(0.0, PLAYER_HALF_HEIGHT + PROJECTILE_HALF_HEIGHT);
    spawn(state, origin, Vec2::new(0.0, PROJECTILE_SPEED), Owner::Player);
    state.player.cooldown_ticks = cooldown_ticks(state);
    state.push_audio(AudioEvent::LaserFire);
    true
}

/// Fire an alien shot downward from `origin`.
/// Refused when the alien side's cap is reached.
pub fn try_alien_fire(state: &mut GameState, origin: Vec2) -> bool {
    if state.live_projectiles(Owner::Alien) >= state.config.alien_projectile_cap {
        return false;
    }
    let start = origin - Vec2::new(0.0, ALIEN_HALF_HEIGHT + PROJECTILE_HALF_HEIGHT);
    spawn(state, start, Vec2::new(0.0, -PROJECTILE_SPEED), Owner::Alien);
    true
}

fn spawn(state: &mut GameState, pos: Vec2, vel: Vec2, owner: Owner) {
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos,
        vel,
        owner,
        alive: true,
    });
}

/// Advance all live projectiles and expire the ones that left the screen
pub fn step_projectiles(state: &mut GameState, dt: f32) {
    for p in state.projectiles.iter_mut().filter(|p| p.alive) {
        p.pos += p.vel * dt;
        if p.pos.y > WALL_TOP || p.pos.y < WALL_BOTTOM || p.pos.x < WALL_LEFT || p.pos.x > WALL_RIGHT
        {
            p.alive = false;
        }
    }
}

/// Resolve every live projectile against the opposing side.
///
/// Iteration order is fixed: projectiles in spawn order, candidates in
/// entity-id order, shields always checked first so they act as the
/// defensive layer. Each projectile hits at most one entity.
pub fn resolve_collisions(state: &mut GameState) {
    for pi in 0..state.projectiles.len() {
        if !state.projectiles[pi].alive {
            continue;
        }
        let owner = state.projectiles[pi].owner;
        let shot = state.projectiles[pi].aabb();

        if let Some(bi) = state
            .shields
            .iter()
            .position(|b| !b.destroyed() && b.aabb().intersects(&shot))
        {
            state.projectiles[pi].alive = false;
            shields::damage_block(state, bi);
            continue;
        }

        match owner {
            Owner::Player => {
                if state.boss.active && state.boss.aabb().intersects(&shot) {
                    state.projectiles[pi].alive = false;
                    destroy_boss(state);
                    continue;
                }
                if let Some(ai) = state
                    .aliens
                    .iter()
                    .position(|a| a.alive && a.aabb().intersects(&shot))
                {
                    state.projectiles[pi].alive = false;
                    kill_alien(state, ai);
                }
            }
            Owner::Alien => {
                if state.player.alive && state.player.aabb().intersects(&shot) {
                    state.projectiles[pi].alive = false;
                    hit_player(state);
                }
            }
        }
    }

    resolve_laser_clashes(state);
    grind_shields(state);
}

/// Opposing lasers destroy each other midair
fn resolve_laser_clashes(state: &mut GameState) {
    for pi in 0..state.projectiles.len() {
        if !state.projectiles[pi].alive || state.projectiles[pi].owner != Owner::Player {
            continue;
        }
        let shot = state.projectiles[pi].aabb();
        let clash = state.projectiles.iter().position(|e| {
            e.alive && e.owner == Owner::Alien && e.aabb().intersects(&shot)
        });
        if let Some(ei) = clash {
            state.projectiles[pi].alive = false;
            state.projectiles[ei].alive = false;
            state.push_audio(AudioEvent::Explosion);
        }
    }
}

/// Aliens that have descended into a bunker chew through its blocks
fn grind_shields(state: &mut GameState) {
    for ai in 0..state.aliens.len() {
        if !state.aliens[ai].alive {
            continue;
        }
        let body = state.aliens[ai].aabb();
        for bi in 0..state.shields.len() {
            if !state.shields[bi].destroyed() && state.shields[bi].aabb().intersects(&body) {
                shields::damage_block(state, bi);
            }
        }
    }
}

fn kill_alien(state: &mut GameState, index: usize) {
    let (id, points) = {
        let alien = &mut state.aliens[index];
        alien.alive = false;
        (alien.id, alien.kind.point_value())
    };
    state.push_event(GameEvent::AlienDestroyed { id, points });
    state.push_audio(AudioEvent::Explosion);
    add_score(state, points);
}

fn destroy_boss(state: &mut GameState) {
    state.boss.active = false;
    state.push_event(GameEvent::BossDestroyed {
        points: BOSS_POINTS,
    });
    state.push_audio(AudioEvent::Explosion);
    add_score(state, BOSS_POINTS);
}

fn hit_player(state: &mut GameState) {
    state.player.lives = state.player.lives.saturating_sub(1);
    state.push_event(GameEvent::PlayerHit {
        lives_left: state.player.lives,
    });
    state.push_audio(AudioEvent::PlayerHit);

    // Ship respawns centered; its in-flight shots are forfeited
    state.player.reset_position();
    for p in state
        .projectiles
        .iter_mut()
        .filter(|p| p.owner == Owner::Player)
    {
        p.alive = false;
    }

    if state.player.lives == 0 {
        state.player.alive = false;
    }
}

/// Award points, tracking the extra-life bonus threshold
pub fn add_score(state: &mut GameState, points: u32) {
    state.score += points;
    state.player.points_since_extra_life += points;

    if state.player.points_since_extra_life >= state.config.bonus_life_threshold
        && state.player.lives < state.config.max_lives
    {
        state.player.lives += 1;
        state.player.points_since_extra_life = 0;
        state.push_event(GameEvent::ExtraLife {
            lives: state.player.lives,
        });
        state.push_audio(AudioEvent::ExtraLife);
    }
}
