//! Fixed-timestep tick orchestration
//!
//! One call to [`tick`] advances the simulation by exactly `SIM_DT`.
//! Phases inside a tick run in a fixed order: input and movement first,
//! then collision resolution, then end-of-tick evaluation and the dead
//! sweep. Pausing freezes everything; a paused state resumed later is
//! bit-identical to one that was never paused.

use super::combat;
use super::state::{GamePhase, GameState};
use super::wave;
use crate::consts::*;
use crate::events::AudioEvent;
use crate::sim::GameEvent;

/// Player intent for one tick, already mapped from raw input by the shell.
/// `pause` and `restart` are edge-triggered (true on the press only).
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub pause: bool,
    pub restart: bool,
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Playing => {
            if input.pause {
                state.phase = GamePhase::Paused;
                return;
            }
        }
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.reset_run();
            }
            return;
        }
        GamePhase::LevelCleared => {
            state.breather_ticks = state.breather_ticks.saturating_sub(1);
            if state.breather_ticks == 0 {
                let finished = state
                    .config
                    .max_level
                    .is_some_and(|max| state.level >= max);
                if finished {
                    game_over(state);
                } else {
                    wave::advance_level(state);
                }
            }
            return;
        }
    }

    state.time_ticks += 1;

    move_player(state, input);
    if input.fire {
        combat::try_player_fire(state);
    }
    wave::update_formation(state, SIM_DT);
    wave::update_boss(state, SIM_DT);
    wave::sample_alien_fire(state, SIM_DT);
    combat::step_projectiles(state, SIM_DT);

    combat::resolve_collisions(state);

    evaluate(state);
    state.sweep_dead();
}

fn move_player(state: &mut GameState, input: &TickInput) {
    let mut dir = 0.0;
    if input.move_left {
        dir -= 1.0;
    }
    if input.move_right {
        dir += 1.0;
    }
    let limit = WALL_RIGHT - PLAYER_HALF_WIDTH;
    state.player.pos.x = (state.player.pos.x + dir * PLAYER_SPEED * SIM_DT).clamp(-limit, limit);
    state.player.cooldown_ticks = state.player.cooldown_ticks.saturating_sub(1);
}

/// End-of-tick phase evaluation: defeat checks first, then wave clear
fn evaluate(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if !state.player.alive || wave::wave_reached_player(state) {
        game_over(state);
        return;
    }
    if state.aliens.iter().all(|a| !a.alive) {
        state.phase = GamePhase::LevelCleared;
        state.breather_ticks = BREATHER_DURATION_TICKS;
        state.push_event(GameEvent::LevelCleared { level: state.level });
        state.push_audio(AudioEvent::LevelClear);
    }
}

/// Terminal transition. Runs at most once per run, so the high score
/// comparison and its event fire at most once.
fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.push_event(GameEvent::GameOver { score: state.score });
    state.push_audio(AudioEvent::GameOver);
    if state.score > state.high_score {
        state.high_score = state.score;
        state.push_event(GameEvent::NewHighScore { score: state.score });
    }
}
