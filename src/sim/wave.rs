//! Wave spawning, formation marching and level progression
//!
//! The formation moves in discrete steps on a timer. The step interval is
//! the level's base interval scaled by the fraction of the wave still
//! alive, so the march accelerates as the wave thins out. Alien fire is
//! sampled per alien each tick from the level's aggregate fire rate, which
//! keeps the expected shot frequency independent of how many aliens remain.

use glam::Vec2;
use rand::Rng;

use super::combat;
use super::shields;
use super::state::{Alien, AlienKind, Boss, Formation, GameState};
use crate::config::LevelParams;
use crate::consts::*;
use crate::events::AudioEvent;
use crate::sim::GamePhase;

/// Slowest effective step interval multiplier, reached with a full wave
const FULL_WAVE_PACE: f32 = 1.0;
/// Fastest multiplier, approached as the last aliens remain
const LAST_ALIEN_PACE: f32 = 0.25;

/// Populate the alien grid for the current level.
/// Row 0 is the top band; kinds follow the band layout in `AlienKind`.
pub fn spawn_wave(state: &mut GameState) {
    state.aliens.clear();
    state.formation = Formation::default();

    let rows = state.config.alien_rows;
    let cols = state.config.alien_cols;
    let grid_width = (cols - 1) as f32 * ALIEN_SPACING_X;
    let start_x = -grid_width / 2.0;
    let start_y = WALL_TOP - FORMATION_TOP_OFFSET;

    for row in 0..rows {
        let kind = AlienKind::for_row(row, rows);
        for col in 0..cols {
            let id = state.next_entity_id();
            state.aliens.push(Alien {
                id,
                kind,
                pos: Vec2::new(
                    start_x + col as f32 * ALIEN_SPACING_X,
                    start_y - row as f32 * ALIEN_SPACING_Y,
                ),
                alive: true,
            });
        }
    }
}

/// Effective seconds between steps, scaled by how much of the wave lives
fn effective_interval(state: &GameState) -> f32 {
    let total = (state.config.alien_rows * state.config.alien_cols) as f32;
    let alive = state.aliens.iter().filter(|a| a.alive).count() as f32;
    let frac = (alive / total).clamp(0.0, 1.0);
    state.params.move_interval * (LAST_ALIEN_PACE + (FULL_WAVE_PACE - LAST_ALIEN_PACE) * frac)
}

/// Advance the step timer and march the formation when it fires
pub fn update_formation(state: &mut GameState, dt: f32) {
    if state.aliens.iter().all(|a| !a.alive) {
        return;
    }
    state.formation.step_timer += dt;
    let interval = effective_interval(state);
    while state.formation.step_timer >= interval {
        state.formation.step_timer -= interval;
        step_formation(state);
    }
}

/// One discrete formation step. The whole block shifts sideways; when any
/// member reaches the side margin the block descends one row and reverses.
fn step_formation(state: &mut GameState) {
    let dx = state.params.step_x * state.formation.direction;
    for alien in state.aliens.iter_mut().filter(|a| a.alive) {
        alien.pos.x += dx;
    }

    let hit_wall = state.aliens.iter().filter(|a| a.alive).any(|a| {
        a.pos.x - ALIEN_HALF_WIDTH <= WALL_LEFT + FORMATION_SIDE_MARGIN
            || a.pos.x + ALIEN_HALF_WIDTH >= WALL_RIGHT - FORMATION_SIDE_MARGIN
    });
    if hit_wall {
        state.formation.direction = -state.formation.direction;
        for alien in state.aliens.iter_mut().filter(|a| a.alive) {
            alien.pos.y -= state.params.step_y;
        }
    }
}

/// Sample alien fire for this tick.
///
/// Each alive alien draws independently with probability
/// `fire_rate * dt / alive_count`, so the wave's expected output matches
/// the level's aggregate rate regardless of wave size. Draws happen for
/// every alien even past the cap to keep the RNG stream stable.
pub fn sample_alien_fire(state: &mut GameState, dt: f32) {
    let alive = state.aliens.iter().filter(|a| a.alive).count();
    if alive == 0 {
        return;
    }
    let p = (state.params.fire_rate * dt / alive as f32).clamp(0.0, 1.0);
    for i in 0..state.aliens.len() {
        if !state.aliens[i].alive {
            continue;
        }
        let roll: f32 = state.rng.random();
        if roll < p {
            let origin = state.aliens[i].pos;
            combat::try_alien_fire(state, origin);
        }
    }
}

/// Draw the next boss appearance delay from the seeded RNG
pub fn reschedule_boss(state: &mut GameState) {
    state.boss_timer = state.rng.random_range(BOSS_MIN_DELAY..BOSS_MAX_DELAY);
}

/// Count down to the boss, fly it across the top, park it when it exits
pub fn update_boss(state: &mut GameState, dt: f32) {
    if state.boss.active {
        let dir = if state.boss.moving_right { 1.0 } else { -1.0 };
        state.boss.pos.x += dir * BOSS_SPEED * dt;
        let gone = state.boss.pos.x - BOSS_HALF_WIDTH > WALL_RIGHT
            || state.boss.pos.x + BOSS_HALF_WIDTH < WALL_LEFT;
        if gone {
            state.boss = Boss::parked();
            reschedule_boss(state);
        }
        return;
    }

    state.boss_timer -= dt;
    if state.boss_timer <= 0.0 {
        let from_left: bool = state.rng.random();
        let x = if from_left {
            WALL_LEFT - BOSS_HALF_WIDTH
        } else {
            WALL_RIGHT + BOSS_HALF_WIDTH
        };
        state.boss = Boss {
            pos: Vec2::new(x, BOSS_Y),
            active: true,
            moving_right: from_left,
        };
        state.push_audio(AudioEvent::BossEvent);
    }
}

/// True once any alien has descended to the player's row
pub fn wave_reached_player(state: &GameState) -> bool {
    state.aliens.iter().filter(|a| a.alive).any(|a| {
        a.pos.y - ALIEN_HALF_HEIGHT <= state.player.pos.y + PLAYER_HALF_HEIGHT
    })
}

/// Start the next level: fresh wave, fresh shields, recomputed parameters.
/// The score, lives and high score carry over.
pub fn advance_level(state: &mut GameState) {
    state.level += 1;
    state.params = LevelParams::for_level(&state.config, state.level);
    state.projectiles.clear();
    state.player.reset_position();
    state.player.cooldown_ticks = 0;
    state.boss = Boss::parked();
    spawn_wave(state);
    shields::rebuild_shields(state);
    reschedule_boss(state);
    state.phase = GamePhase::Playing;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::Owner;

    fn fresh_state() -> GameState {
        GameState::new(42, GameConfig::default(), 0).unwrap()
    }

    #[test]
    fn wave_is_a_centered_grid() {
        let state = fresh_state();
        let cols = state.config.alien_cols as usize;
        let rows = state.config.alien_rows as usize;
        assert_eq!(state.aliens.len(), rows * cols);

        let min_x = state
            .aliens
            .iter()
            .map(|a| a.pos.x)
            .fold(f32::INFINITY, f32::min);
        let max_x = state
            .aliens
            .iter()
            .map(|a| a.pos.x)
            .fold(f32::NEG_INFINITY, f32::max);
        assert!((min_x + max_x).abs() < 1e-3);

        // Top band is predators, bottom band is drones
        assert_eq!(state.aliens[0].kind, AlienKind::Predator);
        assert_eq!(state.aliens[rows * cols - 1].kind, AlienKind::Drone);
    }

    #[test]
    fn formation_steps_on_the_timer() {
        let mut state = fresh_state();
        let x0 = state.aliens[0].pos.x;
        let interval = state.params.move_interval;
        // Just under one interval: no step yet
        update_formation(&mut state, interval * 0.9);
        assert_eq!(state.aliens[0].pos.x, x0);
        // Crossing the interval fires exactly one step
        update_formation(&mut state, interval * 0.2);
        assert_eq!(state.aliens[0].pos.x, x0 + state.params.step_x);
    }

    #[test]
    fn formation_reverses_and_descends_at_the_wall() {
        let mut state = fresh_state();
        let y0 = state.aliens[0].pos.y;
        let mut reversed = false;
        for _ in 0..2000 {
            update_formation(&mut state, SIM_DT);
            if state.formation.direction < 0.0 {
                reversed = true;
                break;
            }
        }
        assert!(reversed);
        assert_eq!(state.aliens[0].pos.y, y0 - state.params.step_y);
        // No alien ever crosses the wall
        assert!(state
            .aliens
            .iter()
            .all(|a| a.pos.x + ALIEN_HALF_WIDTH <= WALL_RIGHT));
    }

    #[test]
    fn thinning_wave_marches_faster() {
        let mut state = fresh_state();
        let full = effective_interval(&state);
        for alien in state.aliens.iter_mut().skip(1) {
            alien.alive = false;
        }
        let thin = effective_interval(&state);
        assert!(thin < full);
        assert!(thin >= state.params.move_interval * LAST_ALIEN_PACE);
    }

    #[test]
    fn alien_fire_respects_the_cap() {
        let mut state = fresh_state();
        // Force every alien to fire this tick
        state.params.fire_rate = 1e9;
        sample_alien_fire(&mut state, SIM_DT);
        assert!(state.live_projectiles(Owner::Alien) <= state.config.alien_projectile_cap);
    }

    #[test]
    fn alien_fire_is_deterministic_per_seed() {
        let mut a = fresh_state();
        let mut b = GameState::new(42, GameConfig::default(), 0).unwrap();
        for _ in 0..600 {
            sample_alien_fire(&mut a, SIM_DT);
            sample_alien_fire(&mut b, SIM_DT);
        }
        let shots_a: Vec<_> = a.projectiles.iter().map(|p| p.pos).collect();
        let shots_b: Vec<_> = b.projectiles.iter().map(|p| p.pos).collect();
        assert_eq!(shots_a, shots_b);
    }

    #[test]
    fn boss_spawns_after_the_delay_and_exits() {
        let mut state = fresh_state();
        state.boss_timer = 0.5;
        let mut ticks = 0u32;
        while !state.boss.active {
            update_boss(&mut state, SIM_DT);
            ticks += 1;
            assert!(ticks < 60);
        }
        assert!(state.boss.pos.x.abs() > WALL_RIGHT);
        // Fly it across until it leaves the far side
        for _ in 0..5000 {
            update_boss(&mut state, SIM_DT);
            if !state.boss.active {
                break;
            }
        }
        assert!(!state.boss.active);
        assert!(state.boss_timer >= BOSS_MIN_DELAY);
    }

    #[test]
    fn wave_reaching_player_row_is_detected() {
        let mut state = fresh_state();
        assert!(!wave_reached_player(&state));
        state.aliens[0].pos.y = state.player.pos.y;
        assert!(wave_reached_player(&state));
    }

    #[test]
    fn advance_level_resets_the_field_but_not_the_score() {
        let mut state = fresh_state();
        state.score = 750;
        state.shields[0].hp = 1;
        state.projectiles.push(crate::sim::state::Projectile {
            id: 9999,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            owner: Owner::Player,
            alive: true,
        });
        advance_level(&mut state);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 750);
        assert!(state.projectiles.is_empty());
        assert!(state
            .shields
            .iter()
            .all(|b| b.hp == state.config.shield_block_hp));
        assert_eq!(
            state.aliens.len(),
            (state.config.alien_rows * state.config.alien_cols) as usize
        );
        // Next level marches faster
        let l1 = LevelParams::for_level(&state.config, 1);
        assert!(state.params.move_interval < l1.move_interval);
    }
}
