//! Headless demo runner
//!
//! Drives the simulation at the fixed timestep with a simple autopilot,
//! logging the events each tick produces. Useful for watching a run from
//! a terminal and for profiling the core without a renderer attached.

use std::time::{Duration, Instant};

use invaders::consts::SIM_DT;
use invaders::sim::{tick, GameEvent, GamePhase, GameState, TickInput};
use invaders::{FileHighScore, GameConfig, HighScoreStore};

fn main() {
    env_logger::init();

    let config = GameConfig::default();
    let store = FileHighScore::default();
    let high_score = store.load();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
        ^ u64::from(std::process::id());

    let mut state = match GameState::new(seed, config, high_score) {
        Ok(state) => state,
        Err(err) => {
            log::error!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };
    log::info!("starting run, seed {seed}, high score {high_score}");

    let frame = Duration::from_secs_f32(SIM_DT);
    loop {
        let started = Instant::now();
        let input = autopilot(&state);
        tick(&mut state, &input);

        for event in state.take_events() {
            match &event {
                GameEvent::Audio(audio) => log::debug!("audio: {}", audio.tag()),
                GameEvent::NewHighScore { score } => {
                    log::info!("new high score: {score}");
                    store.save(*score);
                }
                other => log::info!("{other:?}"),
            }
        }

        if state.phase == GamePhase::GameOver {
            log::info!(
                "run over: score {}, level {}, {} ticks",
                state.score,
                state.level,
                state.time_ticks
            );
            break;
        }

        if let Some(remaining) = frame.checked_sub(started.elapsed()) {
            std::thread::sleep(remaining);
        }
    }
}

/// Chase the nearest alien column and fire whenever allowed
fn autopilot(state: &GameState) -> TickInput {
    let target_x = state
        .aliens
        .iter()
        .filter(|a| a.alive)
        .map(|a| a.pos.x)
        .min_by(|a, b| {
            let da = (a - state.player.pos.x).abs();
            let db = (b - state.player.pos.x).abs();
            da.total_cmp(&db)
        });

    let mut input = TickInput {
        fire: true,
        ..TickInput::default()
    };
    if let Some(x) = target_x {
        if x < state.player.pos.x - 5.0 {
            input.move_left = true;
        } else if x > state.player.pos.x + 5.0 {
            input.move_right = true;
        }
    }
    input
}
