//! Destructible shield bunkers
//!
//! Bunkers are spaced evenly across the play field and built from a fixed
//! arch-shaped block matrix, so every level (and every test run) gets an
//! identical layout. Blocks lose one hit point per hit and are removed at
//! zero; intermediate hp values are only a sprite hint for the renderer.

use glam::Vec2;

use super::state::{GameState, ShieldBlock};
use crate::consts::*;
use crate::events::AudioEvent;
use crate::sim::GameEvent;

/// Bunker shape, top row first. 1 = block present.
/// An arch: rounded top, solid body, notch at the bottom for the player
/// to shoot through diagonally.
const BUNKER_PATTERN: [[u8; 7]; 4] = [
    [0, 1, 1, 1, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1],
    [1, 1, 0, 0, 0, 1, 1],
];

/// Tear down any existing bunkers and build fresh ones at full health.
/// Called at run start and on every level transition.
pub fn rebuild_shields(state: &mut GameState) {
    state.shields.clear();

    let count = state.config.shield_count;
    let hp = state.config.shield_block_hp;
    let spacing = SCREEN_WIDTH / (count + 1) as f32;
    let pattern_rows = BUNKER_PATTERN.len();

    for i in 0..count {
        let x_center = WALL_LEFT + (i + 1) as f32 * spacing;
        for (row, cells) in BUNKER_PATTERN.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let x = x_center + (col as f32 - (cells.len() - 1) as f32 / 2.0) * BLOCK_SIZE;
                let y = SHIELD_Y + (pattern_rows - row) as f32 * BLOCK_SIZE;
                let id = state.next_entity_id();
                state.shields.push(ShieldBlock {
                    id,
                    pos: Vec2::new(x, y),
                    hp,
                });
            }
        }
    }
}

/// Apply one hit of damage to a block. Returns true when the block is
/// destroyed by this hit. Health never goes below zero.
pub fn apply_damage(block: &mut ShieldBlock) -> bool {
    block.hp = block.hp.saturating_sub(1);
    block.destroyed()
}

/// Damage the block at `index` and emit the matching events
pub fn damage_block(state: &mut GameState, index: usize) {
    let (id, destroyed, hp) = {
        let block = &mut state.shields[index];
        let destroyed = apply_damage(block);
        (block.id, destroyed, block.hp)
    };
    if destroyed {
        state.push_event(GameEvent::BlockDestroyed { id });
    } else {
        state.push_event(GameEvent::BlockDamaged { id, hp });
    }
    state.push_audio(AudioEvent::ShieldHit);
}

/// Sprite hint for the renderer based on remaining health
pub fn block_sprite(hp: u8) -> &'static str {
    match hp {
        0 => "shield_gone",
        1 => "shield_critical",
        2 => "shield_cracked",
        _ => "shield_full",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn fresh_state() -> GameState {
        GameState::new(42, GameConfig::default(), 0).unwrap()
    }

    #[test]
    fn layout_is_deterministic() {
        let a = fresh_state();
        let b = fresh_state();
        assert_eq!(a.shields.len(), b.shields.len());
        for (x, y) in a.shields.iter().zip(&b.shields) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.hp, y.hp);
        }
    }

    #[test]
    fn bunker_count_matches_pattern() {
        let state = fresh_state();
        let blocks_per_bunker: usize = BUNKER_PATTERN
            .iter()
            .flatten()
            .filter(|&&c| c == 1)
            .count();
        assert_eq!(
            state.shields.len(),
            blocks_per_bunker * state.config.shield_count as usize
        );
    }

    #[test]
    fn bunkers_are_centered_on_their_anchors() {
        let state = fresh_state();
        let count = state.config.shield_count as usize;
        let spacing = SCREEN_WIDTH / (count + 1) as f32;
        let per_bunker = state.shields.len() / count;
        for i in 0..count {
            let anchor = WALL_LEFT + (i + 1) as f32 * spacing;
            let bunker = &state.shields[i * per_bunker..(i + 1) * per_bunker];
            let min_x = bunker.iter().map(|b| b.pos.x).fold(f32::INFINITY, f32::min);
            let max_x = bunker
                .iter()
                .map(|b| b.pos.x)
                .fold(f32::NEG_INFINITY, f32::max);
            assert_eq!((min_x + max_x) / 2.0, anchor);
        }
    }

    #[test]
    fn rebuild_restores_full_health() {
        let mut state = fresh_state();
        state.shields[0].hp = 1;
        state.shields.remove(5);
        let before = state.shields.len();
        rebuild_shields(&mut state);
        assert_ne!(state.shields.len(), before);
        assert!(state
            .shields
            .iter()
            .all(|b| b.hp == state.config.shield_block_hp));
    }

    #[test]
    fn damage_decrements_by_one_until_destroyed() {
        let mut block = ShieldBlock {
            id: 1,
            pos: Vec2::ZERO,
            hp: 3,
        };
        assert!(!apply_damage(&mut block));
        assert_eq!(block.hp, 2);
        assert!(!apply_damage(&mut block));
        assert_eq!(block.hp, 1);
        assert!(apply_damage(&mut block));
        assert_eq!(block.hp, 0);
        // Further damage stays at zero
        assert!(apply_damage(&mut block));
        assert_eq!(block.hp, 0);
    }

    #[test]
    fn damage_block_emits_events() {
        let mut state = fresh_state();
        state.shields[0].hp = 1;
        damage_block(&mut state, 0);
        let events = state.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::BlockDestroyed { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::Audio(AudioEvent::ShieldHit))));
    }

    #[test]
    fn sprite_tracks_health() {
        assert_eq!(block_sprite(3), "shield_full");
        assert_eq!(block_sprite(2), "shield_cracked");
        assert_eq!(block_sprite(1), "shield_critical");
        assert_eq!(block_sprite(0), "shield_gone");
    }
}
