//! Deterministic simulation core
//!
//! Everything in this module is pure state-in, state-out: no I/O, no wall
//! clock, no global RNG. Given the same seed, config and input sequence,
//! two runs produce identical states tick for tick.

pub mod combat;
pub mod geom;
pub mod shields;
pub mod state;
pub mod tick;
pub mod wave;

pub use geom::Aabb;
pub use state::{
    Alien, AlienKind, Boss, Formation, GameEvent, GamePhase, GameState, Owner, Player, Projectile,
    ShieldBlock,
};
pub use tick::{tick, TickInput};
