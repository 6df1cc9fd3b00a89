//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per frame, no wall-clock reads
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, overlap};
pub use spawn::Side;
pub use state::{Apple, Difficulty, Enemy, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
