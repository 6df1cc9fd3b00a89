//! Apple Drop - A falling-block arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawns, collisions, phases)
//! - `game`: Simulation context wiring the sim to storage, HUD and renderer
//! - `renderer`: Draw list construction and the canvas backend
//! - `platform`: Browser input tracking and sprite loading
//! - `persistence`: Key-value storage port (LocalStorage on web)
//! - `records`: Best time / best apples / pause counter
//! - `tuning`: Data-driven game balance
//! - `ui`: HUD port (DOM on web, log natively)

pub mod game;
pub mod persistence;
pub mod platform;
pub mod records;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use records::Records;
pub use tuning::Tuning;

use rand::Rng;

/// Field layout constants
pub mod consts {
    /// Play field dimensions (canvas pixels)
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Top of the grass strip; player and enemies rest on it
    pub const GROUND_Y: f32 = 560.0;

    /// Player block
    pub const PLAYER_WIDTH: f32 = 44.0;
    pub const PLAYER_HEIGHT: f32 = 44.0;

    /// Enemy block
    pub const ENEMY_WIDTH: f32 = 42.0;
    pub const ENEMY_HEIGHT: f32 = 42.0;
    /// Enemy center height (bottom edge on the ground)
    pub const ENEMY_GROUND_Y: f32 = GROUND_Y - ENEMY_HEIGHT / 2.0;
    /// Enemies despawn this many widths past either edge
    pub const ENEMY_DESPAWN_MARGIN: f32 = 1.5;

    /// Apple block
    pub const APPLE_WIDTH: f32 = 28.0;
    pub const APPLE_HEIGHT: f32 = 28.0;
    /// Apples spawn just above the visible field
    pub const APPLE_SPAWN_Y: f32 = -20.0;

    /// Grounded squash cycle length (frames) and squashed width factor
    pub const SQUASH_CYCLE: u32 = 20;
    pub const SQUASH_FACTOR: f32 = 0.92;

    /// Grass fill color
    pub const GROUND_COLOR: &str = "#2a7f2a";
}

/// Bound `v` to `[lo, hi]`
///
/// Unlike `f32::clamp` this never panics; `lo` wins if the bounds are inverted.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}

/// Uniform sample in `[min, max)`
///
/// A degenerate range (`min == max`) returns `min`.
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}
