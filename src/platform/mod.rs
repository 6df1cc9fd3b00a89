//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys, pointer recency)
//! - Sprite loading (wasm32 only)

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod assets;

pub use input::{InputState, KeyAction, PointerTracker, map_key};
