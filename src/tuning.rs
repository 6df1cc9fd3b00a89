//! Data-driven game balance
//!
//! Every gameplay constant that affects feel or difficulty lives here so it can
//! be overridden from JSON without a rebuild. Field layout stays in `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::Storage;

/// Errors loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Gameplay balance values (per-frame units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics ===
    /// Downward acceleration applied to the player and apples
    pub gravity: f32,
    /// Velocity multiplier when no horizontal acceleration is applied
    pub friction: f32,
    /// Horizontal speed limit
    pub max_vx: f32,
    /// Upward speed set by a jump
    pub jump_velocity: f32,
    /// Initial downward speed when the drop starts
    pub drop_velocity: f32,

    // === Input ===
    /// Pointer pull: acceleration per pixel of distance to the cursor
    pub pointer_gain: f32,
    /// Pointer pull cap
    pub pointer_max_accel: f32,
    /// Pointer counts as active this long after its last move (ms)
    pub pointer_active_ms: f64,
    /// Velocity multiplier per frame while the pointer is inactive
    pub release_decay: f32,
    /// Velocity below this snaps to zero while the pointer is inactive
    pub release_snap: f32,
    /// Acceleration from a held left/right key
    pub key_accel: f32,
    /// Accelerations below this count as none
    pub accel_epsilon: f32,

    // === Run ===
    /// Lives at the start of a run
    pub lives: u8,
    /// Run frames per in-game second
    pub frames_per_second: u32,

    // === Apples ===
    /// Initial apple fall speed
    pub apple_fall_speed: f32,
    /// Apples spawn at least this far from either edge
    pub apple_margin: f32,

    // === Difficulty ===
    /// Initial enemy speed range
    pub enemy_min: f32,
    pub enemy_max: f32,
    /// Enemy speed never exceeds this (`enemy_min` stays one below)
    pub enemy_speed_cap: f32,
    /// Initial spawn periods (spawn ticks)
    pub apple_every: u32,
    pub enemy_every: u32,
    /// Difficulty tightens every this many in-game seconds
    pub ramp_every_seconds: u32,
    pub enemy_every_step: u32,
    pub enemy_every_floor: u32,
    pub apple_every_step: u32,
    pub apple_every_floor: u32,
    pub enemy_min_step: f32,
    pub enemy_max_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            friction: 0.86,
            max_vx: 10.0,
            jump_velocity: 10.2,
            drop_velocity: 0.01,

            pointer_gain: 0.18,
            pointer_max_accel: 3.2,
            pointer_active_ms: 180.0,
            release_decay: 0.5,
            release_snap: 0.15,
            key_accel: 1.6,
            accel_epsilon: 0.0001,

            lives: 3,
            frames_per_second: 30,

            apple_fall_speed: 2.0,
            apple_margin: 60.0,

            enemy_min: 2.8,
            enemy_max: 4.4,
            enemy_speed_cap: 9.5,
            apple_every: 60,
            enemy_every: 100,
            ramp_every_seconds: 5,
            enemy_every_step: 4,
            enemy_every_floor: 55,
            apple_every_step: 1,
            apple_every_floor: 28,
            enemy_min_step: 0.3,
            enemy_max_step: 0.45,
        }
    }
}

impl Tuning {
    /// Storage key for an override
    pub const STORAGE_KEY: &'static str = "apple_drop_tuning";

    /// Parse and validate a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.apple_every == 0 || self.enemy_every == 0 {
            return Err(TuningError::Invalid("spawn periods must be non-zero"));
        }
        if self.apple_every_floor == 0 || self.enemy_every_floor == 0 {
            return Err(TuningError::Invalid("spawn period floors must be non-zero"));
        }
        if self.frames_per_second == 0 || self.ramp_every_seconds == 0 {
            return Err(TuningError::Invalid("timer intervals must be non-zero"));
        }
        if self.enemy_min > self.enemy_max {
            return Err(TuningError::Invalid("enemy_min exceeds enemy_max"));
        }
        // Ramps only tighten: start at or above the period floors, at or
        // under the speed caps, and never step backwards
        if self.enemy_every < self.enemy_every_floor {
            return Err(TuningError::Invalid("enemy_every is below its floor"));
        }
        if self.apple_every < self.apple_every_floor {
            return Err(TuningError::Invalid("apple_every is below its floor"));
        }
        if self.enemy_min > self.enemy_speed_cap - 1.0 {
            return Err(TuningError::Invalid("enemy_min exceeds enemy_speed_cap - 1"));
        }
        if self.enemy_max > self.enemy_speed_cap {
            return Err(TuningError::Invalid("enemy_max exceeds enemy_speed_cap"));
        }
        if self.enemy_min_step < 0.0 || self.enemy_max_step < 0.0 {
            return Err(TuningError::Invalid("enemy speed steps must not be negative"));
        }
        if self.lives == 0 {
            return Err(TuningError::Invalid("a run needs at least one life"));
        }
        Ok(())
    }

    /// Load the override from storage, falling back to defaults
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        let Some(json) = storage.get_item(Self::STORAGE_KEY) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.7, "lives": 5 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.7);
        assert_eq!(tuning.lives, 5);
        assert_eq!(tuning.enemy_every, 100);
        assert_eq!(tuning.jump_velocity, 10.2);
    }

    #[test]
    fn test_zero_period_rejected() {
        let err = Tuning::from_json(r#"{ "apple_every": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_loosening_starts_rejected() {
        for json in [
            r#"{ "enemy_every": 40 }"#,
            r#"{ "apple_every": 20 }"#,
            r#"{ "enemy_min": 9.0, "enemy_max": 9.4 }"#,
            r#"{ "enemy_max": 9.8 }"#,
            r#"{ "enemy_min_step": -0.1 }"#,
        ] {
            let err = Tuning::from_json(json).unwrap_err();
            assert!(matches!(err, TuningError::Invalid(_)), "{json} accepted");
        }
    }

    #[test]
    fn test_accepted_tuning_only_tightens() {
        use crate::sim::Difficulty;

        let tuning = Tuning::from_json(
            r#"{ "enemy_min": 8.5, "enemy_max": 9.5, "enemy_every": 55, "apple_every": 28 }"#,
        )
        .unwrap();
        let mut difficulty = Difficulty::initial(&tuning);
        for _ in 0..50 {
            let before = difficulty;
            difficulty.tighten(&tuning);
            assert!(difficulty.enemy_every <= before.enemy_every);
            assert!(difficulty.apple_every <= before.apple_every);
            assert!(difficulty.enemy_min >= before.enemy_min);
            assert!(difficulty.enemy_max >= before.enemy_max);
        }
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_load_falls_back_on_bad_override() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(Tuning::STORAGE_KEY, r#"{ "enemy_min": 9.0, "enemy_max": 1.0 }"#)
            .unwrap();
        assert_eq!(Tuning::load(&storage), Tuning::default());

        storage
            .set_item(Tuning::STORAGE_KEY, r#"{ "friction": 0.9 }"#)
            .unwrap();
        assert_eq!(Tuning::load(&storage).friction, 0.9);
    }
}
