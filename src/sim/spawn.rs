//! Apple and enemy spawners
//!
//! Both draw from the state's own RNG, so spawns replay with the seed.

use glam::Vec2;
use rand::Rng;

use super::state::{Apple, Enemy, GameState};
use crate::consts::*;
use crate::random_range;
use crate::tuning::Tuning;

/// Which edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl GameState {
    /// Drop an apple from a random x just above the field
    pub fn spawn_apple(&mut self, tuning: &Tuning) {
        let x = random_range(
            &mut self.rng,
            tuning.apple_margin,
            FIELD_WIDTH - tuning.apple_margin,
        );
        self.apples.push(Apple {
            pos: Vec2::new(x, APPLE_SPAWN_Y),
            vy: tuning.apple_fall_speed,
            ay: tuning.gravity,
            size: Vec2::new(APPLE_WIDTH, APPLE_HEIGHT),
        });
    }

    /// Send an enemy in from a random side at a speed from the current range
    pub fn spawn_enemy(&mut self) {
        let side = if self.rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };
        let speed = random_range(
            &mut self.rng,
            self.difficulty.enemy_min,
            self.difficulty.enemy_max,
        );
        self.spawn_enemy_from(side, speed);
    }

    /// Place an enemy just outside `side`, heading into the field
    pub fn spawn_enemy_from(&mut self, side: Side, speed: f32) {
        let (x, vx) = match side {
            Side::Left => (-ENEMY_WIDTH, speed),
            Side::Right => (FIELD_WIDTH + ENEMY_WIDTH, -speed),
        };
        self.enemies.push(Enemy {
            pos: Vec2::new(x, ENEMY_GROUND_Y),
            vx,
            size: Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
        });
    }
}
