//! Game state and core simulation types
//!
//! One `GameState` holds everything a run mutates. It owns its RNG so two
//! states built from the same seed replay identically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Player suspended mid-field, waiting for start
    Idle,
    /// Player falling to the ground, no control
    Drop,
    /// Active gameplay
    Run,
    /// Run ended, simulation frozen
    Over,
}

/// Things that happened during a tick, for the HUD and records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player landed and the run began
    RunStarted,
    /// In-game timer advanced
    SecondElapsed { seconds: u32 },
    /// Spawn periods and enemy speeds tightened
    DifficultyRaised,
    AppleCollected { total: u32 },
    PlayerHit { lives: u8 },
    /// Lives ran out
    GameOver { seconds: u32, apples: u32 },
}

/// The player block
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    /// Cosmetic frame counter for the grounded squash
    pub anim: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            on_ground: false,
            anim: 0,
        }
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Center height when resting on the ground
    #[inline]
    pub fn ground_y(&self) -> f32 {
        GROUND_Y - self.size.y / 2.0
    }

    /// Snap to the ground if the lower edge reached it. Returns true on contact.
    pub fn settle_on_ground(&mut self) -> bool {
        if self.bounds().bottom() >= GROUND_Y {
            self.pos.y = self.ground_y();
            self.vel.y = 0.0;
            self.on_ground = true;
            true
        } else {
            false
        }
    }

    pub fn advance_anim(&mut self) {
        self.anim = (self.anim + 1) % SQUASH_CYCLE;
    }

    /// Width factor for drawing; height uses the inverse
    pub fn squash(&self) -> f32 {
        if self.on_ground && self.anim >= SQUASH_CYCLE / 2 {
            SQUASH_FACTOR
        } else {
            1.0
        }
    }
}

/// A falling apple
#[derive(Debug, Clone)]
pub struct Apple {
    pub pos: Vec2,
    pub vy: f32,
    /// Downward acceleration
    pub ay: f32,
    pub size: Vec2,
}

impl Apple {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// An enemy block sliding along the ground
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub vx: f32,
    pub size: Vec2,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// True once fully past either edge plus the despawn margin
    pub fn out_of_field(&self) -> bool {
        let margin = self.size.x * ENEMY_DESPAWN_MARGIN;
        self.pos.x < -margin || self.pos.x > FIELD_WIDTH + margin
    }
}

/// Spawn periods and enemy speed range; only ever tightened within a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub enemy_min: f32,
    pub enemy_max: f32,
    pub enemy_every: u32,
    pub apple_every: u32,
}

impl Difficulty {
    pub fn initial(tuning: &Tuning) -> Self {
        Self {
            enemy_min: tuning.enemy_min,
            enemy_max: tuning.enemy_max,
            enemy_every: tuning.enemy_every,
            apple_every: tuning.apple_every,
        }
    }

    /// One ramp step, held at the floors and caps
    pub fn tighten(&mut self, tuning: &Tuning) {
        self.enemy_every = self
            .enemy_every
            .saturating_sub(tuning.enemy_every_step)
            .max(tuning.enemy_every_floor);
        self.apple_every = self
            .apple_every
            .saturating_sub(tuning.apple_every_step)
            .max(tuning.apple_every_floor);
        self.enemy_min = (self.enemy_min + tuning.enemy_min_step).min(tuning.enemy_speed_cap - 1.0);
        self.enemy_max = (self.enemy_max + tuning.enemy_max_step).min(tuning.enemy_speed_cap);
    }
}

/// Complete simulation state for one game
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was built from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Unordered; entities have no identity beyond membership
    pub apples: Vec<Apple>,
    pub enemies: Vec<Enemy>,
    pub difficulty: Difficulty,
    /// Run frames since landing
    pub frames: u32,
    /// In-game seconds since landing
    pub seconds: u32,
    /// Drives spawn periods
    pub spawn_tick: u32,
    pub lives: u8,
    pub apples_collected: u32,
}

impl GameState {
    /// Create an idle game
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            player: Player::default(),
            apples: Vec::new(),
            enemies: Vec::new(),
            difficulty: Difficulty::initial(tuning),
            frames: 0,
            seconds: 0,
            spawn_tick: 0,
            lives: tuning.lives,
            apples_collected: 0,
        }
    }

    /// Back to idle with fresh counters, difficulty and a suspended player.
    /// The RNG keeps its stream so consecutive runs differ.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.apples.clear();
        self.enemies.clear();
        self.frames = 0;
        self.seconds = 0;
        self.spawn_tick = 0;
        self.lives = tuning.lives;
        self.apples_collected = 0;
        self.difficulty = Difficulty::initial(tuning);

        let anim = self.player.anim;
        self.player = Player {
            anim,
            ..Player::default()
        };

        self.phase = GamePhase::Idle;
        log::info!("Game reset");
    }

    /// Release the player. Only from idle, or from over after an implicit
    /// reset; otherwise a no-op returning false.
    pub fn start_drop(&mut self, tuning: &Tuning) -> bool {
        match self.phase {
            GamePhase::Idle => {}
            GamePhase::Over => self.reset(tuning),
            GamePhase::Drop | GamePhase::Run => return false,
        }

        self.phase = GamePhase::Drop;
        self.player.on_ground = false;
        self.player.vel = Vec2::new(0.0, tuning.drop_velocity);
        log::info!("Drop started");
        true
    }

    /// Landing hook: clear the field and restart the run clock.
    /// Lives, apples and difficulty carry over from the last reset.
    pub fn begin_run(&mut self) -> GameEvent {
        self.apples.clear();
        self.enemies.clear();
        self.frames = 0;
        self.seconds = 0;
        self.spawn_tick = 0;
        self.phase = GamePhase::Run;
        log::info!("Run started");
        GameEvent::RunStarted
    }

    /// Freeze the run
    pub fn end_game(&mut self) -> GameEvent {
        self.phase = GamePhase::Over;
        log::info!(
            "Game over after {}s with {} apples",
            self.seconds,
            self.apples_collected
        );
        GameEvent::GameOver {
            seconds: self.seconds,
            apples: self.apples_collected,
        }
    }

    /// Jump if running and grounded. Sets (not adds) the upward speed.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.phase != GamePhase::Run || !self.player.on_ground {
            return false;
        }
        self.player.vel.y = -tuning.jump_velocity;
        self.player.on_ground = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let tuning = Tuning::default();
        let state = GameState::new(1, &tuning);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.lives, 3);
        assert_eq!(state.player.pos, Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0));
        assert!(!state.player.on_ground);
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.phase = GamePhase::Over;
        state.lives = 0;
        state.apples_collected = 12;
        state.seconds = 77;
        state.difficulty.tighten(&tuning);
        state.player.pos = Vec2::new(30.0, 538.0);
        state.player.vel = Vec2::new(4.0, 0.0);
        state.player.on_ground = true;
        state.apples.push(Apple {
            pos: Vec2::new(100.0, 100.0),
            vy: 2.0,
            ay: 0.5,
            size: Vec2::splat(APPLE_WIDTH),
        });
        state.enemies.push(Enemy {
            pos: Vec2::new(100.0, ENEMY_GROUND_Y),
            vx: 3.0,
            size: Vec2::splat(ENEMY_WIDTH),
        });

        state.reset(&tuning);

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.lives, 3);
        assert_eq!(state.apples_collected, 0);
        assert_eq!(state.seconds, 0);
        assert!(state.apples.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.difficulty.enemy_min, 2.8);
        assert_eq!(state.difficulty.enemy_max, 4.4);
        assert_eq!(state.difficulty.apple_every, 60);
        assert_eq!(state.difficulty.enemy_every, 100);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(!state.player.on_ground);
    }

    #[test]
    fn test_start_drop_guard() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        assert!(state.start_drop(&tuning));
        assert_eq!(state.phase, GamePhase::Drop);
        assert_eq!(state.player.vel.y, tuning.drop_velocity);

        // Already dropping
        assert!(!state.start_drop(&tuning));
        state.begin_run();
        assert!(!state.start_drop(&tuning));
        assert_eq!(state.phase, GamePhase::Run);
    }

    #[test]
    fn test_start_drop_from_over_resets_first() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.phase = GamePhase::Over;
        state.lives = 0;
        state.apples_collected = 4;

        assert!(state.start_drop(&tuning));
        assert_eq!(state.phase, GamePhase::Drop);
        assert_eq!(state.lives, 3);
        assert_eq!(state.apples_collected, 0);
    }

    #[test]
    fn test_jump_sets_upward_velocity() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.begin_run();
        state.player.pos.y = state.player.ground_y();
        state.player.vel.y = 0.0;
        state.player.on_ground = true;

        assert!(state.jump(&tuning));
        assert_eq!(state.player.vel.y, -10.2);
        assert!(!state.player.on_ground);

        // Airborne: no double jump
        assert!(!state.jump(&tuning));
        assert_eq!(state.player.vel.y, -10.2);
    }

    #[test]
    fn test_jump_ignored_outside_run() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.player.on_ground = true;
        assert!(!state.jump(&tuning));
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_squash_cycle() {
        let mut player = Player::default();
        player.on_ground = true;
        assert_eq!(player.squash(), 1.0);
        for _ in 0..10 {
            player.advance_anim();
        }
        assert_eq!(player.squash(), SQUASH_FACTOR);
        for _ in 0..10 {
            player.advance_anim();
        }
        assert_eq!(player.anim, 0);
        assert_eq!(player.squash(), 1.0);

        player.anim = 15;
        player.on_ground = false;
        assert_eq!(player.squash(), 1.0);
    }

    #[test]
    fn test_enemy_despawn_margin() {
        let mut enemy = Enemy {
            pos: Vec2::new(-ENEMY_WIDTH, ENEMY_GROUND_Y),
            vx: 3.0,
            size: Vec2::splat(ENEMY_WIDTH),
        };
        assert!(!enemy.out_of_field());
        enemy.pos.x = -ENEMY_WIDTH * 1.5 - 0.1;
        assert!(enemy.out_of_field());
        enemy.pos.x = FIELD_WIDTH + ENEMY_WIDTH * 1.5 + 0.1;
        assert!(enemy.out_of_field());
    }
}
