//! Per-frame simulation tick
//!
//! One call advances the state by exactly one frame. Idle and over are frozen;
//! drop only applies gravity; run does everything else.

use super::state::{GameEvent, GamePhase, GameState, Player};
use crate::clamp;
use crate::consts::*;
use crate::tuning::Tuning;

/// Input sampled for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Left held
    pub left: bool,
    /// Right held
    pub right: bool,
    /// Cursor x (field coordinates) while the pointer is active
    pub pointer_target: Option<f32>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) -> Vec<GameEvent> {
    let mut events = Vec::new();
    match state.phase {
        GamePhase::Drop => tick_drop(state, tuning, &mut events),
        GamePhase::Run => tick_run(state, input, tuning, &mut events),
        GamePhase::Idle | GamePhase::Over => {}
    }
    events
}

fn tick_drop(state: &mut GameState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    player.vel.x = 0.0;
    player.vel.y += tuning.gravity;
    player.pos.y += player.vel.y;

    if player.settle_on_ground() {
        events.push(state.begin_run());
    }
}

fn tick_run(
    state: &mut GameState,
    input: &TickInput,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    state.frames += 1;
    state.spawn_tick += 1;

    // Run clock and difficulty ramp
    if state.frames % tuning.frames_per_second == 0 {
        state.seconds += 1;
        if state.seconds % tuning.ramp_every_seconds == 0 {
            state.difficulty.tighten(tuning);
            log::debug!("Difficulty raised at {}s: {:?}", state.seconds, state.difficulty);
            events.push(GameEvent::DifficultyRaised);
        }
        events.push(GameEvent::SecondElapsed {
            seconds: state.seconds,
        });
    }

    steer_player(&mut state.player, input, tuning);

    // Vertical motion
    let player = &mut state.player;
    if !player.on_ground {
        player.vel.y += tuning.gravity;
    }
    player.pos.y += player.vel.y;
    player.settle_on_ground();

    // Spawns (independent, both may fire on one tick)
    if state.spawn_tick % state.difficulty.apple_every == 0 {
        state.spawn_apple(tuning);
    }
    if state.spawn_tick % state.difficulty.enemy_every == 0 {
        state.spawn_enemy();
    }

    let player_box = state.player.bounds();

    // Apples: fall, drop off the bottom, or get collected
    state.apples.retain_mut(|apple| {
        apple.vy += apple.ay;
        apple.pos.y += apple.vy;

        // Center past the bottom edge, not the top edge: an apple at H + 1 goes next tick
        if apple.pos.y > FIELD_HEIGHT {
            return false;
        }
        if apple.bounds().overlaps(&player_box) {
            state.apples_collected += 1;
            events.push(GameEvent::AppleCollected {
                total: state.apples_collected,
            });
            return false;
        }
        true
    });

    // Enemies: slide, leave the field, or hit the player.
    // Reverse order keeps swap_remove from skipping anything.
    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        let enemy = &mut state.enemies[i];
        enemy.pos.x += enemy.vx;
        enemy.pos.y = ENEMY_GROUND_Y;

        if enemy.out_of_field() {
            state.enemies.swap_remove(i);
            continue;
        }

        if enemy.bounds().overlaps(&player_box) {
            state.enemies.swap_remove(i);
            state.lives = state.lives.saturating_sub(1);
            events.push(GameEvent::PlayerHit { lives: state.lives });

            if state.lives == 0 {
                events.push(state.end_game());
                break;
            }
        }
    }
}

/// Horizontal control: pointer pull or release decay, keys, friction, bounds
fn steer_player(player: &mut Player, input: &TickInput, tuning: &Tuning) {
    let mut ax = 0.0;

    match input.pointer_target {
        Some(target_x) => {
            let dx = target_x - player.pos.x;
            ax += clamp(
                dx * tuning.pointer_gain,
                -tuning.pointer_max_accel,
                tuning.pointer_max_accel,
            );
        }
        None => {
            player.vel.x *= tuning.release_decay;
            if player.vel.x.abs() < tuning.release_snap {
                player.vel.x = 0.0;
            }
        }
    }

    if input.left {
        ax -= tuning.key_accel;
    }
    if input.right {
        ax += tuning.key_accel;
    }

    if ax.abs() < tuning.accel_epsilon {
        player.vel.x *= tuning.friction;
    } else {
        player.vel.x = clamp(player.vel.x + ax, -tuning.max_vx, tuning.max_vx);
    }

    let half_w = player.size.x / 2.0;
    player.pos.x = clamp(player.pos.x + player.vel.x, half_w, FIELD_WIDTH - half_w);
}
