//! Demo autopilot
//!
//! Plays the game from the state alone: chase the lowest apple, hop over
//! enemies that are about to arrive. Used by the headless native session.

use super::state::{GamePhase, GameState};
use super::tick::TickInput;

/// Frames of lookahead when deciding to jump
const JUMP_LEAD_FRAMES: f32 = 12.0;

/// What the autopilot wants this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decision {
    pub input: TickInput,
    pub jump: bool,
}

pub fn decide(state: &GameState) -> Decision {
    if state.phase != GamePhase::Run {
        return Decision::default();
    }

    let player = &state.player;

    // Lowest apple is the one about to land
    let target = state
        .apples
        .iter()
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|a| a.pos.x);

    // Any enemy closing in within the lookahead window
    let threatened = state.enemies.iter().any(|e| {
        let dx = player.pos.x - e.pos.x;
        let closing = dx * e.vx > 0.0;
        let reach = (player.size.x + e.size.x) / 2.0 + e.vx.abs() * JUMP_LEAD_FRAMES;
        closing && dx.abs() < reach
    });

    Decision {
        input: TickInput {
            pointer_target: target,
            ..Default::default()
        },
        jump: threatened && player.on_ground,
    }
}
