//! Draw list generation
//!
//! Turns a read-only view of the game state into back-to-front draw commands.
//! Backends only have to know how to blit a sprite and fill a rect.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Aabb, GameState};

/// Sprite images the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Background,
    Player,
    Enemy,
    Apple,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 4] = [
        SpriteKind::Background,
        SpriteKind::Player,
        SpriteKind::Enemy,
        SpriteKind::Apple,
    ];

    /// Image path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            SpriteKind::Background => "background_image.png",
            SpriteKind::Player => "player_block.png",
            SpriteKind::Enemy => "evil_block.png",
            SpriteKind::Apple => "apple_image.png",
        }
    }
}

/// Screen rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    fn around(center: Vec2, size: Vec2) -> Self {
        let min = Aabb::new(center, size).min();
        Self::new(min.x, min.y, size.x, size.y)
    }
}

/// One draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Sprite { kind: SpriteKind, rect: Rect },
    Fill { color: &'static str, rect: Rect },
}

/// Everything drawn for one frame, in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCmd>,
}

impl Frame {
    /// Background, ground, apples, enemies, then the (squashed) player
    pub fn capture(state: &GameState) -> Self {
        let mut commands = Vec::with_capacity(3 + state.apples.len() + state.enemies.len());

        commands.push(DrawCmd::Sprite {
            kind: SpriteKind::Background,
            rect: Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT),
        });
        commands.push(DrawCmd::Fill {
            color: GROUND_COLOR,
            rect: Rect::new(0.0, GROUND_Y, FIELD_WIDTH, FIELD_HEIGHT - GROUND_Y),
        });

        for apple in &state.apples {
            commands.push(DrawCmd::Sprite {
                kind: SpriteKind::Apple,
                rect: Rect::around(apple.pos, apple.size),
            });
        }

        for enemy in &state.enemies {
            commands.push(DrawCmd::Sprite {
                kind: SpriteKind::Enemy,
                rect: Rect::around(enemy.pos, enemy.size),
            });
        }

        let player = &state.player;
        let squash = player.squash();
        let size = Vec2::new(player.size.x * squash, player.size.y / squash);
        commands.push(DrawCmd::Sprite {
            kind: SpriteKind::Player,
            rect: Rect::around(player.pos, size),
        });

        Self { commands }
    }

    pub fn sprites(&self, kind: SpriteKind) -> impl Iterator<Item = &Rect> {
        self.commands.iter().filter_map(move |cmd| match cmd {
            DrawCmd::Sprite { kind: k, rect } if *k == kind => Some(rect),
            _ => None,
        })
    }
}
