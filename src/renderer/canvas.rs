//! Canvas 2D backend

use web_sys::CanvasRenderingContext2d;

use super::{DrawCmd, Frame, Renderer};
use crate::platform::assets::SpriteSheet;

/// Paints frames onto a 2D canvas context. Sprites that failed to load are
/// skipped.
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: SpriteSheet,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, sprites: SpriteSheet) -> Self {
        Self { ctx, sprites }
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &Frame) {
        for cmd in &frame.commands {
            match cmd {
                DrawCmd::Sprite { kind, rect } => {
                    if let Some(image) = self.sprites.get(*kind) {
                        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            image,
                            rect.x as f64,
                            rect.y as f64,
                            rect.w as f64,
                            rect.h as f64,
                        );
                    }
                }
                DrawCmd::Fill { color, rect } => {
                    self.ctx.set_fill_style_str(color);
                    self.ctx.fill_rect(
                        rect.x as f64,
                        rect.y as f64,
                        rect.w as f64,
                        rect.h as f64,
                    );
                }
            }
        }
    }
}
