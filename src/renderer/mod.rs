//! Rendering module
//!
//! `Frame` is built from a read-only view of the simulation; a `Renderer`
//! backend paints it. The Canvas 2D backend only exists on wasm32.

pub mod frame;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use frame::{DrawCmd, Frame, Rect, SpriteKind};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

/// Paints a finished frame. Must not feed back into the simulation.
pub trait Renderer {
    fn draw(&mut self, frame: &Frame);
}

/// Discards frames (headless runs)
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_drawn: u64,
}

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &Frame) {
        self.frames_drawn += 1;
    }
}
