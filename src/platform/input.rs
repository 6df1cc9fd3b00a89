//! Input tracking
//!
//! Browser events update `InputState` as they arrive; the frame loop samples it
//! once per frame into a `TickInput`.

use crate::sim::TickInput;

/// Actions bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Jump,
    Left,
    Right,
}

/// Map a `KeyboardEvent.key` value to an action
pub fn map_key(key: &str) -> Option<KeyAction> {
    match key.to_lowercase().as_str() {
        " " | "arrowup" | "w" => Some(KeyAction::Jump),
        "arrowleft" | "a" => Some(KeyAction::Left),
        "arrowright" | "d" => Some(KeyAction::Right),
        _ => None,
    }
}

/// Cursor state over the play field
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    inside: bool,
    x: f32,
    /// Timestamp of the last move (ms); `None` until the first move
    last_move_ms: Option<f64>,
}

impl PointerTracker {
    pub fn enter(&mut self) {
        self.inside = true;
    }

    pub fn leave(&mut self) {
        self.inside = false;
    }

    /// Record a move at field x
    pub fn moved(&mut self, x: f32, now_ms: f64) {
        self.x = x;
        self.last_move_ms = Some(now_ms);
    }

    /// Cursor x if it is inside the field and moved within `window_ms`
    pub fn target(&self, now_ms: f64, window_ms: f64) -> Option<f32> {
        let last = self.last_move_ms?;
        (self.inside && now_ms - last <= window_ms).then_some(self.x)
    }
}

/// Everything the player is currently holding or pointing at
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub pointer: PointerTracker,
}

impl InputState {
    /// Apply a key press or release. Returns the action it mapped to.
    pub fn key(&mut self, key: &str, pressed: bool) -> Option<KeyAction> {
        let action = map_key(key)?;
        match action {
            KeyAction::Left => self.left = pressed,
            KeyAction::Right => self.right = pressed,
            KeyAction::Jump => {}
        }
        Some(action)
    }

    /// Sample for one tick
    pub fn tick_input(&self, now_ms: f64, pointer_window_ms: f64) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            pointer_target: self.pointer.target(now_ms, pointer_window_ms),
        }
    }
}

/// Convert a client-space x into field coordinates
pub fn client_to_field_x(client_x: f64, rect_left: f64, rect_width: f64, field_width: f32) -> f32 {
    if rect_width <= 0.0 {
        return 0.0;
    }
    ((client_x - rect_left) * (field_width as f64 / rect_width)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(map_key(" "), Some(KeyAction::Jump));
        assert_eq!(map_key("ArrowUp"), Some(KeyAction::Jump));
        assert_eq!(map_key("W"), Some(KeyAction::Jump));
        assert_eq!(map_key("ArrowLeft"), Some(KeyAction::Left));
        assert_eq!(map_key("d"), Some(KeyAction::Right));
        assert_eq!(map_key("Escape"), None);
    }

    #[test]
    fn test_held_keys() {
        let mut input = InputState::default();
        input.key("ArrowLeft", true);
        input.key("ArrowRight", true);
        input.key("ArrowLeft", false);

        let sampled = input.tick_input(0.0, 180.0);
        assert!(!sampled.left);
        assert!(sampled.right);
    }

    #[test]
    fn test_pointer_window() {
        let mut pointer = PointerTracker::default();
        assert_eq!(pointer.target(0.0, 180.0), None);

        pointer.enter();
        pointer.moved(300.0, 1000.0);
        assert_eq!(pointer.target(1100.0, 180.0), Some(300.0));
        assert_eq!(pointer.target(1180.0, 180.0), Some(300.0));
        assert_eq!(pointer.target(1181.0, 180.0), None);

        pointer.moved(320.0, 1181.0);
        pointer.leave();
        assert_eq!(pointer.target(1182.0, 180.0), None);
    }

    #[test]
    fn test_client_scaling() {
        // Canvas drawn at half size
        assert_eq!(client_to_field_x(260.0, 20.0, 480.0, 960.0), 480.0);
        assert_eq!(client_to_field_x(10.0, 0.0, 0.0, 960.0), 0.0);
    }
}
