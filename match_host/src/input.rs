//! Keyboard input handling

use game_core::InputState;

/// Movement a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Up,
    Down,
}

/// Map a DOM key name to a paddle movement
pub fn binding_for(key: &str) -> Option<KeyBinding> {
    match key {
        "ArrowUp" | "w" | "W" => Some(KeyBinding::Up),
        "ArrowDown" | "s" | "S" => Some(KeyBinding::Down),
        _ => None,
    }
}

/// Apply a key down/up event. Returns false for keys that don't move the paddle.
pub fn apply_key(input: &mut InputState, key: &str, pressed: bool) -> bool {
    match binding_for(key) {
        Some(KeyBinding::Up) => input.up = pressed,
        Some(KeyBinding::Down) => input.down = pressed,
        None => return false,
    }
    true
}
