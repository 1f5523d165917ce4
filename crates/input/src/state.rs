use simplengine_common::Vector2;
use std::collections::HashSet;

use crate::key::{Key, MouseButton};

/// Keyboard and mouse state for the current frame.
///
/// The platform layer forwards raw events with [`InputState::key_event`] and
/// friends; game logic queries it from the update callback and calls
/// [`InputState::end_frame`] once per frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys_down: HashSet<Key>,
    keys_pressed: HashSet<Key>,
    keys_released: HashSet<Key>,
    mouse_position: Vector2,
    buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down (`pressed = true`) or up.
    pub fn key_event(&mut self, key: Key, pressed: bool) {
        if pressed {
            // Auto-repeat sends more downs for a held key; only the first counts.
            if self.keys_down.insert(key) {
                self.keys_pressed.insert(key);
            }
        } else {
            self.keys_down.remove(&key);
            self.keys_released.insert(key);
        }
    }

    pub fn mouse_moved(&mut self, position: Vector2) {
        self.mouse_position = position;
    }

    pub fn mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons_down.insert(button);
        } else {
            self.buttons_down.remove(&button);
        }
    }

    /// Clear the per-frame pressed/released sets.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Went down this frame.
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Went up this frame.
    pub fn is_key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_key_up(&self, key: Key) -> bool {
        !self.is_key_down(key)
    }

    pub fn mouse_position(&self) -> Vector2 {
        self.mouse_position
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}
