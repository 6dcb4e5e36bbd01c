//! Input state tracking
//!
//! Maintains the per-frame snapshot of keyboard, mouse button, and cursor
//! state, fed by the same poll cycle that updates the window's cached state.
//! Registered as the first event sink so game logic observes input state
//! updated before the overlay sees the same events.
//!
//! Key and button tables are keyed by the opaque `i32` codes the native
//! layer reports; codes are not validated or remapped. Text input records
//! pass through the fan-out to later sinks and are not buffered here; file
//! drops are ignored.

use std::collections::HashMap;

use crate::overlay::EventSink;
use crate::window::events::{ButtonAction, WindowEvent};

/// Per-poll digital state of a key or mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    /// Not held
    Up,
    /// Went down during the last poll
    Pressed,
    /// Held across polls
    Held,
    /// Went up during the last poll
    Released,
}

/// Snapshot of keyboard/mouse/cursor state for the current frame
pub struct InputTracker {
    keys: HashMap<i32, InputState>,
    mouse_buttons: HashMap<i32, InputState>,
    cursor_position: (f64, f64),
}

impl InputTracker {
    /// Create a tracker with nothing held and the cursor at the origin
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
            mouse_buttons: HashMap::new(),
            cursor_position: (0.0, 0.0),
        }
    }

    /// Digital state of a key by its opaque native code
    pub fn key_state(&self, code: i32) -> InputState {
        self.keys.get(&code).copied().unwrap_or(InputState::Up)
    }

    /// Digital state of a mouse button by its opaque native code
    pub fn mouse_button_state(&self, code: i32) -> InputState {
        self.mouse_buttons
            .get(&code)
            .copied()
            .unwrap_or(InputState::Up)
    }

    /// Absolute cursor position as of the last poll
    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor_position
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Age one table across a poll boundary: presses become holds, releases
/// settle back to up. Settled entries are dropped so the tables only carry
/// active keys.
fn age(table: &mut HashMap<i32, InputState>) {
    for state in table.values_mut() {
        match state {
            InputState::Pressed => *state = InputState::Held,
            InputState::Released => *state = InputState::Up,
            InputState::Up | InputState::Held => {}
        }
    }
    table.retain(|_, state| *state != InputState::Up);
}

fn transition(table: &mut HashMap<i32, InputState>, code: i32, action: ButtonAction) {
    let state = table.entry(code).or_insert(InputState::Up);
    match action {
        ButtonAction::Press => {
            // A press while already down (possible if the native layer
            // repeats the transition) must not retrigger Pressed.
            if matches!(state, InputState::Up | InputState::Released) {
                *state = InputState::Pressed;
            }
        }
        ButtonAction::Release => {
            *state = InputState::Released;
        }
        ButtonAction::Repeat => {
            // Repeat implies the key is still down; if the press itself was
            // missed, settle directly into Held.
            if matches!(state, InputState::Up | InputState::Released) {
                *state = InputState::Held;
            }
        }
    }
}

impl EventSink for InputTracker {
    fn begin_poll(&mut self) {
        age(&mut self.keys);
        age(&mut self.mouse_buttons);
    }

    fn on_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Key { code, action, .. } => {
                transition(&mut self.keys, *code, *action);
            }
            WindowEvent::MouseButton { code, action } => {
                transition(&mut self.mouse_buttons, *code, *action);
            }
            WindowEvent::CursorMoved { x, y } => {
                self.cursor_position = (*x, *y);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const KEY_A: i32 = 65;
    const BUTTON_LEFT: i32 = 0;

    fn key(code: i32, action: ButtonAction) -> WindowEvent {
        WindowEvent::Key {
            code,
            scancode: 0,
            action,
        }
    }

    #[test]
    fn test_unknown_codes_read_up() {
        let tracker = InputTracker::new();
        assert_eq!(tracker.key_state(12345), InputState::Up);
        assert_eq!(tracker.mouse_button_state(-7), InputState::Up);
    }

    #[test]
    fn test_press_hold_release_lifecycle() {
        let mut tracker = InputTracker::new();

        tracker.begin_poll();
        tracker.on_window_event(&key(KEY_A, ButtonAction::Press));
        assert_eq!(tracker.key_state(KEY_A), InputState::Pressed);

        tracker.begin_poll();
        assert_eq!(tracker.key_state(KEY_A), InputState::Held);

        tracker.begin_poll();
        tracker.on_window_event(&key(KEY_A, ButtonAction::Release));
        assert_eq!(tracker.key_state(KEY_A), InputState::Released);

        tracker.begin_poll();
        assert_eq!(tracker.key_state(KEY_A), InputState::Up);
    }

    #[test]
    fn test_repeat_never_retriggers_pressed() {
        let mut tracker = InputTracker::new();

        tracker.begin_poll();
        tracker.on_window_event(&key(KEY_A, ButtonAction::Press));
        tracker.begin_poll();
        tracker.on_window_event(&key(KEY_A, ButtonAction::Repeat));
        assert_eq!(tracker.key_state(KEY_A), InputState::Held);

        // A repeat with no recorded press settles straight into Held.
        let mut cold = InputTracker::new();
        cold.begin_poll();
        cold.on_window_event(&key(KEY_A, ButtonAction::Repeat));
        assert_eq!(cold.key_state(KEY_A), InputState::Held);
    }

    #[test]
    fn test_duplicate_press_does_not_retrigger() {
        let mut tracker = InputTracker::new();
        tracker.begin_poll();
        tracker.on_window_event(&key(KEY_A, ButtonAction::Press));
        tracker.begin_poll();
        tracker.on_window_event(&key(KEY_A, ButtonAction::Press));
        assert_eq!(tracker.key_state(KEY_A), InputState::Held);
    }

    #[test]
    fn test_press_and_release_within_one_poll() {
        let mut tracker = InputTracker::new();
        tracker.begin_poll();
        tracker.on_window_event(&key(KEY_A, ButtonAction::Press));
        tracker.on_window_event(&key(KEY_A, ButtonAction::Release));
        assert_eq!(tracker.key_state(KEY_A), InputState::Released);

        tracker.begin_poll();
        assert_eq!(tracker.key_state(KEY_A), InputState::Up);
    }

    #[test]
    fn test_mouse_buttons_tracked_independently_of_keys() {
        let mut tracker = InputTracker::new();
        tracker.begin_poll();
        tracker.on_window_event(&WindowEvent::MouseButton {
            code: BUTTON_LEFT,
            action: ButtonAction::Press,
        });

        assert_eq!(tracker.mouse_button_state(BUTTON_LEFT), InputState::Pressed);
        // Same integer code in the key table stays untouched.
        assert_eq!(tracker.key_state(BUTTON_LEFT), InputState::Up);
    }

    #[test]
    fn test_cursor_position_follows_moves() {
        let mut tracker = InputTracker::new();
        tracker.on_window_event(&WindowEvent::CursorMoved { x: 320.5, y: 240.25 });

        let (x, y) = tracker.cursor_position();
        assert_relative_eq!(x, 320.5);
        assert_relative_eq!(y, 240.25);
    }

    #[test]
    fn test_text_and_drop_records_are_ignored() {
        let mut tracker = InputTracker::new();
        tracker.on_window_event(&WindowEvent::Char('x'));
        tracker.on_window_event(&WindowEvent::FileDrop(vec!["/tmp/f".into()]));
        tracker.on_window_event(&WindowEvent::Resized {
            width: 100,
            height: 100,
        });

        assert_eq!(tracker.cursor_position(), (0.0, 0.0));
        assert_eq!(tracker.key_state(KEY_A), InputState::Up);
    }
}
