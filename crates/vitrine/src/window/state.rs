//! Cached window state and the event fold that updates it
//!
//! The window's geometry, focus, and close flag are snapshots taken during
//! event polling, never live queries of the native layer. Between polls they
//! may be stale; immediately after a poll they reflect every event that was
//! pending when the poll started.

use crate::foundation::math::Vec2i;
use crate::window::events::WindowEvent;

/// Snapshot of window attributes as of the last event dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowState {
    /// Client-area size in screen coordinates
    pub size: Vec2i,
    /// Framebuffer size in pixels
    pub framebuffer_size: Vec2i,
    /// Top-left position in screen coordinates
    pub position: Vec2i,
    /// Whether the window has input focus
    pub has_focus: bool,
    /// Whether a close was requested; never auto-reset
    pub close_requested: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            size: Vec2i::zeros(),
            framebuffer_size: Vec2i::zeros(),
            position: Vec2i::zeros(),
            has_focus: true,
            close_requested: false,
        }
    }
}

impl WindowState {
    /// Fold one event record into the snapshot
    ///
    /// Each record updates exactly one attribute. Input records belong to the
    /// input tracker and are ignored here; file drops are accepted and
    /// discarded.
    pub fn apply(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Resized { width, height } => {
                self.size = Vec2i::new(*width, *height);
            }
            WindowEvent::FramebufferResized { width, height } => {
                self.framebuffer_size = Vec2i::new(*width, *height);
            }
            WindowEvent::Moved { x, y } => {
                self.position = Vec2i::new(*x, *y);
            }
            WindowEvent::Focus(focused) => {
                self.has_focus = *focused;
            }
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Key { .. }
            | WindowEvent::Char(_)
            | WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseButton { .. }
            | WindowEvent::Scroll { .. }
            | WindowEvent::FileDrop(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::events::ButtonAction;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let state = WindowState::default();
        assert_eq!(state.size, Vec2i::zeros());
        assert_eq!(state.position, Vec2i::zeros());
        assert!(state.has_focus);
        assert!(!state.close_requested);
    }

    #[test]
    fn test_sequence_reflected_after_dispatch_not_before() {
        let mut state = WindowState::default();
        let events = [
            WindowEvent::Resized {
                width: 1920,
                height: 1080,
            },
            WindowEvent::Moved { x: 200, y: 120 },
            WindowEvent::Focus(false),
            WindowEvent::CloseRequested,
        ];

        // Nothing changes until the fold runs.
        assert_eq!(state.size, Vec2i::zeros());
        assert!(state.has_focus);
        assert!(!state.close_requested);

        for event in &events {
            state.apply(event);
        }

        assert_eq!(state.size, Vec2i::new(1920, 1080));
        assert_eq!(state.position, Vec2i::new(200, 120));
        assert!(!state.has_focus);
        assert!(state.close_requested);
    }

    #[test]
    fn test_framebuffer_size_tracked_separately() {
        let mut state = WindowState::default();
        state.apply(&WindowEvent::Resized {
            width: 800,
            height: 600,
        });
        state.apply(&WindowEvent::FramebufferResized {
            width: 1600,
            height: 1200,
        });
        assert_eq!(state.size, Vec2i::new(800, 600));
        assert_eq!(state.framebuffer_size, Vec2i::new(1600, 1200));
    }

    #[test]
    fn test_close_flag_is_sticky() {
        let mut state = WindowState::default();
        state.apply(&WindowEvent::CloseRequested);
        state.apply(&WindowEvent::Focus(true));
        state.apply(&WindowEvent::Resized {
            width: 640,
            height: 480,
        });
        assert!(state.close_requested);
    }

    #[test]
    fn test_input_and_drop_records_do_not_touch_window_state() {
        let mut state = WindowState::default();
        let before = state.clone();

        state.apply(&WindowEvent::Key {
            code: 65,
            scancode: 38,
            action: ButtonAction::Press,
        });
        state.apply(&WindowEvent::CursorMoved { x: 10.0, y: 20.0 });
        state.apply(&WindowEvent::Char('a'));
        state.apply(&WindowEvent::FileDrop(vec![PathBuf::from("/tmp/x")]));

        assert_eq!(state, before);
    }
}
