//! Typed window and input event records
//!
//! Polling drains the native queue into an ordered sequence of these records.
//! Keeping the records decoupled from the native layer means the state fold
//! and the input tracker can be exercised without a real window.
//!
//! Key and mouse button codes are opaque `i32` identifiers passed through
//! from the native layer; no range validation is performed on them.

use std::path::PathBuf;

/// Digital transition reported by the native layer for keys and buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Key or button went down
    Press,
    /// Key or button went up
    Release,
    /// Key is being held down (OS auto-repeat)
    Repeat,
}

impl From<glfw::Action> for ButtonAction {
    fn from(action: glfw::Action) -> Self {
        match action {
            glfw::Action::Press => Self::Press,
            glfw::Action::Release => Self::Release,
            glfw::Action::Repeat => Self::Repeat,
        }
    }
}

/// One event record drained from the native queue during a poll
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// Client area was resized (screen coordinates)
    Resized {
        /// New client-area width
        width: i32,
        /// New client-area height
        height: i32,
    },
    /// Framebuffer was resized (pixels; differs from `Resized` on HiDPI)
    FramebufferResized {
        /// New framebuffer width
        width: i32,
        /// New framebuffer height
        height: i32,
    },
    /// Window was moved to a new top-left position
    Moved {
        /// New left edge in screen coordinates
        x: i32,
        /// New top edge in screen coordinates
        y: i32,
    },
    /// Window gained (`true`) or lost (`false`) input focus
    Focus(bool),
    /// User requested the window to close
    CloseRequested,
    /// Keyboard key transition
    Key {
        /// Opaque native key code
        code: i32,
        /// Platform scancode for the key
        scancode: i32,
        /// The transition that occurred
        action: ButtonAction,
    },
    /// Unicode text input
    Char(char),
    /// Cursor moved to a new absolute position
    CursorMoved {
        /// Cursor x in client-area coordinates
        x: f64,
        /// Cursor y in client-area coordinates
        y: f64,
    },
    /// Mouse button transition
    MouseButton {
        /// Opaque native button code
        code: i32,
        /// The transition that occurred
        action: ButtonAction,
    },
    /// Scroll wheel or touchpad offset
    Scroll {
        /// Horizontal scroll offset
        x: f64,
        /// Vertical scroll offset
        y: f64,
    },
    /// Files were dropped onto the window
    ///
    /// Currently produced but not consumed by any built-in sink; paths are
    /// accepted and discarded.
    FileDrop(Vec<PathBuf>),
}

impl WindowEvent {
    /// Translate a native event into a typed record
    ///
    /// Returns `None` for native events the engine does not consume
    /// (refresh, iconify, cursor enter/leave, content scale, ...).
    pub(crate) fn from_glfw(event: glfw::WindowEvent) -> Option<Self> {
        match event {
            glfw::WindowEvent::Size(width, height) => Some(Self::Resized { width, height }),
            glfw::WindowEvent::FramebufferSize(width, height) => {
                Some(Self::FramebufferResized { width, height })
            }
            glfw::WindowEvent::Pos(x, y) => Some(Self::Moved { x, y }),
            glfw::WindowEvent::Focus(focused) => Some(Self::Focus(focused)),
            glfw::WindowEvent::Close => Some(Self::CloseRequested),
            glfw::WindowEvent::Key(key, scancode, action, _mods) => Some(Self::Key {
                code: key as i32,
                scancode,
                action: action.into(),
            }),
            glfw::WindowEvent::Char(codepoint) => Some(Self::Char(codepoint)),
            glfw::WindowEvent::CursorPos(x, y) => Some(Self::CursorMoved { x, y }),
            glfw::WindowEvent::MouseButton(button, action, _mods) => Some(Self::MouseButton {
                code: button as i32,
                action: action.into(),
            }),
            glfw::WindowEvent::Scroll(x, y) => Some(Self::Scroll { x, y }),
            glfw::WindowEvent::FileDrop(paths) => Some(Self::FileDrop(paths)),
            _ => None,
        }
    }
}
