//! # Vitrine
//!
//! Windowing and input core for OpenGL rendering engines.
//!
//! Vitrine sits between an engine and the native windowing layer (GLFW). It
//! owns the single application window and its OpenGL context, and translates
//! native window/input events into typed records that are folded into cached
//! state and fanned out to the engine's input tracker and the GUI overlay.
//!
//! ## Model
//!
//! - **Cached snapshots**: geometry, focus, and the close flag are updated
//!   only while [`WindowContext::poll_events`] dispatches pending events;
//!   reads never touch the native layer and can be stale between polls.
//! - **Single-threaded**: the GL context is current on at most one thread,
//!   moved only via [`WindowContext::set_active_in_this_thread`].
//! - **One window per process**: constructing a second [`WindowContext`]
//!   while one is alive is a fatal configuration error.
//!
//! ## Frame cycle
//!
//! ```rust,no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use vitrine::{InputTracker, WindowConfig, WindowContext};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     vitrine::foundation::logging::init();
//!
//!     let mut window = WindowContext::new(WindowConfig::default())?;
//!     window.load()?;
//!
//!     let input = Rc::new(RefCell::new(InputTracker::new()));
//!     window.add_event_sink(input.clone());
//!
//!     while !window.close_requested() {
//!         window.poll_events();
//!         // ... game logic reads window geometry and input state ...
//!         window.render();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod foundation;
pub mod input;
pub mod overlay;
pub mod render;
pub mod window;

pub use config::{ConfigError, WindowConfig};
pub use input::{InputState, InputTracker};
pub use overlay::{EventSink, Overlay};
pub use render::{Renderer, RendererHandle};
pub use window::events::{ButtonAction, WindowEvent};
pub use window::{CursorMode, WindowContext, WindowError, WindowResult};
