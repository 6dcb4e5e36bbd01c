//! Renderer seam
//!
//! The window calls exactly one method on the renderer per frame and never
//! inspects its internals. Ownership of the renderer is shared between the
//! window and whichever other subsystem supplied it (scene or graphics
//! system); the window never tears it down.

use std::cell::RefCell;
use std::rc::Rc;

/// Rendering backend driven once per frame
pub trait Renderer {
    /// Submit the frame's draw work
    fn render(&mut self);
}

/// Shared, single-threaded handle to the active renderer
pub type RendererHandle = Rc<RefCell<dyn Renderer>>;
