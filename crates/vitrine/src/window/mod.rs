//! Window context management
//!
//! Owns the single native window, its OpenGL context, and the poll/swap
//! cycle. Geometry, focus, and the close flag are cached snapshots updated
//! only while `poll_events` dispatches pending native events; reads never
//! block and never query the native layer, so they can be stale between
//! polls.
//!
//! Exactly one [`WindowContext`] may be alive per process. Construction is
//! guarded by a process-wide flag and fails with
//! [`WindowError::AlreadyExists`] while another context lives; dropping the
//! context releases the native window and terminates the windowing library.

pub mod events;

mod fanout;
mod state;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use glfw::Context;
use log::{info, warn};
use thiserror::Error;

use crate::config::WindowConfig;
use crate::foundation::math::Vec2i;
use crate::overlay::{EventSink, Overlay};
use crate::render::RendererHandle;
use crate::window::fanout::EventFanout;
use events::WindowEvent;

/// Fatal window configuration errors
///
/// Everything else the window does degrades gracefully: a logged warning and
/// a safe default instead of an error.
#[derive(Error, Debug)]
pub enum WindowError {
    /// A second context was constructed while one is alive
    #[error("a window context is already alive in this process")]
    AlreadyExists,

    /// The native windowing library failed to initialize
    #[error("failed to initialize GLFW")]
    InitializationFailed,

    /// The native window could not be created
    #[error("failed to create the GLFW window")]
    CreationFailed,
}

/// Convenience alias for window operations that can fail fatally
pub type WindowResult<T> = Result<T, WindowError>;

/// Cursor behavior within the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Visible cursor, free to leave the window
    Normal,
    /// Invisible while over the window, otherwise unconstrained
    Hidden,
    /// Hidden and locked to the window, for raw-motion camera control
    Disabled,
}

impl From<CursorMode> for glfw::CursorMode {
    fn from(mode: CursorMode) -> Self {
        match mode {
            CursorMode::Normal => Self::Normal,
            CursorMode::Hidden => Self::Hidden,
            CursorMode::Disabled => Self::Disabled,
        }
    }
}

// Liveness flag backing the one-context-per-process invariant.
static CONTEXT_ALIVE: AtomicBool = AtomicBool::new(false);

/// The application window, its OpenGL context, and the event fan-out
pub struct WindowContext {
    config: WindowConfig,
    glfw: Option<glfw::Glfw>,
    window: Option<glfw::PWindow>,
    events: Option<glfw::GlfwReceiver<(f64, glfw::WindowEvent)>>,
    fanout: EventFanout,
    renderer: Option<RendererHandle>,
}

impl WindowContext {
    /// Claim the process's window slot
    ///
    /// Does not touch the native layer; call [`load`](Self::load) to create
    /// the window. Fails with [`WindowError::AlreadyExists`] while another
    /// context is alive.
    pub fn new(config: WindowConfig) -> WindowResult<Self> {
        if CONTEXT_ALIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(WindowError::AlreadyExists);
        }

        Ok(Self {
            config,
            glfw: None,
            window: None,
            events: None,
            fanout: EventFanout::new(),
            renderer: None,
        })
    }

    /// Initialize the native layer and create the window
    ///
    /// Initializes GLFW, applies the context hints from the config
    /// (double-buffered core-profile OpenGL, fixed bit depths), creates the
    /// window, makes its context current on the calling thread, loads the GL
    /// function pointers, enables polling for every consumed event class,
    /// and logs a diagnostics block. If an overlay is already set, its first
    /// frame is begun.
    ///
    /// Fatal on library init failure or window creation failure; in the
    /// latter case the partially-initialized library is torn down before
    /// returning.
    pub fn load(&mut self) -> WindowResult<()> {
        let mut glfw =
            glfw::init(glfw::log_errors).map_err(|_| WindowError::InitializationFailed)?;

        glfw.default_window_hints();
        glfw.window_hint(glfw::WindowHint::Resizable(self.config.resizable));
        glfw.window_hint(glfw::WindowHint::Decorated(self.config.decorated));
        glfw.window_hint(glfw::WindowHint::RefreshRate(Some(self.config.refresh_rate)));
        glfw.window_hint(glfw::WindowHint::RedBits(Some(self.config.color_bits)));
        glfw.window_hint(glfw::WindowHint::GreenBits(Some(self.config.color_bits)));
        glfw.window_hint(glfw::WindowHint::BlueBits(Some(self.config.color_bits)));
        glfw.window_hint(glfw::WindowHint::AlphaBits(Some(self.config.color_bits)));
        glfw.window_hint(glfw::WindowHint::DepthBits(Some(self.config.depth_bits)));
        glfw.window_hint(glfw::WindowHint::StencilBits(Some(self.config.stencil_bits)));
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::OpenGl));
        glfw.window_hint(glfw::WindowHint::ContextVersion(
            self.config.gl_major,
            self.config.gl_minor,
        ));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::OpenGlDebugContext(false));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        glfw.window_hint(glfw::WindowHint::DoubleBuffer(true));

        let Some((mut window, events)) = glfw.create_window(
            self.config.width,
            self.config.height,
            &self.config.title,
            glfw::WindowMode::Windowed,
        ) else {
            // Dropping the handle terminates the partially-initialized
            // library before the error surfaces.
            drop(glfw);
            return Err(WindowError::CreationFailed);
        };

        window.make_current();
        glfw.set_swap_interval(match self.config.swap_interval {
            0 => glfw::SwapInterval::None,
            n => glfw::SwapInterval::Sync(n),
        });

        gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);

        window.set_size_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_pos_polling(true);
        window.set_focus_polling(true);
        window.set_close_polling(true);
        window.set_drag_and_drop_polling(true);
        window.set_key_polling(true);
        window.set_char_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_scroll_polling(true);

        // Size events only fire on changes, so the snapshot starts at the
        // configured dimensions.
        let size = Vec2i::new(self.config.width as i32, self.config.height as i32);
        self.fanout.state.size = size;
        self.fanout.state.framebuffer_size = size;

        log_context_diagnostics(&window);

        if let Some(overlay) = &self.fanout.overlay {
            overlay.borrow_mut().new_frame();
        }

        self.glfw = Some(glfw);
        self.window = Some(window);
        self.events = Some(events);

        Ok(())
    }

    /// Whether the window had input focus as of the last poll
    pub fn has_focus(&self) -> bool {
        self.fanout.state.has_focus
    }

    /// Client-area size as of the last poll (screen coordinates)
    pub fn size(&self) -> Vec2i {
        self.fanout.state.size
    }

    /// Framebuffer size as of the last poll (pixels)
    pub fn framebuffer_size(&self) -> Vec2i {
        self.fanout.state.framebuffer_size
    }

    /// Top-left window position as of the last poll (screen coordinates)
    pub fn position(&self) -> Vec2i {
        self.fanout.state.position
    }

    /// Whether a close has been requested, by the user or by
    /// [`set_close_state`](Self::set_close_state)
    pub fn close_requested(&self) -> bool {
        self.fanout.state.close_requested
    }

    /// Flip the cached close flag
    ///
    /// Read-your-own-write: the new value is visible immediately, with no
    /// intervening poll. The flag is not yet propagated to the native
    /// window's should-close state; callers drive shutdown off
    /// [`close_requested`](Self::close_requested).
    pub fn set_close_state(&mut self, close: bool) {
        self.fanout.state.close_requested = close;
    }

    /// Set the window title
    pub fn set_title(&mut self, title: &str) {
        if let Some(window) = self.native_mut("set_title") {
            window.set_title(title);
        }
    }

    /// Resize the window's client area
    pub fn set_size(&mut self, width: u32, height: u32) {
        if let Some(window) = self.native_mut("set_size") {
            window.set_size(width as i32, height as i32);
        }
    }

    /// Move the window's top-left corner
    pub fn set_position(&mut self, x: i32, y: i32) {
        if let Some(window) = self.native_mut("set_position") {
            window.set_pos(x, y);
        }
    }

    /// Change cursor visibility and confinement
    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        if let Some(window) = self.native_mut("set_cursor_mode") {
            window.set_cursor_mode(mode.into());
        }
    }

    /// Warp the cursor to an absolute client-area position
    pub fn set_cursor_position(&mut self, x: f64, y: f64) {
        if let Some(window) = self.native_mut("set_cursor_position") {
            window.set_cursor_pos(x, y);
        }
    }

    /// Read the OS clipboard, if a window exists and the clipboard holds text
    pub fn clipboard_string(&mut self) -> Option<String> {
        self.native_mut("clipboard_string")
            .and_then(|window| window.get_clipboard_string())
    }

    /// Write the OS clipboard
    pub fn set_clipboard_string(&mut self, text: &str) {
        if let Some(window) = self.native_mut("set_clipboard_string") {
            window.set_clipboard_string(text);
        }
    }

    /// Shared handle to the active renderer
    ///
    /// Returns `None` and logs a warning when no renderer has been set;
    /// never fails.
    pub fn renderer(&self) -> Option<RendererHandle> {
        if self.renderer.is_none() {
            warn!("WindowContext::renderer: no renderer set");
        }
        self.renderer.clone()
    }

    /// Install the renderer the window drives each frame
    ///
    /// Ownership stays shared with the caller; the window never tears the
    /// renderer down.
    pub fn set_renderer(&mut self, renderer: RendererHandle) {
        self.renderer = Some(renderer);
    }

    /// Install the overlay, which is notified of events after all sinks and
    /// gets its frame lifecycle driven by [`render`](Self::render)
    pub fn set_overlay(&mut self, overlay: Rc<RefCell<dyn Overlay>>) {
        self.fanout.overlay = Some(overlay);
    }

    /// Register an event sink
    ///
    /// Sinks observe every polled record in registration order, before the
    /// overlay. The input tracker is typically registered first.
    pub fn add_event_sink(&mut self, sink: Rc<RefCell<dyn EventSink>>) {
        self.fanout.sinks.push(sink);
    }

    /// Draw one frame
    ///
    /// Delegates to the renderer if one is set (missing renderer warns and
    /// skips), finalizes the overlay draw list, swaps buffers, then begins
    /// the next overlay frame.
    pub fn render(&mut self) {
        if let Some(renderer) = self.renderer() {
            renderer.borrow_mut().render();
        }
        if let Some(overlay) = self.fanout.overlay.clone() {
            overlay.borrow_mut().render();
        }
        self.swap_buffers();
        if let Some(overlay) = self.fanout.overlay.clone() {
            overlay.borrow_mut().new_frame();
        }
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        if let Some(window) = self.native_mut("swap_buffers") {
            window.swap_buffers();
        }
    }

    /// Drain and dispatch all pending native events
    ///
    /// This is the only point where the cached state and the registered
    /// sinks are updated. The entire pending queue is dispatched before
    /// returning; nothing is deferred across polls.
    pub fn poll_events(&mut self) {
        let (Some(glfw), Some(events)) = (self.glfw.as_mut(), self.events.as_ref()) else {
            warn!("WindowContext::poll_events: no window loaded");
            return;
        };

        glfw.poll_events();
        let records: Vec<WindowEvent> = glfw::flush_messages(events)
            .filter_map(|(_, event)| WindowEvent::from_glfw(event))
            .collect();

        self.fanout.dispatch(&records);
    }

    /// Bind or unbind the GL context on the calling thread
    ///
    /// The context may be current on at most one thread; every GL-touching
    /// operation (`load`, `render`, `swap_buffers`) must run on the thread
    /// where it is current.
    pub fn set_active_in_this_thread(&mut self, active: bool) {
        if let Some(window) = self.native_mut("set_active_in_this_thread") {
            if active {
                window.make_current();
            } else {
                glfw::make_context_current(None);
            }
        }
    }

    /// The native window handle, for internal and advanced use
    ///
    /// Returns `None` with a warning before `load` or after teardown.
    pub fn native_window(&self) -> Option<&glfw::PWindow> {
        if self.window.is_none() {
            warn!("WindowContext::native_window: no window loaded");
        }
        self.window.as_ref()
    }

    /// Mutable access to the native window handle
    pub fn native_window_mut(&mut self) -> Option<&mut glfw::PWindow> {
        self.native_mut("native_window_mut")
    }

    /// Dispatch already-translated records through the fan-out, as
    /// `poll_events` would. Lets tests drive the fold without a native
    /// window.
    #[cfg(test)]
    pub(crate) fn dispatch_events(&mut self, events: &[WindowEvent]) {
        self.fanout.dispatch(events);
    }

    fn native_mut(&mut self, op: &str) -> Option<&mut glfw::PWindow> {
        let window = self.window.as_mut();
        if window.is_none() {
            warn!("WindowContext::{op}: no window loaded");
        }
        window
    }
}

impl Drop for WindowContext {
    fn drop(&mut self) {
        // Receiver and window go before the library handle; dropping the
        // last Glfw handle terminates the library's process-wide state.
        self.events.take();
        self.window.take();
        self.glfw.take();

        CONTEXT_ALIVE.store(false, Ordering::Release);
    }
}

fn log_context_diagnostics(window: &glfw::Window) {
    let cpu_threads = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
    let profile_mask = gl_integer(gl::CONTEXT_PROFILE_MASK);

    info!("-------------------------------------------------");
    info!("OpenGL context settings:");
    info!("-------------------------------------------------");
    info!("CPU threads: {cpu_threads}");
    info!("GL version: {}", gl_string(gl::VERSION));
    info!("GPU vendor: {}", gl_string(gl::VENDOR));
    info!("GPU renderer: {}", gl_string(gl::RENDERER));
    info!("GLSL version: {}", gl_string(gl::SHADING_LANGUAGE_VERSION));
    info!("GL context profile mask: {profile_mask}");
    info!(
        "UBO max size: {} bytes",
        gl_integer(gl::MAX_UNIFORM_BLOCK_SIZE)
    );
    info!(
        "UBO max count: {}",
        gl_integer(gl::MAX_VERTEX_UNIFORM_BLOCKS)
    );
    info!(
        "UBO offset alignment: {} bytes",
        gl_integer(gl::UNIFORM_BUFFER_OFFSET_ALIGNMENT)
    );
    info!("GLFW version: {}", glfw::get_version_string());
    info!(
        "GLFW GL forward compat mode: {}",
        window.is_opengl_forward_compat()
    );
    info!("GLFW GL debug mode: {}", window.is_opengl_debug_context());
    info!("GLFW GL profile: {}", profile_name(profile_mask as u32));
    info!("-------------------------------------------------");
}

/// Human-readable name for a `GL_CONTEXT_PROFILE_MASK` value
fn profile_name(mask: u32) -> &'static str {
    if mask & gl::CONTEXT_CORE_PROFILE_BIT != 0 {
        "Core"
    } else if mask & gl::CONTEXT_COMPATIBILITY_PROFILE_BIT != 0 {
        "Compatibility"
    } else {
        "Unknown"
    }
}

fn gl_string(name: gl::types::GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unavailable>".to_string();
    }
    unsafe { std::ffi::CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

fn gl_integer(name: gl::types::GLenum) -> i32 {
    let mut value = 0;
    unsafe { gl::GetIntegerv(name, &mut value) };
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Renderer;
    use events::ButtonAction;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    // The context is a process-wide singleton; tests that construct one
    // serialize on this lock so they cannot race the liveness flag.
    static LOCK: Mutex<()> = Mutex::new(());

    fn serial() -> MutexGuard<'static, ()> {
        LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn context() -> WindowContext {
        WindowContext::new(WindowConfig::default()).unwrap()
    }

    #[test]
    fn test_second_context_fails_while_first_is_alive() {
        let _serial = serial();

        let first = context();
        assert!(matches!(
            WindowContext::new(WindowConfig::default()),
            Err(WindowError::AlreadyExists)
        ));
        drop(first);
    }

    #[test]
    fn test_context_can_be_recreated_after_drop() {
        let _serial = serial();

        for _ in 0..3 {
            drop(context());
        }

        let alive = context();
        assert!(WindowContext::new(WindowConfig::default()).is_err());
        drop(alive);
        assert!(WindowContext::new(WindowConfig::default()).is_ok());
    }

    #[test]
    fn test_fresh_context_defaults() {
        let _serial = serial();

        let context = context();
        assert_eq!(context.size(), Vec2i::zeros());
        assert_eq!(context.position(), Vec2i::zeros());
        assert!(context.has_focus());
        assert!(!context.close_requested());
    }

    #[test]
    fn test_close_state_is_read_your_own_write() {
        let _serial = serial();

        let mut context = context();
        context.set_close_state(true);
        assert!(context.close_requested());
        context.set_close_state(false);
        assert!(!context.close_requested());
    }

    struct CountingRenderer {
        frames: u32,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self) {
            self.frames += 1;
        }
    }

    #[test]
    fn test_renderer_absent_then_shared() {
        let _serial = serial();

        let mut context = context();
        assert!(context.renderer().is_none());

        let renderer = Rc::new(RefCell::new(CountingRenderer { frames: 0 }));
        context.set_renderer(renderer.clone());

        context.renderer().unwrap().borrow_mut().render();
        assert_eq!(renderer.borrow().frames, 1);

        // The window shares ownership; dropping it leaves the renderer alive.
        drop(context);
        assert_eq!(Rc::strong_count(&renderer), 1);
        assert_eq!(renderer.borrow().frames, 1);
    }

    #[test]
    fn test_dispatched_events_update_cached_reads() {
        let _serial = serial();

        let mut context = context();
        assert_eq!(context.size(), Vec2i::zeros());
        assert!(context.has_focus());

        context.dispatch_events(&[
            WindowEvent::Resized {
                width: 1920,
                height: 1080,
            },
            WindowEvent::Moved { x: 64, y: 48 },
            WindowEvent::Focus(false),
            WindowEvent::CloseRequested,
        ]);

        assert_eq!(context.size(), Vec2i::new(1920, 1080));
        assert_eq!(context.position(), Vec2i::new(64, 48));
        assert!(!context.has_focus());
        assert!(context.close_requested());
    }

    #[test]
    fn test_sinks_receive_dispatched_events() {
        let _serial = serial();

        struct Recorder {
            events: Vec<WindowEvent>,
        }
        impl EventSink for Recorder {
            fn on_window_event(&mut self, event: &WindowEvent) {
                self.events.push(event.clone());
            }
        }

        let mut context = context();
        let recorder = Rc::new(RefCell::new(Recorder { events: Vec::new() }));
        context.add_event_sink(recorder.clone());

        let record = WindowEvent::Key {
            code: 32,
            scancode: 65,
            action: ButtonAction::Press,
        };
        context.dispatch_events(std::slice::from_ref(&record));

        assert_eq!(recorder.borrow().events, vec![record]);
    }

    #[test]
    fn test_profile_names() {
        assert_eq!(profile_name(gl::CONTEXT_CORE_PROFILE_BIT), "Core");
        assert_eq!(
            profile_name(gl::CONTEXT_COMPATIBILITY_PROFILE_BIT),
            "Compatibility"
        );
        assert_eq!(profile_name(0), "Unknown");
    }

    #[test]
    fn test_native_operations_without_window_degrade_safely() {
        let _serial = serial();

        let mut context = context();
        context.set_title("untitled");
        context.set_size(640, 480);
        context.set_position(10, 10);
        context.set_cursor_mode(CursorMode::Hidden);
        context.set_cursor_position(1.0, 1.0);
        context.set_clipboard_string("ignored");
        context.set_active_in_this_thread(true);
        context.poll_events();
        context.swap_buffers();
        context.render();

        assert!(context.clipboard_string().is_none());
        assert!(context.native_window().is_none());
        assert!(context.native_window_mut().is_none());
    }
}
