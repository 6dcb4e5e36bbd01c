//! Event fan-out
//!
//! Holds the window's cached-state snapshot plus the ordered list of event
//! sinks, and dispatches each polled record to all of them. Separated from
//! the window context so the dispatch order is testable without a native
//! window.

use std::cell::RefCell;
use std::rc::Rc;

use crate::overlay::{EventSink, Overlay};
use crate::window::events::WindowEvent;
use crate::window::state::WindowState;

/// Fixed-order fan-out of polled event records
///
/// Dispatch order per record: the cached-state fold first, then each
/// registered sink in registration order, then the overlay. `begin_poll`
/// runs on every sink (overlay included) once per dispatch, before the
/// first record.
pub(crate) struct EventFanout {
    pub state: WindowState,
    pub sinks: Vec<Rc<RefCell<dyn EventSink>>>,
    pub overlay: Option<Rc<RefCell<dyn Overlay>>>,
}

impl EventFanout {
    pub fn new() -> Self {
        Self {
            state: WindowState::default(),
            sinks: Vec::new(),
            overlay: None,
        }
    }

    /// Dispatch one poll's worth of records
    pub fn dispatch(&mut self, events: &[WindowEvent]) {
        for sink in &self.sinks {
            sink.borrow_mut().begin_poll();
        }
        if let Some(overlay) = &self.overlay {
            overlay.borrow_mut().begin_poll();
        }

        for event in events {
            self.state.apply(event);
            for sink in &self.sinks {
                sink.borrow_mut().on_window_event(event);
            }
            if let Some(overlay) = &self.overlay {
                overlay.borrow_mut().on_window_event(event);
            }
        }
    }
}
