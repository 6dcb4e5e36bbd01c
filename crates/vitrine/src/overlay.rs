//! Event sink and overlay integration traits
//!
//! Every event record drained by a poll is fanned out to registered sinks in
//! a fixed order: the window's own cached-state fold runs first, then each
//! registered sink in registration order, then the overlay. Each consumer
//! observes every record exactly once, in queue order, within the same poll.

use crate::window::events::WindowEvent;

/// Consumer of polled event records
pub trait EventSink {
    /// Called once at the start of each poll, before any record is dispatched
    ///
    /// Sinks that track per-poll deltas (pressed/released this poll) reset
    /// them here.
    fn begin_poll(&mut self) {}

    /// Called for each drained record, in queue order
    fn on_window_event(&mut self, event: &WindowEvent);
}

/// Immediate-mode GUI layered on top of the window's render cycle
///
/// The overlay is an event sink like any other, but additionally gets an
/// explicit frame lifecycle: `render` finalizes and submits its draw list
/// before the buffer swap, `new_frame` starts recording the next frame after
/// the swap.
pub trait Overlay: EventSink {
    /// Finalize and submit the overlay draw list for the current frame
    fn render(&mut self);

    /// Begin recording the next overlay frame
    fn new_frame(&mut self);
}
