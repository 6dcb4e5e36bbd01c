//! Foundation utilities shared across the window core

pub mod logging;
pub mod math;
