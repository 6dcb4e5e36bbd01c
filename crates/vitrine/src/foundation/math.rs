//! Math types used by the window core
//!
//! Window geometry lives in integer screen coordinates; cursor positions and
//! scroll offsets come from the native layer as doubles.

pub use nalgebra::Vector2;

/// 2D vector of f32
pub type Vec2 = Vector2<f32>;

/// 2D vector of i32, used for window geometry in screen coordinates
pub type Vec2i = Vector2<i32>;
