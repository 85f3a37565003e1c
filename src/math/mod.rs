//! # Math Module
//!
//! Small 2D math and color toolkit for canvas drawing.

mod color;
mod vector2;

pub use color::{Color, Hsl};
pub use vector2::Vector2;

/// Common math constants.
pub mod consts {
    /// Two times Pi, a full circle in radians.
    pub const TWO_PI: f64 = std::f64::consts::PI * 2.0;
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
