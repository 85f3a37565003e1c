//! Pointer and touch input in viewport space, and its translation to surface space.

use crate::math::Vector2;

/// Viewport position of a drawing surface (as from `getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingRect {
    /// Distance from the viewport's left edge.
    pub left: f64,
    /// Distance from the viewport's top edge.
    pub top: f64,
}

impl BoundingRect {
    /// Create a new rect origin.
    #[inline]
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    /// Translate a viewport-absolute point into surface-local coordinates.
    #[inline]
    pub fn to_local(&self, client: Vector2) -> Vector2 {
        Vector2::new(client.x - self.left, client.y - self.top)
    }
}

/// A pointer event carrying viewport-absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// Mouse moved to a position.
    Move(Vector2),
    /// Touch points moved; the first entry is the primary touch.
    Touch(Vec<Vector2>),
}

impl PointerInput {
    /// The surface-local position this event should spawn particles at.
    /// Only the primary touch counts; an empty touch list yields `None`.
    pub fn local_position(&self, rect: &BoundingRect) -> Option<Vector2> {
        match self {
            PointerInput::Move(client) => Some(rect.to_local(*client)),
            PointerInput::Touch(touches) => touches.first().map(|t| rect.to_local(*t)),
        }
    }
}
