//! 2D Vector implementation in canvas space (f64, y pointing down).

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// A 2D vector with x and y components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vector2 {
    /// Create a new Vector2.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let v = Vector2::new(1.0, 2.0) + Vector2::new(0.5, -4.0);
        assert_eq!(v, Vector2::new(1.5, -2.0));
    }

    #[test]
    fn test_add_assign() {
        let mut v = Vector2::new(100.0, 100.0);
        v += Vector2::new(1.5, -0.5);
        assert_eq!(v, Vector2::new(101.5, 99.5));
    }
}
