//! RGB and HSL colors as CSS color strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color with values in 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 to 1.0).
    pub r: f32,
    /// Green component (0.0 to 1.0).
    pub g: f32,
    /// Blue component (0.0 to 1.0).
    pub b: f32,
}

impl Color {
    /// Create from RGB bytes (0-255).
    pub fn from_rgb_bytes(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Convert to RGB bytes, rounding to the nearest byte.
    pub fn to_rgb_bytes(&self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// CSS `rgba(r, g, b, a)` string with the given opacity.
    pub fn to_css_rgba(&self, alpha: f64) -> String {
        let [r, g, b] = self.to_rgb_bytes();
        format!("rgba({}, {}, {}, {})", r, g, b, alpha.clamp(0.0, 1.0))
    }
}

/// A color in CSS HSL notation: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees.
    pub hue: f64,
    /// Saturation in percent (0-100).
    pub saturation: f64,
    /// Lightness in percent (0-100).
    pub lightness: f64,
}

impl Hsl {
    /// Create a new HSL color.
    #[inline]
    pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// CSS `hsl(h, s%, l%)` string.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_bytes_survive_float_storage() {
        let bg = Color::from_rgb_bytes(26, 26, 46);
        assert_eq!(bg.to_rgb_bytes(), [26, 26, 46]);
    }

    #[test]
    fn test_css_rgba() {
        let bg = Color::from_rgb_bytes(26, 26, 46);
        assert_eq!(bg.to_css_rgba(0.1), "rgba(26, 26, 46, 0.1)");
        assert_eq!(bg.to_css_rgba(1.0), "rgba(26, 26, 46, 1)");
    }

    #[test]
    fn test_css_rgba_clamps_alpha() {
        let bg = Color::from_rgb_bytes(0, 0, 0);
        assert_eq!(bg.to_css_rgba(2.0), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn test_hsl_css() {
        assert_eq!(Hsl::new(230.0, 70.0, 60.0).to_css(), "hsl(230, 70%, 60%)");
    }
}
