//! Emitter configuration: the random ranges new particles are drawn from.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::math::Hsl;

/// Particle effect preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticlePreset {
    /// Cool blue sparkles following the pointer.
    #[default]
    Pixelhack,
    /// Slow, warm, long-lived embers.
    Embers,
    /// Fast, short-lived bright sparks.
    Sparks,
}

/// Ranges for the per-particle values fixed at creation.
///
/// Every `*_spread` is the width of a uniform range starting at the matching
/// `*_min`: a value is drawn as `min + U[0, 1) * spread`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Particles appended per pointer event.
    pub burst_count: u32,
    /// Each velocity component is `(U[0, 1) - 0.5) * speed` pixels per frame.
    pub speed: f64,
    /// Minimum life lost per frame.
    pub decay_min: f64,
    /// Decay range width.
    pub decay_spread: f64,
    /// Minimum initial radius in pixels.
    pub size_min: f64,
    /// Initial radius range width.
    pub size_spread: f64,
    /// Factor applied to the radius every frame.
    pub shrink: f64,
    /// Minimum hue in degrees.
    pub hue_min: f64,
    /// Hue range width in degrees.
    pub hue_spread: f64,
    /// Saturation in percent.
    pub saturation: f64,
    /// Lightness in percent.
    pub lightness: f64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            burst_count: 3,
            speed: 4.0,
            decay_min: 0.005,
            decay_spread: 0.02,
            size_min: 1.0,
            size_spread: 3.0,
            shrink: 0.99,
            hue_min: 200.0,
            hue_spread: 60.0,
            saturation: 70.0,
            lightness: 60.0,
        }
    }
}

impl EmitterConfig {
    /// Configuration for a preset.
    pub fn from_preset(preset: ParticlePreset) -> Self {
        match preset {
            ParticlePreset::Pixelhack => Self::default(),
            ParticlePreset::Embers => Self::embers_preset(),
            ParticlePreset::Sparks => Self::sparks_preset(),
        }
    }

    /// Warm embers drifting slowly and fading late.
    pub fn embers_preset() -> Self {
        Self {
            burst_count: 2,
            speed: 1.5,
            decay_min: 0.004,
            decay_spread: 0.008,
            size_min: 2.0,
            size_spread: 3.0,
            shrink: 0.995,
            hue_min: 10.0,
            hue_spread: 35.0,
            saturation: 90.0,
            lightness: 55.0,
        }
    }

    /// Bright sparks flying off quickly.
    pub fn sparks_preset() -> Self {
        Self {
            burst_count: 5,
            speed: 9.0,
            decay_min: 0.03,
            decay_spread: 0.04,
            size_min: 0.5,
            size_spread: 1.5,
            shrink: 0.97,
            hue_min: 40.0,
            hue_spread: 20.0,
            saturation: 100.0,
            lightness: 70.0,
        }
    }

    /// Decay drawn from `u` in `[0, 1)`.
    #[inline]
    pub fn decay_at(&self, u: f64) -> f64 {
        self.decay_min + u * self.decay_spread
    }

    /// Initial size drawn from `u` in `[0, 1)`.
    #[inline]
    pub fn size_at(&self, u: f64) -> f64 {
        self.size_min + u * self.size_spread
    }

    /// Velocity component drawn from `u` in `[0, 1)`.
    #[inline]
    pub fn velocity_at(&self, u: f64) -> f64 {
        (u - 0.5) * self.speed
    }

    /// Color drawn from `u` in `[0, 1)`.
    pub fn color_at(&self, u: f64) -> Hsl {
        Hsl::new(self.hue_min + u * self.hue_spread, self.saturation, self.lightness)
    }

    /// Check the ranges are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.burst_count == 0 {
            return Err(ConfigError::invalid("emitter.burst_count", "must be at least 1"));
        }
        if !(self.decay_min > 0.0) {
            return Err(ConfigError::invalid("emitter.decay_min", "must be positive"));
        }
        if self.decay_spread < 0.0 || self.size_spread < 0.0 || self.hue_spread < 0.0 {
            return Err(ConfigError::invalid("emitter", "spreads must not be negative"));
        }
        if self.size_min < 0.0 {
            return Err(ConfigError::invalid("emitter.size_min", "must not be negative"));
        }
        if !(self.shrink > 0.0 && self.shrink <= 1.0) {
            return Err(ConfigError::invalid("emitter.shrink", "must be in (0, 1]"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges() {
        let config = EmitterConfig::default();
        assert_eq!(config.decay_at(0.0), 0.005);
        assert!((config.decay_at(1.0) - 0.025).abs() < 1e-12);
        assert_eq!(config.size_at(0.0), 1.0);
        assert_eq!(config.size_at(1.0), 4.0);
        assert_eq!(config.velocity_at(0.0), -2.0);
        assert_eq!(config.velocity_at(1.0), 2.0);
        assert_eq!(config.color_at(0.5).to_css(), "hsl(230, 70%, 60%)");
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in [ParticlePreset::Pixelhack, ParticlePreset::Embers, ParticlePreset::Sparks] {
            assert!(EmitterConfig::from_preset(preset).validate().is_ok());
        }
    }

    #[test]
    fn test_rejects_bad_values() {
        let zero_burst = EmitterConfig { burst_count: 0, ..Default::default() };
        assert!(zero_burst.validate().is_err());

        let no_decay = EmitterConfig { decay_min: 0.0, ..Default::default() };
        assert!(no_decay.validate().is_err());

        let growing = EmitterConfig { shrink: 1.5, ..Default::default() };
        assert!(growing.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EmitterConfig = serde_json::from_str(r#"{ "burst_count": 7 }"#).unwrap();
        assert_eq!(config.burst_count, 7);
        assert_eq!(config.shrink, 0.99);
    }
}
