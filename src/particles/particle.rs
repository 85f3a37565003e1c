//! A single short-lived particle.

use rand::Rng;

use super::emitter::EmitterConfig;
use crate::core::DrawingSurface;
use crate::math::Vector2;

/// Particle state. Velocity, decay and color are fixed at creation; position,
/// life and size change every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Vector2,
    velocity: Vector2,
    /// Starts at 1 and drops by `decay` per frame; the particle dies at 0.
    life: f64,
    decay: f64,
    size: f64,
    /// CSS fill style.
    color: String,
}

impl Particle {
    /// Create a particle with explicit values and full life.
    pub fn new(
        position: Vector2,
        velocity: Vector2,
        decay: f64,
        size: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            position,
            velocity,
            life: 1.0,
            decay,
            size,
            color: color.into(),
        }
    }

    /// Create a particle at `position` with values drawn from the emitter ranges.
    pub fn spawn<R: Rng + ?Sized>(position: Vector2, config: &EmitterConfig, rng: &mut R) -> Self {
        let velocity = Vector2::new(
            config.velocity_at(rng.random()),
            config.velocity_at(rng.random()),
        );
        let decay = config.decay_at(rng.random());
        let size = config.size_at(rng.random());
        let color = config.color_at(rng.random()).to_css();
        Self::new(position, velocity, decay, size, color)
    }

    /// Advance one frame.
    #[inline]
    pub fn update(&mut self, shrink: f64) {
        self.position += self.velocity;
        self.life -= self.decay;
        self.size *= shrink;
    }

    /// Whether the particle still has life left.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Draw as a filled circle with opacity equal to the remaining life.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        surface.save();
        surface.set_global_alpha(self.life);
        surface.set_fill_style(&self.color);
        surface.fill_circle(self.position.x, self.position.y, self.size);
        surface.restore();
    }

    /// Current position.
    #[inline]
    pub fn position(&self) -> Vector2 {
        self.position
    }

    /// Velocity in pixels per frame.
    #[inline]
    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    /// Remaining life.
    #[inline]
    pub fn life(&self) -> f64 {
        self.life
    }

    /// Life lost per frame.
    #[inline]
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Current radius.
    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// CSS fill style.
    #[inline]
    pub fn color(&self) -> &str {
        &self.color
    }
}
