//! Interactive particle demo.
//!
//! Pointer movement spawns short-lived particles that drift, fade and shrink.
//! Frames are drawn over a translucent background instead of being cleared,
//! which leaves a fading motion trail behind each particle.

mod emitter;
mod particle;
mod particle_system;

pub use emitter::{EmitterConfig, ParticlePreset};
pub use particle::Particle;
pub use particle_system::{DemoConfig, ParticleDemo};
