//! The particle demo engine: a pointer-driven particle set drawn with a fading trail.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::emitter::{EmitterConfig, ParticlePreset};
use super::particle::Particle;
use crate::config::ConfigError;
use crate::core::{DemoId, DrawingSurface, FrameHandle, FrameScheduler};
use crate::math::{Color, Vector2};

/// Demo configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Background color, used for the trail and for clearing.
    pub background: Color,
    /// Opacity of the background painted over each frame.
    pub trail_alpha: f64,
    /// Ranges for new particles.
    pub emitter: EmitterConfig,
    /// RNG seed. Drawn from the host when absent.
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_bytes(26, 26, 46),
            trail_alpha: 0.1,
            emitter: EmitterConfig::default(),
            seed: None,
        }
    }
}

impl DemoConfig {
    /// Default configuration with the emitter of a preset.
    pub fn from_preset(preset: ParticlePreset) -> Self {
        Self {
            emitter: EmitterConfig::from_preset(preset),
            ..Self::default()
        }
    }

    /// Check every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.trail_alpha) {
            return Err(ConfigError::invalid("demo.trail_alpha", "must be in [0, 1]"));
        }
        self.emitter.validate()
    }
}

/// Pointer-driven particle demo bound to one drawing surface.
///
/// The host owns the surface and the scheduler and passes them in; the demo
/// owns the particle set and the running flag. Each granted frame request must
/// be answered with exactly one call to [`frame`](Self::frame).
pub struct ParticleDemo {
    /// Unique identifier.
    id: DemoId,
    /// Configuration.
    config: DemoConfig,
    /// Live particles in insertion order.
    particles: Vec<Particle>,
    /// Whether frames keep rescheduling themselves.
    running: bool,
    /// Frame requested from the host and not yet run.
    pending_frame: Option<FrameHandle>,
    /// Frames run so far.
    frame_count: u64,
    rng: SmallRng,
    // Fill styles, formatted once.
    trail_style: String,
    clear_style: String,
}

impl Default for ParticleDemo {
    fn default() -> Self {
        Self::new(DemoConfig::default())
    }
}

impl ParticleDemo {
    /// Create a stopped demo with an empty particle set.
    ///
    /// `config` is trusted as given. A zero decay range makes particles
    /// immortal, so use [`ParticleDemo::try_new`] for configuration read from
    /// outside the program.
    pub fn new(config: DemoConfig) -> Self {
        let seed = config.seed.unwrap_or_else(host_seed);
        let trail_style = config.background.to_css_rgba(config.trail_alpha);
        let clear_style = config.background.to_css_rgba(1.0);
        let id = DemoId::new();
        log::debug!("particle demo {} created (seed {})", id, seed);

        Self {
            id,
            config,
            particles: Vec::new(),
            running: false,
            pending_frame: None,
            frame_count: 0,
            rng: SmallRng::seed_from_u64(seed),
            trail_style,
            clear_style,
        }
    }

    /// Validate `config`, then create the demo.
    pub fn try_new(config: DemoConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create a demo from a preset.
    pub fn from_preset(preset: ParticlePreset) -> Self {
        Self::new(DemoConfig::from_preset(preset))
    }

    /// Get the demo ID.
    #[inline]
    pub fn id(&self) -> DemoId {
        self.id
    }

    /// Get the configuration.
    #[inline]
    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Live particles in insertion order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Whether the frame loop is on.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a frame has been requested and not yet run.
    #[inline]
    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Frames run so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Start the frame loop. Does nothing if it is already running.
    pub fn start<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        if !self.running {
            log::debug!("particle demo {} started", self.id);
        }
        self.running = true;
        self.schedule(scheduler);
    }

    /// Stop the frame loop. A frame already requested still runs once.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("particle demo {} stopped", self.id);
        }
        self.running = false;
    }

    /// Flip the running flag. Returns the new state.
    pub fn toggle<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start(scheduler);
        }
        self.running
    }

    /// Stop and withdraw any pending frame, e.g. when the surface goes away.
    pub fn detach<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        self.stop();
        if let Some(handle) = self.pending_frame.take() {
            scheduler.cancel_frame(handle);
        }
    }

    /// Spawn a burst of particles at a surface-local position.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        let position = Vector2::new(x, y);
        let burst = self.config.emitter.burst_count;
        self.particles.reserve(burst as usize);
        for _ in 0..burst {
            let particle = Particle::spawn(position, &self.config.emitter, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Spawn a burst at the primary touch point. Other touches are ignored.
    pub fn on_touch_move(&mut self, touches: &[Vector2]) {
        if let Some(primary) = touches.first() {
            self.on_pointer_move(primary.x, primary.y);
        }
    }

    /// Append an already built particle.
    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Drop every particle and paint the surface with the opaque background.
    pub fn clear<S: DrawingSurface + ?Sized>(&mut self, surface: &mut S) {
        self.particles.clear();
        surface.save();
        surface.set_global_alpha(1.0);
        surface.set_fill_style(&self.clear_style);
        surface.fill_all();
        surface.restore();
        log::debug!("particle demo {} cleared", self.id);
    }

    /// Run one frame: fade, advance, cull, draw, and reschedule while running.
    pub fn frame<S, F>(&mut self, surface: &mut S, scheduler: &mut F)
    where
        S: DrawingSurface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        self.pending_frame = None;

        surface.set_fill_style(&self.trail_style);
        surface.fill_all();

        // Walk backwards so removing index i never skips the particle after it.
        let shrink = self.config.emitter.shrink;
        for i in (0..self.particles.len()).rev() {
            let particle = &mut self.particles[i];
            particle.update(shrink);
            if particle.is_alive() {
                particle.draw(surface);
            } else {
                self.particles.remove(i);
            }
        }

        self.frame_count += 1;

        if self.running {
            self.schedule(scheduler);
        }
    }

    fn schedule<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        if self.pending_frame.is_some() {
            return;
        }
        self.pending_frame = scheduler.request_frame();
        if self.pending_frame.is_none() {
            log::warn!("particle demo {}: host refused a frame request", self.id);
        }
    }
}

/// Seed for demos that don't configure one.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
fn host_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Seed for demos that don't configure one.
#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
fn host_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DrawCommand, ManualScheduler, RecordingSurface};

    fn seeded() -> ParticleDemo {
        ParticleDemo::new(DemoConfig {
            seed: Some(42),
            ..Default::default()
        })
    }

    fn tagged(tag: &str, decay: f64) -> Particle {
        Particle::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0), decay, 2.0, tag)
    }

    /// Run every pending frame once, including those requested while running.
    fn pump(demo: &mut ParticleDemo, surface: &mut RecordingSurface, scheduler: &mut ManualScheduler, max: usize) {
        for _ in 0..max {
            if scheduler.take_pending().is_none() {
                break;
            }
            demo.frame(surface, scheduler);
        }
    }

    #[test]
    fn test_pointer_move_adds_three_at_position() {
        let mut demo = seeded();
        demo.on_pointer_move(100.0, 100.0);

        assert_eq!(demo.particle_count(), 3);
        for p in demo.particles() {
            assert_eq!(p.position(), Vector2::new(100.0, 100.0));
            assert_eq!(p.life(), 1.0);
        }
        let v: Vec<_> = demo.particles().iter().map(|p| p.velocity()).collect();
        assert_ne!(v[0], v[1]);
        assert_ne!(v[1], v[2]);
        assert_ne!(v[0], v[2]);
    }

    #[test]
    fn test_pointer_move_always_adds_burst() {
        let mut demo = seeded();
        for n in 1..=20 {
            demo.on_pointer_move(n as f64, 0.0);
            assert_eq!(demo.particle_count(), n * 3);
        }
    }

    #[test]
    fn test_one_frame_moves_and_decays() {
        let mut demo = seeded();
        let mut surface = RecordingSurface::new(800.0, 500.0);
        let mut scheduler = ManualScheduler::new();

        demo.on_pointer_move(100.0, 100.0);
        let before = demo.particles().to_vec();
        demo.frame(&mut surface, &mut scheduler);

        assert_eq!(demo.particle_count(), 3);
        for (old, new) in before.iter().zip(demo.particles()) {
            assert_eq!(new.position(), old.position() + old.velocity());
            assert_eq!(new.life(), old.life() - old.decay());
            assert_eq!(new.size(), old.size() * 0.99);
        }
    }

    #[test]
    fn test_frame_paints_trail_then_particles() {
        let mut demo = seeded();
        let mut surface = RecordingSurface::new(800.0, 500.0);
        let mut scheduler = ManualScheduler::new();

        demo.on_pointer_move(10.0, 10.0);
        demo.frame(&mut surface, &mut scheduler);

        let commands = surface.commands();
        assert_eq!(
            commands[0],
            DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 500.0,
                style: "rgba(26, 26, 46, 0.1)".into(),
                alpha: 1.0,
            }
        );
        assert_eq!(surface.circle_count(), 3);
        for (cmd, p) in commands[1..].iter().zip(demo.particles().iter().rev()) {
            match cmd {
                DrawCommand::Circle { x, y, radius, style, alpha } => {
                    assert_eq!((*x, *y), (p.position().x, p.position().y));
                    assert_eq!(*radius, p.size());
                    assert_eq!(style, p.color());
                    assert_eq!(*alpha, p.life());
                }
                other => panic!("unexpected command {:?}", other),
            }
        }
    }

    #[test]
    fn test_reverse_removal_keeps_order() {
        let mut demo = seeded();
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut scheduler = ManualScheduler::new();

        demo.add_particle(tagged("a", 0.5));
        demo.add_particle(tagged("b", 1.0));
        demo.add_particle(tagged("c", 1.0));
        demo.add_particle(tagged("d", 0.5));
        demo.add_particle(tagged("e", 1.0));

        demo.frame(&mut surface, &mut scheduler);

        let left: Vec<_> = demo.particles().iter().map(|p| p.color()).collect();
        assert_eq!(left, ["a", "d"]);
        // Dead particles are not drawn.
        assert_eq!(surface.circle_count(), 2);

        demo.frame(&mut surface, &mut scheduler);
        assert_eq!(demo.particle_count(), 0);
    }

    #[test]
    fn test_particle_removed_after_ceil_inverse_decay_frames() {
        let mut demo = seeded();
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut scheduler = ManualScheduler::new();
        demo.add_particle(tagged("p", 0.25));

        for _ in 0..3 {
            demo.frame(&mut surface, &mut scheduler);
            assert_eq!(demo.particle_count(), 1);
        }
        demo.frame(&mut surface, &mut scheduler);
        assert_eq!(demo.particle_count(), 0);
    }

    #[test]
    fn test_clear_empties_and_paints_opaque() {
        let mut demo = seeded();
        let mut surface = RecordingSurface::new(800.0, 500.0);
        let mut scheduler = ManualScheduler::new();

        for i in 0..50 {
            demo.add_particle(tagged("p", 0.01 * (i % 5 + 1) as f64));
        }
        assert_eq!(demo.particle_count(), 50);

        demo.clear(&mut surface);
        assert_eq!(demo.particle_count(), 0);
        assert_eq!(
            surface.take_commands(),
            vec![DrawCommand::Rect {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 500.0,
                style: "rgba(26, 26, 46, 1)".into(),
                alpha: 1.0,
            }]
        );

        demo.frame(&mut surface, &mut scheduler);
        assert_eq!(surface.commands().len(), 1);
        assert_eq!(surface.circle_count(), 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut demo = seeded();
        let mut scheduler = ManualScheduler::new();

        demo.start(&mut scheduler);
        demo.start(&mut scheduler);

        assert!(demo.is_running());
        assert_eq!(scheduler.requested(), 1);
        assert!(demo.has_pending_frame());
    }

    #[test]
    fn test_running_frame_reschedules_itself() {
        let mut demo = seeded();
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut scheduler = ManualScheduler::new();

        demo.start(&mut scheduler);
        pump(&mut demo, &mut surface, &mut scheduler, 10);

        assert_eq!(demo.frame_count(), 10);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_stop_lets_pending_frame_finish_once() {
        let mut demo = seeded();
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut scheduler = ManualScheduler::new();

        demo.start(&mut scheduler);
        assert!(!demo.toggle(&mut scheduler));

        pump(&mut demo, &mut surface, &mut scheduler, 10);
        assert_eq!(demo.frame_count(), 1);
        assert_eq!(scheduler.pending(), 0);
        assert!(!demo.has_pending_frame());
    }

    #[test]
    fn test_toggle_off_on_before_frame_keeps_single_loop() {
        let mut demo = seeded();
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut scheduler = ManualScheduler::new();

        demo.start(&mut scheduler);
        demo.toggle(&mut scheduler);
        assert!(demo.toggle(&mut scheduler));

        assert_eq!(scheduler.requested(), 1);
        pump(&mut demo, &mut surface, &mut scheduler, 5);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(demo.frame_count(), 5);
    }

    #[test]
    fn test_resume_does_not_resurrect_particles() {
        let mut demo = seeded();
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut scheduler = ManualScheduler::new();

        demo.add_particle(tagged("p", 0.5));
        demo.start(&mut scheduler);
        pump(&mut demo, &mut surface, &mut scheduler, 2);
        assert_eq!(demo.particle_count(), 0);

        demo.toggle(&mut scheduler);
        pump(&mut demo, &mut surface, &mut scheduler, 10);
        let frames_while_paused = demo.frame_count();

        demo.toggle(&mut scheduler);
        assert_eq!(scheduler.pending(), 1);
        pump(&mut demo, &mut surface, &mut scheduler, 3);
        assert_eq!(demo.particle_count(), 0);
        assert_eq!(demo.frame_count(), frames_while_paused + 3);
    }

    #[test]
    fn test_detach_cancels_pending_frame() {
        let mut demo = seeded();
        let mut scheduler = ManualScheduler::new();

        demo.start(&mut scheduler);
        demo.detach(&mut scheduler);

        assert!(!demo.is_running());
        assert!(!demo.has_pending_frame());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_touch_uses_first_point() {
        let mut demo = seeded();
        demo.on_touch_move(&[Vector2::new(5.0, 6.0), Vector2::new(50.0, 60.0)]);
        assert_eq!(demo.particle_count(), 3);
        assert!(demo.particles().iter().all(|p| p.position() == Vector2::new(5.0, 6.0)));

        demo.on_touch_move(&[]);
        assert_eq!(demo.particle_count(), 3);
    }

    #[test]
    fn test_same_seed_same_particles() {
        let mut a = seeded();
        let mut b = seeded();
        a.on_pointer_move(1.0, 2.0);
        b.on_pointer_move(1.0, 2.0);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_independent_instances() {
        let mut a = seeded();
        let b = seeded();
        a.on_pointer_move(0.0, 0.0);
        assert_ne!(a.id(), b.id());
        assert_eq!(b.particle_count(), 0);
    }

    #[test]
    fn test_config_validation() {
        assert!(DemoConfig::default().validate().is_ok());
        let bad = DemoConfig { trail_alpha: 1.5, ..Default::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_try_new_rejects_immortal_particles() {
        let mut config = DemoConfig {
            seed: Some(1),
            ..Default::default()
        };
        config.emitter.decay_min = 0.0;
        config.emitter.decay_spread = 0.0;

        assert!(matches!(
            ParticleDemo::try_new(config),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_try_new_accepts_defaults() {
        let demo = ParticleDemo::try_new(DemoConfig::default()).unwrap();
        assert_eq!(demo.particle_count(), 0);
        assert!(!demo.is_running());
    }

    #[test]
    fn test_busy_frame_keeps_loop_alive() {
        use crate::core::run_or_retry;
        use std::cell::RefCell;

        let state = RefCell::new(seeded());
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut engine = ManualScheduler::new();
        let mut retry = ManualScheduler::new();

        state.borrow_mut().start(&mut engine);
        assert!(engine.take_pending().is_some());

        // The granted frame fires while something else holds the state.
        let held = state.borrow();
        let ran = run_or_retry(&state, &mut retry, |demo| demo.frame(&mut surface, &mut engine));
        drop(held);
        assert!(!ran);
        assert!(state.borrow().has_pending_frame());
        assert_eq!(retry.pending(), 1);

        // The retried frame runs and the demo schedules its next one.
        assert!(retry.take_pending().is_some());
        let ran = run_or_retry(&state, &mut retry, |demo| demo.frame(&mut surface, &mut engine));
        assert!(ran);
        assert_eq!(state.borrow().frame_count(), 1);
        assert_eq!(engine.pending(), 1);
        assert!(state.borrow().has_pending_frame());
    }
}
