//! Frame clock for measuring per-frame delta time and frame rate.

#[cfg(all(feature = "web", target_arch = "wasm32"))]
use web_sys::window;

#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
use std::time::Instant;

use crate::math::lerp;

/// Weight of the newest sample in the smoothed frame rate.
const FPS_SMOOTHING: f64 = 0.1;

/// A clock that is ticked once per rendered frame.
pub struct FrameClock {
    /// Whether the clock is running.
    running: bool,
    /// Time of the last tick in seconds.
    old_time: f64,
    /// Total elapsed time while running.
    elapsed_time: f64,
    /// Exponentially smoothed frames per second.
    fps: f64,
    /// Ticks since start.
    ticks: u64,

    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    instant: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock (not started).
    pub fn new() -> Self {
        Self {
            running: false,
            old_time: 0.0,
            elapsed_time: 0.0,
            fps: 0.0,
            ticks: 0,
            #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
            instant: None,
        }
    }

    /// Current time in seconds from the platform time source.
    fn now(&self) -> f64 {
        #[cfg(all(feature = "web", target_arch = "wasm32"))]
        {
            window()
                .and_then(|w| w.performance())
                .map(|p| p.now() / 1000.0)
                .unwrap_or(0.0)
        }

        #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
        {
            self.instant
                .map(|i| i.elapsed().as_secs_f64())
                .unwrap_or(0.0)
        }
    }

    /// Start (or restart) the clock.
    pub fn start(&mut self) {
        #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
        {
            self.instant = Some(Instant::now());
        }

        self.old_time = self.now();
        self.elapsed_time = 0.0;
        self.running = true;
    }

    /// Stop the clock. The next tick restarts it with a zero delta.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Record a frame and return the time since the previous one (in seconds).
    pub fn tick(&mut self) -> f64 {
        if !self.running {
            self.start();
            return 0.0;
        }

        let new_time = self.now();
        let delta = self.record(new_time - self.old_time);
        self.old_time = new_time;
        delta
    }

    /// Feed a delta measured elsewhere (e.g. the timestamp passed to an animation frame).
    pub fn record(&mut self, delta: f64) -> f64 {
        let delta = delta.max(0.0);
        self.elapsed_time += delta;
        self.ticks += 1;
        if delta > 0.0 {
            let sample = 1.0 / delta;
            self.fps = if self.fps == 0.0 {
                sample
            } else {
                lerp(self.fps, sample, FPS_SMOOTHING)
            };
        }
        delta
    }

    /// Smoothed frames per second, 0 until two frames have been seen.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Total time accumulated through ticks (in seconds).
    #[inline]
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    /// Number of recorded frames.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Check if the clock is running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }
}
