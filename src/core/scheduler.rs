//! Frame scheduling.
//!
//! In the browser a frame is requested with `requestAnimationFrame`; elsewhere the
//! host drives frames itself. Either way the engine only asks for "one more
//! frame" through [`FrameScheduler`] and is called back once per granted request.

use std::cell::RefCell;

/// Handle to a requested frame, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Source of "call me before the next repaint" requests.
pub trait FrameScheduler {
    /// Request one frame callback. Returns `None` if the host refused the request.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Cancel a previously requested frame.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Run one frame on shared state, or ask for another frame if the state is
/// borrowed elsewhere. Returns whether `frame` ran.
///
/// The engine still holds the handle of the frame that fired, so a skipped
/// frame must be followed by another one.
pub fn run_or_retry<T, F>(state: &RefCell<T>, retry: &mut F, frame: impl FnOnce(&mut T)) -> bool
where
    F: FrameScheduler + ?Sized,
{
    match state.try_borrow_mut() {
        Ok(mut guard) => {
            frame(&mut guard);
            true
        }
        Err(_) => {
            if retry.request_frame().is_none() {
                log::warn!("frame skipped and retry refused, frame loop stopped");
            } else {
                log::debug!("frame skipped while state was busy, retrying");
            }
            false
        }
    }
}

/// Scheduler for tests and headless hosts: requests are counted, and the host
/// runs a frame for each one it takes.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: i32,
    pending: Vec<FrameHandle>,
    requested: u64,
}

impl ManualScheduler {
    /// Create a scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests not yet taken.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Total number of requests ever made.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Take the oldest pending request, if any.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_handle += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }
}

/// Default tick interval for [`FixedTickScheduler`] (60 Hz).
pub const DEFAULT_TICK_INTERVAL: f64 = 1.0 / 60.0;

/// Fixed-rate stand-in for `requestAnimationFrame` outside the browser.
///
/// At most one frame is pending at a time. [`poll`](Self::poll) fires it once a
/// full tick interval has elapsed and then drops any leftover time, so a slow
/// or paused host never receives a burst of catch-up frames.
#[derive(Debug)]
pub struct FixedTickScheduler {
    interval: f64,
    accumulator: f64,
    pending: Option<FrameHandle>,
    next_handle: i32,
}

impl Default for FixedTickScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl FixedTickScheduler {
    /// Create a scheduler firing at most once per `interval` seconds.
    pub fn new(interval: f64) -> Self {
        Self {
            interval: interval.max(0.0),
            accumulator: 0.0,
            pending: None,
            next_handle: 0,
        }
    }

    /// Tick interval in seconds.
    #[inline]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Whether a frame is waiting to fire.
    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Advance time by `delta` seconds. Returns the handle of the frame that is due,
    /// which the host must run exactly once.
    pub fn poll(&mut self, delta: f64) -> Option<FrameHandle> {
        self.pending?;
        self.accumulator += delta.max(0.0);
        if self.accumulator < self.interval {
            return None;
        }
        self.accumulator = 0.0;
        self.pending.take()
    }
}

impl FrameScheduler for FixedTickScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        if let Some(handle) = self.pending {
            return Some(handle);
        }
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.accumulator = 0.0;
        }
    }
}
