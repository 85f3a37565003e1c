//! # Core Module
//!
//! Host-facing seams shared by every demo: the drawing surface, frame
//! scheduling, timing, instance ids and pointer input.

mod clock;
mod id;
mod input;
mod scheduler;
mod surface;

pub use clock::FrameClock;
pub use id::DemoId;
pub use input::{BoundingRect, PointerInput};
pub use scheduler::{
    run_or_retry, FixedTickScheduler, FrameHandle, FrameScheduler, ManualScheduler,
    DEFAULT_TICK_INTERVAL,
};
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface};
