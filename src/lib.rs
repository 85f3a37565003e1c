//! # Pixelhack - Interactive Portfolio Page in WASM
//!
//! Pixelhack drives the interactive parts of a single-page portfolio: a
//! pointer-driven particle canvas and the page behaviours around it.
//!
//! ## Features
//!
//! - **Math**: 2D vectors and RGB/HSL colors
//! - **Core**: frame clock, drawing surface and frame scheduler seams
//! - **Particles**: the particle demo engine with emitter presets
//! - **Page**: typewriter, contact form, navigation and marquee logic
//! - **Web**: canvas, `requestAnimationFrame` and DOM bindings (feature `web`)
//!
//! ## Example
//!
//! ```
//! use pixelhack::prelude::*;
//!
//! let mut demo = ParticleDemo::new(DemoConfig { seed: Some(7), ..Default::default() });
//! let mut surface = RecordingSurface::new(800.0, 600.0);
//! let mut scheduler = ManualScheduler::new();
//!
//! demo.start(&mut scheduler);
//! demo.on_pointer_move(100.0, 100.0);
//! demo.frame(&mut surface, &mut scheduler);
//!
//! assert_eq!(demo.particle_count(), 3);
//! assert_eq!(surface.circle_count(), 3);
//! ```

#![warn(missing_docs)]

#[cfg(all(feature = "web", target_arch = "wasm32"))]
use wasm_bindgen::prelude::*;

pub mod math;
pub mod core;
pub mod particles;
pub mod page;
pub mod config;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::math::*;
    pub use crate::core::*;
    pub use crate::particles::*;
    pub use crate::page::*;
    pub use crate::config::*;
}

/// Initialize the module for WASM environments.
/// Sets up panic hooks and the console logger.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web::logger::init(log::LevelFilter::Info);
    log::debug!("{} {} loaded", NAME, VERSION);
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display name.
pub const NAME: &str = "Pixelhack";
