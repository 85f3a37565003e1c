//! Web bindings for the Pixelhack page.
//!
//! This module provides JavaScript-friendly APIs via wasm-bindgen: the
//! [`PixelhackDemo`] particle canvas and [`init_site`] for the rest of the page.

mod canvas;
mod demo;
pub mod logger;
mod page;

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::config::ConfigError;
use crate::page::ContactError;

pub use canvas::{AnimationFrameScheduler, CanvasSurface, FrameCallback, SurfaceError};
pub use demo::PixelhackDemo;
pub use page::{init_site, open_demo, start_typewriter_in, submit_contact};

/// Errors raised while wiring the page to the DOM.
#[derive(Error, Debug)]
pub enum WebError {
    /// No `window` or `document` (not running in a browser page).
    #[error("No window object")]
    NoWindow,

    /// Element exists but is not the expected HTML element type.
    #[error("Element '{0}' has an unexpected type")]
    NotHtml(String),

    /// Canvas lookup failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// Bad configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Contact form rejected before sending.
    #[error(transparent)]
    Contact(#[from] ContactError),

    /// A browser API threw.
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(format!("{:?}", value))
    }
}
