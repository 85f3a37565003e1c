//! Canvas 2D surface and `requestAnimationFrame` scheduler.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::core::{BoundingRect, DrawingSurface, FrameHandle, FrameScheduler};
use crate::math::consts::TWO_PI;

/// Reasons a canvas can't be used as a drawing surface.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// No element with the id.
    #[error("Canvas '{0}' not found")]
    NotFound(String),

    /// The element is something other than a canvas.
    #[error("Element '{0}' is not a canvas")]
    NotACanvas(String),

    /// The canvas refused a 2D context.
    #[error("Canvas '{0}' has no 2D context")]
    NoContext(String),
}

/// A `<canvas>` and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up a canvas by element id and open its 2D context.
    pub fn from_id(document: &Document, canvas_id: &str) -> Result<Self, SurfaceError> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SurfaceError::NotFound(canvas_id.to_owned()))?
            .dyn_into()
            .map_err(|_| SurfaceError::NotACanvas(canvas_id.to_owned()))?;

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| SurfaceError::NoContext(canvas_id.to_owned()))?;

        Ok(Self { canvas, ctx })
    }

    /// The canvas element.
    #[inline]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Match the drawing buffer to the laid-out size of the element.
    pub fn fit_to_layout(&self) {
        let width = self.canvas.offset_width().max(0) as u32;
        let height = self.canvas.offset_height().max(0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Viewport position of the canvas, for translating pointer coordinates.
    pub fn bounding_rect(&self) -> BoundingRect {
        let rect = self.canvas.get_bounding_client_rect();
        BoundingRect::new(rect.left(), rect.top())
    }
}

impl DrawingSurface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.ctx.begin_path();
        // arc() throws on a negative radius; skip the particle rather than abort the frame.
        if self.ctx.arc(x, y, radius, 0.0, TWO_PI).is_err() {
            log::trace!("skipped circle with radius {}", radius);
            return;
        }
        self.ctx.fill();
    }
}

/// Shared slot for the frame callback. Filled once the callback exists, since
/// the callback itself needs the scheduler that refers to it.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// [`FrameScheduler`] backed by `window.requestAnimationFrame`. Clones share
/// the callback slot.
#[derive(Clone)]
pub struct AnimationFrameScheduler {
    window: Window,
    callback: FrameCallback,
}

impl AnimationFrameScheduler {
    /// Create a scheduler that will invoke whatever closure ends up in `callback`.
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(err) => {
                log::warn!("requestAnimationFrame failed: {:?}", err);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", err);
        }
    }
}
