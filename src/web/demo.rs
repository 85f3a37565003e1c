//! JavaScript-facing particle demo bound to a canvas.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, MouseEvent, TouchEvent};

use super::canvas::{AnimationFrameScheduler, CanvasSurface, FrameCallback};
use super::WebError;
use crate::config::ConfigError;
use crate::core::{run_or_retry, FrameClock, PointerInput};
use crate::math::Vector2;
use crate::particles::{DemoConfig, ParticleDemo};

/// Everything one canvas owns. Shared by the frame callback, the pointer
/// listeners and the exported handle, all on the main thread.
struct DemoState {
    demo: ParticleDemo,
    surface: CanvasSurface,
    scheduler: AnimationFrameScheduler,
    clock: FrameClock,
}

type SharedState = Rc<RefCell<DemoState>>;

/// Run `f` on the state unless it is already borrowed further up the stack.
fn with_state<R>(state: &SharedState, f: impl FnOnce(&mut DemoState) -> R) -> Option<R> {
    match state.try_borrow_mut() {
        Ok(mut guard) => Some(f(&mut guard)),
        Err(_) => {
            log::warn!("particle demo busy, event dropped");
            None
        }
    }
}

/// Interactive particle canvas.
#[wasm_bindgen]
pub struct PixelhackDemo {
    state: SharedState,
}

#[wasm_bindgen]
impl PixelhackDemo {
    /// Attach to the canvas with the given id and start animating.
    ///
    /// `config_json` may hold a demo configuration (see `SiteConfig.demo`).
    /// Returns `undefined` when the canvas is missing or unusable; nothing throws.
    #[wasm_bindgen]
    pub fn attach(canvas_id: &str, config_json: Option<String>) -> Option<PixelhackDemo> {
        match Self::try_attach(canvas_id, config_json.as_deref()) {
            Ok(demo) => Some(demo),
            Err(err) => {
                log::debug!("particle demo not attached: {}", err);
                None
            }
        }
    }

    /// Resume the frame loop. Does nothing if it is already running.
    #[wasm_bindgen]
    pub fn start(&self) {
        with_state(&self.state, |s| s.demo.start(&mut s.scheduler));
    }

    /// Flip between running and paused. Returns the new state.
    #[wasm_bindgen]
    pub fn toggle(&self) -> bool {
        toggle(&self.state)
    }

    /// Remove every particle and repaint the background.
    #[wasm_bindgen]
    pub fn clear(&self) {
        clear(&self.state);
    }

    /// Stop and cancel the pending frame.
    #[wasm_bindgen]
    pub fn detach(&self) {
        with_state(&self.state, |s| s.demo.detach(&mut s.scheduler));
    }

    /// Number of live particles.
    #[wasm_bindgen]
    pub fn particle_count(&self) -> u32 {
        with_state(&self.state, |s| s.demo.particle_count() as u32).unwrap_or(0)
    }

    /// Whether the frame loop is on.
    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        with_state(&self.state, |s| s.demo.is_running()).unwrap_or(false)
    }

    /// Smoothed frame rate.
    #[wasm_bindgen]
    pub fn fps(&self) -> f64 {
        with_state(&self.state, |s| s.clock.fps()).unwrap_or(0.0)
    }

    /// Expose `window.toggleAnimation()` and `window.clearCanvas()` for inline
    /// button handlers.
    #[wasm_bindgen]
    pub fn install_globals(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;

        let toggle_state = self.state.clone();
        let on_toggle = Closure::<dyn FnMut() -> bool>::new(move || toggle(&toggle_state));
        js_sys::Reflect::set(&window, &"toggleAnimation".into(), on_toggle.as_ref())?;
        on_toggle.forget();

        let clear_state = self.state.clone();
        let on_clear = Closure::<dyn FnMut()>::new(move || clear(&clear_state));
        js_sys::Reflect::set(&window, &"clearCanvas".into(), on_clear.as_ref())?;
        on_clear.forget();

        Ok(())
    }
}

impl PixelhackDemo {
    fn try_attach(canvas_id: &str, config_json: Option<&str>) -> Result<Self, WebError> {
        let config = match config_json {
            Some(json) => serde_json::from_str(json).map_err(ConfigError::from)?,
            None => DemoConfig::default(),
        };
        let demo = ParticleDemo::try_new(config)?;

        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoWindow)?;
        let surface = CanvasSurface::from_id(&document, canvas_id)?;
        surface.fit_to_layout();

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = AnimationFrameScheduler::new(window, callback.clone());
        let mut retry = scheduler.clone();
        let state = Rc::new(RefCell::new(DemoState {
            demo,
            surface,
            scheduler,
            clock: FrameClock::new(),
        }));

        // The closure keeps the state alive for as long as the page runs.
        let frame_state = state.clone();
        *callback.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            run_or_retry(&frame_state, &mut retry, |s| {
                s.clock.tick();
                s.demo.frame(&mut s.surface, &mut s.scheduler);
            });
        }));

        Self::listen_for_pointer(&state)?;

        {
            let mut s = state.borrow_mut();
            let s = &mut *s;
            s.demo.start(&mut s.scheduler);
            log::debug!("particle demo {} attached to '{}'", s.demo.id(), canvas_id);
        }

        Ok(Self { state })
    }

    fn listen_for_pointer(state: &SharedState) -> Result<(), WebError> {
        let canvas = state.borrow().surface.canvas().clone();

        let mouse_state = state.clone();
        let on_mouse = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let client = Vector2::new(event.client_x() as f64, event.client_y() as f64);
            spawn_at(&mouse_state, PointerInput::Move(client));
        });
        canvas.add_event_listener_with_callback("mousemove", on_mouse.as_ref().unchecked_ref())?;
        on_mouse.forget();

        let touch_state = state.clone();
        let on_touch = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
            // Keep the page from scrolling or zooming under the finger.
            event.prevent_default();
            let primary = event
                .touches()
                .get(0)
                .map(|t| Vector2::new(t.client_x() as f64, t.client_y() as f64));
            spawn_at(&touch_state, PointerInput::Touch(primary.into_iter().collect()));
        });
        // preventDefault is ignored on passive listeners.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        canvas.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            on_touch.as_ref().unchecked_ref(),
            &options,
        )?;
        on_touch.forget();

        Ok(())
    }
}

fn spawn_at(state: &SharedState, input: PointerInput) {
    with_state(state, |s| {
        let rect = s.surface.bounding_rect();
        if let Some(local) = input.local_position(&rect) {
            s.demo.on_pointer_move(local.x, local.y);
        }
    });
}

fn toggle(state: &SharedState) -> bool {
    with_state(state, |s| s.demo.toggle(&mut s.scheduler)).unwrap_or(false)
}

fn clear(state: &SharedState) {
    with_state(state, |s| s.demo.clear(&mut s.surface));
}
