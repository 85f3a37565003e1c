//! 2D drawing surface abstraction.
//!
//! The particle engine only needs a handful of canvas operations, so it talks to
//! a [`DrawingSurface`] instead of a concrete canvas. The browser front-end
//! implements it over `CanvasRenderingContext2d`; [`RecordingSurface`] keeps the
//! calls in memory for tests and headless runs.

/// The subset of a 2D canvas context used for rendering.
pub trait DrawingSurface {
    /// Current width in pixels.
    fn width(&self) -> f64;
    /// Current height in pixels.
    fn height(&self) -> f64;
    /// Push the current drawing state (alpha, fill style).
    fn save(&mut self);
    /// Pop the last saved drawing state.
    fn restore(&mut self);
    /// Set the opacity applied to subsequent fills.
    fn set_global_alpha(&mut self, alpha: f64);
    /// Set the fill style from a CSS color string.
    fn set_fill_style(&mut self, style: &str);
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Fill a full circle centred at `(x, y)`.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64);

    /// Fill the whole surface.
    fn fill_all(&mut self) {
        let (w, h) = (self.width(), self.height());
        self.fill_rect(0.0, 0.0, w, h);
    }
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `fill_rect` with the style and alpha active at the time.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Fill style.
        style: String,
        /// Global alpha.
        alpha: f64,
    },
    /// `fill_circle` with the style and alpha active at the time.
    Circle {
        /// Centre x.
        x: f64,
        /// Centre y.
        y: f64,
        /// Radius.
        radius: f64,
        /// Fill style.
        style: String,
        /// Global alpha.
        alpha: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct SurfaceState {
    alpha: f64,
    style: String,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            style: String::from("#000000"),
        }
    }
}

/// In-memory surface that records every fill.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    state: SurfaceState,
    stack: Vec<SurfaceState>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create a surface of the given pixel size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            state: SurfaceState::default(),
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands, e.g. between frames.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of circles recorded so far.
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Current global alpha.
    pub fn global_alpha(&self) -> f64 {
        self.state.alpha
    }

    /// Current fill style.
    pub fn fill_style(&self) -> &str {
        &self.state.style
    }

    /// Depth of the save/restore stack.
    pub fn saved_depth(&self) -> usize {
        self.stack.len()
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        // Like a canvas, an unbalanced restore is ignored.
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        // Canvas ignores out-of-range alpha instead of clamping.
        if (0.0..=1.0).contains(&alpha) {
            self.state.alpha = alpha;
        }
    }

    fn set_fill_style(&mut self, style: &str) {
        self.state.style = style.to_owned();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            style: self.state.style.clone(),
            alpha: self.state.alpha,
        });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            style: self.state.style.clone(),
            alpha: self.state.alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_state_with_fill() {
        let mut surface = RecordingSurface::new(800.0, 500.0);
        surface.set_fill_style("red");
        surface.set_global_alpha(0.5);
        surface.fill_circle(1.0, 2.0, 3.0);

        assert_eq!(
            surface.commands(),
            &[DrawCommand::Circle {
                x: 1.0,
                y: 2.0,
                radius: 3.0,
                style: "red".into(),
                alpha: 0.5,
            }]
        );
    }

    #[test]
    fn test_save_restore() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.save();
        surface.set_global_alpha(0.2);
        surface.set_fill_style("blue");
        surface.restore();

        assert_eq!(surface.global_alpha(), 1.0);
        assert_eq!(surface.fill_style(), "#000000");
        assert_eq!(surface.saved_depth(), 0);

        surface.restore();
        assert_eq!(surface.global_alpha(), 1.0);
    }

    #[test]
    fn test_fill_all_covers_surface() {
        let mut surface = RecordingSurface::new(800.0, 500.0);
        surface.fill_all();
        match &surface.commands()[0] {
            DrawCommand::Rect { x, y, width, height, .. } => {
                assert_eq!((*x, *y, *width, *height), (0.0, 0.0, 800.0, 500.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_alpha_is_ignored() {
        let mut surface = RecordingSurface::new(1.0, 1.0);
        surface.set_global_alpha(0.3);
        surface.set_global_alpha(-0.01);
        assert_eq!(surface.global_alpha(), 0.3);
    }
}
