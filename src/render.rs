//! The rendering boundary.
//!
//! The engine computes scales, axes, legends, and brush state; actual
//! drawing is delegated through [`Renderer`]. Implementations live
//! outside this crate (SVG, canvas, terminal). [`RecordingRenderer`]
//! captures the ordered draw calls for tests.

use crate::axis::Axis;
use crate::grid::Grid;
use crate::layer::{GeomKind, GeomPositioner};
use crate::legend::{LegendEntry, LegendPos};

/// A named label slot on the plot surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    /// Main title, centered above the grid.
    Main,
    /// Subtitle, under the main title.
    Subtitle,
    /// Bottom x-axis label.
    X,
    /// Top x-axis label.
    XTop,
    /// Left y-axis label.
    YLeft,
    /// Right y-axis label.
    YRight,
}

/// Pointer events a host may listen for on a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelEvent {
    /// Pointer click.
    Click,
    /// Pointer entered the label.
    MouseOver,
    /// Pointer left the label.
    MouseOut,
}

/// Draw-call sink the plot orchestrator writes to, in pipeline order.
pub trait Renderer {
    /// Prepare the drawing surface at the given size.
    fn init_canvas(&mut self, width: f64, height: f64);

    /// Draw the plot background and frame.
    fn render_grid(&mut self, grid: &Grid);

    /// Draw one computed axis: ticks, labels, gridlines.
    fn render_axis(&mut self, axis: &Axis);

    /// Draw a text label.
    fn render_label(&mut self, kind: LabelKind, text: &str);

    /// Draw the legend entries on the given side.
    fn render_legend(&mut self, entries: &[LegendEntry], pos: LegendPos);

    /// Draw one layer's geometry from its scaled positions.
    fn render_layer(&mut self, geom: GeomKind, positioner: &GeomPositioner<'_>);

    /// Replace the plot contents with an error message.
    fn render_error_placeholder(&mut self, message: &str);

    /// Register a pointer-event listener on a label.
    fn add_label_listener(&mut self, kind: LabelKind, event: LabelEvent);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DrawCommand {
    InitCanvas { width: f64, height: f64 },
    Grid(Grid),
    Axis { orientation: crate::axis::Orientation, ticks: usize },
    Label { kind: LabelKind, text: String },
    Legend { entries: usize, pos: LegendPos },
    Layer { geom: GeomKind, rows: usize },
    ErrorPlaceholder(String),
    LabelListener { kind: LabelKind, event: LabelEvent },
}

/// A [`Renderer`] that records the ordered draw calls it receives.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The calls recorded so far, in order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop all recorded calls.
    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn init_canvas(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::InitCanvas { width, height });
    }

    fn render_grid(&mut self, grid: &Grid) {
        self.commands.push(DrawCommand::Grid(*grid));
    }

    fn render_axis(&mut self, axis: &Axis) {
        self.commands.push(DrawCommand::Axis {
            orientation: axis.orientation,
            ticks: axis.ticks.len(),
        });
    }

    fn render_label(&mut self, kind: LabelKind, text: &str) {
        self.commands.push(DrawCommand::Label { kind, text: text.to_string() });
    }

    fn render_legend(&mut self, entries: &[LegendEntry], pos: LegendPos) {
        self.commands.push(DrawCommand::Legend { entries: entries.len(), pos });
    }

    fn render_layer(&mut self, geom: GeomKind, positioner: &GeomPositioner<'_>) {
        self.commands.push(DrawCommand::Layer { geom, rows: positioner.len() });
    }

    fn render_error_placeholder(&mut self, message: &str) {
        self.commands.push(DrawCommand::ErrorPlaceholder(message.to_string()));
    }

    fn add_label_listener(&mut self, kind: LabelKind, event: LabelEvent) {
        self.commands.push(DrawCommand::LabelListener { kind, event });
    }
}
