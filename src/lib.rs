//! # Grafica
//!
//! Declarative 2D statistical plotting engine: callers describe data,
//! aesthetic mappings, and geometry layers; the engine computes
//! pixel-space scales, axes, legends, and an interactive brush overlay,
//! then hands ordered draw calls to an external renderer.
//!
//! ## Features
//!
//! - **Declarative**: a [`plot::PlotConfig`] builder describes the whole
//!   plot; rendering recomputes everything from it
//! - **Scale engine**: linear, log-with-gutter, and discrete scales with
//!   user/data domain merging and degenerate-domain handling
//! - **Axis layout**: tick generation, label collision detection and
//!   rotation, gridline suppression at borders
//! - **Interactive brush**: 1D/2D selection driven by an explicit state
//!   machine, with synchronized axis handles
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use grafica::prelude::*;
//!
//! let mut data = DataFrame::new();
//! data.insert_column("dose", vec![1.0.into(), 2.0.into(), 3.0.into()]);
//! data.insert_column("response", vec![0.4.into(), 0.9.into(), 1.6.into()]);
//!
//! let mut plot = Plot::new(
//!     PlotConfig::new(800.0, 600.0)
//!         .data(data)
//!         .aes(Aes::new().x("dose").y_left("response"))
//!         .layer(Layer::new(GeomKind::Point)),
//! );
//! plot.render(&mut my_renderer)?;
//! ```
//!
//! Drawing itself is delegated through the [`render::Renderer`] trait;
//! this crate issues ordered draw calls and never touches a surface.

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code.
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

/// Aesthetic mappings from data columns to visual dimensions.
pub mod aes;

/// Axis tick layout, label collision handling, and gridlines.
pub mod axis;

/// Interactive brush selection state machine.
pub mod brush;

/// Color types and palettes.
pub mod color;

/// Column-oriented data values and frames.
pub mod data;

/// Visual dimensions a datum can map to.
pub mod dimension;

/// Margins and the plot grid rectangle.
pub mod grid;

/// Geometry layers and per-layer positioners.
pub mod layer;

/// Legend assembly from discrete scales.
pub mod legend;

/// The plot orchestrator and its configuration builder.
pub mod plot;

/// The renderer boundary.
pub mod render;

/// Scale computation: domains, ranges, transforms.
pub mod scale;

/// Error types for plot construction and rendering.
pub mod error;

pub use error::{Error, Result};

/// Commonly used types for convenient imports.
///
/// ```rust,ignore
/// use grafica::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aes::Aes;
    pub use crate::brush::{BrushConfig, BrushDimension, BrushExtent, SelectionType};
    pub use crate::color::{MarkerShape, Rgba};
    pub use crate::data::{DataFrame, DataValue};
    pub use crate::dimension::Dimension;
    pub use crate::error::{Error, Result};
    pub use crate::grid::{Grid, MarginOverrides, Margins};
    pub use crate::layer::{GeomKind, Layer};
    pub use crate::legend::{LegendEntry, LegendPos};
    pub use crate::plot::{Labels, Plot, PlotConfig};
    pub use crate::render::Renderer;
    pub use crate::scale::{ScaleSpec, ScaleType, Transform};
}
