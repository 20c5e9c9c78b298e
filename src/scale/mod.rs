//! Scale model and the scale engine.
//!
//! Scales map data values to pixel positions or visual properties. They are
//! read-only value objects rebuilt on every render; any adjustment (log
//! gutter padding, degenerate widening) happens while the engine constructs
//! them, never in place afterwards.

mod continuous;
mod discrete;
mod engine;
mod log_gutter;

pub use continuous::{nice_ticks, ContinuousScale};
pub use discrete::DiscreteScale;
pub use engine::{LayerFrame, ScaleEngine};
pub use log_gutter::{GutterOptions, LogGutter};

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::axis::TickHandlers;
use crate::color::{MarkerShape, Rgba};
use crate::data::DataValue;
use crate::dimension::Dimension;

/// Whether a scale maps a continuum or a set of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleType {
    /// Numeric interpolating mapping.
    Continuous,
    /// Categorical band or lookup mapping.
    Discrete,
}

/// Transform applied by a continuous scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transform {
    /// Identity mapping over the domain.
    #[default]
    Linear,
    /// Base-10 logarithmic mapping, with a gutter for non-positive values.
    Log,
}

/// Comparator for user-sorted discrete domains.
pub type SortFn = fn(&DataValue, &DataValue) -> Ordering;

/// Formatter for numeric tick labels.
pub type TickFormat = fn(f64) -> String;

/// Per-dimension user scale configuration.
///
/// Every field is optional; the engine fills defaults from the dimension
/// category and the grid rectangle.
#[derive(Debug, Clone, Default)]
pub struct ScaleSpec {
    /// Continuous or discrete; defaults by dimension category.
    pub scale_type: Option<ScaleType>,
    /// Linear or log transform for continuous scales.
    pub trans: Transform,
    /// Partial continuous domain. Data extends these bounds outward only.
    pub domain: (Option<f64>, Option<f64>),
    /// Explicit discrete domain, overriding the data scan.
    pub discrete_domain: Option<Vec<DataValue>>,
    /// Pixel range override for positional or size scales.
    pub range: Option<(f64, f64)>,
    /// Color range override for discrete color scales.
    pub color_range: Option<Vec<Rgba>>,
    /// Shape range override for discrete shape scales.
    pub shape_range: Option<Vec<MarkerShape>>,
    /// Comparator applied to a data-derived discrete domain.
    pub sort_fn: Option<SortFn>,
    /// Explicit tick values for the axis bound to this scale.
    pub tick_values: Option<Vec<f64>>,
    /// Tick label formatter.
    pub tick_format: Option<TickFormat>,
    /// Fixed decimal digits for tick labels.
    pub tick_digits: Option<usize>,
    /// Cap on the number of categorical tick labels.
    pub tick_label_max: Option<usize>,
    /// Hover text formatter for categorical ticks.
    pub tick_hover_text: Option<fn(&str) -> String>,
    /// Style class the renderer attaches to this axis's ticks.
    pub tick_cls: Option<String>,
    /// Pointer-event handlers for this axis's ticks.
    pub tick_handlers: TickHandlers,
    /// Axis label font size in pixels.
    pub font_size: Option<f64>,
    /// Smallest positive value to anchor the log gutter epsilon on.
    pub min_positive_value: Option<f64>,
    /// Log gutter sizing constants.
    pub gutter: GutterOptions,
}

/// An instantiated scale bound to one dimension.
#[derive(Debug, Clone)]
pub enum Scale {
    /// Numeric interpolating scale.
    Continuous(ContinuousScale),
    /// Categorical band or lookup scale.
    Discrete(DiscreteScale),
}

impl Scale {
    /// Pixel position of a data value, when the scale is positional.
    #[must_use]
    pub fn position_of(&self, value: &DataValue) -> Option<f64> {
        match self {
            Scale::Continuous(s) => value.as_f64().map(|v| s.position(v)),
            Scale::Discrete(s) => s.position_of(value),
        }
    }

    /// The continuous scale, if this is one.
    #[must_use]
    pub fn as_continuous(&self) -> Option<&ContinuousScale> {
        match self {
            Scale::Continuous(s) => Some(s),
            Scale::Discrete(_) => None,
        }
    }

    /// The discrete scale, if this is one.
    #[must_use]
    pub fn as_discrete(&self) -> Option<&DiscreteScale> {
        match self {
            Scale::Continuous(_) => None,
            Scale::Discrete(s) => Some(s),
        }
    }
}

/// The full set of scales for one render cycle.
#[derive(Debug, Clone, Default)]
pub struct Scales {
    map: HashMap<Dimension, Scale>,
}

impl Scales {
    /// Insert a scale for a dimension.
    pub fn insert(&mut self, dimension: Dimension, scale: Scale) {
        self.map.insert(dimension, scale);
    }

    /// Scale bound to a dimension, if any.
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> Option<&Scale> {
        self.map.get(&dimension)
    }

    /// Whether any dimension has a scale.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Dimensions with an instantiated scale.
    pub fn dimensions(&self) -> impl Iterator<Item = Dimension> + '_ {
        self.map.keys().copied()
    }

    /// The primary x scale.
    #[must_use]
    pub fn x(&self) -> Option<&Scale> {
        self.get(Dimension::X)
    }

    /// The left y scale, falling back to the right one.
    #[must_use]
    pub fn y(&self) -> Option<&Scale> {
        self.get(Dimension::YLeft).or_else(|| self.get(Dimension::YRight))
    }
}

/// Round a value to `digits` significant decimal digits.
///
/// Suppresses float display artifacts on tick labels
/// (1.4000000000000001 rounds to 1.4 at 10 digits).
#[must_use]
pub fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let exponent = digits - 1 - magnitude;
    // Subnormal magnitudes would push the scaling factor past the f64
    // exponent range; leave such values alone.
    if exponent.abs() > 292 {
        return value;
    }
    let factor = 10f64.powi(exponent);
    (value * factor).round() / factor
}
