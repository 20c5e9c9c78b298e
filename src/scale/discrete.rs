//! Discrete (categorical) scales: banded positions and palette lookups.

use crate::color::{MarkerShape, Rgba, CATEGORICAL_PALETTE, SHAPE_PALETTE};
use crate::data::DataValue;

/// A discrete scale over an ordered sequence of distinct category values.
///
/// Positional dimensions get an equal-width band per category across the
/// pixel range; color and shape dimensions get a direct lookup table.
#[derive(Debug, Clone, Default)]
pub struct DiscreteScale {
    domain: Vec<DataValue>,
    band: Option<Band>,
    colors: Option<Vec<Rgba>>,
    shapes: Option<Vec<MarkerShape>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Band {
    start: f64,
    step: f64,
}

impl DiscreteScale {
    /// Create a banded positional scale across `range`.
    #[must_use]
    pub fn banded(domain: Vec<DataValue>, range: (f64, f64)) -> Self {
        let count = domain.len().max(1) as f64;
        let step = (range.1 - range.0) / count;
        Self { domain, band: Some(Band { start: range.0, step }), colors: None, shapes: None }
    }

    /// Create a color lookup scale, cycling the default categorical
    /// palette when no explicit range is given.
    #[must_use]
    pub fn color_lookup(domain: Vec<DataValue>, range: Option<Vec<Rgba>>) -> Self {
        let colors = range.unwrap_or_else(|| CATEGORICAL_PALETTE.to_vec());
        Self { domain, band: None, colors: Some(colors), shapes: None }
    }

    /// Create a shape lookup scale.
    #[must_use]
    pub fn shape_lookup(domain: Vec<DataValue>, range: Option<Vec<MarkerShape>>) -> Self {
        let shapes = range.unwrap_or_else(|| SHAPE_PALETTE.to_vec());
        Self { domain, band: None, colors: None, shapes: Some(shapes) }
    }

    /// The ordered category domain.
    #[must_use]
    pub fn domain(&self) -> &[DataValue] {
        &self.domain
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    /// Whether the domain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Index of a category value in the domain.
    #[must_use]
    pub fn index_of(&self, value: &DataValue) -> Option<usize> {
        self.domain.iter().position(|v| v == value)
    }

    /// Band center position of a category, for positional scales.
    #[must_use]
    pub fn position_of(&self, value: &DataValue) -> Option<f64> {
        let band = self.band?;
        let idx = self.index_of(value)?;
        Some(band.start + band.step * (idx as f64 + 0.5))
    }

    /// Band center of the category at `idx`, for positional scales.
    #[must_use]
    pub fn position_at(&self, idx: usize) -> Option<f64> {
        let band = self.band?;
        if idx >= self.domain.len() {
            return None;
        }
        Some(band.start + band.step * (idx as f64 + 0.5))
    }

    /// Width of one category band, for positional scales.
    #[must_use]
    pub fn band_width(&self) -> Option<f64> {
        self.band.map(|b| b.step.abs())
    }

    /// Color assigned to a category, for color lookup scales.
    #[must_use]
    pub fn color_of(&self, value: &DataValue) -> Option<Rgba> {
        let colors = self.colors.as_ref()?;
        if colors.is_empty() {
            return None;
        }
        self.index_of(value).map(|i| colors[i % colors.len()])
    }

    /// Shape assigned to a category, for shape lookup scales.
    #[must_use]
    pub fn shape_of(&self, value: &DataValue) -> Option<MarkerShape> {
        let shapes = self.shapes.as_ref()?;
        if shapes.is_empty() {
            return None;
        }
        self.index_of(value).map(|i| shapes[i % shapes.len()])
    }

    /// Whether this scale carries a color lookup.
    #[must_use]
    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    /// Whether this scale carries a shape lookup.
    #[must_use]
    pub fn has_shapes(&self) -> bool {
        self.shapes.is_some()
    }
}
