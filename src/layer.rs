//! Geometry layers and the per-layer positioner handed to renderers.
//!
//! A layer pairs a geometry kind with optional layer-local data and
//! aesthetic mappings; anything absent is inherited from the plot. The
//! crate never draws geometry itself. It resolves each layer's effective
//! data and mappings, builds a [`GeomPositioner`] over the instantiated
//! scales, and hands both to the renderer.

use crate::aes::Aes;
use crate::color::{MarkerShape, Rgba};
use crate::data::{DataFrame, DataValue};
use crate::dimension::Dimension;
use crate::scale::Scales;

/// The visual mark type a layer draws. Opaque to this crate; the
/// renderer decides what each kind looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeomKind {
    /// Scatter points.
    Point,
    /// Connected line segments.
    Path,
    /// Bars.
    Bar,
    /// Box-and-whisker summaries.
    Boxplot,
    /// Error bars.
    ErrorBar,
    /// Horizontal interval marks.
    Timeline,
}

/// One geometry layer.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    geom: Option<GeomKind>,
    data: Option<DataFrame>,
    aes: Option<Aes>,
}

impl Layer {
    /// A layer drawing the given mark type with inherited data and
    /// mappings.
    #[must_use]
    pub fn new(geom: GeomKind) -> Self {
        Self { geom: Some(geom), data: None, aes: None }
    }

    /// Use layer-local data instead of the plot's.
    #[must_use]
    pub fn data(mut self, data: DataFrame) -> Self {
        self.data = Some(data);
        self
    }

    /// Override or extend the plot's aesthetic mappings for this layer.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = Some(aes);
        self
    }

    /// The layer's mark type, when set.
    #[must_use]
    pub fn geom(&self) -> Option<GeomKind> {
        self.geom
    }

    /// The layer's own data, if any.
    #[must_use]
    pub fn own_data(&self) -> Option<&DataFrame> {
        self.data.as_ref()
    }

    /// The layer's own mappings, if any.
    #[must_use]
    pub fn own_aes(&self) -> Option<&Aes> {
        self.aes.as_ref()
    }

    /// The data this layer draws: its own, or the plot's.
    #[must_use]
    pub fn effective_data<'a>(&'a self, plot_data: &'a DataFrame) -> &'a DataFrame {
        self.data.as_ref().unwrap_or(plot_data)
    }

    /// The mappings this layer draws with: the plot's merged with its
    /// own, layer entries winning.
    #[must_use]
    pub fn effective_aes(&self, plot_aes: &Aes) -> Aes {
        match &self.aes {
            Some(own) => plot_aes.merge(own),
            None => plot_aes.clone(),
        }
    }
}

/// Row accessors over a layer's resolved data, mappings, and scales.
///
/// Renderers call these instead of touching scales directly; the
/// positioner already resolved which x and y dimensions the layer maps.
#[derive(Debug)]
pub struct GeomPositioner<'a> {
    data: &'a DataFrame,
    aes: Aes,
    scales: &'a Scales,
    x_dim: Dimension,
    y_dim: Dimension,
}

impl<'a> GeomPositioner<'a> {
    /// Build a positioner for one layer. Prefers the top x axis and the
    /// right y axis when the layer maps them.
    #[must_use]
    pub fn new(data: &'a DataFrame, aes: Aes, scales: &'a Scales) -> Self {
        let x_dim = if aes.column(Dimension::XTop).is_some() {
            Dimension::XTop
        } else {
            Dimension::X
        };
        let y_dim = if aes.column(Dimension::YRight).is_some() {
            Dimension::YRight
        } else {
            Dimension::YLeft
        };
        Self { data, aes, scales, x_dim, y_dim }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the layer has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The x dimension this layer draws against.
    #[must_use]
    pub fn x_dimension(&self) -> Dimension {
        self.x_dim
    }

    /// The y dimension this layer draws against.
    #[must_use]
    pub fn y_dimension(&self) -> Dimension {
        self.y_dim
    }

    /// Pixel x of a row, `None` when the value is missing or unscalable.
    #[must_use]
    pub fn x(&self, row: usize) -> Option<f64> {
        self.position(self.x_dim, row)
    }

    /// Pixel y of a row.
    #[must_use]
    pub fn y(&self, row: usize) -> Option<f64> {
        self.position(self.y_dim, row)
    }

    /// Pixel x of the sub-axis value, for grouped marks.
    #[must_use]
    pub fn x_sub(&self, row: usize) -> Option<f64> {
        self.position(Dimension::XSub, row)
    }

    /// Pixel y of a row's error-bar extremes, `(low, high)`.
    #[must_use]
    pub fn y_error(&self, row: usize) -> Option<(f64, f64)> {
        let column = self.aes.error_column(self.y_dim)?;
        let value = self.value_at(self.y_dim, row)?.as_f64()?;
        let error = self.data.value(column, row)?.as_f64()?;
        let scale = self.scales.get(self.y_dim)?;
        let low = scale.position_of(&DataValue::Number(value - error))?;
        let high = scale.position_of(&DataValue::Number(value + error))?;
        Some((low, high))
    }

    /// Fill color of a row, from the discrete color scale.
    #[must_use]
    pub fn color(&self, row: usize) -> Option<Rgba> {
        let value = self.value_at(Dimension::Color, row)?;
        self.scales.get(Dimension::Color)?.as_discrete()?.color_of(&value)
    }

    /// Marker shape of a row, from the discrete shape scale.
    #[must_use]
    pub fn shape(&self, row: usize) -> Option<MarkerShape> {
        let value = self.value_at(Dimension::Shape, row)?;
        self.scales.get(Dimension::Shape)?.as_discrete()?.shape_of(&value)
    }

    /// Mark size of a row in pixels, from the size scale.
    #[must_use]
    pub fn size(&self, row: usize) -> Option<f64> {
        self.position(Dimension::Size, row)
    }

    fn position(&self, dimension: Dimension, row: usize) -> Option<f64> {
        let value = self.value_at(dimension, row)?;
        self.scales.get(dimension)?.position_of(&value)
    }

    fn value_at(&self, dimension: Dimension, row: usize) -> Option<DataValue> {
        self.aes.value(dimension, self.data, row).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::scale::{LayerFrame, ScaleEngine};
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn sample_frame() -> DataFrame {
        let mut data = DataFrame::new();
        data.insert_column("t", vec![0.0.into(), 5.0.into(), 10.0.into()]);
        data.insert_column("v", vec![1.0.into(), 3.0.into(), 5.0.into()]);
        data.insert_column("err", vec![0.5.into(), 0.5.into(), 0.5.into()]);
        data.insert_column(
            "group",
            vec![
                DataValue::Text("a".into()),
                DataValue::Text("b".into()),
                DataValue::Text("a".into()),
            ],
        );
        data
    }

    fn sample_scales(data: &DataFrame, aes: &Aes) -> Scales {
        let grid = Grid { left: 0.0, right: 100.0, top: 0.0, bottom: 100.0 };
        let layers = [LayerFrame { data, aes }];
        ScaleEngine::compute(&layers, &HashMap::new(), &grid).expect("scales")
    }

    #[test]
    fn test_layer_inherits_plot_data_and_aes() {
        let data = sample_frame();
        let plot_aes = Aes::new().x("t").y_left("v");
        let layer = Layer::new(GeomKind::Point);

        assert!(std::ptr::eq(layer.effective_data(&data), &data));
        let aes = layer.effective_aes(&plot_aes);
        assert_eq!(aes.column(Dimension::X), Some("t"));
        assert_eq!(aes.column(Dimension::YLeft), Some("v"));
    }

    #[test]
    fn test_layer_aes_overrides_win() {
        let plot_aes = Aes::new().x("t").y_left("v");
        let layer = Layer::new(GeomKind::Path).aes(Aes::new().y_left("err"));
        let aes = layer.effective_aes(&plot_aes);
        assert_eq!(aes.column(Dimension::X), Some("t"));
        assert_eq!(aes.column(Dimension::YLeft), Some("err"));
    }

    #[test]
    fn test_positioner_scales_rows() {
        let data = sample_frame();
        let aes = Aes::new().x("t").y_left("v");
        let scales = sample_scales(&data, &aes);
        let pos = GeomPositioner::new(&data, aes, &scales);

        assert_eq!(pos.len(), 3);
        assert_eq!(pos.x_dimension(), Dimension::X);
        assert_eq!(pos.y_dimension(), Dimension::YLeft);
        // Domain [0, 10] over range [0, 100].
        assert_relative_eq!(pos.x(0).expect("x"), 0.0);
        assert_relative_eq!(pos.x(1).expect("x"), 50.0);
        assert_relative_eq!(pos.x(2).expect("x"), 100.0);
        // y range is inverted (pixel top is 0).
        assert_relative_eq!(pos.y(0).expect("y"), 100.0);
        assert_relative_eq!(pos.y(2).expect("y"), 0.0);
    }

    #[test]
    fn test_positioner_error_bounds() {
        let data = sample_frame();
        let aes = Aes::new().x("t").y_left("v").y_left_error("err");
        let scales = sample_scales(&data, &aes);
        let pos = GeomPositioner::new(&data, aes, &scales);

        let (low, high) = pos.y_error(1).expect("error bounds");
        // Domain widened by the error column: [0.5, 5.5] over [100, 0].
        assert_relative_eq!(low, 100.0 - (2.5 - 0.5) / 5.0 * 100.0);
        assert_relative_eq!(high, 100.0 - (3.5 - 0.5) / 5.0 * 100.0);
    }

    #[test]
    fn test_positioner_categorical_attributes() {
        let data = sample_frame();
        let aes = Aes::new().x("t").y_left("v").color("group").shape("group");
        let scales = sample_scales(&data, &aes);
        let pos = GeomPositioner::new(&data, aes, &scales);

        assert!(pos.color(0).is_some());
        assert_eq!(pos.color(0), pos.color(2));
        assert_ne!(pos.color(0), pos.color(1));
        assert_ne!(pos.shape(0), pos.shape(1));
    }

    #[test]
    fn test_positioner_prefers_right_axis_when_mapped() {
        let data = sample_frame();
        let aes = Aes::new().x("t").y_right("v");
        let scales = sample_scales(&data, &aes);
        let pos = GeomPositioner::new(&data, aes, &scales);
        assert_eq!(pos.y_dimension(), Dimension::YRight);
        assert!(pos.y(0).is_some());
    }
}
