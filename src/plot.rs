//! The plot orchestrator.
//!
//! [`Plot`] owns the configuration a caller declares (data, mappings,
//! layers, scale specs, labels) and drives the render pipeline against an
//! external [`Renderer`]: resolve margins, size the grid, instantiate
//! scales, lay out axes, then delegate geometry, legend, and brush
//! attachment. Every render recomputes scales and grid from scratch;
//! brush selection state is the only thing that survives.

use std::collections::HashMap;

use crate::aes::Aes;
use crate::axis::{AxisLayout, AxisOptions, Orientation};
use crate::brush::{
    BrushConfig, BrushController, BrushDimension, BrushExtent, BrushSpace, LayerValues,
};
use crate::data::DataFrame;
use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::grid::{Grid, MarginOverrides, Margins};
use crate::layer::{GeomPositioner, Layer};
use crate::legend::{build_legend, LegendEntry, LegendPos};
use crate::render::{LabelEvent, LabelKind, Renderer};
use crate::scale::{LayerFrame, Scale, ScaleEngine, ScaleSpec, Scales};

/// Extra right margin reserved for the legend.
const LEGEND_MARGIN_PX: f64 = 150.0;
/// Extra right margin reserved for a right y axis.
const Y_RIGHT_MARGIN_PX: f64 = 25.0;
/// Extra top margin reserved for a subtitle line.
const SUBTITLE_MARGIN_PX: f64 = 20.0;

/// Text labels drawn around the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    /// Main title.
    pub main: Option<String>,
    /// Subtitle under the main title. Its presence widens the top margin.
    pub subtitle: Option<String>,
    /// Bottom x-axis label.
    pub x: Option<String>,
    /// Top x-axis label.
    pub x_top: Option<String>,
    /// Left y-axis label.
    pub y_left: Option<String>,
    /// Right y-axis label.
    pub y_right: Option<String>,
}

impl Labels {
    fn get(&self, kind: LabelKind) -> Option<&str> {
        match kind {
            LabelKind::Main => self.main.as_deref(),
            LabelKind::Subtitle => self.subtitle.as_deref(),
            LabelKind::X => self.x.as_deref(),
            LabelKind::XTop => self.x_top.as_deref(),
            LabelKind::YLeft => self.y_left.as_deref(),
            LabelKind::YRight => self.y_right.as_deref(),
        }
    }
}

/// Declarative plot configuration, consumed by [`Plot::new`].
#[derive(Debug, Default)]
pub struct PlotConfig {
    width: f64,
    height: f64,
    data: DataFrame,
    aes: Aes,
    layers: Vec<Layer>,
    scales: HashMap<Dimension, ScaleSpec>,
    labels: Labels,
    margins: MarginOverrides,
    legend_disabled: bool,
    legend_pos: LegendPos,
    disabled_axes: Vec<Orientation>,
    label_listeners: Vec<(LabelKind, LabelEvent)>,
    brushing: Option<BrushConfig>,
    throw_errors: bool,
}

impl PlotConfig {
    /// Start a configuration at the given pixel size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ..Default::default() }
    }

    /// The plot-level data all layers inherit.
    #[must_use]
    pub fn data(mut self, data: DataFrame) -> Self {
        self.data = data;
        self
    }

    /// The plot-level aesthetic mappings.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.aes = aes;
        self
    }

    /// Append a geometry layer.
    #[must_use]
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Configure one dimension's scale.
    #[must_use]
    pub fn scale(mut self, dimension: Dimension, spec: ScaleSpec) -> Self {
        self.scales.insert(dimension, spec);
        self
    }

    /// Set the surrounding text labels.
    #[must_use]
    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Force specific margins; each overridden side wins over the
    /// computed value.
    #[must_use]
    pub fn margins(mut self, margins: MarginOverrides) -> Self {
        self.margins = margins;
        self
    }

    /// Suppress the legend even when discrete color/shape scales exist.
    #[must_use]
    pub fn disable_legend(mut self) -> Self {
        self.legend_disabled = true;
        self
    }

    /// Draw the legend on the given side of the grid.
    #[must_use]
    pub fn legend_pos(mut self, pos: LegendPos) -> Self {
        self.legend_pos = pos;
        self
    }

    /// Suppress the axis drawn along one edge.
    #[must_use]
    pub fn disable_axis(mut self, orientation: Orientation) -> Self {
        self.disabled_axes.push(orientation);
        self
    }

    /// Ask the renderer to register a pointer-event listener on a label.
    #[must_use]
    pub fn label_listener(mut self, kind: LabelKind, event: LabelEvent) -> Self {
        self.label_listeners.push((kind, event));
        self
    }

    /// Enable interactive brushing.
    #[must_use]
    pub fn brushing(mut self, config: BrushConfig) -> Self {
        self.brushing = Some(config);
        self
    }

    /// Propagate render errors to the caller instead of logging and
    /// drawing a placeholder.
    #[must_use]
    pub fn throw_errors(mut self) -> Self {
        self.throw_errors = true;
        self
    }
}

/// A configured plot, ready to render and mutate at runtime.
#[derive(Debug)]
pub struct Plot {
    width: f64,
    height: f64,
    data: DataFrame,
    aes: Aes,
    layers: Vec<Layer>,
    scale_specs: HashMap<Dimension, ScaleSpec>,
    labels: Labels,
    margin_overrides: MarginOverrides,
    legend_disabled: bool,
    legend_pos: LegendPos,
    disabled_axes: Vec<Orientation>,
    label_listeners: Vec<(LabelKind, LabelEvent)>,
    custom_legend: Option<Vec<LegendEntry>>,
    throw_errors: bool,
    brush: Option<BrushController>,
    scales: Option<Scales>,
    grid: Grid,
}

impl Plot {
    /// Build a plot from its configuration.
    #[must_use]
    pub fn new(config: PlotConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            data: config.data,
            aes: config.aes,
            layers: config.layers,
            scale_specs: config.scales,
            labels: config.labels,
            margin_overrides: config.margins,
            legend_disabled: config.legend_disabled,
            legend_pos: config.legend_pos,
            disabled_axes: config.disabled_axes,
            label_listeners: config.label_listeners,
            custom_legend: None,
            throw_errors: config.throw_errors,
            brush: config.brushing.map(BrushController::new),
            scales: None,
            grid: Grid::default(),
        }
    }

    /// The scales produced by the last successful render.
    #[must_use]
    pub fn scales(&self) -> Option<&Scales> {
        self.scales.as_ref()
    }

    /// The grid rectangle of the last render.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The brush controller, when brushing is enabled. Pointer events
    /// from the host are forwarded here.
    #[must_use]
    pub fn brush_mut(&mut self) -> Option<&mut BrushController> {
        self.brush.as_mut()
    }

    /// Run the full render pipeline against `renderer`.
    ///
    /// Scale construction failures abort before any draw call; whether
    /// they return an error or log and draw a placeholder follows the
    /// `throw_errors` setting. Output from a prior successful render is
    /// left untouched on failure.
    pub fn render(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        if let Err(err) = self.validate() {
            return self.fail(renderer, err);
        }
        let margins = self.resolve_margins();
        let grid = Grid::from_margins(self.width, self.height, margins);

        let scales = match self.compute_scales(&grid) {
            Ok(scales) => scales,
            Err(err) => return self.fail(renderer, err),
        };

        renderer.init_canvas(self.width, self.height);
        renderer.render_grid(&grid);
        self.render_axes(renderer, &scales, &grid);
        self.render_labels(renderer);
        self.render_layers(renderer, &scales);
        if !self.legend_disabled {
            self.render_legend(renderer, &scales);
        }
        self.attach_brush(&scales);

        self.scales = Some(scales);
        self.grid = grid;
        Ok(())
    }

    /// Merge a partial mapping into the plot-level Aes.
    pub fn set_aes(&mut self, partial: &Aes, renderer: Option<&mut dyn Renderer>) -> Result<()> {
        self.aes.apply(partial);
        self.maybe_render(renderer)
    }

    /// Replace the margin overrides.
    pub fn set_margins(
        &mut self,
        margins: MarginOverrides,
        renderer: Option<&mut dyn Renderer>,
    ) -> Result<()> {
        self.margin_overrides = margins;
        self.maybe_render(renderer)
    }

    /// Resize the plot width.
    pub fn set_width(&mut self, width: f64, renderer: Option<&mut dyn Renderer>) -> Result<()> {
        self.width = width;
        self.maybe_render(renderer)
    }

    /// Resize the plot height.
    pub fn set_height(&mut self, height: f64, renderer: Option<&mut dyn Renderer>) -> Result<()> {
        self.height = height;
        self.maybe_render(renderer)
    }

    /// Resize both dimensions at once.
    pub fn set_size(
        &mut self,
        width: f64,
        height: f64,
        renderer: Option<&mut dyn Renderer>,
    ) -> Result<()> {
        self.width = width;
        self.height = height;
        self.maybe_render(renderer)
    }

    /// Append a layer.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Replace the layer at `index`.
    pub fn replace_layer(&mut self, index: usize, layer: Layer) -> Result<()> {
        let slot = self
            .layers
            .get_mut(index)
            .ok_or_else(|| Error::Config(format!("no layer at index {index}")))?;
        *slot = layer;
        Ok(())
    }

    /// Enable, reconfigure, or disable brushing. Reconfiguring resets
    /// any active selection.
    pub fn set_brushing(&mut self, config: Option<BrushConfig>) {
        self.brush = config.map(BrushController::new);
        if self.brush.is_none() {
            return;
        }
        let layer_values = self.brush_layer_values();
        if let (Some(brush), Some(scales)) = (self.brush.as_mut(), self.scales.as_ref()) {
            let (x, y) = Self::brush_spaces(scales, brush.config().dimension);
            brush.attach(x, y);
            brush.set_layer_values(layer_values);
        }
    }

    /// Clear the active brush selection. No-op when brushing is off.
    pub fn clear_brush(&mut self) {
        if let Some(brush) = self.brush.as_mut() {
            brush.clear();
        }
    }

    /// The current brush extent, empty when brushing is off.
    #[must_use]
    pub fn get_brush_extent(&self) -> BrushExtent {
        self.brush.as_ref().map(BrushController::extent).unwrap_or_default()
    }

    /// Set the brush selection programmatically.
    pub fn set_brush_extent(&mut self, extent: [[Option<f64>; 2]; 2]) -> Result<()> {
        let brush = self
            .brush
            .as_mut()
            .ok_or_else(|| Error::BrushExtent("brushing is not enabled".to_string()))?;
        brush.set_extent(extent)
    }

    /// Override the auto-built legend, or restore it with `None`.
    pub fn set_legend(&mut self, entries: Option<Vec<LegendEntry>>) {
        self.custom_legend = entries;
    }

    /// Configuration errors are caught before any pipeline stage runs,
    /// under the same throw/log policy as scale failures.
    fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(Error::Config("plot width must be a positive number".to_string()));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(Error::Config("plot height must be a positive number".to_string()));
        }
        let has_data = !self.data.is_empty()
            || self.layers.iter().any(|l| l.own_data().is_some_and(|d| !d.is_empty()));
        if !has_data {
            return Err(Error::Config("plot data is required".to_string()));
        }
        if !self.maps(Dimension::X) {
            return Err(Error::Config("an x aesthetic mapping is required".to_string()));
        }
        Ok(())
    }

    fn maybe_render(&mut self, renderer: Option<&mut dyn Renderer>) -> Result<()> {
        match renderer {
            Some(renderer) => self.render(renderer),
            None => Ok(()),
        }
    }

    /// Margins are resolved before scales because they size the pixel
    /// ranges.
    fn resolve_margins(&self) -> Margins {
        let mut margins = Margins::default();
        if !self.legend_disabled && self.has_legend_aesthetic() {
            match self.legend_pos {
                LegendPos::Right => margins.right += LEGEND_MARGIN_PX,
                LegendPos::Left => margins.left += LEGEND_MARGIN_PX,
            }
        }
        if self.maps(Dimension::YRight) {
            margins.right += Y_RIGHT_MARGIN_PX;
        }
        if self.labels.subtitle.is_some() {
            margins.top += SUBTITLE_MARGIN_PX;
        }
        self.margin_overrides.resolve(margins)
    }

    fn has_legend_aesthetic(&self) -> bool {
        self.maps(Dimension::Color) || self.maps(Dimension::Shape)
    }

    /// Whether the plot or any layer maps `dimension`.
    fn maps(&self, dimension: Dimension) -> bool {
        if self.aes.column(dimension).is_some() {
            return true;
        }
        self.layers
            .iter()
            .any(|layer| layer.own_aes().is_some_and(|aes| aes.column(dimension).is_some()))
    }

    fn compute_scales(&self, grid: &Grid) -> Result<Scales> {
        let resolved: Vec<(&DataFrame, Aes)> = if self.layers.is_empty() {
            vec![(&self.data, self.aes.clone())]
        } else {
            self.layers
                .iter()
                .map(|layer| (layer.effective_data(&self.data), layer.effective_aes(&self.aes)))
                .collect()
        };
        let frames: Vec<LayerFrame<'_>> =
            resolved.iter().map(|(data, aes)| LayerFrame { data: *data, aes }).collect();
        ScaleEngine::compute(&frames, &self.scale_specs, grid)
    }

    fn fail(&self, renderer: &mut dyn Renderer, err: Error) -> Result<()> {
        if self.throw_errors {
            return Err(err);
        }
        log::error!("render aborted: {err}");
        renderer.render_error_placeholder(&err.to_string());
        Ok(())
    }

    fn render_axes(&self, renderer: &mut dyn Renderer, scales: &Scales, grid: &Grid) {
        let axes = [
            (Dimension::X, Orientation::Bottom),
            (Dimension::XTop, Orientation::Top),
            (Dimension::YLeft, Orientation::Left),
            (Dimension::YRight, Orientation::Right),
        ];
        for (dimension, orientation) in axes {
            if self.disabled_axes.contains(&orientation) {
                continue;
            }
            if let Some(scale) = scales.get(dimension) {
                let options = self.axis_options(dimension);
                let axis = AxisLayout::layout(scale, orientation, grid, &options);
                renderer.render_axis(&axis);
            }
        }
    }

    fn axis_options(&self, dimension: Dimension) -> AxisOptions {
        let mut options = AxisOptions::default();
        if let Some(spec) = self.scale_specs.get(&dimension) {
            options.tick_values.clone_from(&spec.tick_values);
            options.tick_format = spec.tick_format;
            options.tick_digits = spec.tick_digits;
            options.tick_label_max = spec.tick_label_max;
            options.tick_hover_text = spec.tick_hover_text;
            options.tick_cls.clone_from(&spec.tick_cls);
            options.tick_handlers = spec.tick_handlers;
            if let Some(font_size) = spec.font_size {
                options.font_size = font_size;
            }
        }
        options
    }

    fn render_labels(&self, renderer: &mut dyn Renderer) {
        let kinds = [
            LabelKind::Main,
            LabelKind::Subtitle,
            LabelKind::X,
            LabelKind::XTop,
            LabelKind::YLeft,
            LabelKind::YRight,
        ];
        for kind in kinds {
            if let Some(text) = self.labels.get(kind) {
                renderer.render_label(kind, text);
            }
        }
        for (kind, event) in &self.label_listeners {
            if self.labels.get(*kind).is_some() {
                renderer.add_label_listener(*kind, *event);
            }
        }
    }

    fn render_layers(&self, renderer: &mut dyn Renderer, scales: &Scales) {
        for layer in &self.layers {
            let Some(geom) = layer.geom() else { continue };
            let data = layer.effective_data(&self.data);
            let aes = layer.effective_aes(&self.aes);
            let positioner = GeomPositioner::new(data, aes, scales);
            renderer.render_layer(geom, &positioner);
        }
    }

    fn render_legend(&self, renderer: &mut dyn Renderer, scales: &Scales) {
        let entries = match &self.custom_legend {
            Some(entries) => entries.clone(),
            None => {
                let color = scales.get(Dimension::Color).and_then(crate::scale::Scale::as_discrete);
                let shape = scales.get(Dimension::Shape).and_then(crate::scale::Scale::as_discrete);
                build_legend(color, shape)
            }
        };
        if !entries.is_empty() {
            renderer.render_legend(&entries, self.legend_pos);
        }
    }

    /// Brushing binds to the continuous positional scales only; an
    /// axis-specific restriction picks that axis's scale.
    fn brush_spaces(
        scales: &Scales,
        dimension: BrushDimension,
    ) -> (Option<BrushSpace>, Option<BrushSpace>) {
        let x = match dimension {
            BrushDimension::XTop => scales.get(Dimension::XTop),
            _ => scales.x(),
        };
        let y = match dimension {
            BrushDimension::YRight => scales.get(Dimension::YRight),
            _ => scales.y(),
        };
        (
            x.and_then(Scale::as_continuous).copied().map(BrushSpace::new),
            y.and_then(Scale::as_continuous).copied().map(BrushSpace::new),
        )
    }

    /// Per-layer positional values in data units, snapshotted for the
    /// brush's selection queries.
    fn brush_layer_values(&self) -> Vec<LayerValues> {
        fn column_values(
            data: &DataFrame,
            column: Option<&str>,
            rows: usize,
        ) -> Vec<Option<f64>> {
            let values = column.and_then(|c| data.column(c));
            (0..rows)
                .map(|row| values.and_then(|v| v.get(row)).and_then(|v| v.as_f64()))
                .collect()
        }
        self.layers
            .iter()
            .map(|layer| {
                let data = layer.effective_data(&self.data);
                let aes = layer.effective_aes(&self.aes);
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
                LayerValues {
                    x: column_values(data, aes.column(x_dim), data.len()),
                    y: column_values(data, aes.column(y_dim), data.len()),
                }
            })
            .collect()
    }

    fn attach_brush(&mut self, scales: &Scales) {
        let layer_values = self.brush_layer_values();
        if let Some(brush) = self.brush.as_mut() {
            let (x, y) = Self::brush_spaces(scales, brush.config().dimension);
            brush.attach(x, y);
            brush.set_layer_values(layer_values);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BrushTarget, SelectionType};
    use crate::data::DataValue;
    use crate::layer::GeomKind;
    use crate::render::{DrawCommand, RecordingRenderer};
    use crate::scale::{ScaleType, Transform};
    use approx::assert_relative_eq;

    fn sample_data() -> DataFrame {
        let mut data = DataFrame::new();
        data.insert_column("t", vec![0.0.into(), 2.0.into(), 4.0.into()]);
        data.insert_column("v", vec![(-1.0).into(), 2.0.into(), 5.0.into()]);
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

    fn basic_plot() -> Plot {
        Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_left("v"))
                .layer(Layer::new(GeomKind::Point))
                .throw_errors(),
        )
    }

    #[test]
    fn test_pipeline_order() {
        let mut plot = basic_plot();
        let mut renderer = RecordingRenderer::new();
        plot.render(&mut renderer).expect("render");

        let kinds: Vec<&str> = renderer
            .commands()
            .iter()
            .map(|c| match c {
                DrawCommand::InitCanvas { .. } => "canvas",
                DrawCommand::Grid(_) => "grid",
                DrawCommand::Axis { .. } => "axis",
                DrawCommand::Label { .. } => "label",
                DrawCommand::Legend { .. } => "legend",
                DrawCommand::Layer { .. } => "layer",
                DrawCommand::ErrorPlaceholder(_) => "error",
                DrawCommand::LabelListener { .. } => "listener",
            })
            .collect();
        assert_eq!(kinds, vec!["canvas", "grid", "axis", "axis", "layer"]);
    }

    #[test]
    fn test_margins_default_and_legend() {
        let plot = basic_plot();
        let margins = plot.resolve_margins();
        assert_eq!(margins, Margins { top: 75.0, right: 75.0, bottom: 50.0, left: 75.0 });

        let with_legend = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_left("v").color("group"))
                .layer(Layer::new(GeomKind::Point)),
        );
        assert_eq!(with_legend.resolve_margins().right, 75.0 + 150.0);
    }

    #[test]
    fn test_margin_overrides_win() {
        let plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_left("v").color("group"))
                .margins(MarginOverrides { right: Some(10.0), ..Default::default() }),
        );
        assert_eq!(plot.resolve_margins().right, 10.0);
    }

    #[test]
    fn test_subtitle_and_y_right_margins() {
        let plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_right("v"))
                .labels(Labels { subtitle: Some("sub".into()), ..Default::default() }),
        );
        let margins = plot.resolve_margins();
        assert_eq!(margins.right, 75.0 + 25.0);
        assert_eq!(margins.top, 75.0 + 20.0);
    }

    #[test]
    fn test_scale_failure_throws_when_configured() {
        let mut plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t"))
                .layer(Layer::new(GeomKind::Point))
                .throw_errors(),
        );
        let mut renderer = RecordingRenderer::new();
        let err = plot.render(&mut renderer).unwrap_err();
        assert!(matches!(err, Error::ScaleDomain(_)));
        // Nothing was drawn.
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn test_scale_failure_logs_placeholder_by_default() {
        let mut plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t"))
                .layer(Layer::new(GeomKind::Point)),
        );
        let mut renderer = RecordingRenderer::new();
        plot.render(&mut renderer).expect("logged, not thrown");
        assert!(matches!(renderer.commands(), [DrawCommand::ErrorPlaceholder(_)]));
    }

    #[test]
    fn test_zero_size_is_a_config_error() {
        let mut plot = Plot::new(
            PlotConfig::new(0.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_left("v"))
                .throw_errors(),
        );
        let mut renderer = RecordingRenderer::new();
        let err = plot.render(&mut renderer).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn test_missing_data_and_x_mapping_are_config_errors() {
        let mut renderer = RecordingRenderer::new();

        let mut no_data = Plot::new(
            PlotConfig::new(800.0, 600.0).aes(Aes::new().x("t").y_left("v")).throw_errors(),
        );
        assert!(matches!(no_data.render(&mut renderer).unwrap_err(), Error::Config(_)));

        let mut no_x = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().y_left("v"))
                .throw_errors(),
        );
        assert!(matches!(no_x.render(&mut renderer).unwrap_err(), Error::Config(_)));
        assert!(renderer.commands().is_empty());
    }

    #[test]
    fn test_config_error_logs_placeholder_by_default() {
        let mut plot = Plot::new(
            PlotConfig::new(800.0, 0.0).data(sample_data()).aes(Aes::new().x("t").y_left("v")),
        );
        let mut renderer = RecordingRenderer::new();
        plot.render(&mut renderer).expect("logged, not thrown");
        assert!(matches!(renderer.commands(), [DrawCommand::ErrorPlaceholder(_)]));
    }

    #[test]
    fn test_end_to_end_linear_domains() {
        // y domain [-1, 5] from data; x spans the grid exactly.
        let mut plot = basic_plot();
        let mut renderer = RecordingRenderer::new();
        plot.render(&mut renderer).expect("render");

        let scales = plot.scales().expect("scales");
        let x = scales.x().and_then(|s| s.as_continuous()).expect("x scale");
        let y = scales.y().and_then(|s| s.as_continuous()).expect("y scale");
        assert_eq!(y.domain(), (-1.0, 5.0));
        assert_eq!(x.domain(), (0.0, 4.0));

        let grid = plot.grid();
        assert_relative_eq!(x.position(0.0), grid.left);
        assert_relative_eq!(x.position(4.0), grid.right);
        assert_relative_eq!(y.position(-1.0), grid.bottom);
        assert_relative_eq!(y.position(5.0), grid.top);
    }

    #[test]
    fn test_end_to_end_log_gutter_clamp() {
        // Zero maps to the same pixel as the gutter epsilon.
        let mut data = DataFrame::new();
        data.insert_column("t", vec![1.0.into(), 2.0.into(), 3.0.into()]);
        data.insert_column("v", vec![0.0.into(), 10.0.into(), 100.0.into()]);
        let mut plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(data)
                .aes(Aes::new().x("t").y_left("v"))
                .layer(Layer::new(GeomKind::Point))
                .scale(
                    Dimension::YLeft,
                    ScaleSpec {
                        scale_type: Some(ScaleType::Continuous),
                        trans: Transform::Log,
                        ..Default::default()
                    },
                )
                .throw_errors(),
        );
        let mut renderer = RecordingRenderer::new();
        plot.render(&mut renderer).expect("render");

        let scales = plot.scales().expect("scales");
        let y = scales.y().and_then(|s| s.as_continuous()).expect("y scale");
        let gutter = y.gutter().expect("gutter");
        assert_relative_eq!(y.position(0.0), y.position(gutter.epsilon));
        assert_relative_eq!(y.position(-5.0), y.position(gutter.epsilon));
    }

    #[test]
    fn test_brush_survives_rerender() {
        let mut plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_left("v"))
                .layer(Layer::new(GeomKind::Point))
                .brushing(BrushConfig::default())
                .throw_errors(),
        );
        let mut renderer = RecordingRenderer::new();
        plot.render(&mut renderer).expect("render");
        plot.set_brush_extent([[Some(1.0), Some(0.0)], [Some(3.0), Some(4.0)]]).expect("extent");

        plot.set_size(400.0, 300.0, Some(&mut renderer)).expect("resize render");
        let extent = plot.get_brush_extent();
        assert_eq!(extent.x, Some((1.0, 3.0)));
        assert_eq!(extent.y, Some((0.0, 4.0)));
        assert_eq!(plot.brush_mut().expect("brush").state(), SelectionType::Both);
    }

    #[test]
    fn test_set_brush_extent_without_brushing_fails() {
        let mut plot = basic_plot();
        let err = plot.set_brush_extent([[None, None], [None, None]]).unwrap_err();
        assert!(matches!(err, Error::BrushExtent(_)));
    }

    #[test]
    fn test_custom_legend_overrides_auto() {
        let mut plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_left("v").color("group"))
                .layer(Layer::new(GeomKind::Point))
                .throw_errors(),
        );
        plot.set_legend(Some(vec![LegendEntry {
            text: "custom".into(),
            color: None,
            shape: None,
        }]));
        let mut renderer = RecordingRenderer::new();
        plot.render(&mut renderer).expect("render");
        assert!(renderer
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Legend { entries: 1, .. })));
    }

    #[test]
    fn test_legend_pos_left_reserves_left_margin() {
        let plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_left("v").color("group"))
                .legend_pos(LegendPos::Left),
        );
        let margins = plot.resolve_margins();
        assert_eq!(margins.left, 75.0 + 150.0);
        assert_eq!(margins.right, 75.0);
    }

    #[test]
    fn test_legend_pos_forwarded_to_renderer() {
        let mut plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_left("v").color("group"))
                .layer(Layer::new(GeomKind::Point))
                .legend_pos(LegendPos::Left)
                .throw_errors(),
        );
        let mut renderer = RecordingRenderer::new();
        plot.render(&mut renderer).expect("render");
        assert!(renderer
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Legend { pos: LegendPos::Left, .. })));
    }

    #[test]
    fn test_disabled_axis_not_drawn() {
        let mut plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_left("v"))
                .layer(Layer::new(GeomKind::Point))
                .disable_axis(Orientation::Bottom)
                .throw_errors(),
        );
        let mut renderer = RecordingRenderer::new();
        plot.render(&mut renderer).expect("render");
        let axes: Vec<Orientation> = renderer
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Axis { orientation, .. } => Some(*orientation),
                _ => None,
            })
            .collect();
        assert_eq!(axes, vec![Orientation::Left]);
    }

    #[test]
    fn test_label_listeners_registered() {
        let mut plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_left("v"))
                .layer(Layer::new(GeomKind::Point))
                .labels(Labels { x: Some("time".into()), ..Default::default() })
                .label_listener(LabelKind::X, LabelEvent::Click)
                .label_listener(LabelKind::Main, LabelEvent::Click)
                .throw_errors(),
        );
        let mut renderer = RecordingRenderer::new();
        plot.render(&mut renderer).expect("render");
        let listeners: Vec<&DrawCommand> = renderer
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::LabelListener { .. }))
            .collect();
        // Only the label that exists gets a listener.
        assert_eq!(
            listeners,
            vec![&DrawCommand::LabelListener { kind: LabelKind::X, event: LabelEvent::Click }]
        );
    }

    #[test]
    fn test_brush_restricted_to_right_axis() {
        let mut plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_right("v"))
                .layer(Layer::new(GeomKind::Point))
                .brushing(BrushConfig {
                    dimension: BrushDimension::YRight,
                    ..Default::default()
                })
                .throw_errors(),
        );
        let mut renderer = RecordingRenderer::new();
        plot.render(&mut renderer).expect("render");
        let brush = plot.brush_mut().expect("brush");
        brush.drag_start(BrushTarget::Surface);
        assert_eq!(brush.state(), SelectionType::Y);
        brush.set_extent([[None, Some(1.0)], [None, Some(4.0)]]).expect("set");
        assert_eq!(brush.extent().y, Some((1.0, 4.0)));
    }

    #[test]
    fn test_brush_selections_track_layer_rows() {
        let mut plot = Plot::new(
            PlotConfig::new(800.0, 600.0)
                .data(sample_data())
                .aes(Aes::new().x("t").y_left("v"))
                .layer(Layer::new(GeomKind::Point))
                .brushing(BrushConfig::default())
                .throw_errors(),
        );
        let mut renderer = RecordingRenderer::new();
        plot.render(&mut renderer).expect("render");
        // Rows: t = [0, 2, 4], v = [-1, 2, 5]; the window catches row 1.
        plot.set_brush_extent([[Some(1.0), Some(0.0)], [Some(3.0), Some(4.0)]]).expect("extent");
        let brush = plot.brush_mut().expect("brush");
        assert_eq!(brush.selections(), vec![vec![1]]);
    }

    #[test]
    fn test_replace_layer_bounds_checked() {
        let mut plot = basic_plot();
        assert!(plot.replace_layer(0, Layer::new(GeomKind::Path)).is_ok());
        let err = plot.replace_layer(5, Layer::new(GeomKind::Path)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_set_aes_merges_partial() {
        let mut plot = basic_plot();
        plot.set_aes(&Aes::new().color("group"), None).expect("set aes");
        assert!(plot.maps(Dimension::Color));
        // Existing mappings survive.
        assert!(plot.maps(Dimension::X));
    }
}
