//! Axis tick layout: tick sourcing, label collision handling, hit areas,
//! gridlines, and the log-gutter sentinel tick.

use crate::data::DataValue;
use crate::grid::Grid;
use crate::scale::{round_significant, Scale, TickFormat};

/// Which plot edge an axis is drawn along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Below the grid (primary x).
    Bottom,
    /// Above the grid (secondary x).
    Top,
    /// Left of the grid (primary y).
    Left,
    /// Right of the grid (secondary y).
    Right,
}

impl Orientation {
    fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Bottom | Orientation::Top)
    }
}

/// A pixel-space rectangle (y-down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// One laid-out axis tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Numeric tick value; `None` for the gutter sentinel.
    pub value: Option<f64>,
    /// Display label.
    pub label: String,
    /// Along-axis pixel position.
    pub position: f64,
    /// Invisible click/hover rectangle, present for categorical ticks.
    pub hit_rect: Option<Rect>,
    /// Hover text, when configured.
    pub hover_text: Option<String>,
    /// Whether this is the injected "≤0" gutter sentinel.
    pub is_gutter: bool,
}

/// Host callback for a pointer event on a tick, given its label.
pub type TickCallback = fn(&str);

/// Pointer-event handlers a host hangs on an axis's ticks.
///
/// The core records them on the laid-out axis; hosts dispatch against
/// each tick's hit rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickHandlers {
    /// Pointer click.
    pub click: Option<TickCallback>,
    /// Pointer entered the tick area.
    pub mouse_over: Option<TickCallback>,
    /// Pointer left the tick area.
    pub mouse_out: Option<TickCallback>,
}

/// Axis layout options resolved from the scale spec and plot config.
#[derive(Debug, Clone)]
pub struct AxisOptions {
    /// Explicit tick values overriding the scale's own.
    pub tick_values: Option<Vec<f64>>,
    /// Numeric label formatter.
    pub tick_format: Option<TickFormat>,
    /// Fixed decimal digits for numeric labels.
    pub tick_digits: Option<usize>,
    /// Cap on categorical label count; excess labels are subsampled.
    pub tick_label_max: Option<usize>,
    /// Hover text formatter for categorical ticks.
    pub tick_hover_text: Option<fn(&str) -> String>,
    /// Style class the renderer attaches to this axis's ticks.
    pub tick_cls: Option<String>,
    /// Pointer-event handlers for this axis's ticks.
    pub tick_handlers: TickHandlers,
    /// Rotation angle applied when labels collide, in degrees.
    pub rotation_degrees: f64,
    /// Label font size in pixels, used for extent estimation.
    pub font_size: f64,
    /// Requested tick count for continuous scales.
    pub tick_count: usize,
    /// Whether to emit gridline positions.
    pub gridlines: bool,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            tick_values: None,
            tick_format: None,
            tick_digits: None,
            tick_label_max: None,
            tick_hover_text: None,
            tick_cls: None,
            tick_handlers: TickHandlers::default(),
            rotation_degrees: 15.0,
            font_size: 10.0,
            tick_count: 7,
            gridlines: true,
        }
    }
}

/// A fully laid-out axis, ready for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Edge the axis runs along.
    pub orientation: Orientation,
    /// Ticks in along-axis order.
    pub ticks: Vec<Tick>,
    /// Along-axis gridline positions (border-coincident ones suppressed).
    pub gridlines: Vec<f64>,
    /// Whether label collision forced rotation.
    pub needs_rotation: bool,
    /// Rotation angle in effect when `needs_rotation` is set.
    pub rotation_degrees: f64,
    /// Pixel band of the log gutter, when the scale reserves one.
    pub gutter_band: Option<(f64, f64)>,
    /// Style class for this axis's ticks, when configured.
    pub tick_cls: Option<String>,
    /// Pointer-event handlers for this axis's ticks.
    pub handlers: TickHandlers,
}

/// Stateless axis layout over an instantiated scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisLayout;

impl AxisLayout {
    /// Lay out an axis for `scale` along `orientation`.
    #[must_use]
    pub fn layout(
        scale: &Scale,
        orientation: Orientation,
        grid: &Grid,
        options: &AxisOptions,
    ) -> Axis {
        let mut rotation = options.rotation_degrees;
        let mut ticks = Self::source_ticks(scale, options, &mut rotation);

        let mut gutter_band = None;
        if let Some(cont) = scale.as_continuous() {
            if let (Some(band), Some(gutter)) = (cont.gutter_band(), cont.gutter()) {
                let sentinel_pos = cont.position(gutter.epsilon);
                Self::inject_gutter_tick(&mut ticks, band, sentinel_pos);
                gutter_band = Some(band);
            }
        }

        let needs_rotation = if orientation == Orientation::Bottom {
            Self::labels_collide(&ticks, options.font_size)
        } else {
            false
        };
        let applied_rotation = if needs_rotation { rotation } else { 0.0 };

        if scale.as_discrete().is_some() {
            Self::size_hit_areas(&mut ticks, orientation, grid, options, applied_rotation);
            if let Some(hover) = options.tick_hover_text {
                for tick in &mut ticks {
                    tick.hover_text = Some(hover(&tick.label));
                }
            }
        }

        let gridlines = if options.gridlines {
            Self::gridline_positions(&ticks, orientation, grid)
        } else {
            Vec::new()
        };

        Axis {
            orientation,
            ticks,
            gridlines,
            needs_rotation,
            rotation_degrees: applied_rotation,
            gutter_band,
            tick_cls: options.tick_cls.clone(),
            handlers: options.tick_handlers,
        }
    }

    /// Tick source precedence: explicit values, the scale's native ticks,
    /// or the discrete domain.
    fn source_ticks(scale: &Scale, options: &AxisOptions, rotation: &mut f64) -> Vec<Tick> {
        match scale {
            Scale::Continuous(cont) => {
                let values = options
                    .tick_values
                    .clone()
                    .unwrap_or_else(|| cont.ticks(options.tick_count));
                values
                    .into_iter()
                    .map(|v| Tick {
                        value: Some(v),
                        label: Self::format_value(v, options),
                        position: cont.position(v),
                        hit_rect: None,
                        hover_text: None,
                        is_gutter: false,
                    })
                    .collect()
            }
            Scale::Discrete(disc) => {
                let mut labels: Vec<(usize, &DataValue)> = disc.domain().iter().enumerate().collect();
                if let Some(cap) = options.tick_label_max {
                    if labels.len() > cap && cap > 0 {
                        let factor = labels.len() / cap;
                        if factor > 1 {
                            log::debug!(
                                "subsampling {} categorical labels by {factor}",
                                labels.len()
                            );
                            labels = labels.into_iter().step_by(factor).collect();
                            *rotation = rotation.max(45.0);
                        }
                    }
                }
                labels
                    .into_iter()
                    .filter_map(|(idx, value)| {
                        disc.position_at(idx).map(|position| Tick {
                            value: None,
                            label: value.display(),
                            position,
                            hit_rect: None,
                            hover_text: None,
                            is_gutter: false,
                        })
                    })
                    .collect()
            }
        }
    }

    /// Numeric labels are rounded to 10 significant decimal digits to
    /// suppress float display artifacts, unless the caller formats them.
    fn format_value(v: f64, options: &AxisOptions) -> String {
        if let Some(fmt) = options.tick_format {
            return fmt(v);
        }
        if let Some(digits) = options.tick_digits {
            return format!("{:.*}", digits, v);
        }
        format!("{}", round_significant(v, 10))
    }

    /// Drop real ticks inside the gutter band and add the "≤0" sentinel
    /// at the reserved epsilon position.
    fn inject_gutter_tick(ticks: &mut Vec<Tick>, band: (f64, f64), sentinel_pos: f64) {
        ticks.retain(|t| t.position < band.0 - 0.5 || t.position > band.1 + 0.5);
        ticks.push(Tick {
            value: None,
            label: "\u{2264}0".to_string(),
            position: sentinel_pos,
            hit_rect: None,
            hover_text: None,
            is_gutter: true,
        });
        ticks.sort_by(|a, b| a.position.total_cmp(&b.position));
    }

    /// Whether any adjacent pair of label boxes overlaps horizontally.
    /// Zero-width (empty-label) boxes are skipped.
    fn labels_collide(ticks: &[Tick], font_size: f64) -> bool {
        let boxes: Vec<(f64, f64)> = ticks
            .iter()
            .filter(|t| !t.label.is_empty())
            .map(|t| {
                let w = label_width(&t.label, font_size);
                (t.position - w / 2.0, t.position + w / 2.0)
            })
            .collect();
        boxes.windows(2).any(|pair| pair[0].1 > pair[1].0)
    }

    /// Each categorical tick's invisible rectangle extends halfway to its
    /// neighbors' label boxes; first and last extend halfway to the axis
    /// edge. Rotated labels use their projected along-axis extent.
    fn size_hit_areas(
        ticks: &mut [Tick],
        orientation: Orientation,
        grid: &Grid,
        options: &AxisOptions,
        rotation_degrees: f64,
    ) {
        if ticks.is_empty() {
            return;
        }
        let (axis_start, axis_end) = if orientation.is_horizontal() {
            (grid.left, grid.right)
        } else {
            (grid.top, grid.bottom)
        };

        let rad = rotation_degrees.to_radians();
        let extent = |t: &Tick| {
            let w = label_width(&t.label, options.font_size);
            let h = options.font_size;
            if rotation_degrees == 0.0 {
                w
            } else {
                w * rad.cos().abs() + h * rad.sin().abs()
            }
        };

        let edges: Vec<(f64, f64)> = ticks
            .iter()
            .map(|t| {
                let e = extent(t);
                (t.position - e / 2.0, t.position + e / 2.0)
            })
            .collect();

        let n = ticks.len();
        for i in 0..n {
            let left = if i == 0 {
                (axis_start + edges[0].0) / 2.0
            } else {
                (edges[i - 1].1 + edges[i].0) / 2.0
            };
            let right = if i == n - 1 {
                (edges[n - 1].1 + axis_end) / 2.0
            } else {
                (edges[i].1 + edges[i + 1].0) / 2.0
            };
            let thickness = options.font_size * 1.5;
            ticks[i].hit_rect = Some(if orientation.is_horizontal() {
                let y = match orientation {
                    Orientation::Bottom => grid.bottom,
                    _ => grid.top - thickness,
                };
                Rect { x: left, y, width: (right - left).max(0.0), height: thickness }
            } else {
                let x = match orientation {
                    Orientation::Left => grid.left - thickness,
                    _ => grid.right,
                };
                Rect { x, y: left, width: thickness, height: (right - left).max(0.0) }
            });
        }
    }

    /// Gridlines at tick positions, suppressed where they would coincide
    /// with an already-drawn plot border.
    fn gridline_positions(ticks: &[Tick], orientation: Orientation, grid: &Grid) -> Vec<f64> {
        let (border_a, border_b) = if orientation.is_horizontal() {
            (grid.left, grid.right)
        } else {
            (grid.top, grid.bottom)
        };
        ticks
            .iter()
            .map(|t| t.position)
            .filter(|p| (p - border_a).abs() > 0.5 && (p - border_b).abs() > 0.5)
            .collect()
    }
}

/// Estimated pixel width of a label at a font size. The core never touches
/// real text metrics; the renderer owns exact glyph extents.
fn label_width(label: &str, font_size: f64) -> f64 {
    label.chars().count() as f64 * font_size * 0.6
}
