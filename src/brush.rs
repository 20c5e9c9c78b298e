//! Interactive brush: a rectangular or 1D selection over one or two
//! continuous scales, with synchronized axis handle brushes.
//!
//! The original interaction model of mutually-triggering brush callbacks is
//! replaced by an explicit state machine: a pure
//! [`transition`](BrushController) step computes the next selection state
//! and a list of side effects, and the controller applies them. The
//! machine is testable without any pointer events.

use std::fmt;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::scale::ContinuousScale;

/// Which axes the current selection constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionType {
    /// No active selection.
    #[default]
    None,
    /// 1D horizontal selection.
    X,
    /// 1D vertical selection.
    Y,
    /// 2D rectangular selection.
    Both,
}

/// Restriction on which dimension the brush may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BrushDimension {
    /// Horizontal only, against the bottom x axis.
    X,
    /// Horizontal only, against the top x axis.
    XTop,
    /// Vertical only, against the left y axis.
    Y,
    /// Vertical only, against the right y axis.
    YRight,
    /// Unrestricted 2D brushing.
    #[default]
    Both,
}

/// The surface a drag started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushTarget {
    /// The main 2D plot surface.
    Surface,
    /// The x-axis handle brush.
    XHandle,
    /// The y-axis handle brush.
    YHandle,
}

/// Notification kinds emitted as brush state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushNotice {
    /// A drag began.
    Started,
    /// The selection changed.
    Changed,
    /// A drag ended with a live selection.
    Ended,
    /// The selection was cleared (distinct from an ordinary change).
    Cleared,
}

/// The public selection extent in data units.
///
/// Only the dimensions the current selection constrains carry bounds; a
/// bound inside the log-gutter pixel region reads back as negative
/// infinity, meaning "unbounded toward zero".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BrushExtent {
    /// Horizontal bounds `(min, max)`.
    pub x: Option<(f64, f64)>,
    /// Vertical bounds `(min, max)`.
    pub y: Option<(f64, f64)>,
}

impl BrushExtent {
    /// The `[[x_min, y_min], [x_max, y_max]]` form of the extent.
    #[must_use]
    pub fn as_array(&self) -> [[Option<f64>; 2]; 2] {
        [
            [self.x.map(|x| x.0), self.y.map(|y| y.0)],
            [self.x.map(|x| x.1), self.y.map(|y| y.1)],
        ]
    }
}

/// Brush appearance and dimension restriction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushConfig {
    /// Brushable dimension restriction.
    pub dimension: BrushDimension,
    /// Selection fill color.
    pub fill_color: Rgba,
    /// Selection fill opacity.
    pub fill_opacity: f64,
    /// Selection border color.
    pub stroke_color: Rgba,
    /// Axis handle length in pixels.
    pub handle_len: f64,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            dimension: BrushDimension::Both,
            fill_color: Rgba::rgb(20, 204, 201),
            fill_opacity: 0.25,
            stroke_color: Rgba::rgb(20, 204, 201),
            handle_len: 30.0,
        }
    }
}

/// Mapped positional values of one layer, snapshotted for selection
/// queries.
///
/// Each entry is a row's x or y value, `None` where the row carries no
/// finite value for that dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerValues {
    /// Per-row x values.
    pub x: Vec<Option<f64>>,
    /// Per-row y values.
    pub y: Vec<Option<f64>>,
}

/// Host callback invoked with a notice, the extent at that moment, and
/// the per-layer row indices inside it.
pub type BrushCallback = Box<dyn FnMut(BrushNotice, &BrushExtent, &[Vec<usize>])>;

/// Optional host callbacks, one per notice kind.
#[derive(Default)]
pub struct BrushHooks {
    /// Drag started.
    pub on_start: Option<BrushCallback>,
    /// Selection changed.
    pub on_change: Option<BrushCallback>,
    /// Drag ended.
    pub on_end: Option<BrushCallback>,
    /// Selection cleared.
    pub on_clear: Option<BrushCallback>,
}

impl fmt::Debug for BrushHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrushHooks")
            .field("on_start", &self.on_start.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("on_end", &self.on_end.is_some())
            .field("on_clear", &self.on_clear.is_some())
            .finish()
    }
}

/// The brushable pixel space of one axis, captured from its scale.
///
/// The coordinate space is padded by ±1px beyond the data range so
/// boundary points remain selectable; a log gutter extends the space by
/// the gutter width on the gutter's side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSpace {
    scale: ContinuousScale,
}

impl BrushSpace {
    /// Capture the brushable space of a continuous scale.
    #[must_use]
    pub fn new(scale: ContinuousScale) -> Self {
        Self { scale }
    }

    /// The scale's data domain.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.scale.domain()
    }

    /// Ordered, padded pixel bounds of the brushable space.
    #[must_use]
    pub fn padded_range(&self) -> (f64, f64) {
        let (a, b) = self.scale.range();
        let (mut lo, mut hi) = (a.min(b) - 1.0, a.max(b) + 1.0);
        if let Some(band) = self.scale.gutter_band() {
            let width = band.1 - band.0;
            // Extend on whichever side the gutter occupies.
            if (band.0 - lo).abs() < (hi - band.1).abs() {
                lo -= width;
            } else {
                hi += width;
            }
        }
        (lo, hi)
    }

    /// Convert a pixel position to a data value.
    #[must_use]
    pub fn data_at(&self, px: f64) -> f64 {
        self.scale.invert(px)
    }

    /// Convert a data value to a pixel position.
    #[must_use]
    pub fn px_at(&self, value: f64) -> f64 {
        self.scale.position(value)
    }

    /// Whether a data value lands inside the reserved gutter band.
    #[must_use]
    pub fn in_gutter(&self, value: f64) -> bool {
        match self.scale.gutter_band() {
            Some(band) => {
                let px = self.scale.position(value);
                px >= band.0 - 0.5 && px <= band.1 + 0.5
            }
            None => false,
        }
    }
}

/// A side effect the state machine asks the controller to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    ClearXHandle,
    ClearYHandle,
    SyncHandles,
    Notify(BrushNotice),
}

/// An input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BrushEvent {
    DragStart { target: BrushTarget },
    DragMove { x: Option<(f64, f64)>, y: Option<(f64, f64)> },
    DragEnd { empty: bool },
    Set { x: Option<(f64, f64)>, y: Option<(f64, f64)> },
    Clear,
}

/// Context the pure transition step reads but never mutates.
#[derive(Debug, Clone, Copy, Default)]
struct TransitionCtx {
    restrict: BrushDimension,
    x_domain: Option<(f64, f64)>,
    y_domain: Option<(f64, f64)>,
}

/// The pure transition step: `(state, event) -> (state', effects)`.
fn transition(
    state: SelectionType,
    event: &BrushEvent,
    ctx: &TransitionCtx,
) -> (SelectionType, Vec<Effect>) {
    match event {
        BrushEvent::DragStart { target } => match target {
            BrushTarget::Surface => {
                // The main surface is inherently 2D unless configuration
                // restricts brushing to one axis.
                let next = match ctx.restrict {
                    BrushDimension::X | BrushDimension::XTop => SelectionType::X,
                    BrushDimension::Y | BrushDimension::YRight => SelectionType::Y,
                    BrushDimension::Both => SelectionType::Both,
                };
                (next, vec![Effect::Notify(BrushNotice::Started)])
            }
            BrushTarget::XHandle => {
                let mut effects = Vec::new();
                let next = match state {
                    SelectionType::Y => {
                        effects.push(Effect::ClearYHandle);
                        SelectionType::X
                    }
                    SelectionType::None => SelectionType::X,
                    other => other,
                };
                effects.push(Effect::Notify(BrushNotice::Started));
                (next, effects)
            }
            BrushTarget::YHandle => {
                let mut effects = Vec::new();
                let next = match state {
                    SelectionType::X => {
                        effects.push(Effect::ClearXHandle);
                        SelectionType::Y
                    }
                    SelectionType::None => SelectionType::Y,
                    other => other,
                };
                effects.push(Effect::Notify(BrushNotice::Started));
                (next, effects)
            }
        },
        BrushEvent::DragMove { x, y } => {
            // A move in a 1D state upgrades to 2D when the other
            // dimension's bounds pull strictly inside its domain.
            let next = match state {
                SelectionType::X if exceeds(*y, ctx.y_domain) => SelectionType::Both,
                SelectionType::Y if exceeds(*x, ctx.x_domain) => SelectionType::Both,
                other => other,
            };
            (next, vec![Effect::SyncHandles, Effect::Notify(BrushNotice::Changed)])
        }
        BrushEvent::DragEnd { empty } => {
            if *empty {
                (
                    SelectionType::None,
                    vec![
                        Effect::ClearXHandle,
                        Effect::ClearYHandle,
                        Effect::Notify(BrushNotice::Cleared),
                    ],
                )
            } else {
                (state, vec![Effect::Notify(BrushNotice::Ended)])
            }
        }
        BrushEvent::Set { x, y } => {
            let next = match (x.is_some(), y.is_some()) {
                (true, true) => SelectionType::Both,
                (true, false) => SelectionType::X,
                (false, true) => SelectionType::Y,
                (false, false) => SelectionType::None,
            };
            let effects = if next == SelectionType::None {
                vec![
                    Effect::ClearXHandle,
                    Effect::ClearYHandle,
                    Effect::Notify(BrushNotice::Cleared),
                ]
            } else {
                vec![
                    Effect::SyncHandles,
                    Effect::Notify(BrushNotice::Changed),
                    Effect::Notify(BrushNotice::Ended),
                ]
            };
            (next, effects)
        }
        BrushEvent::Clear => {
            if state == SelectionType::None {
                (state, Vec::new())
            } else {
                (
                    SelectionType::None,
                    vec![
                        Effect::ClearXHandle,
                        Effect::ClearYHandle,
                        Effect::Notify(BrushNotice::Cleared),
                    ],
                )
            }
        }
    }
}

/// Whether proposed bounds pull strictly inside the dimension's domain.
/// Comparison is strict; equality at a domain boundary does not count.
fn exceeds(proposed: Option<(f64, f64)>, domain: Option<(f64, f64)>) -> bool {
    match (proposed, domain) {
        (Some(p), Some(d)) => p.0 > d.0 || p.1 < d.1,
        _ => false,
    }
}

/// The brush controller owning selection state, handles, and spaces.
#[derive(Debug, Default)]
pub struct BrushController {
    config: BrushConfig,
    hooks: BrushHooks,
    state: SelectionType,
    x_extent: Option<(f64, f64)>,
    y_extent: Option<(f64, f64)>,
    x_handle: Option<(f64, f64)>,
    y_handle: Option<(f64, f64)>,
    x_space: Option<BrushSpace>,
    y_space: Option<BrushSpace>,
    layers: Vec<LayerValues>,
    notices: Vec<BrushNotice>,
}

impl BrushController {
    /// Create a controller with the given configuration.
    #[must_use]
    pub fn new(config: BrushConfig) -> Self {
        Self { config, ..Default::default() }
    }

    /// Install host callbacks.
    pub fn set_hooks(&mut self, hooks: BrushHooks) {
        self.hooks = hooks;
    }

    /// The brush configuration.
    #[must_use]
    pub fn config(&self) -> &BrushConfig {
        &self.config
    }

    /// Current selection state.
    #[must_use]
    pub fn state(&self) -> SelectionType {
        self.state
    }

    /// The x handle sub-brush extent, when active.
    #[must_use]
    pub fn x_handle(&self) -> Option<(f64, f64)> {
        self.x_handle
    }

    /// The y handle sub-brush extent, when active.
    #[must_use]
    pub fn y_handle(&self) -> Option<(f64, f64)> {
        self.y_handle
    }

    /// Refresh the pixel spaces after a render. Selection state and the
    /// stored data-unit extent survive re-renders.
    pub fn attach(&mut self, x_space: Option<BrushSpace>, y_space: Option<BrushSpace>) {
        self.x_space = x_space;
        self.y_space = y_space;
    }

    /// Snapshot the per-layer positional values used for selection
    /// queries. Refreshed alongside [`attach`](Self::attach) when the
    /// plot re-renders.
    pub fn set_layer_values(&mut self, layers: Vec<LayerValues>) {
        self.layers = layers;
    }

    /// Per-layer row indices inside the current extent.
    ///
    /// A row is selected when every constrained dimension's value falls
    /// within the extent's bounds; without a live selection every layer
    /// reports no rows.
    #[must_use]
    pub fn selections(&self) -> Vec<Vec<usize>> {
        let extent = self.extent();
        self.layers.iter().map(|layer| rows_within(layer, &extent)).collect()
    }

    /// Begin a drag on one of the brush surfaces.
    pub fn drag_start(&mut self, target: BrushTarget) {
        let ctx = self.ctx();
        let (next, effects) = transition(self.state, &BrushEvent::DragStart { target }, &ctx);
        self.state = next;
        self.apply(&effects);
    }

    /// Update the selection from pixel bounds during a drag.
    ///
    /// Pixel inputs are clamped to each space's [`BrushSpace::padded_range`]
    /// so a pointer leaving the plot area never produces out-of-space
    /// bounds.
    pub fn drag_move_px(&mut self, x_px: Option<(f64, f64)>, y_px: Option<(f64, f64)>) {
        let x = self.x_space.zip(x_px).map(|(s, px)| clamped_span(&s, px));
        let y = self.y_space.zip(y_px).map(|(s, px)| clamped_span(&s, px));

        let ctx = self.ctx();
        let (next, effects) = transition(self.state, &BrushEvent::DragMove { x, y }, &ctx);
        self.state = next;
        self.store_extent(x, y);
        self.apply(&effects);
    }

    /// End the drag, clearing the selection when it collapsed to nothing.
    pub fn drag_end(&mut self) {
        let empty = match self.state {
            SelectionType::None => true,
            SelectionType::X => extent_empty(self.x_extent),
            SelectionType::Y => extent_empty(self.y_extent),
            // A 2D selection collapsed in either dimension has zero area.
            SelectionType::Both => extent_empty(self.x_extent) || extent_empty(self.y_extent),
        };
        let ctx = self.ctx();
        let (next, effects) = transition(self.state, &BrushEvent::DragEnd { empty }, &ctx);
        self.state = next;
        if empty {
            self.x_extent = None;
            self.y_extent = None;
        }
        self.apply(&effects);
    }

    /// Set the selection programmatically.
    ///
    /// The extent is `[[x_min, y_min], [x_max, y_max]]`; each dimension's
    /// pair must be all-null or all-numeric. Malformed extents are a
    /// programmer error and fail synchronously.
    pub fn set_extent(&mut self, extent: [[Option<f64>; 2]; 2]) -> Result<()> {
        let x = validate_pair(extent[0][0], extent[1][0], "x")?;
        let y = validate_pair(extent[0][1], extent[1][1], "y")?;

        let ctx = self.ctx();
        let (next, effects) = transition(self.state, &BrushEvent::Set { x, y }, &ctx);
        self.state = next;
        self.store_extent(x, y);
        self.apply(&effects);
        Ok(())
    }

    /// Clear the selection. Idempotent; clearing an empty brush is a no-op.
    pub fn clear(&mut self) {
        let ctx = self.ctx();
        let (next, effects) = transition(self.state, &BrushEvent::Clear, &ctx);
        self.state = next;
        self.x_extent = None;
        self.y_extent = None;
        self.apply(&effects);
    }

    /// Read the current extent.
    ///
    /// Bounds of an unselected dimension are `None`; a bound inside the
    /// log-gutter region reads back as negative infinity.
    #[must_use]
    pub fn extent(&self) -> BrushExtent {
        let x = match self.state {
            SelectionType::X | SelectionType::Both => {
                self.x_extent.map(|e| gutter_adjust(e, self.x_space.as_ref()))
            }
            _ => None,
        };
        let y = match self.state {
            SelectionType::Y | SelectionType::Both => {
                self.y_extent.map(|e| gutter_adjust(e, self.y_space.as_ref()))
            }
            _ => None,
        };
        BrushExtent { x, y }
    }

    /// Drain the recorded notices.
    pub fn take_notices(&mut self) -> Vec<BrushNotice> {
        std::mem::take(&mut self.notices)
    }

    fn ctx(&self) -> TransitionCtx {
        TransitionCtx {
            restrict: self.config.dimension,
            x_domain: self.x_space.map(|s| s.domain()),
            y_domain: self.y_space.map(|s| s.domain()),
        }
    }

    /// Keep only the dimensions the state constrains.
    fn store_extent(&mut self, x: Option<(f64, f64)>, y: Option<(f64, f64)>) {
        match self.state {
            SelectionType::None => {
                self.x_extent = None;
                self.y_extent = None;
            }
            SelectionType::X => {
                self.x_extent = x.or(self.x_extent);
                self.y_extent = None;
            }
            SelectionType::Y => {
                self.x_extent = None;
                self.y_extent = y.or(self.y_extent);
            }
            SelectionType::Both => {
                self.x_extent = x.or(self.x_extent);
                self.y_extent = y.or(self.y_extent);
            }
        }
    }

    fn apply(&mut self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::ClearXHandle => self.x_handle = None,
                Effect::ClearYHandle => self.y_handle = None,
                Effect::SyncHandles => {
                    self.x_handle = match self.state {
                        SelectionType::X | SelectionType::Both => self.x_extent,
                        _ => None,
                    };
                    self.y_handle = match self.state {
                        SelectionType::Y | SelectionType::Both => self.y_extent,
                        _ => None,
                    };
                }
                Effect::Notify(notice) => {
                    self.notices.push(*notice);
                    let extent = self.extent();
                    let selections = self.selections();
                    let hook = match notice {
                        BrushNotice::Started => self.hooks.on_start.as_mut(),
                        BrushNotice::Changed => self.hooks.on_change.as_mut(),
                        BrushNotice::Ended => self.hooks.on_end.as_mut(),
                        BrushNotice::Cleared => self.hooks.on_clear.as_mut(),
                    };
                    if let Some(hook) = hook {
                        hook(*notice, &extent, &selections);
                    }
                }
            }
        }
    }
}

/// Pixel bounds clamped into the brushable space, converted to an
/// ordered data-unit span.
fn clamped_span(space: &BrushSpace, px: (f64, f64)) -> (f64, f64) {
    let (lo, hi) = space.padded_range();
    ordered(space.data_at(px.0.clamp(lo, hi)), space.data_at(px.1.clamp(lo, hi)))
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn extent_empty(extent: Option<(f64, f64)>) -> bool {
    extent.map_or(true, |(lo, hi)| (hi - lo).abs() < f64::EPSILON)
}

fn rows_within(layer: &LayerValues, extent: &BrushExtent) -> Vec<usize> {
    if extent.x.is_none() && extent.y.is_none() {
        return Vec::new();
    }
    let rows = layer.x.len().max(layer.y.len());
    (0..rows)
        .filter(|&row| {
            within(extent.x, layer.x.get(row).copied().flatten())
                && within(extent.y, layer.y.get(row).copied().flatten())
        })
        .collect()
}

fn within(bounds: Option<(f64, f64)>, value: Option<f64>) -> bool {
    match bounds {
        None => true,
        Some((lo, hi)) => value.map_or(false, |v| v >= lo && v <= hi),
    }
}

/// Replace a bound with negative infinity when it falls inside the
/// reserved log-gutter region.
fn gutter_adjust(extent: (f64, f64), space: Option<&BrushSpace>) -> (f64, f64) {
    let Some(space) = space else { return extent };
    let lo = if space.in_gutter(extent.0) { f64::NEG_INFINITY } else { extent.0 };
    let hi = if space.in_gutter(extent.1) { f64::NEG_INFINITY } else { extent.1 };
    (lo, hi)
}

fn validate_pair(min: Option<f64>, max: Option<f64>, name: &str) -> Result<Option<(f64, f64)>> {
    match (min, max) {
        (None, None) => Ok(None),
        (Some(lo), Some(hi)) => {
            if lo.is_nan() || hi.is_nan() {
                return Err(Error::BrushExtent(format!("{name} bounds must not be NaN")));
            }
            Ok(Some(ordered(lo, hi)))
        }
        _ => Err(Error::BrushExtent(format!(
            "{name} bounds must both be null or both be numbers"
        ))),
    }
}
