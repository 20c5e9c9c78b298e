//! Domain derivation and scale instantiation across layers.

use std::collections::HashMap;

use crate::aes::Aes;
use crate::data::{DataFrame, DataValue};
use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::grid::Grid;

use super::{
    ContinuousScale, DiscreteScale, LogGutter, Scale, ScaleSpec, ScaleType, Scales, Transform,
};

/// One layer's resolved data and aesthetics, as seen by the engine.
#[derive(Debug, Clone, Copy)]
pub struct LayerFrame<'a> {
    /// The data rows this layer draws from.
    pub data: &'a DataFrame,
    /// The merged (plot ∪ layer) aesthetic mapping.
    pub aes: &'a Aes,
}

/// Computes a scale for every dimension any layer maps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleEngine;

impl ScaleEngine {
    /// Compute the full scale set for one render cycle.
    ///
    /// Fails with [`Error::ScaleDomain`] when no x scale or no y scale
    /// (left or right) can be built; the orchestrator aborts the render
    /// before any geometry is drawn.
    pub fn compute(
        layers: &[LayerFrame<'_>],
        specs: &HashMap<Dimension, ScaleSpec>,
        grid: &Grid,
    ) -> Result<Scales> {
        let mut scales = Scales::default();
        let default_spec = ScaleSpec::default();

        for dim in Dimension::ALL {
            let mapped: Vec<&LayerFrame<'_>> =
                layers.iter().filter(|l| l.aes.column(dim).is_some()).collect();
            if mapped.is_empty() {
                continue;
            }
            let spec = specs.get(&dim).unwrap_or(&default_spec);
            let scale_type = spec.scale_type.unwrap_or_else(|| dim.default_scale_type());

            let scale = match scale_type {
                ScaleType::Discrete => Self::build_discrete(dim, &mapped, spec, grid),
                ScaleType::Continuous => Self::build_continuous(dim, &mapped, spec, grid),
            };
            scales.insert(dim, scale);
        }

        if scales.x().is_none() {
            return Err(Error::ScaleDomain("no viable x scale".to_string()));
        }
        if scales.y().is_none() {
            return Err(Error::ScaleDomain("no viable y scale (left or right)".to_string()));
        }
        Ok(scales)
    }

    /// Default pixel range for a positional or size dimension.
    fn default_range(dim: Dimension, grid: &Grid) -> (f64, f64) {
        if dim.is_x() {
            (grid.left, grid.right)
        } else if dim.is_y() {
            // Screen y grows downward; larger data maps upward.
            (grid.bottom, grid.top)
        } else {
            // Size in pixels; continuous color normalizes onto [0, 1].
            match dim {
                Dimension::Size => (3.0, 10.0),
                _ => (0.0, 1.0),
            }
        }
    }

    fn build_discrete(
        dim: Dimension,
        layers: &[&LayerFrame<'_>],
        spec: &ScaleSpec,
        grid: &Grid,
    ) -> Scale {
        let mut domain = spec.discrete_domain.clone().unwrap_or_else(|| {
            // First appearance during the data scan fixes the order.
            let mut seen = Vec::new();
            for layer in layers {
                if let Some(col) = layer.aes.column(dim) {
                    if let Some(values) = layer.data.column(col) {
                        for value in values {
                            if *value != DataValue::Null && !seen.contains(value) {
                                seen.push(value.clone());
                            }
                        }
                    }
                }
            }
            seen
        });
        if let Some(sort) = spec.sort_fn {
            domain.sort_by(sort);
        }

        if dim.is_positional() {
            let range = spec.range.unwrap_or_else(|| Self::default_range(dim, grid));
            Scale::Discrete(DiscreteScale::banded(domain, range))
        } else if dim == Dimension::Shape {
            Scale::Discrete(DiscreteScale::shape_lookup(domain, spec.shape_range.clone()))
        } else {
            Scale::Discrete(DiscreteScale::color_lookup(domain, spec.color_range.clone()))
        }
    }

    fn build_continuous(
        dim: Dimension,
        layers: &[&LayerFrame<'_>],
        spec: &ScaleSpec,
        grid: &Grid,
    ) -> Scale {
        let range = spec.range.unwrap_or_else(|| Self::default_range(dim, grid));
        let (data_min, data_max, min_positive) = Self::scan_extent(dim, layers);

        // User bounds extend outward only; data never shrinks them.
        let mut min = match (spec.domain.0, data_min) {
            (Some(user), Some(data)) => user.min(data),
            (Some(user), None) => user,
            (None, Some(data)) => data,
            (None, None) => f64::NAN,
        };
        let mut max = match (spec.domain.1, data_max) {
            (Some(user), Some(data)) => user.max(data),
            (Some(user), None) => user,
            (None, Some(data)) => data,
            (None, None) => f64::NAN,
        };

        if min.is_nan() && max.is_nan() {
            // Cannot render data, but an intentionally empty grid still can.
            log::warn!("{dim} domain has no finite bounds, falling back to [0, 0]");
            return Scale::Continuous(ContinuousScale::linear((0.0, 0.0), range));
        }
        if min.is_nan() {
            min = max;
        }
        if max.is_nan() {
            max = min;
        }

        match spec.trans {
            Transform::Linear => {
                if min == max {
                    min -= 1.0;
                    max += 1.0;
                }
                Scale::Continuous(ContinuousScale::linear((min, max), range))
            }
            Transform::Log => {
                if min == max {
                    // Widen multiplicatively so the log call below never
                    // sees a zero-width or crossing-zero domain.
                    min /= 2.0;
                    max *= 2.0;
                    if min > max {
                        std::mem::swap(&mut min, &mut max);
                    }
                }
                if min > 0.0 {
                    return Scale::Continuous(ContinuousScale::log((min, max), range, None));
                }
                // Non-positive inputs need the reserved gutter.
                let anchor = spec
                    .min_positive_value
                    .or(min_positive)
                    .filter(|v| *v > 0.0)
                    .unwrap_or(1.0);
                let (gutter, mut domain) = LogGutter::compute(
                    (min, max),
                    anchor,
                    (range.1 - range.0).abs(),
                    spec.gutter,
                );
                if domain.0 >= domain.1 {
                    // All-zero input collapses onto the epsilon floor even
                    // after the shift; widen up toward the anchor.
                    domain.1 = (anchor * 2.0).max(domain.0 * 2.0);
                }
                Scale::Continuous(ContinuousScale::log(domain, range, Some(gutter)))
            }
        }
    }

    /// Min/max over all layers for a dimension, widened by the paired
    /// error column per row so error bars are never clipped. Also reports
    /// the smallest positive value observed (anchors the log gutter).
    fn scan_extent(
        dim: Dimension,
        layers: &[&LayerFrame<'_>],
    ) -> (Option<f64>, Option<f64>, Option<f64>) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut min_positive = f64::INFINITY;
        let mut any = false;

        for layer in layers {
            let Some(col) = layer.aes.column(dim) else { continue };
            let Some(values) = layer.data.column(col) else { continue };
            let errors = layer.aes.error_column(dim).and_then(|e| layer.data.column(e));

            for (row, value) in values.iter().enumerate() {
                let Some(v) = value.as_f64().filter(|v| v.is_finite()) else { continue };
                let err = errors
                    .and_then(|e| e.get(row))
                    .and_then(DataValue::as_f64)
                    .filter(|e| e.is_finite())
                    .unwrap_or(0.0);
                any = true;
                min = min.min(v - err);
                max = max.max(v + err);
                if v > 0.0 {
                    min_positive = min_positive.min(v);
                }
            }
        }

        if any {
            let mp = (min_positive.is_finite()).then_some(min_positive);
            (Some(min), Some(max), mp)
        } else {
            (None, None, None)
        }
    }
}
