//! Continuous (numeric interpolating) scales.

use super::log_gutter::LogGutter;
use super::{round_significant, Transform};

/// A continuous scale mapping a data domain onto a pixel range.
///
/// The domain is final at construction: degenerate widening and log-gutter
/// shifting happen in the engine, so invariants hold here — a log domain is
/// strictly positive and the domain is ordered `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousScale {
    transform: Transform,
    domain: (f64, f64),
    range: (f64, f64),
    gutter: Option<LogGutter>,
}

impl ContinuousScale {
    /// Create a linear scale.
    #[must_use]
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { transform: Transform::Linear, domain, range, gutter: None }
    }

    /// Create a log scale over a strictly positive domain, optionally
    /// carrying a gutter for non-positive inputs.
    #[must_use]
    pub fn log(domain: (f64, f64), range: (f64, f64), gutter: Option<LogGutter>) -> Self {
        debug_assert!(domain.0 > 0.0, "log domain must be strictly positive");
        Self { transform: Transform::Log, domain, range, gutter }
    }

    /// The transform this scale applies.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The data domain.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The pixel range.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// The log gutter, when one is reserved.
    #[must_use]
    pub fn gutter(&self) -> Option<&LogGutter> {
        self.gutter.as_ref()
    }

    /// Map a data value to a pixel position.
    ///
    /// Under a log transform any input at or below the gutter epsilon
    /// evaluates at the epsilon position; values above it use the real
    /// logarithmic mapping unmodified.
    #[must_use]
    pub fn position(&self, value: f64) -> f64 {
        let t = match self.transform {
            Transform::Linear => {
                let span = self.domain.1 - self.domain.0;
                if span.abs() < f64::EPSILON {
                    0.5
                } else {
                    (value - self.domain.0) / span
                }
            }
            Transform::Log => {
                let floor = self.gutter.map_or(f64::MIN_POSITIVE, |g| g.epsilon);
                let v = value.max(floor);
                let span = self.domain.1.ln() - self.domain.0.ln();
                if span.abs() < f64::EPSILON {
                    0.5
                } else {
                    (v.ln() - self.domain.0.ln()) / span
                }
            }
        };
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Map a pixel position back to a data value.
    #[must_use]
    pub fn invert(&self, px: f64) -> f64 {
        let span = self.range.1 - self.range.0;
        let t = if span.abs() < f64::EPSILON { 0.5 } else { (px - self.range.0) / span };
        match self.transform {
            Transform::Linear => self.domain.0 + t * (self.domain.1 - self.domain.0),
            Transform::Log => {
                (self.domain.0.ln() + t * (self.domain.1.ln() - self.domain.0.ln())).exp()
            }
        }
    }

    /// Tick values for an axis over this scale.
    ///
    /// Log ticks land on decades; fewer than 2 forces exactly the rounded
    /// domain endpoints, 10 or more keeps every 9th to avoid crowding.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self.transform {
            Transform::Linear => nice_ticks(self.domain.0, self.domain.1, count),
            Transform::Log => {
                let ticks = decade_ticks(self.domain);
                if ticks.len() < 2 {
                    vec![round_significant(self.domain.0, 10), round_significant(self.domain.1, 10)]
                } else if ticks.len() >= 10 {
                    ticks.into_iter().step_by(9).collect()
                } else {
                    ticks
                }
            }
        }
    }

    /// Pixel band reserved for non-positive inputs: from the epsilon
    /// position to the smallest positive value's position.
    #[must_use]
    pub fn gutter_band(&self) -> Option<(f64, f64)> {
        let gutter = self.gutter?;
        let a = self.position(gutter.epsilon);
        let b = self.position(gutter.min_positive);
        Some((a.min(b), a.max(b)))
    }
}

/// Powers of ten falling inside the domain.
fn decade_ticks(domain: (f64, f64)) -> Vec<f64> {
    let start = domain.0.log10().ceil() as i32;
    let end = domain.1.log10().floor() as i32;
    (start..=end).map(|e| 10f64.powi(e)).collect()
}

/// Compute a "nice" step magnitude for a span.
fn nice_number(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let fraction = range / 10f64.powf(exponent);

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * 10f64.powf(exponent)
}

/// Generate nice tick positions inside `[min, max]`.
#[must_use]
pub fn nice_ticks(min: f64, max: f64, num_ticks: usize) -> Vec<f64> {
    if !(max - min).is_finite() || max <= min {
        return vec![min];
    }
    if num_ticks < 2 {
        return vec![(min + max) / 2.0];
    }

    let range = nice_number(max - min, false);
    let spacing = nice_number(range / (num_ticks - 1) as f64, true);
    let nice_min = (min / spacing).floor() * spacing;
    let nice_max = (max / spacing).ceil() * spacing;

    let mut ticks = Vec::new();
    let mut tick = nice_min;
    while tick <= nice_max + spacing * 0.5 {
        if tick >= min - spacing * 0.001 && tick <= max + spacing * 0.001 {
            ticks.push(tick);
        }
        tick += spacing;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::super::GutterOptions;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_position() {
        let s = ContinuousScale::linear((0.0, 100.0), (0.0, 1.0));
        assert_relative_eq!(s.position(0.0), 0.0);
        assert_relative_eq!(s.position(50.0), 0.5);
        assert_relative_eq!(s.position(100.0), 1.0);
    }

    #[test]
    fn test_linear_inverted_range() {
        // Screen y ranges run bottom-to-top.
        let s = ContinuousScale::linear((0.0, 10.0), (550.0, 75.0));
        assert_relative_eq!(s.position(0.0), 550.0);
        assert_relative_eq!(s.position(10.0), 75.0);
    }

    #[test]
    fn test_linear_invert_roundtrip() {
        let s = ContinuousScale::linear((-5.0, 5.0), (100.0, 700.0));
        assert_relative_eq!(s.invert(s.position(2.5)), 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_width_domain_maps_to_midpoint() {
        let s = ContinuousScale::linear((0.0, 0.0), (0.0, 100.0));
        assert_relative_eq!(s.position(0.0), 50.0);
    }

    #[test]
    fn test_log_position_decades() {
        let s = ContinuousScale::log((1.0, 1000.0), (0.0, 3.0), None);
        assert_relative_eq!(s.position(1.0), 0.0, epsilon = 1e-9);
        assert_relative_eq!(s.position(10.0), 1.0, epsilon = 1e-9);
        assert_relative_eq!(s.position(100.0), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_log_clamps_at_epsilon() {
        let (gutter, domain) =
            LogGutter::compute((0.0, 100.0), 1.0, 500.0, GutterOptions::default());
        let s = ContinuousScale::log(domain, (0.0, 500.0), Some(gutter));
        assert_relative_eq!(s.position(0.0), s.position(gutter.epsilon));
        assert_relative_eq!(s.position(-7.0), s.position(gutter.epsilon));
        assert!(s.position(50.0) > s.position(1.0));
    }

    #[test]
    fn test_log_ticks_subsample_when_crowded() {
        let s = ContinuousScale::log((1e-6, 1e6), (0.0, 500.0), None);
        let ticks = s.ticks(10);
        // 13 decades subsample to every 9th.
        assert_eq!(ticks.len(), 2);
        assert_relative_eq!(ticks[0], 1e-6);
    }

    #[test]
    fn test_log_ticks_force_endpoints_when_sparse() {
        let s = ContinuousScale::log((2.0, 5.0), (0.0, 100.0), None);
        let ticks = s.ticks(10);
        assert_eq!(ticks, vec![2.0, 5.0]);
    }

    #[test]
    fn test_nice_ticks_within_bounds() {
        let ticks = nice_ticks(-1.0, 5.0, 7);
        assert!(ticks.len() >= 2);
        assert!(ticks.iter().all(|t| *t >= -1.01 && *t <= 5.01));
    }

    #[test]
    fn test_nice_ticks_degenerate() {
        assert_eq!(nice_ticks(3.0, 3.0, 5), vec![3.0]);
    }

    #[test]
    fn test_gutter_band_ordering() {
        let (gutter, domain) =
            LogGutter::compute((0.0, 100.0), 1.0, 500.0, GutterOptions::default());
        let s = ContinuousScale::log(domain, (0.0, 500.0), Some(gutter));
        let (lo, hi) = s.gutter_band().expect("gutter band");
        assert!(lo < hi);
        assert!(hi - lo >= 29.0);
    }
}
