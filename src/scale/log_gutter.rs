//! Log-gutter sizing for non-positive values on logarithmic scales.
//!
//! A true log scale rejects values at or below zero. The gutter reserves a
//! band of pixel space below the smallest positive value; non-positive
//! inputs are clamped to evaluate at a rounding epsilon that sits at the
//! bottom of that band.

/// Sizing constants for the reserved gutter. The defaults reproduce the
/// observed behavior of the original heuristic; both knobs are exposed
/// rather than re-derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GutterOptions {
    /// Minimum pixel width of the reserved band.
    pub min_gutter_px: f64,
}

impl Default for GutterOptions {
    fn default() -> Self {
        Self { min_gutter_px: 30.0 }
    }
}

/// The reserved value/pixel band of a log scale with non-positive inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogGutter {
    /// Values at or below this evaluate at the epsilon position.
    pub epsilon: f64,
    /// Smallest positive value the epsilon was anchored on.
    pub min_positive: f64,
    /// Ratio `epsilon / min_positive` actually used.
    pub ratio: f64,
}

impl LogGutter {
    /// Size the gutter and shift the domain off zero.
    ///
    /// Returns the gutter and the shifted domain. The shifted domain never
    /// contains or straddles zero: when the raw lower bound is at or below
    /// epsilon both bounds translate up by `epsilon - domain[0]`; otherwise
    /// both bounds pad outward by epsilon.
    #[must_use]
    pub fn compute(
        raw_domain: (f64, f64),
        min_positive: f64,
        range_px: f64,
        options: GutterOptions,
    ) -> (Self, (f64, f64)) {
        let min_positive = if min_positive > 0.0 { min_positive } else { 1.0 };
        let upper = raw_domain.1.max(min_positive);
        let ratio = lower_bound_ratio(
            (upper / min_positive).log10().max(1.0),
            range_px.abs(),
            options.min_gutter_px,
        );
        let epsilon = min_positive * ratio;

        let domain = if raw_domain.0 <= epsilon {
            let shift = epsilon - raw_domain.0;
            (raw_domain.0 + shift, raw_domain.1 + shift)
        } else {
            (raw_domain.0 - epsilon, raw_domain.1 + epsilon)
        };

        (Self { epsilon, min_positive, ratio }, domain)
    }

    /// Pixel width of the reserved band for a scale over `domain` and
    /// `range`: the distance between the epsilon position and the smallest
    /// positive value's position.
    #[must_use]
    pub fn gutter_px(&self, domain: (f64, f64), range: (f64, f64)) -> f64 {
        let span = domain.1.ln() - domain.0.ln();
        if span.abs() < f64::EPSILON {
            return 0.0;
        }
        let t = (self.min_positive.ln() - self.epsilon.max(domain.0).ln()) / span;
        (t * (range.1 - range.0)).abs()
    }
}

/// Ratio `epsilon / min_positive` sized so the reserved band spans at least
/// `min_gutter_px` of the pixel range given the decades the domain covers.
/// The ratio is halved when the decade count exceeds the number of
/// gutter-width slots the range can hold.
fn lower_bound_ratio(decades: f64, range_px: f64, min_gutter_px: f64) -> f64 {
    let available = (range_px - min_gutter_px).max(min_gutter_px);
    let offset_decades = (min_gutter_px * decades / available).max(f64::MIN_POSITIVE);
    let mut ratio = 10f64.powf(-offset_decades);

    let slots = (range_px / min_gutter_px).floor();
    if decades > slots {
        ratio /= 2.0;
    }
    ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: f64 = 500.0;

    #[test]
    fn test_shifted_domain_strictly_positive() {
        let (gutter, domain) =
            LogGutter::compute((0.0, 100.0), 1.0, RANGE, GutterOptions::default());
        assert!(domain.0 > 0.0);
        assert!(domain.1 > domain.0);
        assert!(gutter.epsilon > 0.0);
        assert!(gutter.epsilon < 1.0);
    }

    #[test]
    fn test_negative_lower_bound_translates() {
        let (gutter, domain) =
            LogGutter::compute((-5.0, 100.0), 1.0, RANGE, GutterOptions::default());
        // Translation puts the lower bound exactly at epsilon.
        assert!((domain.0 - gutter.epsilon).abs() < 1e-12);
        assert!((domain.1 - (100.0 + gutter.epsilon + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_positive_lower_bound_pads_outward() {
        let (gutter, domain) =
            LogGutter::compute((2.0, 100.0), 2.0, RANGE, GutterOptions::default());
        assert!(domain.0 < 2.0);
        assert!(domain.0 > 0.0);
        assert!(domain.1 > 100.0);
        assert!((domain.0 - (2.0 - gutter.epsilon)).abs() < 1e-12);
    }

    #[test]
    fn test_gutter_meets_minimum_width() {
        let opts = GutterOptions::default();
        let (gutter, domain) = LogGutter::compute((0.0, 1000.0), 1.0, RANGE, opts);
        let px = gutter.gutter_px(domain, (0.0, RANGE));
        assert!(px >= opts.min_gutter_px - 1.0, "gutter {px}px below minimum");
    }

    #[test]
    fn test_ratio_halves_when_decades_exceed_slots() {
        // 200px range holds 6 slots of 30px; 8 decades exceed that.
        let narrow = lower_bound_ratio(8.0, 200.0, 30.0);
        let base = 10f64.powf(-(30.0 * 8.0 / 170.0));
        assert!((narrow - base / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_positive_min_positive_falls_back() {
        let (gutter, domain) = LogGutter::compute((0.0, 10.0), 0.0, RANGE, GutterOptions::default());
        assert_eq!(gutter.min_positive, 1.0);
        assert!(domain.0 > 0.0);
    }
}
