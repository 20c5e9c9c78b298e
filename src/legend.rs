//! Legend assembly from discrete color and shape scales.
//!
//! When the color and shape scales were built from the same set of
//! category values, their entries merge into a single list whose glyphs
//! carry both attributes. Otherwise the color entries come first,
//! followed by the shape entries.

use std::collections::HashSet;

use crate::color::{MarkerShape, Rgba};
use crate::data::DataValue;
use crate::scale::DiscreteScale;

/// Which side of the grid the legend is drawn on.
///
/// The chosen side gains the extra legend margin during layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegendPos {
    /// Right of the grid.
    #[default]
    Right,
    /// Left of the grid.
    Left,
}

/// One legend row: a text label and the glyph attributes that identify it.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// The category label.
    pub text: String,
    /// Swatch color, when the entry represents a color category.
    pub color: Option<Rgba>,
    /// Marker shape, when the entry represents a shape category.
    pub shape: Option<MarkerShape>,
}

/// Build legend entries from the discrete color and shape scales.
///
/// Entries follow each scale's domain order. Merging happens only when
/// both domains contain exactly the same values, ignoring order.
#[must_use]
pub fn build_legend(
    color: Option<&DiscreteScale>,
    shape: Option<&DiscreteScale>,
) -> Vec<LegendEntry> {
    match (color, shape) {
        (Some(c), Some(s)) if same_domain(c, s) => c
            .domain()
            .iter()
            .map(|value| LegendEntry {
                text: value.display(),
                color: c.color_of(value),
                shape: s.shape_of(value),
            })
            .collect(),
        _ => {
            let mut entries = Vec::new();
            if let Some(c) = color {
                entries.extend(c.domain().iter().map(|value| LegendEntry {
                    text: value.display(),
                    color: c.color_of(value),
                    shape: None,
                }));
            }
            if let Some(s) = shape {
                entries.extend(s.domain().iter().map(|value| LegendEntry {
                    text: value.display(),
                    color: None,
                    shape: s.shape_of(value),
                }));
            }
            entries
        }
    }
}

/// Set equality of two discrete domains, ignoring order.
fn same_domain(a: &DiscreteScale, b: &DiscreteScale) -> bool {
    if a.domain().len() != b.domain().len() {
        return false;
    }
    let keys: HashSet<String> = a.domain().iter().map(DataValue::display).collect();
    b.domain().iter().all(|value| keys.contains(&value.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataValue;

    fn discrete(values: &[&str]) -> DiscreteScale {
        let domain: Vec<DataValue> =
            values.iter().map(|v| DataValue::Text((*v).to_string())).collect();
        DiscreteScale::color_lookup(domain, None)
    }

    fn discrete_shapes(values: &[&str]) -> DiscreteScale {
        let domain: Vec<DataValue> =
            values.iter().map(|v| DataValue::Text((*v).to_string())).collect();
        DiscreteScale::shape_lookup(domain, None)
    }

    #[test]
    fn test_matching_domains_merge() {
        let color = discrete(&["a", "b", "c"]);
        let shape = discrete_shapes(&["c", "a", "b"]);
        let entries = build_legend(Some(&color), Some(&shape));
        assert_eq!(entries.len(), 3);
        for entry in &entries {
            assert!(entry.color.is_some());
            assert!(entry.shape.is_some());
        }
        // Merged entries follow the color scale's domain order.
        let labels: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_disjoint_domains_stay_separate() {
        let color = discrete(&["a", "b", "c"]);
        let shape = discrete_shapes(&["d", "e"]);
        let entries = build_legend(Some(&color), Some(&shape));
        assert_eq!(entries.len(), 5);
        assert!(entries[..3].iter().all(|e| e.color.is_some() && e.shape.is_none()));
        assert!(entries[3..].iter().all(|e| e.color.is_none() && e.shape.is_some()));
    }

    #[test]
    fn test_same_length_different_values_stay_separate() {
        let color = discrete(&["a", "b"]);
        let shape = discrete_shapes(&["a", "c"]);
        let entries = build_legend(Some(&color), Some(&shape));
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_color_only() {
        let color = discrete(&["x", "y"]);
        let entries = build_legend(Some(&color), None);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.shape.is_none()));
    }

    #[test]
    fn test_no_scales_no_entries() {
        assert!(build_legend(None, None).is_empty());
    }
}
