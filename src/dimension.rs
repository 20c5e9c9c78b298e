//! The fixed set of plot dimensions an aesthetic can map onto.

use crate::scale::ScaleType;

/// A plot dimension. Determines the default scale type and default pixel
/// range of the scale bound to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    /// Primary (bottom) x axis.
    X,
    /// Secondary (top) x axis.
    XTop,
    /// Sub-grouping x axis nested under the primary x axis.
    XSub,
    /// Primary (left) y axis.
    YLeft,
    /// Secondary (right) y axis.
    YRight,
    /// Color aesthetic.
    Color,
    /// Marker shape aesthetic.
    Shape,
    /// Marker size aesthetic.
    Size,
}

impl Dimension {
    /// All dimensions, in scale-resolution order.
    pub const ALL: [Dimension; 8] = [
        Dimension::X,
        Dimension::XTop,
        Dimension::XSub,
        Dimension::YLeft,
        Dimension::YRight,
        Dimension::Color,
        Dimension::Shape,
        Dimension::Size,
    ];

    /// Whether this dimension positions marks on the grid.
    #[must_use]
    pub fn is_positional(self) -> bool {
        self.is_x() || self.is_y()
    }

    /// Whether this is an x-family dimension.
    #[must_use]
    pub fn is_x(self) -> bool {
        matches!(self, Dimension::X | Dimension::XTop | Dimension::XSub)
    }

    /// Whether this is a y-family dimension.
    #[must_use]
    pub fn is_y(self) -> bool {
        matches!(self, Dimension::YLeft | Dimension::YRight)
    }

    /// Default scale type when the caller supplies none: positional and
    /// size dimensions are continuous, color and shape are discrete.
    #[must_use]
    pub fn default_scale_type(self) -> ScaleType {
        match self {
            Dimension::Color | Dimension::Shape => ScaleType::Discrete,
            _ => ScaleType::Continuous,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dimension::X => "x",
            Dimension::XTop => "xTop",
            Dimension::XSub => "xSub",
            Dimension::YLeft => "yLeft",
            Dimension::YRight => "yRight",
            Dimension::Color => "color",
            Dimension::Shape => "shape",
            Dimension::Size => "size",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_classification() {
        assert!(Dimension::X.is_positional());
        assert!(Dimension::XSub.is_positional());
        assert!(Dimension::YRight.is_positional());
        assert!(!Dimension::Color.is_positional());
        assert!(!Dimension::Size.is_positional());
    }

    #[test]
    fn test_default_scale_types() {
        assert_eq!(Dimension::X.default_scale_type(), ScaleType::Continuous);
        assert_eq!(Dimension::Size.default_scale_type(), ScaleType::Continuous);
        assert_eq!(Dimension::Color.default_scale_type(), ScaleType::Discrete);
        assert_eq!(Dimension::Shape.default_scale_type(), ScaleType::Discrete);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Dimension::YLeft.to_string(), "yLeft");
        assert_eq!(Dimension::XTop.to_string(), "xTop");
    }
}
