//! Margins and the pixel grid rectangle.

/// Plot margins in pixels. Screen coordinates are y-down.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self { top: 75.0, right: 75.0, bottom: 50.0, left: 75.0 }
    }
}

/// Optional per-side margin overrides. A set side always wins over the
/// computed margin for that side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarginOverrides {
    /// Top override.
    pub top: Option<f64>,
    /// Right override.
    pub right: Option<f64>,
    /// Bottom override.
    pub bottom: Option<f64>,
    /// Left override.
    pub left: Option<f64>,
}

impl MarginOverrides {
    /// Apply the overrides onto computed margins.
    #[must_use]
    pub fn resolve(&self, computed: Margins) -> Margins {
        Margins {
            top: self.top.unwrap_or(computed.top),
            right: self.right.unwrap_or(computed.right),
            bottom: self.bottom.unwrap_or(computed.bottom),
            left: self.left.unwrap_or(computed.left),
        }
    }
}

/// The pixel rectangle that geometry is drawn into.
///
/// `top < bottom` numerically because screen coordinates grow downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    /// Left edge in pixels.
    pub left: f64,
    /// Right edge in pixels.
    pub right: f64,
    /// Top edge in pixels.
    pub top: f64,
    /// Bottom edge in pixels.
    pub bottom: f64,
}

impl Grid {
    /// Derive the grid rectangle from plot dimensions and margins.
    #[must_use]
    pub fn from_margins(width: f64, height: f64, margins: Margins) -> Self {
        Self {
            left: margins.left,
            right: (width - margins.right).max(margins.left),
            top: margins.top,
            bottom: (height - margins.bottom).max(margins.top),
        }
    }

    /// Horizontal pixel span.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical pixel span.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_margins() {
        let g = Grid::from_margins(800.0, 600.0, Margins::default());
        assert_eq!(g.left, 75.0);
        assert_eq!(g.right, 725.0);
        assert_eq!(g.top, 75.0);
        assert_eq!(g.bottom, 550.0);
        assert_eq!(g.width(), 650.0);
    }

    #[test]
    fn test_overrides_win() {
        let m = MarginOverrides { right: Some(10.0), ..Default::default() }
            .resolve(Margins { right: 250.0, ..Margins::default() });
        assert_eq!(m.right, 10.0);
        assert_eq!(m.left, 75.0);
    }

    #[test]
    fn test_grid_never_inverts() {
        let g = Grid::from_margins(50.0, 40.0, Margins::default());
        assert!(g.right >= g.left);
        assert!(g.bottom >= g.top);
    }
}
