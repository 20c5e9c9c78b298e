//! Aesthetic mappings from data columns to plot dimensions.

use crate::data::{DataFrame, DataValue};
use crate::dimension::Dimension;

/// Aesthetic mapping specification.
///
/// Maps data columns to plot dimensions. The y dimensions may carry an
/// additional error column, used only when deriving their continuous
/// domains so error bars are never clipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aes {
    /// Bottom x axis mapping (column name).
    pub x: Option<String>,
    /// Top x axis mapping.
    pub x_top: Option<String>,
    /// Sub-grouping x axis mapping.
    pub x_sub: Option<String>,
    /// Left y axis mapping.
    pub y_left: Option<String>,
    /// Right y axis mapping.
    pub y_right: Option<String>,
    /// Color mapping.
    pub color: Option<String>,
    /// Shape mapping.
    pub shape: Option<String>,
    /// Size mapping.
    pub size: Option<String>,
    /// Error column paired with the left y mapping.
    pub y_left_error: Option<String>,
    /// Error column paired with the right y mapping.
    pub y_right_error: Option<String>,
}

impl Aes {
    /// Create an empty aesthetic mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map the bottom x axis to a column.
    #[must_use]
    pub fn x(mut self, column: &str) -> Self {
        self.x = Some(column.to_string());
        self
    }

    /// Map the top x axis to a column.
    #[must_use]
    pub fn x_top(mut self, column: &str) -> Self {
        self.x_top = Some(column.to_string());
        self
    }

    /// Map the sub-grouping x axis to a column.
    #[must_use]
    pub fn x_sub(mut self, column: &str) -> Self {
        self.x_sub = Some(column.to_string());
        self
    }

    /// Map the left y axis to a column.
    #[must_use]
    pub fn y_left(mut self, column: &str) -> Self {
        self.y_left = Some(column.to_string());
        self
    }

    /// Map the right y axis to a column.
    #[must_use]
    pub fn y_right(mut self, column: &str) -> Self {
        self.y_right = Some(column.to_string());
        self
    }

    /// Map color to a column.
    #[must_use]
    pub fn color(mut self, column: &str) -> Self {
        self.color = Some(column.to_string());
        self
    }

    /// Map marker shape to a column.
    #[must_use]
    pub fn shape(mut self, column: &str) -> Self {
        self.shape = Some(column.to_string());
        self
    }

    /// Map marker size to a column.
    #[must_use]
    pub fn size(mut self, column: &str) -> Self {
        self.size = Some(column.to_string());
        self
    }

    /// Pair an error column with the left y mapping.
    #[must_use]
    pub fn y_left_error(mut self, column: &str) -> Self {
        self.y_left_error = Some(column.to_string());
        self
    }

    /// Pair an error column with the right y mapping.
    #[must_use]
    pub fn y_right_error(mut self, column: &str) -> Self {
        self.y_right_error = Some(column.to_string());
        self
    }

    /// Column mapped to `dimension`, if any.
    #[must_use]
    pub fn column(&self, dimension: Dimension) -> Option<&str> {
        let col = match dimension {
            Dimension::X => &self.x,
            Dimension::XTop => &self.x_top,
            Dimension::XSub => &self.x_sub,
            Dimension::YLeft => &self.y_left,
            Dimension::YRight => &self.y_right,
            Dimension::Color => &self.color,
            Dimension::Shape => &self.shape,
            Dimension::Size => &self.size,
        };
        col.as_deref()
    }

    /// Error column paired with a y dimension, if any.
    #[must_use]
    pub fn error_column(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::YLeft => self.y_left_error.as_deref(),
            Dimension::YRight => self.y_right_error.as_deref(),
            _ => None,
        }
    }

    /// Resolve the value mapped to `dimension` for a data row.
    #[must_use]
    pub fn value<'a>(
        &self,
        dimension: Dimension,
        data: &'a DataFrame,
        row: usize,
    ) -> Option<&'a DataValue> {
        self.column(dimension).and_then(|col| data.value(col, row))
    }

    /// Merge another mapping over this one, with `other` taking precedence.
    #[must_use]
    pub fn merge(&self, other: &Aes) -> Aes {
        Aes {
            x: other.x.clone().or_else(|| self.x.clone()),
            x_top: other.x_top.clone().or_else(|| self.x_top.clone()),
            x_sub: other.x_sub.clone().or_else(|| self.x_sub.clone()),
            y_left: other.y_left.clone().or_else(|| self.y_left.clone()),
            y_right: other.y_right.clone().or_else(|| self.y_right.clone()),
            color: other.color.clone().or_else(|| self.color.clone()),
            shape: other.shape.clone().or_else(|| self.shape.clone()),
            size: other.size.clone().or_else(|| self.size.clone()),
            y_left_error: other.y_left_error.clone().or_else(|| self.y_left_error.clone()),
            y_right_error: other.y_right_error.clone().or_else(|| self.y_right_error.clone()),
        }
    }

    /// Apply the non-empty fields of `partial` onto this mapping in place.
    pub fn apply(&mut self, partial: &Aes) {
        *self = self.merge(partial);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes_builder() {
        let aes = Aes::new().x("time").y_left("value").color("series");
        assert_eq!(aes.column(Dimension::X), Some("time"));
        assert_eq!(aes.column(Dimension::YLeft), Some("value"));
        assert_eq!(aes.column(Dimension::Color), Some("series"));
        assert_eq!(aes.column(Dimension::YRight), None);
    }

    #[test]
    fn test_aes_merge_precedence() {
        let base = Aes::new().x("x").y_left("y");
        let layer = Aes::new().y_left("y2").shape("kind");
        let merged = base.merge(&layer);
        assert_eq!(merged.column(Dimension::X), Some("x"));
        assert_eq!(merged.column(Dimension::YLeft), Some("y2"));
        assert_eq!(merged.column(Dimension::Shape), Some("kind"));
    }

    #[test]
    fn test_error_column_only_for_y() {
        let aes = Aes::new().y_left("v").y_left_error("v_err");
        assert_eq!(aes.error_column(Dimension::YLeft), Some("v_err"));
        assert_eq!(aes.error_column(Dimension::X), None);
    }

    #[test]
    fn test_value_resolution() {
        let df = DataFrame::from_xy(&[1.0, 2.0], &[5.0, 6.0]);
        let aes = Aes::new().x("x").y_left("y");
        assert_eq!(aes.value(Dimension::YLeft, &df, 1).and_then(DataValue::as_f64), Some(6.0));
        assert!(aes.value(Dimension::Color, &df, 0).is_none());
    }

    #[test]
    fn test_apply_partial() {
        let mut aes = Aes::new().x("x").y_left("y");
        aes.apply(&Aes::new().y_left("z"));
        assert_eq!(aes.column(Dimension::YLeft), Some("z"));
        assert_eq!(aes.column(Dimension::X), Some("x"));
    }
}
