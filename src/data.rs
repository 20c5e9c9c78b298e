//! Columnar data abstraction consumed by scales and layers.

use std::collections::HashMap;

/// A value in a data frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
    /// A missing value.
    Null,
}

impl DataValue {
    /// Get as f64, or None if not a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice, or None if not text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Render the value for discrete-domain comparison and labeling.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            DataValue::Number(n) => format!("{n}"),
            DataValue::Text(s) => s.clone(),
            DataValue::Null => String::new(),
        }
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Number(v)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::Text(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::Text(s)
    }
}

/// A simple columnar data frame.
///
/// Row order is the insertion order of `push_row`; discrete scale domains
/// are derived from the first appearance of each value during a column
/// scan, so that order is significant.
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    columns: HashMap<String, Vec<DataValue>>,
    len: usize,
}

impl DataFrame {
    /// Create an empty data frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a two-column frame named "x" and "y".
    #[must_use]
    pub fn from_xy(x: &[f64], y: &[f64]) -> Self {
        let mut df = Self::new();
        df.insert_column("x", x.iter().map(|v| DataValue::Number(*v)).collect());
        df.insert_column("y", y.iter().map(|v| DataValue::Number(*v)).collect());
        df
    }

    /// Insert a full column, replacing any existing column of that name.
    pub fn insert_column(&mut self, name: &str, values: Vec<DataValue>) {
        self.len = self.len.max(values.len());
        self.columns.insert(name.to_string(), values);
    }

    /// Append a row of `(column, value)` pairs. Missing columns get `Null`.
    pub fn push_row(&mut self, row: &[(&str, DataValue)]) {
        for (name, value) in row {
            let col = self.columns.entry((*name).to_string()).or_default();
            col.resize(self.len, DataValue::Null);
            col.push(value.clone());
        }
        self.len += 1;
        for col in self.columns.values_mut() {
            col.resize(self.len, DataValue::Null);
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[DataValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Get the value at `(column, row)`.
    #[must_use]
    pub fn value(&self, name: &str, row: usize) -> Option<&DataValue> {
        self.columns.get(name).and_then(|c| c.get(row))
    }

    /// Collect the finite numeric values of a column.
    #[must_use]
    pub fn numbers(&self, name: &str) -> Vec<f64> {
        self.column(name)
            .map(|col| col.iter().filter_map(DataValue::as_f64).filter(|v| v.is_finite()).collect())
            .unwrap_or_default()
    }
}
