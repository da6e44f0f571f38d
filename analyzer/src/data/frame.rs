//! Date-indexed price table

use chrono::NaiveDateTime;

/// A named numeric column. Absent cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column header, trimmed
    pub name: String,
    /// One cell per index entry
    pub values: Vec<Option<f64>>,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Present values only, in index order
    pub fn present(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// Check whether every cell is absent
    pub fn is_all_absent(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }
}

/// Table of OHLCV-like columns keyed by a unique, ascending date index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceFrame {
    index: Vec<NaiveDateTime>,
    columns: Vec<Column>,
}

impl PriceFrame {
    /// Create a frame from an index and columns of the same length
    pub fn new(index: Vec<NaiveDateTime>, columns: Vec<Column>) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == index.len()));
        debug_assert!(index.windows(2).all(|w| w[0] < w[1]));
        Self { index, columns }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if frame has no rows
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Date index
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn first_date(&self) -> Option<NaiveDateTime> {
        self.index.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDateTime> {
        self.index.last().copied()
    }

    /// All columns in insertion order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by exact name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Cells of a column by name
    pub fn values(&self, name: &str) -> Option<&[Option<f64>]> {
        self.column(name).map(|c| c.values.as_slice())
    }

    /// Replace an existing column of the same name, or append a new one
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        let column = Column::new(name, values);
        debug_assert_eq!(column.values.len(), self.index.len());
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }
}
