//! Cells and the dense/sparse grid conversion.
//!
//! The service stores a grid as a sparse, unordered list of `(row, column,
//! value)` records; locally a grid is a rectangular 2-D array with explicit
//! holes. [`Grid::from_cells`] performs the sparse-to-dense conversion; the
//! reverse direction needs no work because a [`Grid`] is already dense.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One present cell value: a string or a number.
///
/// An explicit JSON `null` on the wire decodes to `None` at the
/// `Option<CellValue>` layer, so this enum never models absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A textual value.
    Text(String),
    /// A numeric value.
    Number(f64),
}

impl CellValue {
    /// The value as a string slice, if textual.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::Number(_) => None,
        }
    }

    /// The value as a float, if numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Text(_) => None,
            Self::Number(n) => Some(*n),
        }
    }

    /// Display form, matching how the service formats values: integral
    /// numbers print without a fractional part.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

/// Wire shape of one cell record, before index validation.
///
/// Indices arrive as signed integers so that a misbehaving service emitting
/// a negative index is caught here instead of wrapping into a huge grid.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawCell {
    row: i64,
    column: i64,
    #[serde(default)]
    value: Option<CellValue>,
    #[serde(default)]
    formatted: Option<String>,
}

/// One `(row, column)` entry of a remote grid.
///
/// Identity is the `(row, column)` pair; within one grid snapshot a given
/// position appears at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Zero-based row index.
    pub row: u32,
    /// Zero-based column index.
    pub column: u32,
    /// Raw value; `None` when the service stored an explicit null.
    pub value: Option<CellValue>,
    /// The service's formatted rendering of the value.
    pub formatted: String,
}

impl Cell {
    /// Construct a local cell; the formatted string is derived from the
    /// value the way the service would render it.
    pub fn new(row: u32, column: u32, value: impl Into<CellValue>) -> Self {
        let value = value.into();
        let formatted = value.render();
        Self {
            row,
            column,
            value: Some(value),
            formatted,
        }
    }

    pub(crate) fn from_raw(raw: RawCell) -> Result<Self> {
        let row = u32::try_from(raw.row).map_err(|_| {
            Error::InconsistentGrid(format!(
                "cell row index {} is out of range",
                raw.row
            ))
        })?;
        let column = u32::try_from(raw.column).map_err(|_| {
            Error::InconsistentGrid(format!(
                "cell column index {} is out of range",
                raw.column
            ))
        })?;
        let formatted = match raw.formatted {
            Some(s) => s,
            None => raw.value.as_ref().map(CellValue::render).unwrap_or_default(),
        };
        Ok(Self {
            row,
            column,
            value: raw.value,
            formatted,
        })
    }
}

/// A dense, rectangular grid of optional cell values.
///
/// Every row has the same length; positions the source cell list did not
/// mention hold `None`. Indexing is zero-based on both axes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: Vec<Vec<Option<CellValue>>>,
}

impl Grid {
    /// An empty grid (zero rows, zero columns).
    pub fn new() -> Self {
        Self::default()
    }

    /// Densify a sparse cell list into a rectangular grid.
    ///
    /// Dimensions are `(max row + 1) x (max column + 1)` over the cell set;
    /// an empty list yields a `0 x 0` grid. The stored values are the cells'
    /// formatted strings. Should the service ever emit duplicate positions,
    /// the last record wins.
    pub fn from_cells(cells: &[Cell]) -> Self {
        let Some(max_row) = cells.iter().map(|c| c.row).max() else {
            return Self::new();
        };
        // Non-empty: max column exists too.
        let max_col = cells.iter().map(|c| c.column).max().unwrap_or(0);

        let mut rows =
            vec![vec![None; max_col as usize + 1]; max_row as usize + 1];
        for cell in cells {
            rows[cell.row as usize][cell.column as usize] =
                Some(CellValue::Text(cell.formatted.clone()));
        }
        Self { rows }
    }

    /// Build a grid from caller-supplied rows, padding short rows with
    /// holes so the result is rectangular.
    pub fn from_rows(mut rows: Vec<Vec<Option<CellValue>>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, None);
        }
        Self { rows }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns. Zero iff the grid has no rows.
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Whether the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The value at `(row, column)`, or `None` for holes and out-of-range
    /// positions.
    pub fn get(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(column)?.as_ref()
    }

    /// Set the value at `(row, column)`, growing the grid as needed while
    /// keeping it rectangular.
    pub fn set(&mut self, row: usize, column: usize, value: Option<CellValue>) {
        let width = self.columns().max(column + 1);
        if width > self.columns() {
            for r in &mut self.rows {
                r.resize(width, None);
            }
        }
        if row >= self.rows.len() {
            self.rows.resize(row + 1, vec![None; width]);
        }
        self.rows[row][column] = value;
    }

    /// Append a row, padding or extending the grid so it stays rectangular.
    pub fn push_row(&mut self, mut row: Vec<Option<CellValue>>) {
        let width = self.columns().max(row.len());
        if width > self.columns() && !self.rows.is_empty() {
            for r in &mut self.rows {
                r.resize(width, None);
            }
        }
        row.resize(width, None);
        self.rows.push(row);
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Option<CellValue>]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
