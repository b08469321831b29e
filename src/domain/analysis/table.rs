//! Rectangular Table - raw grid of cells supplied by a tabular source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One raw spreadsheet cell.
///
/// Serialized untagged: JSON numbers, strings, and `null` map to the three
/// variants directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl Cell {
    /// Returns true for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Trimmed textual form of the cell; empty for blank cells.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => n.to_string(),
        }
    }

    /// Parses the cell as a float.
    ///
    /// Numbers pass through, text is trimmed and parsed, blank cells yield
    /// `None`. A parsed value may be NaN; callers decide what that means.
    pub fn parse_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Empty => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::from(value.as_str())
    }
}

/// Grid of populated rows from one sheet.
///
/// Rows that are entirely blank are dropped on construction, so row offsets
/// count populated rows only. Rows may be ragged; missing trailing cells read
/// as [`Cell::Empty`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct RectangularTable {
    rows: Vec<Vec<Cell>>,
}

impl RectangularTable {
    /// Creates a table, dropping fully blank rows.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        let rows = rows
            .into_iter()
            .filter(|row| !row.iter().all(Cell::is_blank))
            .collect();
        Self { rows }
    }

    /// Creates a table from anything convertible to cells.
    pub fn from_values<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Number of populated rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns true if no populated rows remain.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrows one row.
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Reads a cell; out-of-range positions are empty.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY)
    }
}

impl From<Vec<Vec<Cell>>> for RectangularTable {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Self::new(rows)
    }
}

impl From<RectangularTable> for Vec<Vec<Cell>> {
    fn from(table: RectangularTable) -> Self {
        table.rows
    }
}
