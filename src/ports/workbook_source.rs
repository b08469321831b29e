//! Workbook Source Port - tabular input interface.
//!
//! This port defines the contract for anything that can supply named sheets
//! of raw cells: a parsed spreadsheet upload, a CSV export, or an in-memory
//! table. The analysis only needs sheet names and one grid per sheet.

use thiserror::Error;

use crate::domain::analysis::RectangularTable;

/// Errors raised by a workbook source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkbookError {
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),
}

/// Port for reading sheets from a workbook-like input.
///
/// # Contract
///
/// Implementations must:
/// - Report sheet names with surrounding whitespace trimmed
/// - Look sheets up by their trimmed name
/// - Return each sheet as a [`RectangularTable`] (fully blank rows dropped)
pub trait WorkbookSource: Send + Sync {
    /// Names of all sheets, in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Reads one sheet.
    ///
    /// # Errors
    ///
    /// Returns `WorkbookError::SheetNotFound` if no sheet has that name.
    fn sheet(&self, name: &str) -> Result<RectangularTable, WorkbookError>;

    /// Returns true if a sheet with this name exists.
    fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|s| s == name)
    }
}
