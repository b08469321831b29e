//! In-memory workbook adapter.
//!
//! Holds already-parsed sheets, typically decoded from a JSON upload of the
//! form `[{"name": "TABLE", "rows": [[...], ...]}, ...]`. One instance is
//! built per request and dropped afterwards.
//!
//! By default `rows` holds the sheet's data rows only, so the title row is
//! populated row 0 and the criterion header is populated row 2. A verbatim
//! export that still carries the spreadsheet's column-header row sets
//! `header_row: true` and that first populated row is discarded.

use serde::Deserialize;

use crate::domain::analysis::{Cell, RectangularTable};
use crate::ports::{WorkbookError, WorkbookSource};

/// One sheet as uploaded.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetUpload {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
    /// `rows` starts with the sheet's column-header row.
    #[serde(default)]
    pub header_row: bool,
}

impl SheetUpload {
    fn into_table(self) -> RectangularTable {
        let mut rows = self.rows;
        if self.header_row {
            if let Some(first) = rows.iter().position(|row| !row.iter().all(Cell::is_blank)) {
                rows.remove(first);
            }
        }
        RectangularTable::new(rows)
    }
}

/// Workbook backed by tables held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    sheets: Vec<(String, RectangularTable)>,
}

impl InMemoryWorkbook {
    /// Creates a workbook from named tables.
    ///
    /// Names are trimmed. A later sheet whose trimmed name repeats an earlier
    /// one replaces its table but keeps the earlier position.
    pub fn new<I, S>(sheets: I) -> Self
    where
        I: IntoIterator<Item = (S, RectangularTable)>,
        S: AsRef<str>,
    {
        let mut workbook = Self::default();
        for (name, table) in sheets {
            workbook.insert(name.as_ref().trim().to_string(), table);
        }
        workbook
    }

    /// Creates a workbook from uploaded sheets.
    pub fn from_uploads(uploads: Vec<SheetUpload>) -> Self {
        Self::new(
            uploads
                .into_iter()
                .map(|upload| (upload.name.clone(), upload.into_table())),
        )
    }

    fn insert(&mut self, name: String, table: RectangularTable) {
        match self.sheets.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = table,
            None => self.sheets.push((name, table)),
        }
    }
}

impl WorkbookSource for InMemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn sheet(&self, name: &str) -> Result<RectangularTable, WorkbookError> {
        self.sheets
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, table)| table.clone())
            .ok_or_else(|| WorkbookError::SheetNotFound(name.to_string()))
    }
}
