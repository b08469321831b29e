//! Workbook adapters - `WorkbookSource` implementations.

mod in_memory;

pub use in_memory::{InMemoryWorkbook, SheetUpload};
