//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Input Ports
//!
//! - `WorkbookSource` - Named sheets of raw cells (spreadsheet, CSV, memory)

mod workbook_source;

pub use workbook_source::{WorkbookError, WorkbookSource};
