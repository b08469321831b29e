//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `workbook` - `WorkbookSource` implementations (in-memory JSON uploads)
//! - `http` - axum REST API over the analysis handlers

pub mod http;
pub mod workbook;

pub use http::{app_router, AnalysisHandlers};
pub use workbook::{InMemoryWorkbook, SheetUpload};
