//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, and error types that form the
//! vocabulary of the analysis domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::AnalysisId;
pub use timestamp::Timestamp;
