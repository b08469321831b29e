//! Analysis error taxonomy.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised by weight derivation, matrix extraction, and ranking.
///
/// Per-cell anomalies are not errors; they are recorded in an
/// [`ExtractionReport`](super::ExtractionReport) and the run continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Raw criterion scores summed to zero or less, so no weights exist.
    #[error("Criterion weights are unavailable; run weight analysis first")]
    WeightsUnavailable,

    /// The sheet does not have the expected header offset or column groups.
    #[error("Table does not match the expected layout: {reason}")]
    MalformedTable { reason: String },

    /// A criterion was supplied with a zero-length judgment sequence.
    #[error("Criterion '{criterion}' has no judgments")]
    EmptyJudgments { criterion: String },

    #[error("Sheet '{sheet}' not found")]
    SheetNotFound { sheet: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AnalysisError {
    /// Creates a malformed table error.
    pub fn malformed_table(reason: impl Into<String>) -> Self {
        AnalysisError::MalformedTable {
            reason: reason.into(),
        }
    }

    /// Returns the stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::WeightsUnavailable => ErrorCode::WeightsUnavailable,
            AnalysisError::MalformedTable { .. } => ErrorCode::MalformedTable,
            AnalysisError::EmptyJudgments { .. } => ErrorCode::EmptyJudgments,
            AnalysisError::SheetNotFound { .. } => ErrorCode::SheetNotFound,
            AnalysisError::Validation(err) => DomainError::from(err.clone()).code,
        }
    }
}

impl From<AnalysisError> for DomainError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Validation(inner) => inner.into(),
            AnalysisError::EmptyJudgments { ref criterion } => {
                let criterion = criterion.clone();
                DomainError::new(err.code(), err.to_string()).with_detail("criterion", criterion)
            }
            AnalysisError::SheetNotFound { ref sheet } => {
                let sheet = sheet.clone();
                DomainError::new(err.code(), err.to_string()).with_detail("sheet", sheet)
            }
            other => DomainError::new(other.code(), other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_unavailable_tells_user_to_run_weight_analysis() {
        let err = AnalysisError::WeightsUnavailable;
        assert!(err.to_string().contains("run weight analysis first"));
        assert_eq!(err.code(), ErrorCode::WeightsUnavailable);
    }

    #[test]
    fn malformed_table_carries_reason() {
        let err = AnalysisError::malformed_table("missing header row");
        assert_eq!(
            err.to_string(),
            "Table does not match the expected layout: missing header row"
        );
    }

    #[test]
    fn converts_to_domain_error_with_details() {
        let err: DomainError = AnalysisError::EmptyJudgments {
            criterion: "Noise".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::EmptyJudgments);
        assert_eq!(err.details.get("criterion"), Some(&"Noise".to_string()));

        let err: DomainError = AnalysisError::SheetNotFound {
            sheet: "TABLE".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::SheetNotFound);
        assert_eq!(err.details.get("sheet"), Some(&"TABLE".to_string()));
    }

    #[test]
    fn validation_errors_keep_their_code() {
        let err = AnalysisError::from(ValidationError::empty_field("criteria[0]"));
        assert_eq!(err.code(), ErrorCode::EmptyField);
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::EmptyField);
    }
}
