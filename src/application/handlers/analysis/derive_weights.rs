//! DeriveWeightsHandler - Query handler for WENSLO criterion weights.

use std::collections::BTreeMap;

use tracing::info;

use crate::domain::analysis::{AnalysisError, WeightVector, WensloWeightDeriver};
use crate::domain::foundation::{AnalysisId, Timestamp, ValidationError};
use crate::domain::fuzzy::PictureFuzzyValue;

/// Query to derive weights from per-criterion judgments.
///
/// Repeated criterion names are pooled.
#[derive(Debug, Clone, Default)]
pub struct DeriveWeightsCommand {
    pub criterion_judgments: Vec<(String, Vec<PictureFuzzyValue>)>,
}

/// Result of weight derivation.
///
/// `weights` is empty when the raw scores do not sum to a positive total.
/// That is a valid outcome, not an error; ranking with it is refused later.
#[derive(Debug, Clone)]
pub struct DeriveWeightsResult {
    pub analysis_id: AnalysisId,
    pub computed_at: Timestamp,
    /// Mean score per criterion before normalization.
    pub raw_scores: BTreeMap<String, f64>,
    pub weights: WeightVector,
}

impl DeriveWeightsResult {
    /// Returns true if weights can be used for ranking.
    pub fn is_available(&self) -> bool {
        self.weights.is_available()
    }
}

/// Handler for deriving criterion weights.
#[derive(Debug, Clone, Default)]
pub struct DeriveWeightsHandler;

impl DeriveWeightsHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, cmd: DeriveWeightsCommand) -> Result<DeriveWeightsResult, AnalysisError> {
        if cmd
            .criterion_judgments
            .iter()
            .any(|(criterion, _)| criterion.trim().is_empty())
        {
            return Err(ValidationError::empty_field("criteria").into());
        }

        let analysis_id = AnalysisId::new();
        let raw_scores = WensloWeightDeriver::criterion_scores(
            cmd.criterion_judgments
                .iter()
                .map(|(criterion, judgments)| (criterion.trim(), judgments)),
        )?;
        let weights = WensloWeightDeriver::normalize(
            raw_scores.iter().map(|(c, s)| (c.clone(), *s)),
        );

        info!(
            analysis_id = %analysis_id,
            criteria = raw_scores.len(),
            available = weights.is_available(),
            "Derived criterion weights"
        );

        Ok(DeriveWeightsResult {
            analysis_id,
            computed_at: Timestamp::now(),
            raw_scores,
            weights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pf(positive: f64, negative: f64, neutral: f64) -> PictureFuzzyValue {
        PictureFuzzyValue::new(positive, negative, neutral)
    }

    #[test]
    fn derives_normalized_weights_with_raw_scores() {
        let handler = DeriveWeightsHandler::new();
        let result = handler
            .handle(DeriveWeightsCommand {
                criterion_judgments: vec![
                    ("Cost".to_string(), vec![pf(0.9, 0.05, 0.05), pf(0.5, 0.3, 0.2)]),
                    ("Quality".to_string(), vec![pf(0.5, 0.3, 0.2)]),
                ],
            })
            .unwrap();

        // Cost: (0.85 + 0.3) / 2
        assert!(result.is_available());
        assert!((result.raw_scores["Cost"] - 0.575).abs() < 1e-9);
        assert!((result.raw_scores["Quality"] - 0.3).abs() < 1e-9);
        assert!((result.weights.get("Cost") - 0.575 / 0.875).abs() < 1e-9);
        assert!((result.weights.get("Quality") - 0.3 / 0.875).abs() < 1e-9);
        assert!((result.weights.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn criterion_names_are_trimmed_and_pooled() {
        let handler = DeriveWeightsHandler::new();
        let result = handler
            .handle(DeriveWeightsCommand {
                criterion_judgments: vec![
                    ("Cost ".to_string(), vec![pf(0.9, 0.05, 0.05)]),
                    (" Cost".to_string(), vec![pf(0.5, 0.3, 0.2)]),
                ],
            })
            .unwrap();

        assert_eq!(result.raw_scores.len(), 1);
        assert!((result.raw_scores["Cost"] - 0.575).abs() < 1e-9);
        assert!((result.weights.get("Cost") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_total_yields_unavailable_weights() {
        let handler = DeriveWeightsHandler::new();
        let result = handler
            .handle(DeriveWeightsCommand {
                criterion_judgments: vec![("Cost".to_string(), vec![pf(0.2, 0.2, 0.6)])],
            })
            .unwrap();

        assert!(!result.is_available());
        assert!((result.raw_scores["Cost"] + 0.4).abs() < 1e-9);
    }

    #[test]
    fn empty_judgment_sequence_is_an_error() {
        let handler = DeriveWeightsHandler::new();
        let err = handler
            .handle(DeriveWeightsCommand {
                criterion_judgments: vec![("Cost".to_string(), vec![])],
            })
            .unwrap_err();

        assert_eq!(
            err,
            AnalysisError::EmptyJudgments {
                criterion: "Cost".to_string()
            }
        );
    }

    #[test]
    fn blank_criterion_name_is_rejected() {
        let handler = DeriveWeightsHandler::new();
        let err = handler
            .handle(DeriveWeightsCommand {
                criterion_judgments: vec![
                    ("Cost".to_string(), vec![pf(0.9, 0.05, 0.05)]),
                    ("  ".to_string(), vec![pf(0.5, 0.3, 0.2)]),
                ],
            })
            .unwrap_err();

        assert_eq!(
            err,
            AnalysisError::Validation(ValidationError::empty_field("criteria"))
        );
    }

    #[test]
    fn each_run_gets_a_fresh_id() {
        let handler = DeriveWeightsHandler::new();
        let first = handler.handle(DeriveWeightsCommand::default()).unwrap();
        let second = handler.handle(DeriveWeightsCommand::default()).unwrap();
        assert_ne!(first.analysis_id, second.analysis_id);
        assert!(!first.is_available());
    }
}
