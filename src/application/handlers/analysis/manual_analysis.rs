//! ManualAnalysisHandler - Analysis of a hand-entered decision form.
//!
//! The form supplies criteria, alternatives with one judgment per criterion,
//! and a weighting: either importance judgments per criterion (WENSLO) or
//! legacy direct coefficients. Both weightings feed the same ranker that
//! batch analysis uses.

use std::collections::{BTreeMap, HashSet};

use tracing::info;

use crate::config::AnalysisConfig;
use crate::domain::analysis::{
    AnalysisError, ArlonRanker, JudgmentMatrix, RankedScores, WeightVector, WensloWeightDeriver,
};
use crate::domain::foundation::{AnalysisId, Timestamp, ValidationError};
use crate::domain::fuzzy::PictureFuzzyValue;

/// How the form weighs its criteria.
#[derive(Debug, Clone, PartialEq)]
pub enum ManualWeighting {
    /// Importance judgments per criterion name, weighed with WENSLO.
    Judgments(BTreeMap<String, Vec<PictureFuzzyValue>>),
    /// One non-negative coefficient per criterion, in criterion order.
    Direct(Vec<f64>),
}

/// One alternative row of the form.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualAlternative {
    pub name: String,
    /// One judgment per criterion, in criterion order.
    pub values: Vec<PictureFuzzyValue>,
}

/// Query to analyze a manual form.
#[derive(Debug, Clone)]
pub struct ManualAnalysisCommand {
    pub criteria: Vec<String>,
    pub alternatives: Vec<ManualAlternative>,
    pub weighting: ManualWeighting,
}

/// Result of a manual analysis.
#[derive(Debug, Clone)]
pub struct ManualAnalysisResult {
    pub analysis_id: AnalysisId,
    pub computed_at: Timestamp,
    pub matrix: JudgmentMatrix,
    pub weights: WeightVector,
    pub ranking: RankedScores,
}

/// Handler for manual-mode analysis.
#[derive(Debug, Clone)]
pub struct ManualAnalysisHandler {
    config: AnalysisConfig,
}

impl ManualAnalysisHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(&self, cmd: ManualAnalysisCommand) -> Result<ManualAnalysisResult, AnalysisError> {
        let criteria = names("criteria", &cmd.criteria, self.config.max_criteria)?;
        let alternative_names: Vec<String> =
            cmd.alternatives.iter().map(|a| a.name.clone()).collect();
        let alternative_names =
            names("alternatives", &alternative_names, self.config.max_alternatives)?;

        let mut builder = JudgmentMatrix::builder();
        for (name, alternative) in alternative_names.iter().zip(&cmd.alternatives) {
            if alternative.values.len() != criteria.len() {
                return Err(ValidationError::count_mismatch(
                    format!("alternatives.{}.values", name),
                    criteria.len(),
                    alternative.values.len(),
                )
                .into());
            }
            builder.begin_alternative(name.clone());
            for (criterion, value) in criteria.iter().zip(&alternative.values) {
                builder.insert(name.clone(), criterion.clone(), *value);
            }
        }
        let matrix = builder.build();

        let weights = match &cmd.weighting {
            ManualWeighting::Judgments(importance) => {
                let importance = matched_importance(&criteria, importance)?;
                WensloWeightDeriver::derive(importance)?
            }
            ManualWeighting::Direct(coefficients) => {
                if coefficients.len() != criteria.len() {
                    return Err(ValidationError::count_mismatch(
                        "coefficients",
                        criteria.len(),
                        coefficients.len(),
                    )
                    .into());
                }
                if let Some(bad) = coefficients.iter().find(|c| !c.is_finite() || **c < 0.0) {
                    return Err(
                        ValidationError::out_of_range("coefficients", 0.0, f64::MAX, *bad).into(),
                    );
                }
                WensloWeightDeriver::normalize(
                    criteria.iter().cloned().zip(coefficients.iter().copied()),
                )
            }
        };

        let ranking = ArlonRanker::rank(&matrix, weights.require_available()?);
        let analysis_id = AnalysisId::new();

        info!(
            analysis_id = %analysis_id,
            alternatives = matrix.alternative_count(),
            criteria = criteria.len(),
            direct = matches!(cmd.weighting, ManualWeighting::Direct(_)),
            "Manual analysis completed"
        );

        Ok(ManualAnalysisResult {
            analysis_id,
            computed_at: Timestamp::now(),
            matrix,
            weights,
            ranking,
        })
    }
}

/// Trims form names and checks them for blanks, duplicates, and the form limit.
fn names(field: &str, raw: &[String], max: usize) -> Result<Vec<String>, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if raw.len() > max {
        return Err(ValidationError::out_of_range(
            field,
            1.0,
            max as f64,
            raw.len() as f64,
        ));
    }

    let mut seen = HashSet::new();
    let mut trimmed = Vec::with_capacity(raw.len());
    for (index, name) in raw.iter().enumerate() {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field(format!("{}[{}]", field, index)));
        }
        if !seen.insert(name) {
            return Err(ValidationError::duplicate_name(field, name));
        }
        trimmed.push(name.to_string());
    }
    Ok(trimmed)
}

/// Pairs importance judgments with the form's criteria by name.
fn matched_importance<'a>(
    criteria: &'a [String],
    importance: &'a BTreeMap<String, Vec<PictureFuzzyValue>>,
) -> Result<Vec<(&'a str, &'a [PictureFuzzyValue])>, ValidationError> {
    let by_name: BTreeMap<&str, &[PictureFuzzyValue]> = importance
        .iter()
        .map(|(name, judgments)| (name.trim(), judgments.as_slice()))
        .collect();

    if let Some(unknown) = by_name.keys().find(|k| !criteria.iter().any(|c| c == **k)) {
        return Err(ValidationError::invalid_format(
            format!("importance.{}", unknown),
            "not one of the form's criteria",
        ));
    }

    criteria
        .iter()
        .map(|criterion| {
            by_name
                .get(criterion.as_str())
                .map(|judgments| (criterion.as_str(), *judgments))
                .ok_or_else(|| ValidationError::empty_field(format!("importance.{}", criterion)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pf(positive: f64, negative: f64, neutral: f64) -> PictureFuzzyValue {
        PictureFuzzyValue::new(positive, negative, neutral)
    }

    fn alternatives() -> Vec<ManualAlternative> {
        vec![
            ManualAlternative {
                name: "Supplier A".to_string(),
                values: vec![pf(0.5, 0.3, 0.2), pf(0.9, 0.05, 0.05)],
            },
            ManualAlternative {
                name: "Supplier B".to_string(),
                values: vec![pf(0.9, 0.05, 0.05), pf(0.5, 0.3, 0.2)],
            },
        ]
    }

    fn command(weighting: ManualWeighting) -> ManualAnalysisCommand {
        ManualAnalysisCommand {
            criteria: vec!["Cost".to_string(), "Quality".to_string()],
            alternatives: alternatives(),
            weighting,
        }
    }

    fn handler() -> ManualAnalysisHandler {
        ManualAnalysisHandler::new(AnalysisConfig::default())
    }

    #[test]
    fn direct_coefficients_are_normalized_and_ranked() {
        let result = handler()
            .handle(command(ManualWeighting::Direct(vec![1.0, 3.0])))
            .unwrap();

        assert!((result.weights.get("Cost") - 0.25).abs() < 1e-9);
        assert!((result.weights.get("Quality") - 0.75).abs() < 1e-9);
        let pairs = result.ranking.to_pairs();
        assert_eq!(pairs[0].0, "Supplier A");
        assert!((pairs[0].1 - (0.3 * 0.25 + 0.85 * 0.75)).abs() < 1e-9);
    }

    #[test]
    fn importance_judgments_are_matched_by_name() {
        // Supplied in reverse order; matching must not depend on position.
        let mut importance = BTreeMap::new();
        importance.insert("Quality".to_string(), vec![pf(0.9, 0.05, 0.05)]);
        importance.insert("Cost".to_string(), vec![pf(0.5, 0.3, 0.2)]);

        let result = handler()
            .handle(command(ManualWeighting::Judgments(importance)))
            .unwrap();

        // Cost 0.3, Quality 0.85
        assert!((result.weights.get("Cost") - 0.3 / 1.15).abs() < 1e-9);
        assert!((result.weights.get("Quality") - 0.85 / 1.15).abs() < 1e-9);
        assert_eq!(result.ranking.best().unwrap().alternative, "Supplier A");
    }

    #[test]
    fn both_weightings_share_the_ranker() {
        // Importance scores 0.3 and 0.85 normalize like coefficients 0.3 and 0.85.
        let mut importance = BTreeMap::new();
        importance.insert("Cost".to_string(), vec![pf(0.5, 0.3, 0.2)]);
        importance.insert("Quality".to_string(), vec![pf(0.9, 0.05, 0.05)]);

        let judged = handler()
            .handle(command(ManualWeighting::Judgments(importance)))
            .unwrap();
        let direct = handler()
            .handle(command(ManualWeighting::Direct(vec![0.3, 0.85])))
            .unwrap();

        for (a, b) in judged.ranking.iter().zip(direct.ranking.iter()) {
            assert_eq!(a.alternative, b.alternative);
            assert!((a.score - b.score).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_coefficients_mean_unavailable_weights() {
        let err = handler()
            .handle(command(ManualWeighting::Direct(vec![0.0, 0.0])))
            .unwrap_err();
        assert_eq!(err, AnalysisError::WeightsUnavailable);
    }

    #[test]
    fn negative_coefficient_is_rejected() {
        let err = handler()
            .handle(command(ManualWeighting::Direct(vec![1.0, -0.5])))
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn coefficient_count_must_match_criteria() {
        let err = handler()
            .handle(command(ManualWeighting::Direct(vec![1.0])))
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Validation(ValidationError::count_mismatch("coefficients", 2, 1))
        );
    }

    #[test]
    fn value_count_must_match_criteria() {
        let mut cmd = command(ManualWeighting::Direct(vec![1.0, 1.0]));
        cmd.alternatives[1].values.pop();

        let err = handler().handle(cmd).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Validation(ValidationError::count_mismatch(
                "alternatives.Supplier B.values",
                2,
                1
            ))
        );
    }

    #[test]
    fn blank_and_duplicate_names_are_rejected() {
        let mut cmd = command(ManualWeighting::Direct(vec![1.0, 1.0]));
        cmd.criteria[1] = "  ".to_string();
        let err = handler().handle(cmd).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Validation(ValidationError::empty_field("criteria[1]"))
        );

        let mut cmd = command(ManualWeighting::Direct(vec![1.0, 1.0]));
        cmd.alternatives[1].name = " Supplier A ".to_string();
        let err = handler().handle(cmd).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Validation(ValidationError::duplicate_name("alternatives", "Supplier A"))
        );
    }

    #[test]
    fn form_limits_are_enforced() {
        let handler = ManualAnalysisHandler::new(AnalysisConfig {
            max_alternatives: 1,
            ..Default::default()
        });
        let err = handler
            .handle(command(ManualWeighting::Direct(vec![1.0, 1.0])))
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "alternatives"
        ));
    }

    #[test]
    fn unknown_and_missing_importance_criteria_are_rejected() {
        let mut importance = BTreeMap::new();
        importance.insert("Cost".to_string(), vec![pf(0.5, 0.3, 0.2)]);
        importance.insert("Speed".to_string(), vec![pf(0.5, 0.3, 0.2)]);
        let err = handler()
            .handle(command(ManualWeighting::Judgments(importance)))
            .unwrap_err();
        assert_eq!(err.code(), crate::domain::foundation::ErrorCode::InvalidFormat);

        let mut importance = BTreeMap::new();
        importance.insert("Cost".to_string(), vec![pf(0.5, 0.3, 0.2)]);
        let err = handler()
            .handle(command(ManualWeighting::Judgments(importance)))
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::Validation(ValidationError::empty_field("importance.Quality"))
        );
    }

    #[test]
    fn empty_importance_sequence_is_an_error() {
        let mut importance = BTreeMap::new();
        importance.insert("Cost".to_string(), vec![pf(0.5, 0.3, 0.2)]);
        importance.insert("Quality".to_string(), vec![]);
        let err = handler()
            .handle(command(ManualWeighting::Judgments(importance)))
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::EmptyJudgments {
                criterion: "Quality".to_string()
            }
        );
    }
}
