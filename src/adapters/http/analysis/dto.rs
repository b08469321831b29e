//! Request and response DTOs for analysis endpoints.
//!
//! Picture-fuzzy values travel as `[μ, ν, π]` arrays.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::adapters::workbook::SheetUpload;
use crate::application::handlers::analysis::{
    AnalyzeWorkbookResult, DeriveWeightsResult, ManualAlternative, ManualAnalysisCommand,
    ManualAnalysisResult, ManualWeighting, RankAlternativesResult,
};
use crate::domain::analysis::{
    CriterionContribution, ExtractionReport, JudgmentMatrix, RankedAlternative, RankedScores,
    TableEncoding, WeightVector,
};
use crate::domain::foundation::{DomainError, ValidationError};
use crate::domain::fuzzy::PictureFuzzyValue;

/// `[μ, ν, π]` as it appears on the wire.
pub type Triple = (f64, f64, f64);

fn to_values(triples: Vec<Triple>) -> Vec<PictureFuzzyValue> {
    triples.into_iter().map(PictureFuzzyValue::from).collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Request to derive criterion weights.
#[derive(Debug, Clone, Deserialize)]
pub struct DeriveWeightsRequest {
    /// Criterion name → importance judgments.
    pub criteria: BTreeMap<String, Vec<Triple>>,
}

impl DeriveWeightsRequest {
    pub fn into_criterion_judgments(self) -> Vec<(String, Vec<PictureFuzzyValue>)> {
        self.criteria
            .into_iter()
            .map(|(criterion, triples)| (criterion, to_values(triples)))
            .collect()
    }
}

/// One alternative row of a ranking request.
#[derive(Debug, Clone, Deserialize)]
pub struct AlternativeInput {
    pub name: String,
    /// Criterion name → judgment.
    #[serde(default)]
    pub judgments: BTreeMap<String, Triple>,
}

/// Request to rank alternatives with weights from an earlier derivation.
#[derive(Debug, Clone, Deserialize)]
pub struct RankRequest {
    pub alternatives: Vec<AlternativeInput>,
    pub weights: BTreeMap<String, f64>,
}

impl RankRequest {
    /// Splits the request into a matrix and a weight vector.
    pub fn into_parts(self) -> Result<(JudgmentMatrix, WeightVector), ValidationError> {
        let weights = WeightVector::try_from_weights(self.weights)?;

        let mut builder = JudgmentMatrix::builder();
        for (index, alternative) in self.alternatives.into_iter().enumerate() {
            let name = alternative.name.trim().to_string();
            if name.is_empty() {
                return Err(ValidationError::empty_field(format!(
                    "alternatives[{}].name",
                    index
                )));
            }
            builder.begin_alternative(name.clone());
            for (criterion, triple) in alternative.judgments {
                builder.insert(name.clone(), criterion.trim(), triple.into());
            }
        }

        Ok((builder.build(), weights))
    }
}

/// Request to analyze an uploaded workbook.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkbookRequest {
    pub sheets: Vec<SheetUpload>,
    /// Sheet to analyze; defaults to the configured decision sheet.
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub encoding: TableEncoding,
}

/// Request to list the sheets of an uploaded workbook.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkbookOverviewRequest {
    pub sheets: Vec<SheetUpload>,
}

/// One alternative row of the manual form.
#[derive(Debug, Clone, Deserialize)]
pub struct ManualAlternativeInput {
    pub name: String,
    /// One judgment per criterion, in criterion order.
    pub values: Vec<Triple>,
}

/// Manual form submission.
///
/// Exactly one of `importance` and `coefficients` must be present.
#[derive(Debug, Clone, Deserialize)]
pub struct ManualAnalysisRequest {
    pub criteria: Vec<String>,
    pub alternatives: Vec<ManualAlternativeInput>,
    /// Criterion name → importance judgments (WENSLO weighting).
    #[serde(default)]
    pub importance: Option<BTreeMap<String, Vec<Triple>>>,
    /// Direct coefficients in criterion order (legacy weighting).
    #[serde(default)]
    pub coefficients: Option<Vec<f64>>,
}

impl ManualAnalysisRequest {
    pub fn into_command(self) -> Result<ManualAnalysisCommand, ValidationError> {
        let weighting = match (self.importance, self.coefficients) {
            (Some(importance), None) => ManualWeighting::Judgments(
                importance
                    .into_iter()
                    .map(|(criterion, triples)| (criterion, to_values(triples)))
                    .collect(),
            ),
            (None, Some(coefficients)) => ManualWeighting::Direct(coefficients),
            (Some(_), Some(_)) => {
                return Err(ValidationError::invalid_format(
                    "weighting",
                    "supply either importance judgments or coefficients, not both",
                ))
            }
            (None, None) => return Err(ValidationError::empty_field("weighting")),
        };

        Ok(ManualAnalysisCommand {
            criteria: self.criteria,
            alternatives: self
                .alternatives
                .into_iter()
                .map(|a| ManualAlternative {
                    name: a.name,
                    values: to_values(a.values),
                })
                .collect(),
            weighting,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// Derived weights.
#[derive(Debug, Clone, Serialize)]
pub struct WeightsResponse {
    pub analysis_id: String,
    pub computed_at: String,
    /// False when the raw scores did not sum to a positive total.
    pub available: bool,
    pub raw_scores: BTreeMap<String, f64>,
    pub weights: WeightVector,
}

impl From<DeriveWeightsResult> for WeightsResponse {
    fn from(result: DeriveWeightsResult) -> Self {
        Self {
            analysis_id: result.analysis_id.to_string(),
            computed_at: result.computed_at.to_rfc3339(),
            available: result.weights.is_available(),
            raw_scores: result.raw_scores,
            weights: result.weights,
        }
    }
}

/// One entry of a ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankedAlternativeResponse {
    /// 1-based position.
    pub rank: usize,
    pub alternative: String,
    pub score: f64,
    pub most_impactful: Option<String>,
    pub contributions: Vec<CriterionContribution>,
}

impl RankedAlternativeResponse {
    fn from_entry(rank: usize, entry: RankedAlternative) -> Self {
        Self {
            rank,
            most_impactful: entry.most_impactful().map(|c| c.criterion.clone()),
            alternative: entry.alternative,
            score: entry.score,
            contributions: entry.contributions,
        }
    }
}

fn ranking_entries(ranking: RankedScores) -> Vec<RankedAlternativeResponse> {
    ranking
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankedAlternativeResponse::from_entry(index + 1, entry))
        .collect()
}

/// Ranking computed with supplied weights.
#[derive(Debug, Clone, Serialize)]
pub struct RankingResponse {
    pub analysis_id: String,
    pub computed_at: String,
    pub ranking: Vec<RankedAlternativeResponse>,
}

impl From<RankAlternativesResult> for RankingResponse {
    fn from(result: RankAlternativesResult) -> Self {
        Self {
            analysis_id: result.analysis_id.to_string(),
            computed_at: result.computed_at.to_rfc3339(),
            ranking: ranking_entries(result.ranking),
        }
    }
}

/// Full batch analysis of one sheet.
#[derive(Debug, Clone, Serialize)]
pub struct WorkbookAnalysisResponse {
    pub analysis_id: String,
    pub computed_at: String,
    pub sheet: String,
    pub alternatives: usize,
    pub report: ExtractionReport,
    pub raw_scores: BTreeMap<String, f64>,
    pub weights: WeightVector,
    pub ranking: Vec<RankedAlternativeResponse>,
}

impl From<AnalyzeWorkbookResult> for WorkbookAnalysisResponse {
    fn from(result: AnalyzeWorkbookResult) -> Self {
        Self {
            analysis_id: result.analysis_id.to_string(),
            computed_at: result.computed_at.to_rfc3339(),
            sheet: result.sheet,
            alternatives: result.matrix.alternative_count(),
            report: result.report,
            raw_scores: result.raw_scores,
            weights: result.weights,
            ranking: ranking_entries(result.ranking),
        }
    }
}

/// Manual form analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ManualAnalysisResponse {
    pub analysis_id: String,
    pub computed_at: String,
    pub weights: WeightVector,
    pub ranking: Vec<RankedAlternativeResponse>,
}

impl From<ManualAnalysisResult> for ManualAnalysisResponse {
    fn from(result: ManualAnalysisResult) -> Self {
        Self {
            analysis_id: result.analysis_id.to_string(),
            computed_at: result.computed_at.to_rfc3339(),
            weights: result.weights,
            ranking: ranking_entries(result.ranking),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

/// Error body returned by every analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        let details = if err.details.is_empty() {
            None
        } else {
            Some(serde_json::json!(err.details))
        };
        Self {
            code: err.code.to_string(),
            message: err.message,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::AnalysisError;

    #[test]
    fn derive_weights_request_reads_triples() {
        let json = r#"{"criteria": {"Cost": [[0.9, 0.05, 0.05], [0.5, 0.3, 0.2]]}}"#;
        let req: DeriveWeightsRequest = serde_json::from_str(json).unwrap();
        let judgments = req.into_criterion_judgments();

        assert_eq!(judgments.len(), 1);
        assert_eq!(judgments[0].0, "Cost");
        assert_eq!(judgments[0].1[1], PictureFuzzyValue::new(0.5, 0.3, 0.2));
    }

    #[test]
    fn rank_request_rejects_blank_alternative_names() {
        let json = r#"{
            "alternatives": [{"name": " ", "judgments": {"Cost": [0.5, 0.3, 0.2]}}],
            "weights": {"Cost": 1.0}
        }"#;
        let req: RankRequest = serde_json::from_str(json).unwrap();

        assert_eq!(
            req.into_parts().unwrap_err(),
            ValidationError::empty_field("alternatives[0].name")
        );
    }

    #[test]
    fn rank_request_builds_matrix_in_request_order() {
        let json = r#"{
            "alternatives": [
                {"name": "B", "judgments": {"Cost": [0.5, 0.3, 0.2]}},
                {"name": "A", "judgments": {"Cost": [0.9, 0.05, 0.05]}}
            ],
            "weights": {"Cost": 1.0}
        }"#;
        let req: RankRequest = serde_json::from_str(json).unwrap();
        let (matrix, weights) = req.into_parts().unwrap();

        assert_eq!(matrix.alternative_names(), vec!["B", "A"]);
        assert_eq!(weights.get("Cost"), 1.0);
    }

    #[test]
    fn manual_request_requires_exactly_one_weighting() {
        let both = r#"{
            "criteria": ["Cost"],
            "alternatives": [{"name": "A", "values": [[0.5, 0.3, 0.2]]}],
            "importance": {"Cost": [[0.5, 0.3, 0.2]]},
            "coefficients": [1.0]
        }"#;
        let req: ManualAnalysisRequest = serde_json::from_str(both).unwrap();
        assert!(matches!(
            req.into_command(),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let neither = r#"{
            "criteria": ["Cost"],
            "alternatives": [{"name": "A", "values": [[0.5, 0.3, 0.2]]}]
        }"#;
        let req: ManualAnalysisRequest = serde_json::from_str(neither).unwrap();
        assert_eq!(
            req.into_command().unwrap_err(),
            ValidationError::empty_field("weighting")
        );
    }

    #[test]
    fn workbook_request_defaults_encoding() {
        let json = r#"{"sheets": [{"name": "TABLE", "rows": [["a", 1.0]]}]}"#;
        let req: WorkbookRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.encoding, TableEncoding::TripleNumeric);
        assert!(req.sheet.is_none());
    }

    #[test]
    fn error_response_carries_code_and_details() {
        let err = DomainError::from(AnalysisError::SheetNotFound {
            sheet: "TABLE".to_string(),
        });
        let response = ErrorResponse::from(err);

        assert_eq!(response.code, "SHEET_NOT_FOUND");
        assert_eq!(
            response.details.unwrap()["sheet"],
            serde_json::Value::String("TABLE".to_string())
        );
    }

    #[test]
    fn error_response_omits_empty_details() {
        let response = ErrorResponse::from(DomainError::from(AnalysisError::WeightsUnavailable));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["code"], "WEIGHTS_UNAVAILABLE");
    }
}
