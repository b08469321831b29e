//! AnalyzeWorkbookHandler - Batch analysis of a workbook's decision sheet.
//!
//! Extracts the judgment matrix, pools every alternative's judgments per
//! criterion to derive WENSLO weights, then ranks with ARLON.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::domain::analysis::{
    AnalysisError, ArlonRanker, ExtractionReport, JudgmentMatrix, MatrixExtractor,
    RankedScores, TableEncoding, WeightVector, WensloWeightDeriver,
};
use crate::domain::foundation::{AnalysisId, Timestamp};
use crate::ports::{WorkbookError, WorkbookSource};

/// Query to analyze one sheet of a workbook.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeWorkbookCommand {
    /// Sheet to read; the configured decision sheet when `None`.
    pub sheet: Option<String>,
    pub encoding: TableEncoding,
}

/// Result of a batch analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeWorkbookResult {
    pub analysis_id: AnalysisId,
    pub computed_at: Timestamp,
    pub sheet: String,
    pub matrix: JudgmentMatrix,
    pub report: ExtractionReport,
    pub raw_scores: BTreeMap<String, f64>,
    pub weights: WeightVector,
    pub ranking: RankedScores,
}

/// Handler for batch workbook analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeWorkbookHandler {
    config: AnalysisConfig,
}

impl AnalyzeWorkbookHandler {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn handle(
        &self,
        source: &dyn WorkbookSource,
        cmd: AnalyzeWorkbookCommand,
    ) -> Result<AnalyzeWorkbookResult, AnalysisError> {
        let sheet = cmd
            .sheet
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.config.decision_sheet.clone());

        let table = source.sheet(&sheet).map_err(into_analysis_error)?;
        let extraction = MatrixExtractor::extract(&table, cmd.encoding)?;

        let raw_scores =
            WensloWeightDeriver::criterion_scores(extraction.matrix.criterion_judgments())?;
        let weights =
            WensloWeightDeriver::normalize(raw_scores.iter().map(|(c, s)| (c.clone(), *s)));
        let ranking = ArlonRanker::rank(&extraction.matrix, weights.require_available()?);

        let analysis_id = AnalysisId::new();
        if !extraction.report.is_clean() {
            warn!(
                analysis_id = %analysis_id,
                sheet = %sheet,
                skipped_cells = extraction.report.skipped_cells.len(),
                unknown_labels = extraction.report.unknown_labels.len(),
                "Workbook analysis recovered from irregular cells"
            );
        }
        info!(
            analysis_id = %analysis_id,
            sheet = %sheet,
            alternatives = ranking.len(),
            criteria = weights.len(),
            "Workbook analysis completed"
        );

        Ok(AnalyzeWorkbookResult {
            analysis_id,
            computed_at: Timestamp::now(),
            sheet,
            matrix: extraction.matrix,
            report: extraction.report,
            raw_scores,
            weights,
            ranking,
        })
    }
}

fn into_analysis_error(err: WorkbookError) -> AnalysisError {
    match err {
        WorkbookError::SheetNotFound(sheet) => AnalysisError::SheetNotFound { sheet },
    }
}
