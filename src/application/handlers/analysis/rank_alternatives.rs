//! RankAlternativesHandler - Query handler for ARLON ranking with supplied weights.

use tracing::info;

use crate::domain::analysis::{
    AnalysisError, ArlonRanker, JudgmentMatrix, RankedScores, WeightVector,
};
use crate::domain::foundation::{AnalysisId, Timestamp};

/// Query to rank a judgment matrix.
///
/// `weights` is the vector produced by an earlier weight derivation.
#[derive(Debug, Clone)]
pub struct RankAlternativesCommand {
    pub matrix: JudgmentMatrix,
    pub weights: WeightVector,
}

/// Result of ranking.
#[derive(Debug, Clone)]
pub struct RankAlternativesResult {
    pub analysis_id: AnalysisId,
    pub computed_at: Timestamp,
    pub ranking: RankedScores,
}

/// Handler for ranking alternatives.
#[derive(Debug, Clone, Default)]
pub struct RankAlternativesHandler;

impl RankAlternativesHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        cmd: RankAlternativesCommand,
    ) -> Result<RankAlternativesResult, AnalysisError> {
        let weights = cmd.weights.require_available()?;
        let analysis_id = AnalysisId::new();
        let ranking = ArlonRanker::rank(&cmd.matrix, weights);

        info!(
            analysis_id = %analysis_id,
            alternatives = ranking.len(),
            best = ranking.best().map(|b| b.alternative.as_str()).unwrap_or(""),
            "Ranked alternatives"
        );

        Ok(RankAlternativesResult {
            analysis_id,
            computed_at: Timestamp::now(),
            ranking,
        })
    }
}
