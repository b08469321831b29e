//! ARLON Alternative Ranker - weighted score aggregation and ordering.

use serde::{Deserialize, Serialize};

use super::{JudgmentMatrix, WeightVector};

/// One criterion's share of an alternative's total score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionContribution {
    pub criterion: String,
    /// `score(pf) × weight`.
    pub weighted_score: f64,
}

/// An alternative with its aggregated score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    pub alternative: String,
    pub score: f64,
    /// Contributions in the alternative's criterion order.
    pub contributions: Vec<CriterionContribution>,
}

impl RankedAlternative {
    /// The criterion with the highest weighted score; the first wins ties.
    pub fn most_impactful(&self) -> Option<&CriterionContribution> {
        self.contributions.iter().fold(None, |best, c| match best {
            Some(b) if b.weighted_score >= c.weighted_score => Some(b),
            _ => Some(c),
        })
    }

    /// Contributions sorted by weighted score, highest first (stable).
    pub fn contributions_by_impact(&self) -> Vec<&CriterionContribution> {
        let mut sorted: Vec<&CriterionContribution> = self.contributions.iter().collect();
        sorted.sort_by(|a, b| b.weighted_score.total_cmp(&a.weighted_score));
        sorted
    }
}

/// Alternatives ordered by score, highest first.
///
/// Equal scores keep the matrix's alternative insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedScores(Vec<RankedAlternative>);

impl RankedScores {
    /// Ranked entries, best first.
    pub fn entries(&self) -> &[RankedAlternative] {
        &self.0
    }

    /// The top-ranked alternative.
    pub fn best(&self) -> Option<&RankedAlternative> {
        self.0.first()
    }

    /// Zero-based rank of an alternative.
    pub fn position(&self, alternative: &str) -> Option<usize> {
        self.0.iter().position(|r| r.alternative == alternative)
    }

    /// Score of an alternative.
    pub fn score_of(&self, alternative: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|r| r.alternative == alternative)
            .map(|r| r.score)
    }

    /// Ordered `(alternative, score)` pairs for presentation.
    pub fn to_pairs(&self) -> Vec<(String, f64)> {
        self.0
            .iter()
            .map(|r| (r.alternative.clone(), r.score))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedAlternative> {
        self.0.iter()
    }
}

impl IntoIterator for RankedScores {
    type Item = RankedAlternative;
    type IntoIter = std::vec::IntoIter<RankedAlternative>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// ARLON ranking functions.
///
/// This is the only ranking implementation; batch and manual analyses both
/// call it.
pub struct ArlonRanker;

impl ArlonRanker {
    /// Ranks alternatives by weighted score.
    ///
    /// # Algorithm
    /// For each alternative: score = Σ_c score(matrix[alt][c]) × weight[c]
    ///
    /// # Edge Cases
    /// - Empty matrix: returns an empty ranking
    /// - Criterion without a weight entry: contributes 0
    /// - Alternative without judgments: scores 0
    /// - Ties: keep insertion order (stable sort)
    ///
    /// The weight vector is not checked for availability here; callers must
    /// refuse to rank with an empty vector.
    pub fn rank(matrix: &JudgmentMatrix, weights: &WeightVector) -> RankedScores {
        let mut ranked: Vec<RankedAlternative> = matrix
            .alternatives()
            .iter()
            .map(|alt| {
                let contributions: Vec<CriterionContribution> = alt
                    .judgments
                    .iter()
                    .map(|j| CriterionContribution {
                        criterion: j.criterion.clone(),
                        weighted_score: j.value.score() * weights.get(&j.criterion),
                    })
                    .collect();
                let score = contributions
                    .iter()
                    .fold(0.0, |total, c| total + c.weighted_score);

                RankedAlternative {
                    alternative: alt.name.clone(),
                    score,
                    contributions,
                }
            })
            .collect();

        // `sort_by` is stable, so ties keep insertion order.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        RankedScores(ranked)
    }
}
