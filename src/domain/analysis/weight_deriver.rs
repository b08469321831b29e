//! WENSLO Weight Deriver - normalized criterion weights from picture-fuzzy judgments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::AnalysisError;
use crate::domain::foundation::ValidationError;
use crate::domain::fuzzy::PictureFuzzyValue;

/// Normalized importance weight per criterion.
///
/// When available, weights sum to 1.0. An empty vector, or one whose weights
/// do not sum to a positive total, means "weights unavailable" and must not be
/// used for ranking.
///
/// Derivation keeps a negative weight for a criterion whose mean score is
/// negative as long as the overall total is positive. Weights supplied by a
/// caller must be non-negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(BTreeMap<String, f64>);

impl WeightVector {
    /// Creates the empty ("unavailable") weight vector.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps caller-supplied weights without renormalizing them.
    ///
    /// Used when a weight vector from an earlier run is threaded back in.
    /// Every weight must be finite and non-negative, and every name non-blank.
    pub fn try_from_weights<I, K>(weights: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (criterion, weight) in weights {
            let criterion = criterion.into();
            if criterion.trim().is_empty() {
                return Err(ValidationError::empty_field("weights"));
            }
            if !weight.is_finite() {
                return Err(ValidationError::invalid_format(
                    format!("weights.{}", criterion),
                    "weight must be a finite number",
                ));
            }
            if weight < 0.0 {
                return Err(ValidationError::out_of_range(
                    format!("weights.{}", criterion),
                    0.0,
                    f64::MAX,
                    weight,
                ));
            }
            map.insert(criterion, weight);
        }
        Ok(Self(map))
    }

    /// Weight for a criterion; absent criteria weigh zero.
    pub fn get(&self, criterion: &str) -> f64 {
        self.0.get(criterion).copied().unwrap_or(0.0)
    }

    /// Returns true if the criterion has a weight entry.
    pub fn contains(&self, criterion: &str) -> bool {
        self.0.contains_key(criterion)
    }

    /// Returns true if the vector may be used for ranking: it is non-empty and
    /// its weights sum to a positive total.
    pub fn is_available(&self) -> bool {
        let total = self.total();
        !self.0.is_empty() && !total.is_nan() && total > 0.0
    }

    /// Fails with [`AnalysisError::WeightsUnavailable`] unless the vector is
    /// available.
    pub fn require_available(&self) -> Result<&Self, AnalysisError> {
        if self.is_available() {
            Ok(self)
        } else {
            Err(AnalysisError::WeightsUnavailable)
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Number of weighted criteria.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no weights.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(criterion, weight)` pairs in criterion-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

}

/// WENSLO weighting functions.
pub struct WensloWeightDeriver;

impl WensloWeightDeriver {
    /// Computes the raw score per criterion: the mean of `score(pf)` over its
    /// judgments.
    ///
    /// Repeated criterion names pool their judgments.
    ///
    /// # Errors
    /// - `EmptyJudgments` if a criterion has a zero-length judgment sequence
    pub fn criterion_scores<I, K, V>(
        criterion_judgments: I,
    ) -> Result<BTreeMap<String, f64>, AnalysisError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[PictureFuzzyValue]>,
    {
        let mut pooled: BTreeMap<String, Vec<PictureFuzzyValue>> = BTreeMap::new();
        for (criterion, judgments) in criterion_judgments {
            let criterion = criterion.as_ref();
            let judgments = judgments.as_ref();
            if judgments.is_empty() {
                return Err(AnalysisError::EmptyJudgments {
                    criterion: criterion.to_string(),
                });
            }
            pooled
                .entry(criterion.to_string())
                .or_default()
                .extend_from_slice(judgments);
        }

        Ok(pooled
            .into_iter()
            .map(|(criterion, judgments)| {
                let sum: f64 = judgments.iter().map(PictureFuzzyValue::score).sum();
                (criterion, sum / judgments.len() as f64)
            })
            .collect())
    }

    /// Derives normalized weights from picture-fuzzy judgments per criterion.
    ///
    /// # Algorithm
    /// 1. raw[c] = mean(score(pf) for pf in judgments[c])
    /// 2. total = Σ raw[c]
    /// 3. weight[c] = raw[c] / total
    ///
    /// # Edge Cases
    /// - total ≤ 0 (or NaN): returns the empty vector ("weights unavailable")
    /// - No criteria: returns the empty vector
    /// - Criterion with zero judgments: `EmptyJudgments` error
    /// - Output does not depend on the order criteria are supplied in
    pub fn derive<I, K, V>(criterion_judgments: I) -> Result<WeightVector, AnalysisError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[PictureFuzzyValue]>,
    {
        let raw = Self::criterion_scores(criterion_judgments)?;
        Ok(Self::normalize(raw))
    }

    /// Normalizes raw per-criterion scores by their sum.
    ///
    /// Shared by derived weights and legacy direct coefficients, so both obey
    /// the same "total ≤ 0 means unavailable" rule.
    pub fn normalize<I, K>(raw_scores: I) -> WeightVector
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let raw: BTreeMap<String, f64> = raw_scores
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();
        let total: f64 = raw.values().sum();

        if total.is_nan() || total <= 0.0 {
            warn!(
                criteria = raw.len(),
                total,
                "Criterion scores do not sum to a positive total; weights unavailable"
            );
            return WeightVector::empty();
        }

        debug!(criteria = raw.len(), total, "Normalized criterion weights");
        WeightVector(
            raw.into_iter()
                .map(|(criterion, score)| (criterion, score / total))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fuzzy::Lexicon;
    use proptest::prelude::*;
    use std::collections::HashMap;

    const EPS: f64 = 1e-9;

    fn pf(mu: f64, nu: f64, pi: f64) -> PictureFuzzyValue {
        PictureFuzzyValue::new(mu, nu, pi)
    }

    #[test]
    fn derive_normalizes_to_one() {
        let judgments = BTreeMap::from([
            ("C1".to_string(), vec![pf(0.9, 0.05, 0.05), pf(0.7, 0.1, 0.1)]),
            ("C2".to_string(), vec![pf(0.5, 0.3, 0.2)]),
        ]);

        let weights = WensloWeightDeriver::derive(&judgments).unwrap();

        // raw: C1 = (0.85 + 0.6) / 2 = 0.725, C2 = 0.3
        assert!((weights.get("C1") - 0.725 / 1.025).abs() < EPS);
        assert!((weights.get("C2") - 0.3 / 1.025).abs() < EPS);
        assert!((weights.total() - 1.0).abs() < EPS);
    }

    #[test]
    fn lexicon_labels_produce_expected_weights() {
        let judgments = vec![
            ("c1", vec![Lexicon::resolve("Very Important")]),
            ("c2", vec![Lexicon::resolve("Not Important at All")]),
        ];

        let weights = WensloWeightDeriver::derive(judgments).unwrap();

        assert!((weights.get("c1") - 1.0).abs() < EPS);
        assert!(weights.get("c2").abs() < EPS);
        assert!(weights.contains("c2"));
    }

    #[test]
    fn non_positive_total_yields_unavailable_weights() {
        let judgments = vec![
            ("C1", vec![pf(0.1, 0.8, 0.1)]),
            ("C2", vec![pf(0.2, 0.3, 0.5)]),
        ];

        let weights = WensloWeightDeriver::derive(judgments).unwrap();

        assert!(weights.is_empty());
        assert!(!weights.is_available());
        assert_eq!(
            weights.require_available().unwrap_err(),
            AnalysisError::WeightsUnavailable
        );
    }

    #[test]
    fn no_criteria_yields_unavailable_weights() {
        let judgments: Vec<(&str, Vec<PictureFuzzyValue>)> = Vec::new();
        let weights = WensloWeightDeriver::derive(judgments).unwrap();
        assert!(!weights.is_available());
    }

    #[test]
    fn nan_scores_yield_unavailable_weights() {
        let judgments = vec![("C1", vec![pf(f64::NAN, 0.1, 0.1)]), ("C2", vec![pf(0.9, 0.0, 0.1)])];
        let weights = WensloWeightDeriver::derive(judgments).unwrap();
        assert!(!weights.is_available());
    }

    #[test]
    fn empty_judgment_sequence_is_an_error() {
        let judgments = vec![("C1", vec![pf(0.9, 0.05, 0.05)]), ("C2", vec![])];

        let err = WensloWeightDeriver::derive(judgments).unwrap_err();

        assert_eq!(
            err,
            AnalysisError::EmptyJudgments {
                criterion: "C2".to_string()
            }
        );
    }

    #[test]
    fn negative_raw_scores_keep_their_sign_when_total_is_positive() {
        let judgments = vec![
            ("C1", vec![pf(0.9, 0.0, 0.1)]),
            ("C2", vec![pf(0.1, 0.5, 0.3)]),
        ];
        let weights = WensloWeightDeriver::derive(judgments).unwrap();
        assert!(weights.get("C2") < 0.0);
        assert!((weights.total() - 1.0).abs() < EPS);
    }

    #[test]
    fn criterion_scores_are_means() {
        let judgments = vec![("C1", vec![pf(1.0, 0.0, 0.0), pf(0.5, 0.0, 0.5)])];
        let raw = WensloWeightDeriver::criterion_scores(judgments).unwrap();
        assert!((raw["C1"] - 0.5).abs() < EPS);
    }

    #[test]
    fn normalize_direct_coefficients() {
        let weights = WensloWeightDeriver::normalize(vec![("A", 1.0), ("B", 3.0)]);
        assert!((weights.get("A") - 0.25).abs() < EPS);
        assert!((weights.get("B") - 0.75).abs() < EPS);
    }

    #[test]
    fn absent_criterion_weighs_zero() {
        let weights = WensloWeightDeriver::normalize(vec![("A", 1.0)]);
        assert_eq!(weights.get("missing"), 0.0);
        assert!(!weights.contains("missing"));
    }

    #[test]
    fn try_from_weights_rejects_non_finite_negative_and_blank_entries() {
        assert!(WeightVector::try_from_weights(vec![("A", f64::NAN)]).is_err());
        assert!(WeightVector::try_from_weights(vec![("A", f64::INFINITY)]).is_err());
        assert!(WeightVector::try_from_weights(vec![("", 0.5)]).is_err());
        assert!(matches!(
            WeightVector::try_from_weights(vec![("A", 1.2), ("B", -0.2)]),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "weights.B"
        ));
        let weights = WeightVector::try_from_weights(vec![("A", 0.4), ("B", 0.6)]).unwrap();
        assert_eq!(weights.len(), 2);
        assert!(weights.is_available());
    }

    #[test]
    fn zero_valued_weights_are_unavailable() {
        let weights = WeightVector::try_from_weights(vec![("C1", 0.0), ("C2", 0.0)]).unwrap();

        assert!(!weights.is_empty());
        assert!(!weights.is_available());
        assert_eq!(
            weights.require_available().unwrap_err(),
            AnalysisError::WeightsUnavailable
        );
    }

    #[test]
    fn weight_vector_serializes_as_plain_map() {
        let weights = WensloWeightDeriver::normalize(vec![("A", 1.0)]);
        let json = serde_json::to_string(&weights).unwrap();
        assert_eq!(json, r#"{"A":1.0}"#);
    }

    fn judgment_strategy() -> impl Strategy<Value = Vec<(String, Vec<(f64, f64, f64)>)>> {
        prop::collection::btree_map(
            "[a-z]{1,6}",
            prop::collection::vec((0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0), 1..5),
            1..8,
        )
        .prop_map(|m| m.into_iter().collect())
    }

    proptest! {
        #[test]
        fn weights_sum_to_one_when_any_score_is_positive(input in judgment_strategy()) {
            let judgments: Vec<(String, Vec<PictureFuzzyValue>)> = input
                .iter()
                .map(|(c, v)| (c.clone(), v.iter().map(|&t| t.into()).collect()))
                .collect();
            let raw = WensloWeightDeriver::criterion_scores(judgments.clone()).unwrap();
            let total: f64 = raw.values().sum();
            let weights = WensloWeightDeriver::derive(judgments).unwrap();

            if total > 0.0 {
                prop_assert!((weights.total() - 1.0).abs() < EPS);
                prop_assert_eq!(weights.len(), raw.len());
            } else {
                prop_assert!(weights.is_empty());
            }
        }

        #[test]
        fn derivation_is_independent_of_criterion_order(input in judgment_strategy()) {
            let judgments: Vec<(String, Vec<PictureFuzzyValue>)> = input
                .iter()
                .map(|(c, v)| (c.clone(), v.iter().map(|&t| t.into()).collect()))
                .collect();
            let mut reversed = judgments.clone();
            reversed.reverse();
            let as_hash_map: HashMap<String, Vec<PictureFuzzyValue>> =
                judgments.iter().cloned().collect();

            let forward = WensloWeightDeriver::derive(judgments).unwrap();
            prop_assert_eq!(&forward, &WensloWeightDeriver::derive(reversed).unwrap());
            prop_assert_eq!(&forward, &WensloWeightDeriver::derive(&as_hash_map).unwrap());
        }
    }
}
