//! Picture-fuzzy value object and its score function.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A picture-fuzzy judgment `(μ, ν, π)`.
///
/// - `positive` (μ, ρ): degree of true membership
/// - `negative` (ν, ρ̄): degree of false membership
/// - `neutral` (π, σ): degree of neutrality/refusal
///
/// Components are conventionally in `[0, 1]` with `μ + ν + π ≤ 1`, but any
/// three floats are accepted as-is. No clamping or validation happens here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PictureFuzzyValue {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl PictureFuzzyValue {
    /// Value that unknown linguistic labels resolve to.
    pub const NEUTRAL_DEFAULT: Self = Self::new(0.5, 0.3, 0.2);

    /// Creates a value from its three components.
    pub const fn new(positive: f64, negative: f64, neutral: f64) -> Self {
        Self {
            positive,
            negative,
            neutral,
        }
    }

    /// Reduces the judgment to one scalar: `μ − π`.
    ///
    /// Total over all inputs, including out-of-range or negative components.
    pub fn score(&self) -> f64 {
        self.positive - self.neutral
    }

    /// Returns true if any component is NaN.
    pub fn has_nan(&self) -> bool {
        self.positive.is_nan() || self.negative.is_nan() || self.neutral.is_nan()
    }

    /// Returns the components as a `(μ, ν, π)` tuple.
    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.positive, self.negative, self.neutral)
    }
}

impl From<(f64, f64, f64)> for PictureFuzzyValue {
    fn from((positive, negative, neutral): (f64, f64, f64)) -> Self {
        Self::new(positive, negative, neutral)
    }
}

impl fmt::Display for PictureFuzzyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.positive, self.negative, self.neutral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn score_is_positive_minus_neutral() {
        let pf = PictureFuzzyValue::new(0.9, 0.05, 0.05);
        assert!((pf.score() - 0.85).abs() < EPS);
    }

    #[test]
    fn score_ignores_negative_membership() {
        let a = PictureFuzzyValue::new(0.6, 0.1, 0.2);
        let b = PictureFuzzyValue::new(0.6, 0.7, 0.2);
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn score_of_neutral_default() {
        assert!((PictureFuzzyValue::NEUTRAL_DEFAULT.score() - 0.3).abs() < EPS);
    }

    #[test]
    fn score_does_not_clip_out_of_range_components() {
        let pf = PictureFuzzyValue::new(-0.5, 2.0, 1.5);
        assert_eq!(pf.score(), -2.0);
    }

    #[test]
    fn has_nan_detects_any_component() {
        assert!(!PictureFuzzyValue::new(0.1, 0.2, 0.3).has_nan());
        assert!(PictureFuzzyValue::new(f64::NAN, 0.2, 0.3).has_nan());
        assert!(PictureFuzzyValue::new(0.1, f64::NAN, 0.3).has_nan());
        assert!(PictureFuzzyValue::new(0.1, 0.2, f64::NAN).has_nan());
    }

    #[test]
    fn converts_from_tuple() {
        let pf: PictureFuzzyValue = (0.7, 0.2, 0.1).into();
        assert_eq!(pf.as_tuple(), (0.7, 0.2, 0.1));
    }

    #[test]
    fn displays_as_triple() {
        let pf = PictureFuzzyValue::new(0.5, 0.3, 0.2);
        assert_eq!(pf.to_string(), "(0.5, 0.3, 0.2)");
    }

    #[test]
    fn serializes_with_named_components() {
        let pf = PictureFuzzyValue::new(0.5, 0.3, 0.2);
        let json = serde_json::to_value(pf).unwrap();
        assert_eq!(json["positive"], 0.5);
        assert_eq!(json["negative"], 0.3);
        assert_eq!(json["neutral"], 0.2);
    }

    proptest! {
        #[test]
        fn score_matches_definition(mu in -2.0f64..2.0, nu in -2.0f64..2.0, pi in -2.0f64..2.0) {
            let pf = PictureFuzzyValue::new(mu, nu, pi);
            prop_assert_eq!(pf.score(), mu - pi);
        }
    }
}
