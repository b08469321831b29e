//! Judgment Matrix - alternative → criterion → picture-fuzzy value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::fuzzy::PictureFuzzyValue;

/// One judgment of an alternative against a criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionJudgment {
    pub criterion: String,
    pub value: PictureFuzzyValue,
}

/// All judgments recorded for one alternative, in criterion encounter order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeJudgments {
    pub name: String,
    pub judgments: Vec<CriterionJudgment>,
}

impl AlternativeJudgments {
    fn new(name: String) -> Self {
        Self {
            name,
            judgments: Vec::new(),
        }
    }

    /// Gets the judgment for a criterion.
    pub fn get(&self, criterion: &str) -> Option<PictureFuzzyValue> {
        self.judgments
            .iter()
            .find(|j| j.criterion == criterion)
            .map(|j| j.value)
    }

    /// Inserts or replaces a judgment, keeping the criterion's first position.
    fn upsert(&mut self, criterion: String, value: PictureFuzzyValue) {
        match self.judgments.iter_mut().find(|j| j.criterion == criterion) {
            Some(existing) => existing.value = value,
            None => self.judgments.push(CriterionJudgment { criterion, value }),
        }
    }
}

/// Judgment matrix keyed by alternative name.
///
/// Alternatives keep the order they were first encountered in. Criterion sets
/// may differ between alternatives when extracted from irregular tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JudgmentMatrix {
    alternatives: Vec<AlternativeJudgments>,
}

impl JudgmentMatrix {
    /// Creates an empty matrix.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing a matrix.
    pub fn builder() -> JudgmentMatrixBuilder {
        JudgmentMatrixBuilder::new()
    }

    /// Alternatives in insertion order.
    pub fn alternatives(&self) -> &[AlternativeJudgments] {
        &self.alternatives
    }

    /// Alternative names in insertion order.
    pub fn alternative_names(&self) -> Vec<&str> {
        self.alternatives.iter().map(|a| a.name.as_str()).collect()
    }

    /// Gets the judgments for one alternative.
    pub fn alternative(&self, name: &str) -> Option<&AlternativeJudgments> {
        self.alternatives.iter().find(|a| a.name == name)
    }

    /// Gets a single judgment.
    pub fn get(&self, alternative: &str, criterion: &str) -> Option<PictureFuzzyValue> {
        self.alternative(alternative)?.get(criterion)
    }

    /// Union of criteria across alternatives, in first-seen order.
    pub fn criteria(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for judgment in self.alternatives.iter().flat_map(|a| &a.judgments) {
            if !seen.contains(&judgment.criterion.as_str()) {
                seen.push(&judgment.criterion);
            }
        }
        seen
    }

    /// Pools judgments per criterion across all alternatives.
    ///
    /// Alternatives lacking a criterion contribute nothing to it, so every
    /// criterion in the result has at least one judgment.
    pub fn criterion_judgments(&self) -> BTreeMap<String, Vec<PictureFuzzyValue>> {
        let mut pooled: BTreeMap<String, Vec<PictureFuzzyValue>> = BTreeMap::new();
        for judgment in self.alternatives.iter().flat_map(|a| &a.judgments) {
            pooled
                .entry(judgment.criterion.clone())
                .or_default()
                .push(judgment.value);
        }
        pooled
    }

    /// Returns true if the matrix has no alternatives.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Returns the number of alternatives.
    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Returns the total number of judgments.
    pub fn judgment_count(&self) -> usize {
        self.alternatives.iter().map(|a| a.judgments.len()).sum()
    }
}

/// Builder for constructing JudgmentMatrix instances.
#[derive(Debug, Default)]
pub struct JudgmentMatrixBuilder {
    alternatives: Vec<AlternativeJudgments>,
}

impl JudgmentMatrixBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an alternative row.
    ///
    /// Starting a name that already exists discards its earlier judgments but
    /// keeps its original position. Returns true if an earlier row was replaced.
    pub fn begin_alternative(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        match self.alternatives.iter_mut().find(|a| a.name == name) {
            Some(existing) => {
                existing.judgments.clear();
                true
            }
            None => {
                self.alternatives.push(AlternativeJudgments::new(name));
                false
            }
        }
    }

    /// Records a judgment, creating the alternative if needed.
    ///
    /// A repeated (alternative, criterion) pair replaces the earlier value.
    pub fn insert(
        &mut self,
        alternative: impl Into<String>,
        criterion: impl Into<String>,
        value: PictureFuzzyValue,
    ) {
        let alternative = alternative.into();
        let index = match self.alternatives.iter().position(|a| a.name == alternative) {
            Some(index) => index,
            None => {
                self.alternatives.push(AlternativeJudgments::new(alternative));
                self.alternatives.len() - 1
            }
        };
        self.alternatives[index].upsert(criterion.into(), value);
    }

    /// Adds an alternative (chaining form of [`begin_alternative`](Self::begin_alternative)).
    pub fn alternative(mut self, name: impl Into<String>) -> Self {
        self.begin_alternative(name);
        self
    }

    /// Adds a judgment (chaining form of [`insert`](Self::insert)).
    pub fn judgment(
        mut self,
        alternative: impl Into<String>,
        criterion: impl Into<String>,
        value: impl Into<PictureFuzzyValue>,
    ) -> Self {
        self.insert(alternative, criterion, value.into());
        self
    }

    /// Builds the matrix.
    pub fn build(self) -> JudgmentMatrix {
        JudgmentMatrix {
            alternatives: self.alternatives,
        }
    }
}
