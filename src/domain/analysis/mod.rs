//! Analysis Module - Pure domain services for picture-fuzzy decision analysis.
//!
//! This module contains stateless functions that turn picture-fuzzy
//! judgments into criterion weights and a ranking of alternatives.
//!
//! # Components
//!
//! - `RectangularTable` / `Cell` - Raw sheet grid from a tabular source
//! - `MatrixExtractor` - Table → `JudgmentMatrix`, with local recovery rules
//! - `JudgmentMatrix` - Alternative → criterion → picture-fuzzy value
//! - `WensloWeightDeriver` - Judgments per criterion → `WeightVector`
//! - `ArlonRanker` - Matrix + weights → `RankedScores`
//!
//! # Data Flow
//!
//! ```text
//! table ─▶ MatrixExtractor ─▶ JudgmentMatrix ─┬─▶ WensloWeightDeriver ─▶ WeightVector
//!                                             └──────────────┬───────────────┘
//!                                                            ▼
//!                                                       ArlonRanker ─▶ RankedScores
//! ```
//!
//! All functions are pure. Each run returns its artifacts to the caller;
//! nothing is cached between runs.

mod alternative_ranker;
mod errors;
mod judgment_matrix;
mod matrix_extractor;
mod table;
mod weight_deriver;

pub use alternative_ranker::{
    ArlonRanker, CriterionContribution, RankedAlternative, RankedScores,
};
pub use errors::AnalysisError;
pub use judgment_matrix::{
    AlternativeJudgments, CriterionJudgment, JudgmentMatrix, JudgmentMatrixBuilder,
};
pub use matrix_extractor::{
    Extraction, ExtractionReport, MatrixExtractor, SkipReason, SkippedCell, SkippedRow,
    TableEncoding, UnknownLabel, FIRST_JUDGMENT_COLUMN, HEADER_ROW, TRIPLE_WIDTH,
};
pub use table::{Cell, RectangularTable};
pub use weight_deriver::{WeightVector, WensloWeightDeriver};
