//! Analysis handlers.
//!
//! One handler per use case. Batch (workbook) and manual (form) analyses both
//! end in the single ARLON ranker of the domain layer.

mod analyze_workbook;
mod derive_weights;
mod describe_workbook;
mod manual_analysis;
mod rank_alternatives;

pub use analyze_workbook::{AnalyzeWorkbookCommand, AnalyzeWorkbookHandler, AnalyzeWorkbookResult};
pub use derive_weights::{DeriveWeightsCommand, DeriveWeightsHandler, DeriveWeightsResult};
pub use describe_workbook::{DescribeWorkbookHandler, WorkbookOverview};
pub use manual_analysis::{
    ManualAlternative, ManualAnalysisCommand, ManualAnalysisHandler, ManualAnalysisResult,
    ManualWeighting,
};
pub use rank_alternatives::{
    RankAlternativesCommand, RankAlternativesHandler, RankAlternativesResult,
};
