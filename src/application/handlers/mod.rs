//! Application handlers.
//!
//! Query handlers that orchestrate domain operations.

pub mod analysis;

pub use analysis::{
    AnalyzeWorkbookCommand, AnalyzeWorkbookHandler, AnalyzeWorkbookResult, DeriveWeightsCommand,
    DeriveWeightsHandler, DeriveWeightsResult, DescribeWorkbookHandler, ManualAlternative,
    ManualAnalysisCommand, ManualAnalysisHandler, ManualAnalysisResult, ManualWeighting,
    RankAlternativesCommand, RankAlternativesHandler, RankAlternativesResult, WorkbookOverview,
};
