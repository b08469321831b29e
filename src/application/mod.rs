//! Application layer - Queries and Handlers.
//!
//! This layer orchestrates domain operations and coordinates with ports.
//! Every analysis is a stateless query; nothing is persisted between requests.

pub mod handlers;

pub use handlers::{
    AnalyzeWorkbookCommand, AnalyzeWorkbookHandler, AnalyzeWorkbookResult, DeriveWeightsCommand,
    DeriveWeightsHandler, DeriveWeightsResult, DescribeWorkbookHandler, ManualAlternative,
    ManualAnalysisCommand, ManualAnalysisHandler, ManualAnalysisResult, ManualWeighting,
    RankAlternativesCommand, RankAlternativesHandler, RankAlternativesResult, WorkbookOverview,
};
