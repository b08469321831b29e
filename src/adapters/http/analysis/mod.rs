//! HTTP adapter for analysis endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AlternativeInput, DeriveWeightsRequest, ErrorResponse, ManualAlternativeInput,
    ManualAnalysisRequest, ManualAnalysisResponse, RankRequest, RankedAlternativeResponse,
    RankingResponse, Triple, WeightsResponse, WorkbookAnalysisResponse, WorkbookOverviewRequest,
    WorkbookRequest,
};
pub use handlers::AnalysisHandlers;
pub use routes::analysis_routes;
