//! HTTP routes for analysis endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    analyze_workbook, derive_weights, describe_workbook, manual_analysis, rank_alternatives,
    AnalysisHandlers,
};

/// Creates the analysis router with all endpoints.
pub fn analysis_routes(handlers: AnalysisHandlers) -> Router {
    Router::new()
        .route("/weights", post(derive_weights))
        .route("/rank", post(rank_alternatives))
        .route("/workbook", post(analyze_workbook))
        .route("/workbook/overview", post(describe_workbook))
        .route("/manual", post(manual_analysis))
        .with_state(handlers)
}
