//! HTTP handlers for analysis endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::workbook::InMemoryWorkbook;
use crate::application::handlers::analysis::{
    AnalyzeWorkbookCommand, AnalyzeWorkbookHandler, DeriveWeightsCommand, DeriveWeightsHandler,
    DescribeWorkbookHandler, ManualAnalysisHandler, RankAlternativesCommand,
    RankAlternativesHandler,
};
use crate::config::AnalysisConfig;
use crate::domain::analysis::AnalysisError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

use super::dto::{
    DeriveWeightsRequest, ErrorResponse, ManualAnalysisRequest, ManualAnalysisResponse,
    RankRequest, RankingResponse, WeightsResponse, WorkbookRequest,
    WorkbookAnalysisResponse, WorkbookOverviewRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AnalysisHandlers {
    derive_handler: Arc<DeriveWeightsHandler>,
    rank_handler: Arc<RankAlternativesHandler>,
    workbook_handler: Arc<AnalyzeWorkbookHandler>,
    describe_handler: Arc<DescribeWorkbookHandler>,
    manual_handler: Arc<ManualAnalysisHandler>,
}

impl AnalysisHandlers {
    pub fn new(
        derive_handler: Arc<DeriveWeightsHandler>,
        rank_handler: Arc<RankAlternativesHandler>,
        workbook_handler: Arc<AnalyzeWorkbookHandler>,
        describe_handler: Arc<DescribeWorkbookHandler>,
        manual_handler: Arc<ManualAnalysisHandler>,
    ) -> Self {
        Self {
            derive_handler,
            rank_handler,
            workbook_handler,
            describe_handler,
            manual_handler,
        }
    }

    /// Builds every handler from the analysis configuration.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            Arc::new(DeriveWeightsHandler::new()),
            Arc::new(RankAlternativesHandler::new()),
            Arc::new(AnalyzeWorkbookHandler::new(config.clone())),
            Arc::new(DescribeWorkbookHandler::new(config.clone())),
            Arc::new(ManualAnalysisHandler::new(config.clone())),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/analysis/weights - Derive WENSLO weights
pub async fn derive_weights(
    State(handlers): State<AnalysisHandlers>,
    payload: Result<Json<DeriveWeightsRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return handle_rejection(rejection),
    };

    let cmd = DeriveWeightsCommand {
        criterion_judgments: req.into_criterion_judgments(),
    };

    match handlers.derive_handler.handle(cmd) {
        Ok(result) => (StatusCode::OK, Json(WeightsResponse::from(result))).into_response(),
        Err(e) => handle_analysis_error(e),
    }
}

/// POST /api/analysis/rank - Rank alternatives with supplied weights
pub async fn rank_alternatives(
    State(handlers): State<AnalysisHandlers>,
    payload: Result<Json<RankRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return handle_rejection(rejection),
    };

    let (matrix, weights) = match req.into_parts() {
        Ok(parts) => parts,
        Err(e) => return handle_validation_error(e),
    };

    match handlers
        .rank_handler
        .handle(RankAlternativesCommand { matrix, weights })
    {
        Ok(result) => (StatusCode::OK, Json(RankingResponse::from(result))).into_response(),
        Err(e) => handle_analysis_error(e),
    }
}

/// POST /api/analysis/workbook - Extract, weigh, and rank a workbook sheet
pub async fn analyze_workbook(
    State(handlers): State<AnalysisHandlers>,
    payload: Result<Json<WorkbookRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return handle_rejection(rejection),
    };

    let workbook = InMemoryWorkbook::from_uploads(req.sheets);
    let cmd = AnalyzeWorkbookCommand {
        sheet: req.sheet,
        encoding: req.encoding,
    };

    match handlers.workbook_handler.handle(&workbook, cmd) {
        Ok(result) => {
            (StatusCode::OK, Json(WorkbookAnalysisResponse::from(result))).into_response()
        }
        Err(e) => handle_analysis_error(e),
    }
}

/// POST /api/analysis/workbook/overview - List decision and step sheets
pub async fn describe_workbook(
    State(handlers): State<AnalysisHandlers>,
    payload: Result<Json<WorkbookOverviewRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return handle_rejection(rejection),
    };

    let workbook = InMemoryWorkbook::from_uploads(req.sheets);
    let overview = handlers.describe_handler.handle(&workbook);
    (StatusCode::OK, Json(overview)).into_response()
}

/// POST /api/analysis/manual - Analyze a hand-entered form
pub async fn manual_analysis(
    State(handlers): State<AnalysisHandlers>,
    payload: Result<Json<ManualAnalysisRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return handle_rejection(rejection),
    };

    let cmd = match req.into_command() {
        Ok(cmd) => cmd,
        Err(e) => return handle_validation_error(e),
    };

    match handlers.manual_handler.handle(cmd) {
        Ok(result) => {
            (StatusCode::OK, Json(ManualAnalysisResponse::from(result))).into_response()
        }
        Err(e) => handle_analysis_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_analysis_error(error: AnalysisError) -> Response {
    let status = match &error {
        AnalysisError::Validation(_) => StatusCode::BAD_REQUEST,
        AnalysisError::SheetNotFound { .. } => StatusCode::NOT_FOUND,
        AnalysisError::WeightsUnavailable
        | AnalysisError::MalformedTable { .. }
        | AnalysisError::EmptyJudgments { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Json(ErrorResponse::from(DomainError::from(error)))).into_response()
}

/// Malformed or mistyped request bodies keep axum's status but use the
/// standard error body.
fn handle_rejection(rejection: JsonRejection) -> Response {
    let error = DomainError::new(ErrorCode::InvalidFormat, rejection.body_text())
        .with_detail("field", "body");
    (rejection.status(), Json(ErrorResponse::from(error))).into_response()
}

fn handle_validation_error(error: ValidationError) -> Response {
    handle_analysis_error(AnalysisError::Validation(error))
}
