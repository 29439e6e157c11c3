use axum::http::StatusCode;
use axum::Json;
use contracts::projections::p900_pipeline_board::PipelineBoardDto;

use super::error_status;
use crate::projections::p900_pipeline_board::service;

/// GET /api/p900/pipeline-board
pub async fn get_board() -> Result<Json<PipelineBoardDto>, StatusCode> {
    match service::build_board().await {
        Ok(board) => Ok(Json(board)),
        Err(e) => Err(error_status(&e)),
    }
}
