use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a002_quotation::aggregate::{
    QuotationDto, QuotationPreviewRequest, QuotationPreviewResponse, QuotationView,
};
use serde::Deserialize;

use super::error_status;
use crate::domain::a002_quotation::service;

#[derive(Debug, Deserialize, Default)]
pub struct QuotationListQuery {
    #[serde(rename = "leadId", default)]
    pub lead_id: Option<String>,
}

/// GET /api/quotation
pub async fn list_all(
    Query(query): Query<QuotationListQuery>,
) -> Result<Json<Vec<QuotationView>>, StatusCode> {
    let lead_id = match query.lead_id {
        Some(ref s) => match uuid::Uuid::parse_str(s) {
            Ok(uuid) => Some(uuid),
            Err(_) => return Err(StatusCode::BAD_REQUEST),
        },
        None => None,
    };
    match service::list(lead_id).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status(&e)),
    }
}

/// GET /api/quotation/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<QuotationView>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match service::get_by_id(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status(&e)),
    }
}

/// POST /api/quotation
pub async fn upsert(Json(dto): Json<QuotationDto>) -> Result<Json<QuotationView>, StatusCode> {
    let result = if dto.id.is_some() {
        service::update(dto).await
    } else {
        service::create(dto).await
    };

    match result {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status(&e)),
    }
}

/// DELETE /api/quotation/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(error_status(&e)),
    }
}

/// POST /api/quotation/preview
pub async fn preview(
    Json(req): Json<QuotationPreviewRequest>,
) -> Json<QuotationPreviewResponse> {
    Json(service::preview(&req))
}
