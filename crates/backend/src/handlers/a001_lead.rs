use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use contracts::domain::a001_lead::aggregate::{
    Lead, LeadDto, LeadListFilter, SetFinanceStatusRequest, UpdateLeadStatusRequest,
};

use super::error_status;
use crate::domain::a001_lead::service;

/// GET /api/lead
pub async fn list_all(
    Query(filter): Query<LeadListFilter>,
) -> Result<Json<Vec<Lead>>, StatusCode> {
    match service::list(&filter).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status(&e)),
    }
}

/// GET /api/lead/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Lead>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match service::get_by_id(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status(&e)),
    }
}

/// POST /api/lead
pub async fn create(Json(dto): Json<LeadDto>) -> Result<Json<Lead>, StatusCode> {
    match service::create(dto).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status(&e)),
    }
}

/// PUT /api/lead/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<LeadDto>,
) -> Result<Json<Lead>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match service::update(uuid, dto).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status(&e)),
    }
}

/// POST /api/lead/:id/status
pub async fn update_status(
    Path(id): Path<String>,
    Json(req): Json<UpdateLeadStatusRequest>,
) -> Result<Json<Lead>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match service::update_status(uuid, req).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status(&e)),
    }
}

/// POST /api/lead/:id/finance-status
pub async fn set_finance_status(
    Path(id): Path<String>,
    Json(req): Json<SetFinanceStatusRequest>,
) -> Result<Json<Lead>, StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(StatusCode::BAD_REQUEST),
    };
    match service::set_finance_status(uuid, req).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => Err(error_status(&e)),
    }
}

/// DELETE /api/lead/:id
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

/// GET /api/lead/export.csv
pub async fn export_csv() -> Result<impl IntoResponse, StatusCode> {
    let csv = service::export_csv().await.map_err(|e| {
        tracing::error!("CSV export failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"leads.csv\"",
            ),
        ],
        csv,
    ))
}

/// POST /api/lead/testdata
pub async fn insert_test_data() -> StatusCode {
    match service::insert_test_data().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
