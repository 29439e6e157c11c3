pub mod a001_lead;
pub mod a002_quotation;
pub mod p900_pipeline_board;

use axum::http::StatusCode;

use crate::shared::error::DomainError;

/// Map a domain error onto its HTTP status
pub fn error_status(e: &DomainError) -> StatusCode {
    match e {
        DomainError::NotFound => StatusCode::NOT_FOUND,
        DomainError::DuplicateLead => StatusCode::CONFLICT,
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::InvalidStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Database(err) => {
            tracing::error!("Database error: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
