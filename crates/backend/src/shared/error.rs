use thiserror::Error;

/// Domain error taxonomy
///
/// Every failure a service can report to the boundary. Handlers map the
/// variants onto HTTP status codes; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Record not found")]
    NotFound,

    #[error("A lead with this phone or email already exists")]
    DuplicateLead,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown status: {0}")]
    InvalidStatus(String),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}
