use thiserror::Error;

/// Failures surfaced by the service layer. Handlers map them onto HTTP statuses.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
