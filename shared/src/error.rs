use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    ForbiddenOperation(String),
    #[error("認証されていないユーザーです。")]
    UnauthenticatedError,
    #[error("{0}")]
    TransactionConflict(String),
    #[error(transparent)]
    TransactionError(sqlx::Error),
    #[error(transparent)]
    SpecificOperationError(sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error(transparent)]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    ConversionEntityError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnprocessableEntity(_)
            | AppError::ValidationError(_)
            | AppError::ConversionEntityError(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthenticatedError => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenOperation(_) => StatusCode::FORBIDDEN,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::TransactionConflict(_) => StatusCode::CONFLICT,
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self, error.message = %self, "Unexpected error happened"
            );
        }
        status_code.into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
