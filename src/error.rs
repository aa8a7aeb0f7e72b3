use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the lunch-week handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// Bad path ids, mismatched ids, or an unreadable body.
    #[error("{0}")]
    Validation(String),

    #[error("{message}: {cause}")]
    Store { message: String, cause: anyhow::Error },
}

impl ApiError {
    /// Wraps a store failure with the message shown to the client.
    pub fn store(message: impl Into<String>) -> impl FnOnce(anyhow::Error) -> Self {
        let message = message.into();
        move |cause| ApiError::Store { message, cause }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::NotFound(message) | ApiError::Validation(message) => {
                json!({ "message": message })
            }
            ApiError::Store { message, cause } => {
                tracing::error!("{message}: {cause:#}");
                json!({ "message": message, "error": cause.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        let err = ApiError::store("Error creating Lunch Week")(anyhow::anyhow!("boom"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error creating Lunch Week: boom");
    }
}
