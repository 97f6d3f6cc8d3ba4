use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_openai::error::OpenAIError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Upstream call timed out after {0}s")]
    UpstreamTimeout(u64),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            AppError::UpstreamError(_) => "UPSTREAM_ERROR",
            AppError::MalformedUpstreamResponse(_) => "MALFORMED_UPSTREAM_RESPONSE",
            AppError::UpstreamTimeout(_) => "UPSTREAM_TIMEOUT",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Failures of the external agent or vector store that may succeed on a second attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::UpstreamError(_)
                | AppError::MalformedUpstreamResponse(_)
                | AppError::UpstreamTimeout(_)
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedUpstreamResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<OpenAIError> for AppError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::JSONDeserialize(..) => {
                AppError::MalformedUpstreamResponse(err.to_string())
            }
            other => AppError::UpstreamError(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::UpstreamError(format!("request timed out: {}", err))
        } else if err.is_decode() {
            AppError::MalformedUpstreamResponse(err.to_string())
        } else {
            AppError::UpstreamError(err.to_string())
        }
    }
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AppError::ValidationError(format!("Invalid multipart payload: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::MalformedUpstreamResponse("test".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::UpstreamTimeout(30).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::ValidationError("answers[0].question_index".into());
        assert_eq!(
            err.to_string(),
            "Validation error: answers[0].question_index"
        );
        assert_eq!(
            AppError::UpstreamTimeout(120).to_string(),
            "Upstream call timed out after 120s"
        );
    }

    #[test]
    fn test_only_upstream_failures_are_retryable() {
        assert!(AppError::UpstreamError("502".into()).is_retryable());
        assert!(AppError::UpstreamTimeout(1).is_retryable());
        assert!(AppError::MalformedUpstreamResponse("bad".into()).is_retryable());
        assert!(!AppError::ValidationError("bad".into()).is_retryable());
        assert!(!AppError::ConfigurationError("missing".into()).is_retryable());
    }

    #[test]
    fn test_error_response_body_carries_kind() {
        let response = AppError::UpstreamError("boom".into()).error_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
