//! REST error mapping for the types registry.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::dto::AtlasErrorDto;
use crate::domain::error::DomainError;

const MISSING_API_VERSION_CODE: &str = "ATLAS-400-00-08A";
const BAD_REQUEST_CODE: &str = "ATLAS-400-00-001";
const INTERNAL_CODE: &str = "ATLAS-500-00-001";

/// Everything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// A term-template route was called without `api-version`.
    MissingApiVersion,
    /// The body or query string could not be parsed.
    BadRequest(String),
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    fn parts(self) -> (StatusCode, &'static str, String) {
        match self {
            Self::Domain(e) => {
                let status =
                    StatusCode::from_u16(e.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, e.error_code(), e.to_string())
            }
            Self::MissingApiVersion => (
                StatusCode::BAD_REQUEST,
                MISSING_API_VERSION_CODE,
                "api-version query parameter is required".to_owned(),
            ),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, BAD_REQUEST_CODE, message),
            Self::Internal(message) => {
                tracing::error!(error = %message, "Internal error in types registry");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_CODE,
                    "An internal error occurred".to_owned(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_client_error() {
            tracing::debug!(%status, code, %message, "request rejected");
        }

        let body = AtlasErrorDto {
            error_code: code.to_owned(),
            error_message: message,
        };
        (status, Json(body)).into_response()
    }
}
