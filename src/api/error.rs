//! API error types with structured JSON responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::store::records::RecordError;

pub const STORE_UNAVAILABLE: &str =
    "Database connection not available. Please check environment variables.";

/// Error body shared by every failing route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Store not configured")]
    ServiceUnavailable,
    /// `detail` is only filled in when the server runs in development.
    #[error("{message}")]
    Internal {
        message: &'static str,
        detail: Option<String>,
    },
}

impl ApiError {
    /// Log the underlying failure and keep it for the client only in
    /// development.
    pub fn internal(message: &'static str, err: impl std::fmt::Display, development: bool) -> Self {
        let detail = err.to_string();
        tracing::error!(%detail, "{message}");
        ApiError::Internal {
            message,
            detail: development.then_some(detail),
        }
    }

    /// Validation failures become 400s; store failures become a 500
    /// carrying `failure` as the message.
    pub fn from_record(err: RecordError, failure: &'static str, development: bool) -> Self {
        match err {
            RecordError::Store(e) => ApiError::internal(failure, e, development),
            validation => ApiError::BadRequest(validation.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ApiError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string(), None)
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, None),
            ApiError::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, STORE_UNAVAILABLE.to_string(), None)
            }
            ApiError::Internal { message, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                message.to_string(),
                // Internal errors hide details from client
                Some(detail.unwrap_or_else(|| "Internal server error".to_string())),
            ),
        };

        let body = ErrorBody {
            success: false,
            message,
            error,
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn method_not_allowed_returns_405() {
        let response = ApiError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Method not allowed");
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn bad_request_returns_400() {
        let response = ApiError::BadRequest("Email is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Email is required");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn unconfigured_store_returns_503() {
        let response = ApiError::ServiceUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["message"], STORE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn internal_hides_detail_outside_development() {
        let response = ApiError::internal("Failed to save response", "connection reset", false)
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Failed to save response");
        assert_eq!(json["error"], "Internal server error");
    }

    #[tokio::test]
    async fn internal_shows_detail_in_development() {
        let response =
            ApiError::internal("Failed to save email", "connection reset", true).into_response();
        assert_eq!(body_json(response).await["error"], "connection reset");
    }

    #[test]
    fn record_errors_map_by_kind() {
        let validation = ApiError::from_record(RecordError::InvalidEmail, "Failed to save email", false);
        assert!(matches!(validation, ApiError::BadRequest(ref m) if m == "Invalid email format"));

        let store = ApiError::from_record(
            RecordError::Store(StoreError::Command("WRONGTYPE".into())),
            "Failed to save email",
            false,
        );
        assert!(matches!(
            store,
            ApiError::Internal { message: "Failed to save email", detail: None }
        ));
    }
}
