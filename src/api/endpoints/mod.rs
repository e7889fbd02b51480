//! Route handlers, one module per concern.

pub mod analyze;
pub mod emails;
pub mod health;
pub mod responses;

use crate::api::error::ApiError;

/// Fallback for any verb a route doesn't serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
