//! Survey response endpoints.
//!
//! - `POST /api/save-response`: persist a completed survey
//! - `GET /api/get-responses`: list every stored response and email

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ResponsesReply, SaveResponseReply};
use crate::store::records::{self, SaveResponseRequest};

const SAVE_FAILED: &str = "Failed to save response";
const LOAD_FAILED: &str = "Failed to retrieve data";

pub async fn save(
    State(ctx): State<ApiContext>,
    payload: Result<Json<SaveResponseRequest>, JsonRejection>,
) -> Result<Json<SaveResponseReply>, ApiError> {
    // No store means 503 whatever the body holds.
    ctx.require_store()?;
    let Json(request) = payload?;
    let development = ctx.development;

    let response_id = ctx
        .with_store(SAVE_FAILED, move |store| {
            records::save_response(store, request, chrono::Utc::now())
                .map_err(|e| ApiError::from_record(e, SAVE_FAILED, development))
        })
        .await?;

    Ok(Json(SaveResponseReply {
        success: true,
        response_id,
        message: "Response saved successfully",
    }))
}

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<ResponsesReply>, ApiError> {
    let development = ctx.development;

    let stored = ctx
        .with_store(LOAD_FAILED, move |store| {
            records::load_all(store).map_err(|e| ApiError::from_record(e, LOAD_FAILED, development))
        })
        .await?;

    Ok(Json(ResponsesReply {
        success: true,
        total_responses: stored.responses.len(),
        total_emails: stored.emails.len(),
        responses: stored.responses,
        emails: stored.emails,
    }))
}
