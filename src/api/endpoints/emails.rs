//! `POST /api/save-email`: capture an email, optionally linked to a
//! saved response.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SaveEmailReply};
use crate::store::records::{self, SaveEmailRequest};

const SAVE_FAILED: &str = "Failed to save email";

pub async fn save(
    State(ctx): State<ApiContext>,
    payload: Result<Json<SaveEmailRequest>, JsonRejection>,
) -> Result<Json<SaveEmailReply>, ApiError> {
    // No store means 503 whatever the body holds.
    ctx.require_store()?;
    let Json(request) = payload?;
    let development = ctx.development;

    let email_id = ctx
        .with_store(SAVE_FAILED, move |store| {
            records::save_email(store, request, chrono::Utc::now())
                .map_err(|e| ApiError::from_record(e, SAVE_FAILED, development))
        })
        .await?;

    Ok(Json(SaveEmailReply {
        success: true,
        email_id,
        message: "Email saved successfully",
    }))
}
