//! Survey response and email records on top of any [`KvStore`].
//!
//! Each record is a JSON blob under its own id; the ids are also pushed
//! onto an index list (`responses` / `emails`) so they can be listed.

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{KvStore, StoreError};

pub const RESPONSES_LIST: &str = "responses";
pub const EMAILS_LIST: &str = "emails";

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Missing required data")]
    MissingData,

    #[error("Email is required")]
    EmailRequired,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponseRequest {
    pub survey_data: Option<Value>,
    pub results: Option<Value>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResponse {
    pub id: String,
    pub survey_data: Value,
    pub results: Value,
    pub timestamp: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEmailRequest {
    pub email: Option<String>,
    pub response_id: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEmail {
    pub id: String,
    pub email: String,
    pub response_id: Option<String>,
    pub timestamp: String,
    pub created_at: String,
}

/// Everything listed under the two index lists, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredRecords {
    pub responses: Vec<Value>,
    pub emails: Vec<Value>,
}

/// `<prefix>_<unix millis>_<9 base-36 chars>`
pub fn generate_id(prefix: &str, now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{prefix}_{}_{suffix}", now.timestamp_millis())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Absent values plus the empty ones a form might send.
fn is_blank(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Store a completed survey and its results. Returns the new response id.
pub fn save_response(
    store: &dyn KvStore,
    request: SaveResponseRequest,
    now: DateTime<Utc>,
) -> Result<String, RecordError> {
    if is_blank(&request.survey_data) || is_blank(&request.results) {
        return Err(RecordError::MissingData);
    }

    let id = generate_id("response", now);
    let record = StoredResponse {
        id: id.clone(),
        survey_data: request.survey_data.unwrap_or_default(),
        results: request.results.unwrap_or_default(),
        timestamp: request
            .timestamp
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| iso_timestamp(now)),
        created_at: iso_timestamp(now),
    };

    store.set(&id, &serde_json::to_value(&record).map_err(StoreError::from)?)?;
    store.list_push(RESPONSES_LIST, &id)?;

    tracing::info!(response_id = %id, "Survey response saved");
    Ok(id)
}

/// Store a captured email, linking it to a response when one is given.
/// Returns the new email id.
pub fn save_email(
    store: &dyn KvStore,
    request: SaveEmailRequest,
    now: DateTime<Utc>,
) -> Result<String, RecordError> {
    let email = request
        .email
        .filter(|e| !e.is_empty())
        .ok_or(RecordError::EmailRequired)?;
    if !is_valid_email(&email) {
        return Err(RecordError::InvalidEmail);
    }

    let response_id = request.response_id.filter(|r| !r.is_empty());
    let id = generate_id("email", now);
    let record = StoredEmail {
        id: id.clone(),
        email: email.clone(),
        response_id: response_id.clone(),
        timestamp: request
            .timestamp
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| iso_timestamp(now)),
        created_at: iso_timestamp(now),
    };

    store.set(&id, &serde_json::to_value(&record).map_err(StoreError::from)?)?;
    store.list_push(EMAILS_LIST, &id)?;

    if let Some(response_id) = &response_id {
        store.hash_set(&format!("response_emails:{response_id}"), "email", &email)?;
    }

    tracing::info!(email_id = %id, linked = response_id.is_some(), "Email saved");
    Ok(id)
}

fn load_list(store: &dyn KvStore, list: &str) -> Result<Vec<Value>, StoreError> {
    let mut records = Vec::new();
    for id in store.list_range(list, 0, -1)? {
        match store.get(&id)? {
            Some(record) => records.push(record),
            None => tracing::warn!(list, %id, "Indexed record missing from store"),
        }
    }
    Ok(records)
}

pub fn load_all(store: &dyn KvStore) -> Result<StoredRecords, RecordError> {
    Ok(StoredRecords {
        responses: load_list(store, RESPONSES_LIST)?,
        emails: load_list(store, EMAILS_LIST)?,
    })
}
