//! Full survey flow over the HTTP router: analyze, save, link an email,
//! then list everything back.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use hormone_survey_lib::api::survey_api_router;
use hormone_survey_lib::store::{KvStore, MemoryStore};

async fn call(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn survey_submission_round_trip() {
    let store = Arc::new(MemoryStore::new());
    let app = survey_api_router(Some(store.clone() as Arc<dyn KvStore>), false);

    let answers = json!({
        "q1_period": "No period",
        "q4_symptoms": ["Acne"],
        "q7_cravings": ["Sugar"],
        "q10_conditions": ["PCOS"],
        "q11_labs": { "free_t": "3.2", "insulin": "30" }
    });
    let (status, assessment) = call(&app, post("/api/analyze", answers.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assessment["analysis"]["primaryImbalance"], "androgens");

    let (status, saved) = call(
        &app,
        post(
            "/api/save-response",
            json!({ "surveyData": answers, "results": assessment["analysis"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let response_id = saved["responseId"].as_str().unwrap().to_string();

    let (status, email) = call(
        &app,
        post(
            "/api/save-email",
            json!({ "email": "someone@example.com", "responseId": response_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(email["success"], true);

    let (status, listing) = call(
        &app,
        Request::builder()
            .uri("/api/get-responses")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["totalResponses"], 1);
    assert_eq!(listing["totalEmails"], 1);
    assert_eq!(listing["responses"][0]["results"]["primaryImbalance"], "androgens");
    assert_eq!(listing["emails"][0]["responseId"], response_id.as_str());
    assert_eq!(
        store
            .hash_get(&format!("response_emails:{response_id}"), "email")
            .unwrap()
            .as_deref(),
        Some("someone@example.com")
    );
}

#[tokio::test]
async fn analyze_works_without_store() {
    let app = survey_api_router(None, false);
    let (status, assessment) = call(&app, post("/api/analyze", json!({ "q8_stress": "High" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assessment["analysis"]["primaryImbalance"], "cortisol");
}
