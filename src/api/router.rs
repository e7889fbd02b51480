//! Survey API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Layers (outermost → innermost): CORS → request logging → handler.

use std::sync::Arc;

use axum::routing::{get, post, MethodRouter};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::store::KvStore;

/// Build the survey API router over an optional store.
pub fn survey_api_router(store: Option<Arc<dyn KvStore>>, development: bool) -> Router {
    build_router(ApiContext::new(store, development))
}

/// Unsupported verbs on a known path answer 405 with the JSON body.
fn only(route: MethodRouter<ApiContext>) -> MethodRouter<ApiContext> {
    route.fallback(endpoints::method_not_allowed)
}

pub(crate) fn build_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/health", only(get(endpoints::health::check)))
        .route("/analyze", only(post(endpoints::analyze::analyze)))
        .route("/save-response", only(post(endpoints::responses::save)))
        .route("/save-email", only(post(endpoints::emails::save)))
        .route("/get-responses", only(get(endpoints::responses::list)))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(CorsLayer::permissive())
}
