//! HTTP layer over the scoring engine and the record store.
//!
//! Exposes survey analysis and persistence as JSON endpoints under
//! `/api/`. The router is composable: `survey_api_router()` returns a
//! `Router` that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::survey_api_router;
pub use server::{SurveyApiServer, ServerError};
pub use types::ApiContext;
