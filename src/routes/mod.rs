pub mod submit;

use axum::routing::post;
use axum::Router;
use tower_http::services::ServeDir;

use crate::state::SharedState;

/// `/api/submit` only answers POST. Other methods on the same path fall
/// through to the static files like any unmatched request.
pub fn api_routes(assets: ServeDir) -> Router<SharedState> {
    Router::new().route(
        "/api/submit",
        post(submit::submit).fallback_service(assets),
    )
}
