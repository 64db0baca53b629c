pub mod assets;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod reply;
pub mod routes;
pub mod state;
pub mod store;
pub mod submission;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::clock::SystemClock;
use crate::config::{Config, KvBackend};
use crate::state::{AppState, SharedState};
use crate::store::{CloudflareKv, KvStore, MemoryStore, StoreError};

/// Build the store selected by the configuration.
pub fn build_store(config: &Config) -> Result<Arc<dyn KvStore>, StoreError> {
    match &config.kv {
        KvBackend::Memory => {
            tracing::warn!("Using in-memory store, submissions are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        KvBackend::Cloudflare(cf) => {
            tracing::info!("Using Cloudflare KV namespace {}", cf.namespace_id);
            Ok(Arc::new(CloudflareKv::new(cf)?))
        }
    }
}

pub fn build_app(config: Config, store: Arc<dyn KvStore>) -> Router {
    let state: SharedState = Arc::new(AppState {
        config,
        store,
        clock: Arc::new(SystemClock),
    });

    build_router(state)
}

pub fn build_router(state: SharedState) -> Router {
    let assets = assets::serve(&state.config.static_dir);

    Router::new()
        .merge(routes::api_routes(assets.clone()))
        .fallback_service(assets)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}
