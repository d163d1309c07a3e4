//! API module
//!
//! HTTP API endpoints, middleware and router assembly.

pub mod extract;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domain::paging::DEFAULT_PAGE_SIZE;
use crate::store::RestaurantStore;

pub use routes::create_router;

/// Upper bound on `size` when no configuration is supplied
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Shared state handed to every route
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RestaurantStore>,
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self {
            store,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    pub fn from_config(store: Arc<dyn RestaurantStore>, config: &Config) -> Self {
        Self {
            store,
            default_page_size: config.default_page_size(),
            max_page_size: config.max_page_size,
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Layers run last-added first: identity -> logging -> handler
    let api_router = create_router()
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(axum::middleware::from_fn(middleware::identity_middleware));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_router)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
