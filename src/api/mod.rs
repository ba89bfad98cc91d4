//! HTTP API server

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::catalog::CatalogClient;
use crate::store::PlanetStore;

pub mod context;
pub mod error;
pub mod handlers;
pub mod state;

pub use context::RequestContext;
pub use error::ApiError;
pub use state::{ApiOptions, AppState};

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest(
            "/v1",
            Router::new()
                .route(
                    "/planets",
                    post(handlers::create_planet).get(handlers::list_planets),
                )
                .route(
                    "/planets/:planet_id",
                    get(handlers::get_planet).delete(handlers::delete_planet),
                ),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Convenience helper wiring a store and catalog with default options
pub fn create_planet_router(
    store: Arc<dyn PlanetStore>,
    catalog: Arc<dyn CatalogClient>,
) -> Router {
    create_router(AppState::new(store, catalog))
}
