pub mod handlers;
pub mod json;

use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::store::PropertyStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PropertyStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/properties",
            get(handlers::list_properties).post(handlers::create_property),
        )
        .route(
            "/properties/{id}",
            put(handlers::update_property).delete(handlers::delete_property),
        )
        .fallback(handlers::api_not_found)
}

/// Build the application router. With `assets` set, the built client is served
/// for every path outside `/api`; unknown `/api` paths stay JSON 404s.
pub fn build_router(state: AppState, assets: Option<&Path>) -> Router {
    let mut router = Router::new().nest("/api", api_routes()).with_state(state);

    if let Some(dir) = assets {
        info!("Serving client assets from {}", dir.display());
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        router = router.fallback_service(spa);
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
