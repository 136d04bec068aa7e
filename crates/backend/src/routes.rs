use axum::{routing::get, Router};

use crate::handlers::{self, AppState};

/// Route table of the application.
///
/// The inventory gateway is a single endpoint: reads dispatch on the `action`
/// query parameter, writes on the `action` field of the POST body. OPTIONS
/// preflights are answered by the CORS layer installed in `main`.
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/inventory",
            get(handlers::inventory::handle_get).post(handlers::inventory::handle_post),
        )
        .with_state(state)
}
