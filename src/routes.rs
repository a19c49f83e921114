use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::handler::{self, AppState};

pub fn routes(state: AppState) -> Router {
    // The hook is called from pages on the tenant's own origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handler::healthcheck))
        .route("/page-loads", post(handler::page_load))
        .layer(cors)
        .with_state(state)
}
