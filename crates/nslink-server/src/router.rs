use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::links;
use crate::state::AppState;

/// Build the axum router with all nslink endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/", get(handler::get_domain).put(handler::put_domain))
        .route("/groups", post(handler::create_group))
        .route(
            "/groups/:id",
            get(handler::get_group).delete(handler::delete_group),
        )
        .route(
            "/groups/:id/*rest",
            get(links::get_group_resource)
                .put(links::put_group_resource)
                .delete(links::delete_group_resource),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
