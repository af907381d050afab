// routes.rs
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::service::PollService;

pub fn create_routes(service: PollService) -> Router {
    Router::new()
        .route(
            "/polls",
            get(handlers::list_own_polls).post(handlers::create_poll),
        )
        .route(
            "/polls/{id}",
            get(handlers::get_poll)
                .put(handlers::update_poll)
                .delete(handlers::delete_poll),
        )
        .route("/polls/{id}/vote", post(handlers::cast_vote))
        .route("/polls/{id}/results", get(handlers::get_results))
        .route("/admin/polls", get(handlers::list_all_polls))
        .route("/admin/polls/{id}", delete(handlers::delete_poll))
        .layer(CorsLayer::permissive())
        .with_state(service)
}
