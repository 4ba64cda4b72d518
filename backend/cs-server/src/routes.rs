use crate::api::{activity, boards, comments, lists, tasks};
use crate::health;

use cs_ws::AppState;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        // WebSocket endpoint
        .route("/ws", get(cs_ws::handler))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Boards
        .route(
            "/api/v1/boards",
            get(boards::boards::list_boards).post(boards::boards::create_board),
        )
        .route(
            "/api/v1/boards/{id}",
            get(boards::boards::get_board)
                .put(boards::boards::update_board)
                .delete(boards::boards::delete_board),
        )
        .route(
            "/api/v1/boards/{id}/members",
            post(boards::boards::add_member),
        )
        .route(
            "/api/v1/boards/{id}/members/{user_id}",
            axum::routing::delete(boards::boards::remove_member),
        )
        .route(
            "/api/v1/boards/{id}/activity",
            get(activity::activity::list_activity),
        )
        // Lists
        .route(
            "/api/v1/boards/{id}/lists",
            get(lists::lists::list_lists).post(lists::lists::create_list),
        )
        .route(
            "/api/v1/lists/{id}",
            put(lists::lists::update_list).delete(lists::lists::delete_list),
        )
        .route("/api/v1/lists/{id}/move", put(lists::lists::move_list))
        // Tasks
        .route(
            "/api/v1/lists/{id}/tasks",
            get(tasks::tasks::list_tasks).post(tasks::tasks::create_task),
        )
        .route(
            "/api/v1/tasks/{id}",
            get(tasks::tasks::get_task)
                .put(tasks::tasks::update_task)
                .delete(tasks::tasks::delete_task),
        )
        .route("/api/v1/tasks/{id}/move", put(tasks::tasks::move_task))
        .route(
            "/api/v1/tasks/{id}/complete",
            put(tasks::tasks::toggle_complete),
        )
        .route(
            "/api/v1/tasks/{id}/assignees",
            put(tasks::tasks::set_assignees),
        )
        .route(
            "/api/v1/boards/{id}/tasks/search",
            get(tasks::tasks::search_tasks),
        )
        // Comments
        .route(
            "/api/v1/tasks/{id}/comments",
            get(comments::comments::list_comments).post(comments::comments::create_comment),
        )
        .route(
            "/api/v1/comments/{id}",
            put(comments::comments::update_comment).delete(comments::comments::delete_comment),
        )
        // Add shared state
        .with_state(state)
        // CORS middleware
        .layer(cors_layer(allowed_origins))
}

/// Build the CORS layer: an empty origin list means any origin is allowed
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
