//! Integration tests for board API handlers
mod common;

use crate::common::{add_test_member, create_test_app_state, create_test_board, create_test_user};

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use cs_server::routes::build_router;

fn json_request(method: &str, uri: &str, user_id: Uuid, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-User-Id", user_id.to_string())
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str, user_id: Uuid) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("X-User-Id", user_id.to_string())
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_list_boards_requires_identity() {
    let state = create_test_app_state().await;
    let app = build_router(state, &[]);

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/boards")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_create_board_and_fetch_snapshot() {
    let state = create_test_app_state().await;
    let user_id = Uuid::new_v4();
    create_test_user(&state.pool, user_id).await;

    let app = build_router(state.clone(), &[]);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/boards",
            user_id,
            serde_json::json!({ "title": "Launch Plan", "description": "Q3 launch" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["board"]["title"], "Launch Plan");
    assert_eq!(json["board"]["background_color"], "#0079bf");
    let board_id = json["board"]["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(get_request(&format!("/api/v1/boards/{}", board_id), user_id))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let snapshot = body_json(response).await;
    assert_eq!(snapshot["title"], "Launch Plan");
    assert_eq!(snapshot["lists"].as_array().unwrap().len(), 0);
    assert_eq!(snapshot["members"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_board_rejects_empty_title() {
    let state = create_test_app_state().await;
    let user_id = Uuid::new_v4();
    create_test_user(&state.pool, user_id).await;

    let app = build_router(state, &[]);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/boards",
            user_id,
            serde_json::json!({ "title": "   " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "title");
}

#[tokio::test]
async fn test_get_board_not_found() {
    let state = create_test_app_state().await;
    let user_id = Uuid::new_v4();
    create_test_user(&state.pool, user_id).await;

    let app = build_router(state, &[]);

    let response = app
        .oneshot(get_request(
            &format!("/api/v1/boards/{}", Uuid::new_v4()),
            user_id,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_board_forbidden_for_non_member() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    create_test_user(&state.pool, stranger).await;
    let board_id = create_test_board(&state.pool, owner).await;

    let app = build_router(state, &[]);

    let response = app
        .oneshot(get_request(&format!("/api/v1/boards/{}", board_id), stranger))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_viewer_can_read_but_not_update() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    let viewer = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    create_test_user(&state.pool, viewer).await;
    let board_id = create_test_board(&state.pool, owner).await;
    add_test_member(&state.pool, board_id, viewer, "viewer").await;

    let app = build_router(state, &[]);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/boards/{}", board_id), viewer))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/boards/{}", board_id),
            viewer,
            serde_json::json!({ "title": "Hijacked" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_add_member_then_board_listed_for_member() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    let member = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    create_test_user(&state.pool, member).await;
    let board_id = create_test_board(&state.pool, owner).await;

    let app = build_router(state, &[]);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/boards/{}/members", board_id),
            owner,
            serde_json::json!({ "user_id": member.to_string(), "role": "member" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/api/v1/boards", member))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let boards = json["boards"].as_array().unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0]["id"], board_id.to_string());
}

#[tokio::test]
async fn test_add_member_requires_admin() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    let member = Uuid::new_v4();
    let newcomer = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    create_test_user(&state.pool, member).await;
    create_test_user(&state.pool, newcomer).await;
    let board_id = create_test_board(&state.pool, owner).await;
    add_test_member(&state.pool, board_id, member, "member").await;

    let app = build_router(state, &[]);

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/boards/{}/members", board_id),
            member,
            serde_json::json!({ "user_id": newcomer.to_string(), "role": "member" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_remove_member_revokes_access() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    let member = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    create_test_user(&state.pool, member).await;
    let board_id = create_test_board(&state.pool, owner).await;
    add_test_member(&state.pool, board_id, member, "member").await;

    let app = build_router(state, &[]);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/boards/{}/members/{}", board_id, member))
                .header("X-User-Id", owner.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request(&format!("/api/v1/boards/{}", board_id), member))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_activity_feed_pages_newest_first() {
    let state = create_test_app_state().await;
    let user_id = Uuid::new_v4();
    create_test_user(&state.pool, user_id).await;

    let app = build_router(state, &[]);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/boards",
            user_id,
            serde_json::json!({ "title": "Feed Board" }),
        ))
        .await
        .unwrap();
    let board_id = body_json(response).await["board"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/boards/{}", board_id),
            user_id,
            serde_json::json!({ "title": "Feed Board v2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request(
            &format!("/api/v1/boards/{}/activity?limit=1&offset=0", board_id),
            user_id,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["limit"], 1);
    assert_eq!(json["has_more"], true);

    let entries = json["activity"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "board_updated");
}

#[tokio::test]
async fn test_update_board_requires_admin_role() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    let member = Uuid::new_v4();
    let admin = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    create_test_user(&state.pool, member).await;
    create_test_user(&state.pool, admin).await;
    let board_id = create_test_board(&state.pool, owner).await;
    add_test_member(&state.pool, board_id, member, "member").await;
    add_test_member(&state.pool, board_id, admin, "admin").await;

    let app = build_router(state, &[]);

    // A plain member can edit cards, but board metadata is admin territory
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/boards/{}", board_id),
            member,
            serde_json::json!({ "title": "Renamed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/boards/{}", board_id),
            admin,
            serde_json::json!({ "title": "Renamed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["board"]["title"], "Renamed");
}

#[tokio::test]
async fn test_delete_board_is_owner_only() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    let admin = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    create_test_user(&state.pool, admin).await;
    let board_id = create_test_board(&state.pool, owner).await;
    add_test_member(&state.pool, board_id, admin, "admin").await;

    let app = build_router(state, &[]);

    // Even an admin member cannot delete the board
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/boards/{}", board_id))
                .header("X-User-Id", admin.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/boards/{}", board_id))
                .header("X-User-Id", owner.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request(&format!("/api/v1/boards/{}", board_id), owner))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
