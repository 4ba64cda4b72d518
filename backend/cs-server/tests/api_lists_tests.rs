//! Integration tests for list API handlers
//!
//! The snapshot endpoint is the oracle for ordering: after every
//! structural change, lists must come back contiguous and in position
//! order.
mod common;

use crate::common::{
    add_test_member, create_test_app_state, create_test_board, create_test_list, create_test_task,
    create_test_user,
};

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

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Fetch the board snapshot and return (title, position) per list
async fn list_order(
    app: &axum::Router,
    board_id: Uuid,
    user_id: Uuid,
) -> Vec<(String, i64)> {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/boards/{}", board_id))
                .header("X-User-Id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = body_json(response).await;
    snapshot["lists"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| {
            (
                l["title"].as_str().unwrap().to_string(),
                l["position"].as_i64().unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_create_list_appends_to_end() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    let board_id = create_test_board(&state.pool, owner).await;

    let app = build_router(state, &[]);

    for title in ["Todo", "Doing", "Done"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/boards/{}/lists", board_id),
                owner,
                serde_json::json!({ "title": title }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let order = list_order(&app, board_id, owner).await;
    assert_eq!(
        order,
        vec![
            ("Todo".to_string(), 0),
            ("Doing".to_string(), 1),
            ("Done".to_string(), 2)
        ]
    );
}

#[tokio::test]
async fn test_create_list_at_position_shifts_rest() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    let board_id = create_test_board(&state.pool, owner).await;
    create_test_list(&state.pool, board_id, 0).await;
    create_test_list(&state.pool, board_id, 1).await;

    let app = build_router(state, &[]);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/boards/{}/lists", board_id),
            owner,
            serde_json::json!({ "title": "Inbox", "position": 0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let order = list_order(&app, board_id, owner).await;
    assert_eq!(
        order,
        vec![
            ("Inbox".to_string(), 0),
            ("List 0".to_string(), 1),
            ("List 1".to_string(), 2)
        ]
    );
}

#[tokio::test]
async fn test_create_list_position_out_of_range() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    let board_id = create_test_board(&state.pool, owner).await;

    let app = build_router(state, &[]);

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/boards/{}/lists", board_id),
            owner,
            serde_json::json!({ "title": "Orphan", "position": 5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "position");
}

#[tokio::test]
async fn test_rename_list() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    let board_id = create_test_board(&state.pool, owner).await;
    let list_id = create_test_list(&state.pool, board_id, 0).await;

    let app = build_router(state, &[]);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/lists/{}", list_id),
            owner,
            serde_json::json!({ "title": "Backlog" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["list"]["title"], "Backlog");
    assert_eq!(json["list"]["position"], 0);
}

#[tokio::test]
async fn test_move_list_to_front() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    let board_id = create_test_board(&state.pool, owner).await;
    create_test_list(&state.pool, board_id, 0).await;
    create_test_list(&state.pool, board_id, 1).await;
    let last = create_test_list(&state.pool, board_id, 2).await;

    let app = build_router(state, &[]);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/lists/{}/move", last),
            owner,
            serde_json::json!({ "position": 0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The move responds with the board's full re-ordered list set
    let json = body_json(response).await;
    let moved: Vec<(String, i64)> = json["lists"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| {
            (
                l["title"].as_str().unwrap().to_string(),
                l["position"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        moved,
        vec![
            ("List 2".to_string(), 0),
            ("List 0".to_string(), 1),
            ("List 1".to_string(), 2)
        ]
    );

    let order = list_order(&app, board_id, owner).await;
    assert_eq!(
        order,
        vec![
            ("List 2".to_string(), 0),
            ("List 0".to_string(), 1),
            ("List 1".to_string(), 2)
        ]
    );
}

#[tokio::test]
async fn test_move_list_noop_keeps_order() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    let board_id = create_test_board(&state.pool, owner).await;
    create_test_list(&state.pool, board_id, 0).await;
    let middle = create_test_list(&state.pool, board_id, 1).await;
    create_test_list(&state.pool, board_id, 2).await;

    let app = build_router(state, &[]);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/lists/{}/move", middle),
            owner,
            serde_json::json!({ "position": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let order = list_order(&app, board_id, owner).await;
    assert_eq!(
        order,
        vec![
            ("List 0".to_string(), 0),
            ("List 1".to_string(), 1),
            ("List 2".to_string(), 2)
        ]
    );
}

#[tokio::test]
async fn test_move_list_position_out_of_range() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    let board_id = create_test_board(&state.pool, owner).await;
    let list_id = create_test_list(&state.pool, board_id, 0).await;

    let app = build_router(state, &[]);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/lists/{}/move", list_id),
            owner,
            serde_json::json!({ "position": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_list_closes_gap() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    let board_id = create_test_board(&state.pool, owner).await;
    create_test_list(&state.pool, board_id, 0).await;
    let middle = create_test_list(&state.pool, board_id, 1).await;
    create_test_list(&state.pool, board_id, 2).await;

    let app = build_router(state, &[]);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/lists/{}", middle))
                .header("X-User-Id", owner.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let order = list_order(&app, board_id, owner).await;
    assert_eq!(
        order,
        vec![("List 0".to_string(), 0), ("List 2".to_string(), 1)]
    );
}

#[tokio::test]
async fn test_get_board_lists_returns_ordered_lists_with_tasks() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    let board_id = create_test_board(&state.pool, owner).await;
    let first = create_test_list(&state.pool, board_id, 0).await;
    create_test_list(&state.pool, board_id, 1).await;
    create_test_task(&state.pool, first, board_id, "T1", 0).await;
    create_test_task(&state.pool, first, board_id, "T2", 1).await;

    let app = build_router(state, &[]);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/boards/{}/lists", board_id))
                .header("X-User-Id", owner.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let lists = json["lists"].as_array().unwrap();
    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0]["title"], "List 0");
    assert_eq!(lists[1]["title"], "List 1");

    let tasks = lists[0]["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "T1");
    assert_eq!(tasks[1]["title"], "T2");
    assert!(lists[1]["tasks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_viewer_cannot_create_list() {
    let state = create_test_app_state().await;
    let owner = Uuid::new_v4();
    let viewer = Uuid::new_v4();
    create_test_user(&state.pool, owner).await;
    create_test_user(&state.pool, viewer).await;
    let board_id = create_test_board(&state.pool, owner).await;
    add_test_member(&state.pool, board_id, viewer, "viewer").await;

    let app = build_router(state, &[]);

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/boards/{}/lists", board_id),
            viewer,
            serde_json::json!({ "title": "Sneaky" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
