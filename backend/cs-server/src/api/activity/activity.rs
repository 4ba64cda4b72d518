//! Board activity feed handler and the shared activity recorder.

use crate::api::authorize::require_board_access;
use crate::{ActivityDto, ActivityListResponse, ApiError, ApiResult, ListActivityQuery, UserId};

use cs_core::{Activity, Permission};
use cs_db::ActivityRepository;
use cs_ws::AppState;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use sqlx::SqlitePool;
use uuid::Uuid;

const MAX_PAGE_SIZE: i64 = 200;

/// GET /api/v1/boards/:id/activity
///
/// Paged board activity feed, newest first
pub async fn list_activity(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Query(query): Query<ListActivityQuery>,
) -> ApiResult<Json<ActivityListResponse>> {
    let board_id = Uuid::parse_str(&id)?;

    require_board_access(&state.pool, board_id, user_id, Permission::View).await?;

    if query.limit < 1 || query.limit > MAX_PAGE_SIZE {
        return Err(ApiError::validation(
            format!("Limit must be between 1 and {}", MAX_PAGE_SIZE),
            Some("limit"),
        ));
    }
    if query.offset < 0 {
        return Err(ApiError::validation(
            "Offset must not be negative",
            Some("offset"),
        ));
    }

    let repo = ActivityRepository::new(state.pool.clone());
    let entries = repo
        .find_by_board(board_id, query.limit, query.offset)
        .await?;
    let total = repo.count_by_board(board_id).await?;
    let has_more = query.offset + (entries.len() as i64) < total;

    Ok(Json(ActivityListResponse {
        activity: entries.into_iter().map(ActivityDto::from).collect(),
        total,
        limit: query.limit,
        offset: query.offset,
        has_more,
    }))
}

/// Record an activity entry, best effort.
///
/// The feed is informational; a failed write must never fail the
/// operation that produced it.
pub async fn record(pool: &SqlitePool, activity: Activity) {
    let repo = ActivityRepository::new(pool.clone());
    if let Err(e) = repo.create(&activity).await {
        log::warn!("Failed to record activity {}: {}", activity.action, e);
    }
}
