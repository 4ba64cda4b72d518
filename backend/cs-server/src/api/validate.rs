//! Shared request validation helpers for the REST handlers.

use crate::{ApiError, ApiResult};

const MAX_TITLE_LEN: usize = 200;

/// Trim and bound-check a title field
pub fn title(raw: &str) -> ApiResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ApiError::validation("Title must not be empty", Some("title")));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(ApiError::validation(
            format!("Title must be at most {} characters", MAX_TITLE_LEN),
            Some("title"),
        ));
    }
    Ok(title.to_string())
}

/// A position for inserting into a container of `count` items.
///
/// Valid range is [0, count]: count means append.
pub fn insert_position(position: i32, count: i64) -> ApiResult<()> {
    if position < 0 || i64::from(position) > count {
        return Err(ApiError::validation(
            format!("Position must be between 0 and {}", count),
            Some("position"),
        ));
    }
    Ok(())
}

/// A destination position for moving within a container of `count` items.
///
/// The item already occupies a slot, so the valid range is [0, count - 1].
pub fn move_position(position: i32, count: i64) -> ApiResult<()> {
    if position < 0 || i64::from(position) >= count {
        return Err(ApiError::validation(
            format!("Position must be between 0 and {}", count.max(1) - 1),
            Some("position"),
        ));
    }
    Ok(())
}
