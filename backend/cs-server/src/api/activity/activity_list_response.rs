use crate::ActivityDto;

use serde::Serialize;

/// One page of the board activity feed
#[derive(Debug, Serialize)]
pub struct ActivityListResponse {
    pub activity: Vec<ActivityDto>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}
