use cs_core::Activity;

use serde::Serialize;

/// Activity entry for JSON serialization
#[derive(Debug, Serialize)]
pub struct ActivityDto {
    pub id: String,
    pub board_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    pub user_id: String,
    pub action: String,
    pub description: String,
    pub metadata: serde_json::Value,
    pub created_at: i64,
}

impl From<Activity> for ActivityDto {
    fn from(a: Activity) -> Self {
        Self {
            id: a.id.to_string(),
            board_id: a.board_id.to_string(),
            task_id: a.task_id.map(|id| id.to_string()),
            list_id: a.list_id.map(|id| id.to_string()),
            user_id: a.user_id.to_string(),
            action: a.action,
            description: a.description,
            metadata: a.metadata,
            created_at: a.created_at.timestamp(),
        }
    }
}
