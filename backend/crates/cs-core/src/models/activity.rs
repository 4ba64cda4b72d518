use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Append-only activity feed entry. Written once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,

    pub board_id: Uuid,
    pub task_id: Option<Uuid>,
    pub list_id: Option<Uuid>,

    pub user_id: Uuid,

    /// Action key, e.g. "moved_task" or "added_comment".
    pub action: String,
    /// Human-readable summary for the feed.
    pub description: String,

    pub metadata: serde_json::Value,

    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(board_id: Uuid, user_id: Uuid, action: &str, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            board_id,
            task_id: None,
            list_id: None,
            user_id,
            action: action.to_string(),
            description,
            metadata: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }

    pub fn with_task(mut self, task_id: Uuid) -> Self {
        self.task_id = Some(task_id);
        self
    }

    pub fn with_list(mut self, list_id: Uuid) -> Self {
        self.list_id = Some(list_id);
        self
    }
}
