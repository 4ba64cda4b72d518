use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub task_id: Uuid,
    pub author_id: Uuid,

    pub text: String,

    /// Users referenced from the comment body.
    pub mentions: Vec<Uuid>,

    pub edited: bool,
    pub edited_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(task_id: Uuid, author_id: Uuid, text: String, mentions: Vec<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            author_id,
            text,
            mentions,
            edited: false,
            edited_at: None,
            created_at: Utc::now(),
        }
    }
}
