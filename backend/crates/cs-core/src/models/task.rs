use crate::models::attachment::Attachment;
use crate::models::checklist_item::ChecklistItem;
use crate::models::label::Label;
use crate::models::task_priority::TaskPriority;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,

    /// Containing list. Together with `position` this is the source of
    /// truth for where the task sits on the board.
    pub list_id: Uuid,
    /// Back-reference to the board, kept for query efficiency.
    pub board_id: Uuid,

    pub title: String,
    pub description: String,

    /// Zero-based display index among the list's tasks, contiguous `0..m`.
    pub position: i32,

    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub is_completed: bool,

    pub labels: Vec<Label>,
    pub checklist: Vec<ChecklistItem>,
    pub attachments: Vec<Attachment>,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(list_id: Uuid, board_id: Uuid, title: String, position: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            list_id,
            board_id,
            title,
            description: String::new(),
            position,
            priority: TaskPriority::Medium,
            due_date: None,
            is_completed: false,
            labels: Vec::new(),
            checklist: Vec::new(),
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
