use cs_core::Comment;

use serde::Serialize;

/// Comments of a task, newest first
#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<Comment>,
}
