use cs_core::Comment;

use serde::Serialize;

/// Single comment response
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment: Comment,
}
