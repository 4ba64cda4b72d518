use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    /// Replacement comment text
    pub text: String,
}
