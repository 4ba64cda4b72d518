use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    /// Comment text (required)
    pub text: String,

    /// Ids of users mentioned in the text
    #[serde(default)]
    pub mentions: Vec<String>,
}
