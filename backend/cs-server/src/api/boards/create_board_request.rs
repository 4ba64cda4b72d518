use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    /// Board title (required)
    pub title: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Optional background color, e.g. "#0079bf"
    #[serde(default)]
    pub background_color: Option<String>,
}
