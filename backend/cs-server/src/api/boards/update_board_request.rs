use serde::Deserialize;

/// Partial board update; absent fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateBoardRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub background_color: Option<String>,

    #[serde(default)]
    pub background_image: Option<String>,
}
