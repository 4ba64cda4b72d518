use cs_core::ListSnapshot;

use serde::Serialize;

/// Ordered lists with their ordered tasks, without the board metadata
/// and member roster that the full snapshot carries.
#[derive(Debug, Serialize)]
pub struct BoardListsResponse {
    pub lists: Vec<ListSnapshot>,
}
