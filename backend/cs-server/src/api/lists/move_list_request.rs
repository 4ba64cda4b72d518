use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MoveListRequest {
    /// Destination position on the board
    pub position: i32,
}
