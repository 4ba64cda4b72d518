use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    /// Id of the user to add
    pub user_id: String,

    /// Role to grant: "admin", "member", or "viewer"
    pub role: String,
}
