use serde::Deserialize;

/// Query parameters for task search. Every filter is optional and
/// filters combine with AND.
#[derive(Debug, Default, Deserialize)]
pub struct SearchTasksQuery {
    /// Case-insensitive substring match on title or description
    pub q: Option<String>,
    pub priority: Option<String>,
    /// Only tasks assigned to this user
    pub assignee: Option<String>,
    /// Only tasks carrying a label with this text
    pub label: Option<String>,
    /// Only tasks due on this calendar day (YYYY-MM-DD, UTC)
    pub due: Option<String>,
}
