use crate::models::board::Board;
use crate::models::board_member::{BoardMember, BoardRole};
use crate::models::list::List;
use crate::models::task::Task;
use crate::models::user_summary::UserSummary;

use serde::{Deserialize, Serialize};

/// One consistent view of a whole board: lists ascending by position, each
/// list's tasks ascending by position, assignees resolved to summaries.
/// This is what clients hydrate from on initial load or after a missed
/// realtime event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(flatten)]
    pub board: Board,
    pub members: Vec<MemberView>,
    pub lists: Vec<ListSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberView {
    pub user: UserSummary,
    pub role: BoardRole,
}

impl MemberView {
    pub fn new(member: &BoardMember, user: UserSummary) -> Self {
        Self {
            user,
            role: member.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSnapshot {
    #[serde(flatten)]
    pub list: List,
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub assignees: Vec<UserSummary>,
}
