use crate::repositories::board_repository::BoardRepository;
use crate::repositories::list_repository::ListRepository;
use crate::repositories::task_repository::TaskRepository;
use crate::repositories::user_repository::UserRepository;
use crate::Result;

use cs_core::models::board_snapshot::MemberView;
use cs_core::{BoardSnapshot, ListSnapshot, TaskView};

use std::collections::HashMap;

use sqlx::SqlitePool;
use uuid::Uuid;

/// Assembles a whole board into one consistent snapshot: lists ascending by
/// position, each list's tasks ascending by position, assignees and members
/// resolved to user summaries.
///
/// This is the full (re)hydration path clients use on initial load and to
/// recover after a missed realtime event. Authorization is checked by the
/// caller before loading.
pub struct BoardLoader {
    pool: SqlitePool,
}

impl BoardLoader {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn load(&self, board_id: Uuid) -> Result<Option<BoardSnapshot>> {
        let boards = BoardRepository::new(self.pool.clone());

        let Some(board) = boards.find_by_id(board_id).await? else {
            return Ok(None);
        };

        let users = UserRepository::new(self.pool.clone());
        let mut member_views = Vec::new();
        for member in boards.members(board_id).await? {
            // Members whose user record is gone are skipped rather than
            // failing the whole snapshot.
            if let Some(user) = users.find_by_id(member.user_id).await? {
                member_views.push(MemberView::new(&member, user));
            }
        }

        let lists = self.load_lists(board_id).await?;

        Ok(Some(BoardSnapshot {
            board,
            members: member_views,
            lists,
        }))
    }

    /// The board's lists ascending by position, each carrying its
    /// position-ordered tasks with resolved assignees.
    pub async fn load_lists(&self, board_id: Uuid) -> Result<Vec<ListSnapshot>> {
        let lists = ListRepository::new(self.pool.clone())
            .find_by_board(board_id)
            .await?;

        let tasks = TaskRepository::new(self.pool.clone());
        let mut assignees_by_task = tasks.assignee_summaries_by_board(board_id).await?;

        let mut tasks_by_list: HashMap<Uuid, Vec<TaskView>> = HashMap::new();
        for task in tasks.find_by_board(board_id).await? {
            let assignees = assignees_by_task.remove(&task.id).unwrap_or_default();
            tasks_by_list
                .entry(task.list_id)
                .or_default()
                .push(TaskView { task, assignees });
        }

        Ok(lists
            .into_iter()
            .map(|list| {
                let tasks = tasks_by_list.remove(&list.id).unwrap_or_default();
                ListSnapshot { list, tasks }
            })
            .collect())
    }
}
