#![allow(dead_code)]

use cs_core::{Board, BoardMember, BoardRole, Comment, List, Task};
use cs_db::{BoardRepository, ListRepository, TaskRepository};

use sqlx::SqlitePool;
use uuid::Uuid;

/// Creates a test Board owned by the given user
pub fn create_test_board(owner_id: Uuid) -> Board {
    Board::new(
        "Test Board".to_string(),
        Some("Test board description".to_string()),
        owner_id,
    )
}

/// Creates a test List at the given board position
pub fn create_test_list(board_id: Uuid, position: i32) -> List {
    List::new(board_id, format!("List {}", position), position)
}

/// Creates a test Task at the given list position
pub fn create_test_task(list_id: Uuid, board_id: Uuid, title: &str, position: i32) -> Task {
    Task::new(list_id, board_id, title.to_string(), position)
}

/// Creates a test BoardMember with the given role
pub fn create_test_member(board_id: Uuid, user_id: Uuid, role: BoardRole) -> BoardMember {
    BoardMember::new(board_id, user_id, role)
}

/// Creates a test Comment with no mentions
pub fn create_test_comment(task_id: Uuid, author_id: Uuid) -> Comment {
    Comment::new(
        task_id,
        author_id,
        "Test comment text".to_string(),
        Vec::new(),
    )
}

/// Persists a board with one list, returning (board, list)
pub async fn seed_board_with_list(pool: &SqlitePool, owner_id: Uuid) -> (Board, List) {
    let board = create_test_board(owner_id);
    BoardRepository::new(pool.clone())
        .create(&board)
        .await
        .expect("Failed to create board");

    let list = create_test_list(board.id, 0);
    ListRepository::new(pool.clone())
        .create(&list)
        .await
        .expect("Failed to create list");

    (board, list)
}

/// Persists `titles.len()` tasks in order at the end of the list
pub async fn seed_tasks(
    pool: &SqlitePool,
    list_id: Uuid,
    board_id: Uuid,
    titles: &[&str],
) -> Vec<Task> {
    let repo = TaskRepository::new(pool.clone());
    let mut tasks = Vec::with_capacity(titles.len());

    for (i, title) in titles.iter().enumerate() {
        let task = create_test_task(list_id, board_id, title, i as i32);
        repo.create(&task).await.expect("Failed to create task");
        tasks.push(task);
    }

    tasks
}
