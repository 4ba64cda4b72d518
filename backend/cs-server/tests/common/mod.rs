#![allow(dead_code)]

//! Test infrastructure for cs-server API tests

use cs_ws::{AppState, ConnectionConfig, ConnectionLimits, ConnectionRegistry};

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    // Single connection so every handler sees the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create test database");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    sqlx::migrate!("../crates/cs-db/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;
    let registry = ConnectionRegistry::new(ConnectionLimits::default());

    AppState::new(pool, registry, ConnectionConfig::default())
}

/// Create a test user
pub async fn create_test_user(pool: &SqlitePool, user_id: Uuid) {
    sqlx::query("INSERT INTO users (id, name, email, created_at) VALUES (?, ?, ?, ?)")
        .bind(user_id.to_string())
        .bind(format!("User {}", user_id))
        .bind(format!("{}@test.local", user_id))
        .bind(chrono::Utc::now().timestamp())
        .execute(pool)
        .await
        .expect("Failed to create test user");
}

/// Create a test board owned by `owner_id`
pub async fn create_test_board(pool: &SqlitePool, owner_id: Uuid) -> Uuid {
    let board_id = Uuid::new_v4();
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
          INSERT INTO boards (id, title, description, owner_id, background_color,
                              background_image, created_at, updated_at)
          VALUES (?, ?, ?, ?, ?, NULL, ?, ?)
          "#,
    )
    .bind(board_id.to_string())
    .bind("Test Board")
    .bind("A test board")
    .bind(owner_id.to_string())
    .bind("#0079bf")
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("Failed to create test board");

    board_id
}

/// Add a membership row with the given role
pub async fn add_test_member(pool: &SqlitePool, board_id: Uuid, user_id: Uuid, role: &str) {
    sqlx::query(
        "INSERT INTO board_members (id, board_id, user_id, role, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(board_id.to_string())
    .bind(user_id.to_string())
    .bind(role)
    .bind(chrono::Utc::now().timestamp())
    .execute(pool)
    .await
    .expect("Failed to add test member");
}

/// Create a test list at `position`
pub async fn create_test_list(pool: &SqlitePool, board_id: Uuid, position: i32) -> Uuid {
    let list_id = Uuid::new_v4();
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO lists (id, board_id, title, position, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(list_id.to_string())
    .bind(board_id.to_string())
    .bind(format!("List {}", position))
    .bind(position)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("Failed to create test list");

    list_id
}

/// Create a test task at `position`
pub async fn create_test_task(
    pool: &SqlitePool,
    list_id: Uuid,
    board_id: Uuid,
    title: &str,
    position: i32,
) -> Uuid {
    let task_id = Uuid::new_v4();
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
          INSERT INTO tasks (id, list_id, board_id, title, description, position,
                             priority, due_date, is_completed, labels, checklist,
                             attachments, created_at, updated_at)
          VALUES (?, ?, ?, ?, '', ?, 'medium', NULL, 0, '[]', '[]', '[]', ?, ?)
          "#,
    )
    .bind(task_id.to_string())
    .bind(list_id.to_string())
    .bind(board_id.to_string())
    .bind(title)
    .bind(position)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .expect("Failed to create test task");

    task_id
}
