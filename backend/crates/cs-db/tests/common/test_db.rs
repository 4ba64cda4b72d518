use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Inserts a stub user for foreign key constraints
pub async fn create_test_user(pool: &SqlitePool, user_id: Uuid) {
    let id = user_id.to_string();
    let email = format!("test-{}@example.com", user_id);

    sqlx::query("INSERT INTO users (id, name, email, created_at) VALUES (?, ?, ?, 0)")
        .bind(&id)
        .bind("Test User")
        .bind(&email)
        .execute(pool)
        .await
        .expect("Failed to create test user");
}
