use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Thread;

// Input data for creating a new thread
pub struct CreateThreadData {
    pub text: String,
    pub delete_password: String,
}

/// Inserts a new thread on the given board.
///
/// `created_on` and `bumped_on` are bound from the same timestamp so a
/// fresh thread sorts by its creation time until its first reply.
pub async fn create_thread(
    pool: &PgPool,
    board: &str,
    thread_data: CreateThreadData,
) -> Result<Thread, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, Thread>(
        r#"
        INSERT INTO threads (board, text, delete_password, created_on, bumped_on)
        VALUES ($1, $2, $3, $4, $4)
        RETURNING id, board, text, delete_password, reported, created_on, bumped_on, reply_count
        "#,
    )
    .bind(board)
    .bind(&thread_data.text)
    .bind(&thread_data.delete_password)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Fetches a single thread, scoped to its board.
pub async fn get_thread(
    pool: &PgPool,
    board: &str,
    thread_id: Uuid,
) -> Result<Option<Thread>, sqlx::Error> {
    sqlx::query_as::<_, Thread>(
        r#"
        SELECT id, board, text, delete_password, reported, created_on, bumped_on, reply_count
        FROM threads
        WHERE board = $1 AND id = $2
        "#,
    )
    .bind(board)
    .bind(thread_id)
    .fetch_optional(pool)
    .await
}

/// Fetches up to `limit` threads on a board, most recently bumped first.
pub async fn list_recent_threads(
    pool: &PgPool,
    board: &str,
    limit: i64,
) -> Result<Vec<Thread>, sqlx::Error> {
    sqlx::query_as::<_, Thread>(
        r#"
        SELECT id, board, text, delete_password, reported, created_on, bumped_on, reply_count
        FROM threads
        WHERE board = $1
        ORDER BY bumped_on DESC
        LIMIT $2
        "#,
    )
    .bind(board)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Flags a thread as reported. Idempotent.
/// Returns the number of rows affected (0 when the thread does not exist
/// on that board).
pub async fn report_thread(
    pool: &PgPool,
    board: &str,
    thread_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE threads
        SET reported = TRUE
        WHERE board = $1 AND id = $2
        "#,
    )
    .bind(board)
    .bind(thread_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Deletes a thread; its replies go with it via the foreign-key cascade.
/// Returns the number of rows affected.
pub async fn delete_thread(
    pool: &PgPool,
    board: &str,
    thread_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM threads
        WHERE board = $1 AND id = $2
        "#,
    )
    .bind(board)
    .bind(thread_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
