use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Reply, DELETED_TEXT};

// Input data for creating a new reply
pub struct CreateReplyData {
    pub text: String,
    pub delete_password: String,
}

/// Appends a reply to a thread and bumps the thread, in one transaction.
///
/// The reply's `created_on` and the thread's `bumped_on` are bound from a
/// single timestamp, and the bump doubles as the board-scoped existence
/// check: when no thread row matches, nothing is inserted and `None` is
/// returned.
pub async fn create_reply(
    pool: &PgPool,
    board: &str,
    thread_id: Uuid,
    reply_data: CreateReplyData,
) -> Result<Option<Reply>, sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let bumped = sqlx::query(
        r#"
        UPDATE threads
        SET bumped_on = $1, reply_count = reply_count + 1
        WHERE board = $2 AND id = $3
        "#,
    )
    .bind(now)
    .bind(board)
    .bind(thread_id)
    .execute(&mut *tx)
    .await?;

    if bumped.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let reply = sqlx::query_as::<_, Reply>(
        r#"
        INSERT INTO replies (thread_id, text, delete_password, created_on)
        VALUES ($1, $2, $3, $4)
        RETURNING id, thread_id, text, delete_password, reported, created_on
        "#,
    )
    .bind(thread_id)
    .bind(&reply_data.text)
    .bind(&reply_data.delete_password)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(reply))
}

/// Fetches every reply in a thread, oldest first.
pub async fn list_replies(pool: &PgPool, thread_id: Uuid) -> Result<Vec<Reply>, sqlx::Error> {
    sqlx::query_as::<_, Reply>(
        r#"
        SELECT id, thread_id, text, delete_password, reported, created_on
        FROM replies
        WHERE thread_id = $1
        ORDER BY created_on ASC
        "#,
    )
    .bind(thread_id)
    .fetch_all(pool)
    .await
}

/// Fetches the `limit` most recent replies in a thread, then flips them
/// back to oldest-first so they read the same way as the full listing.
pub async fn recent_replies(
    pool: &PgPool,
    thread_id: Uuid,
    limit: i64,
) -> Result<Vec<Reply>, sqlx::Error> {
    let mut replies = sqlx::query_as::<_, Reply>(
        r#"
        SELECT id, thread_id, text, delete_password, reported, created_on
        FROM replies
        WHERE thread_id = $1
        ORDER BY created_on DESC
        LIMIT $2
        "#,
    )
    .bind(thread_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    replies.reverse();
    Ok(replies)
}

/// Fetches a single reply, scoped to its thread.
pub async fn get_reply(
    pool: &PgPool,
    thread_id: Uuid,
    reply_id: Uuid,
) -> Result<Option<Reply>, sqlx::Error> {
    sqlx::query_as::<_, Reply>(
        r#"
        SELECT id, thread_id, text, delete_password, reported, created_on
        FROM replies
        WHERE thread_id = $1 AND id = $2
        "#,
    )
    .bind(thread_id)
    .bind(reply_id)
    .fetch_optional(pool)
    .await
}

/// Flags a reply as reported. Idempotent.
/// Returns the number of rows affected.
pub async fn report_reply(
    pool: &PgPool,
    thread_id: Uuid,
    reply_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE replies
        SET reported = TRUE
        WHERE thread_id = $1 AND id = $2
        "#,
    )
    .bind(thread_id)
    .bind(reply_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Redacts a reply's text and decrements the thread's reply count
/// (floored at zero), in one transaction. The reply row is kept.
/// Returns the number of reply rows affected.
pub async fn redact_reply(
    pool: &PgPool,
    thread_id: Uuid,
    reply_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let redacted = sqlx::query(
        r#"
        UPDATE replies
        SET text = $1
        WHERE thread_id = $2 AND id = $3
        "#,
    )
    .bind(DELETED_TEXT)
    .bind(thread_id)
    .bind(reply_id)
    .execute(&mut *tx)
    .await?;

    if redacted.rows_affected() > 0 {
        sqlx::query(
            r#"
            UPDATE threads
            SET reply_count = GREATEST(reply_count - 1, 0)
            WHERE id = $1
            "#,
        )
        .bind(thread_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(redacted.rows_affected())
}
