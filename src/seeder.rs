use sqlx::PgPool;

use crate::repositories::{
    reply_repository::{self, CreateReplyData},
    thread_repository::{self, CreateThreadData},
};

/// Seed the database with a couple of boards of sample threads.
///
/// Boards that already contain threads are skipped, so this can safely be
/// run multiple times.
pub async fn seed_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    seed_board(
        pool,
        "general",
        &[
            ("Welcome to the board", "open-sesame"),
            ("Rules and etiquette", "open-sesame"),
        ],
        &["First!", "Glad to be here."],
    )
    .await?;

    seed_board(
        pool,
        "random",
        &[("Today's small wins", "open-sesame")],
        &["Finally fixed my bike."],
    )
    .await?;

    println!("[Seeder] Database seeding completed successfully.");
    Ok(())
}

async fn seed_board(
    pool: &PgPool,
    board: &str,
    threads: &[(&str, &str)],
    first_thread_replies: &[&str],
) -> Result<(), sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT count(*) FROM threads WHERE board = $1")
        .bind(board)
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        println!("[Seeder] Board '{}' already seeded, skipping", board);
        return Ok(());
    }

    println!("[Seeder] Seeding board '{}'...", board);

    let mut first_thread_id = None;
    for (text, password) in threads {
        let thread = thread_repository::create_thread(
            pool,
            board,
            CreateThreadData {
                text: text.to_string(),
                delete_password: password.to_string(),
            },
        )
        .await?;
        println!("  - Created thread '{}' (ID: {})", text, thread.id);
        first_thread_id.get_or_insert(thread.id);
    }

    if let Some(thread_id) = first_thread_id {
        for text in first_thread_replies {
            reply_repository::create_reply(
                pool,
                board,
                thread_id,
                CreateReplyData {
                    text: text.to_string(),
                    delete_password: "open-sesame".to_string(),
                },
            )
            .await?;
        }
        println!(
            "  - Added {} replies to the first thread",
            first_thread_replies.len()
        );
    }

    Ok(())
}
