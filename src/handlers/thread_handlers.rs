use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use constant_time_eq::constant_time_eq;
use serde::Deserialize;
use tracing::info;

use crate::{
    error::ApiError,
    models::ThreadView,
    repositories::{
        reply_repository,
        thread_repository::{self, CreateThreadData},
    },
    utils, AppState,
};

/// How many threads a board listing returns.
const THREAD_PAGE_SIZE: i64 = 10;
/// How many of a thread's most recent replies the board listing carries.
const REPLY_PREVIEW_SIZE: i64 = 3;

#[derive(Deserialize)]
pub struct CreateThreadPayload {
    text: Option<String>,
    delete_password: Option<String>,
}

/// Handler to create a new thread on a board.
pub async fn create_thread_handler(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Json(payload): Json<CreateThreadPayload>,
) -> Result<Response, ApiError> {
    let (text, delete_password) = match (payload.text, payload.delete_password) {
        (Some(text), Some(delete_password)) => (text, delete_password),
        _ => return Err(ApiError::MissingField),
    };

    let board = utils::normalize_board(&board);
    let thread_data = CreateThreadData {
        text,
        delete_password,
    };
    let thread = thread_repository::create_thread(&state.db_pool, &board, thread_data).await?;

    info!(thread_id = %thread.id, board = %thread.board, "created thread");
    Ok((StatusCode::CREATED, Json(ThreadView::project(&thread, &[]))).into_response())
}

/// Handler to list the most recently bumped threads on a board, each with
/// a short preview of its newest replies.
pub async fn list_threads_handler(
    State(state): State<AppState>,
    Path(board): Path<String>,
) -> Result<Response, ApiError> {
    let board = utils::normalize_board(&board);
    let threads =
        thread_repository::list_recent_threads(&state.db_pool, &board, THREAD_PAGE_SIZE).await?;

    let mut views = Vec::with_capacity(threads.len());
    for thread in &threads {
        let preview =
            reply_repository::recent_replies(&state.db_pool, thread.id, REPLY_PREVIEW_SIZE)
                .await?;
        views.push(ThreadView::project(thread, &preview));
    }

    Ok(Json(views).into_response())
}

#[derive(Deserialize)]
pub struct ReportThreadPayload {
    thread_id: Option<String>,
}

/// Handler to flag a thread for moderation. Reporting twice is fine.
pub async fn report_thread_handler(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Json(payload): Json<ReportThreadPayload>,
) -> Result<Response, ApiError> {
    let raw_id = payload.thread_id.ok_or(ApiError::MissingField)?;
    let board = utils::normalize_board(&board);
    let thread_id = utils::parse_id(&raw_id).ok_or(ApiError::ThreadNotFound)?;

    let updated = thread_repository::report_thread(&state.db_pool, &board, thread_id).await?;
    if updated == 0 {
        return Err(ApiError::ThreadNotFound);
    }

    info!(thread_id = %thread_id, board = %board, "thread reported");
    Ok("reported".into_response())
}

#[derive(Deserialize)]
pub struct DeleteThreadPayload {
    thread_id: Option<String>,
    delete_password: Option<String>,
}

/// Handler to permanently delete a thread and everything under it.
pub async fn delete_thread_handler(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Json(payload): Json<DeleteThreadPayload>,
) -> Result<Response, ApiError> {
    let (raw_id, delete_password) = match (payload.thread_id, payload.delete_password) {
        (Some(raw_id), Some(delete_password)) => (raw_id, delete_password),
        _ => return Err(ApiError::MissingField),
    };

    let board = utils::normalize_board(&board);
    let thread_id = utils::parse_id(&raw_id).ok_or(ApiError::ThreadNotFound)?;

    let thread = thread_repository::get_thread(&state.db_pool, &board, thread_id)
        .await?
        .ok_or(ApiError::ThreadNotFound)?;

    if !constant_time_eq(
        thread.delete_password.as_bytes(),
        delete_password.as_bytes(),
    ) {
        return Err(ApiError::IncorrectPassword);
    }

    let deleted = thread_repository::delete_thread(&state.db_pool, &board, thread_id).await?;
    if deleted == 0 {
        // Gone between the password check and the delete.
        return Err(ApiError::ThreadNotFound);
    }

    info!(thread_id = %thread_id, board = %board, "deleted thread");
    Ok("success".into_response())
}
