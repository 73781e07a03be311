use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use constant_time_eq::constant_time_eq;
use serde::Deserialize;
use tracing::info;

use crate::{
    error::ApiError,
    models::{ReplyView, ThreadView},
    repositories::{
        reply_repository::{self, CreateReplyData},
        thread_repository,
    },
    utils, AppState,
};

#[derive(Deserialize)]
pub struct CreateReplyPayload {
    thread_id: Option<String>,
    text: Option<String>,
    delete_password: Option<String>,
}

/// Handler to append a reply to a thread. The parent thread's `bumped_on`
/// becomes the reply's `created_on` and its reply count goes up by one,
/// atomically with the insert.
pub async fn create_reply_handler(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Json(payload): Json<CreateReplyPayload>,
) -> Result<Response, ApiError> {
    let (raw_id, text, delete_password) =
        match (payload.thread_id, payload.text, payload.delete_password) {
            (Some(raw_id), Some(text), Some(delete_password)) => {
                (raw_id, text, delete_password)
            }
            _ => return Err(ApiError::MissingField),
        };

    let board = utils::normalize_board(&board);
    // A malformed thread id on reply creation is a bad request, not a miss.
    let thread_id = utils::parse_id(&raw_id).ok_or(ApiError::MissingField)?;

    let reply_data = CreateReplyData {
        text,
        delete_password,
    };
    let reply = reply_repository::create_reply(&state.db_pool, &board, thread_id, reply_data)
        .await?
        .ok_or(ApiError::ThreadNotFound)?;

    info!(reply_id = %reply.id, thread_id = %thread_id, board = %board, "created reply");
    Ok((StatusCode::CREATED, Json(ReplyView::project(&reply))).into_response())
}

#[derive(Deserialize)]
pub struct ShowThreadParams {
    thread_id: Option<String>,
}

/// Handler to view a single thread with every reply it has.
pub async fn show_thread_handler(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Query(params): Query<ShowThreadParams>,
) -> Result<Response, ApiError> {
    let raw_id = params.thread_id.ok_or(ApiError::MissingField)?;
    let board = utils::normalize_board(&board);
    let thread_id = utils::parse_id(&raw_id).ok_or(ApiError::ThreadNotFound)?;

    let thread = thread_repository::get_thread(&state.db_pool, &board, thread_id)
        .await?
        .ok_or(ApiError::ThreadNotFound)?;
    let replies = reply_repository::list_replies(&state.db_pool, thread_id).await?;

    Ok(Json(ThreadView::project(&thread, &replies)).into_response())
}

#[derive(Deserialize)]
pub struct ReportReplyPayload {
    thread_id: Option<String>,
    reply_id: Option<String>,
}

/// Handler to flag a reply for moderation. Reporting twice is fine.
pub async fn report_reply_handler(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Json(payload): Json<ReportReplyPayload>,
) -> Result<Response, ApiError> {
    let (raw_thread_id, raw_reply_id) = match (payload.thread_id, payload.reply_id) {
        (Some(raw_thread_id), Some(raw_reply_id)) => (raw_thread_id, raw_reply_id),
        _ => return Err(ApiError::MissingField),
    };

    let board = utils::normalize_board(&board);
    let thread_id = utils::parse_id(&raw_thread_id).ok_or(ApiError::ThreadNotFound)?;
    let reply_id = utils::parse_id(&raw_reply_id).ok_or(ApiError::ReplyNotFound)?;

    thread_repository::get_thread(&state.db_pool, &board, thread_id)
        .await?
        .ok_or(ApiError::ThreadNotFound)?;

    let updated = reply_repository::report_reply(&state.db_pool, thread_id, reply_id).await?;
    if updated == 0 {
        return Err(ApiError::ReplyNotFound);
    }

    info!(reply_id = %reply_id, thread_id = %thread_id, board = %board, "reply reported");
    Ok("reported".into_response())
}

#[derive(Deserialize)]
pub struct DeleteReplyPayload {
    thread_id: Option<String>,
    reply_id: Option<String>,
    delete_password: Option<String>,
}

/// Handler to delete a reply. The reply row stays; its text is replaced
/// with the deletion marker so the thread's shape is preserved.
pub async fn delete_reply_handler(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Json(payload): Json<DeleteReplyPayload>,
) -> Result<Response, ApiError> {
    let (raw_thread_id, raw_reply_id, delete_password) =
        match (payload.thread_id, payload.reply_id, payload.delete_password) {
            (Some(raw_thread_id), Some(raw_reply_id), Some(delete_password)) => {
                (raw_thread_id, raw_reply_id, delete_password)
            }
            _ => return Err(ApiError::MissingField),
        };

    let board = utils::normalize_board(&board);
    let thread_id = utils::parse_id(&raw_thread_id).ok_or(ApiError::ThreadNotFound)?;
    let reply_id = utils::parse_id(&raw_reply_id).ok_or(ApiError::ReplyNotFound)?;

    thread_repository::get_thread(&state.db_pool, &board, thread_id)
        .await?
        .ok_or(ApiError::ThreadNotFound)?;

    let reply = reply_repository::get_reply(&state.db_pool, thread_id, reply_id)
        .await?
        .ok_or(ApiError::ReplyNotFound)?;

    if !constant_time_eq(
        reply.delete_password.as_bytes(),
        delete_password.as_bytes(),
    ) {
        return Err(ApiError::IncorrectPassword);
    }

    let redacted = reply_repository::redact_reply(&state.db_pool, thread_id, reply_id).await?;
    if redacted == 0 {
        return Err(ApiError::ReplyNotFound);
    }

    info!(reply_id = %reply_id, thread_id = %thread_id, board = %board, "deleted reply");
    Ok("success".into_response())
}
