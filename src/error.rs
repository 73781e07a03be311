use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Everything a request handler can fail with.
///
/// The `Display` strings are the exact plain-text bodies callers see, so
/// store failures deliberately render as a generic `server error`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("incorrect query")]
    MissingField,

    #[error("incorrect board or id")]
    ThreadNotFound,

    #[error("incorrect reply id")]
    ReplyNotFound,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("server error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingField => StatusCode::BAD_REQUEST,
            ApiError::ThreadNotFound | ApiError::ReplyNotFound => StatusCode::NOT_FOUND,
            ApiError::IncorrectPassword => StatusCode::FORBIDDEN,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match &self {
            ApiError::Database(e) => error!(error = %e, "database failure"),
            other => warn!("{}", other),
        }

        (status, self.to_string()).into_response()
    }
}
