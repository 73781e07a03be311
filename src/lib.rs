use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tokio::signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod seeder;
pub mod utils;

use handlers::{
    health_handler,
    reply_handlers::{
        create_reply_handler, delete_reply_handler, report_reply_handler, show_thread_handler,
    },
    thread_handlers::{
        create_thread_handler, delete_thread_handler, list_threads_handler,
        report_thread_handler,
    },
};

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
}

/// Builds the application router.
///
/// Both API routes carry all four methods, the way the board front end
/// calls them: create (POST), read (GET), report (PUT), delete (DELETE).
pub fn create_router(db_pool: PgPool) -> Router {
    let app_state = AppState { db_pool };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/threads/:board",
            post(create_thread_handler)
                .get(list_threads_handler)
                .put(report_thread_handler)
                .delete(delete_thread_handler),
        )
        .route(
            "/api/replies/:board",
            post(create_reply_handler)
                .get(show_thread_handler)
                .put(report_reply_handler)
                .delete(delete_reply_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
