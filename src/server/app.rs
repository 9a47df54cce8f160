use axum::http::header::{self, HeaderValue};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{extract::FromRef, routing::get, Router};
use routes::{category_router, questions_router, quizzes_router};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{error::ApiError, routes};
use crate::service::QuizStrategy;
use crate::telemetry::gather_metrics;

/// Everything a request handler may touch. Built once at start-up and cloned into each router.
#[derive(FromRef, Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub quiz: QuizStrategy,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    Router::new()
        .route("/metrics", get(metrics))
        .merge(category_router(state.clone()))
        .merge(questions_router(state.clone()))
        .merge(quizzes_router(state))
        .fallback(|| async {
            tracing::info!("Fallback");
            ApiError::NotFound
        })
        .method_not_allowed_fallback(|| async { ApiError::MethodNotAllowed })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn metrics() -> Result<Response, ApiError> {
    let (content_type, buf) = gather_metrics().map_err(|error| {
        tracing::error!(%error, "Failed to encode metrics");
        ApiError::InternalServerError
    })?;
    let content_type =
        HeaderValue::from_str(&content_type).map_err(|_| ApiError::InternalServerError)?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, content_type)], buf).into_response())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, starting shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting shutdown"),
    }
}
