// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `opsdesk serve` command implementation.
//!
//! Wires the SQLite task store, in-memory session store, intake engine, and
//! Telegram boundary together and serves the webhook plus health and
//! Prometheus metrics endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

use opsdesk_config::model::OpsdeskConfig;
use opsdesk_core::{HealthStatus, OpsdeskError, PluginAdapter, TaskStore};
use opsdesk_intake::{IntakeEngine, IntakePolicy};
use opsdesk_session::MemorySessionStore;
use opsdesk_storage::SqliteTaskStore;
use opsdesk_telegram::{TelegramHandler, TelegramNotifier, webhook_router};

/// Render function for the Prometheus scrape endpoint.
type MetricsRender = Arc<dyn Fn() -> String + Send + Sync>;

/// Runs the `opsdesk serve` command to completion.
pub async fn run_serve(config: OpsdeskConfig) -> Result<(), OpsdeskError> {
    init_tracing(&config.agent.log_level);

    info!("starting opsdesk serve");

    // The intake counters are recorded through the metrics facade; without
    // an installed recorder they would be silently dropped.
    let metrics_handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        OpsdeskError::Internal(format!("failed to install Prometheus recorder: {e}"))
    })?;
    let metrics_render: MetricsRender = Arc::new(move || metrics_handle.render());

    let storage = Arc::new(SqliteTaskStore::new(config.storage.clone()));
    storage.initialize().await?;

    let notifier = Arc::new(TelegramNotifier::new(&config.telegram)?);

    let policy = IntakePolicy {
        session_ttl: Duration::from_secs(config.session.ttl_secs),
        categories: config.intake.categories.clone(),
        countries: config.intake.countries.clone(),
        projects: config.intake.projects.clone(),
    };

    let engine = Arc::new(IntakeEngine::new(
        Arc::new(MemorySessionStore::new()),
        storage.clone(),
        storage.clone(),
        notifier.clone(),
        policy,
    ));

    let handler = Arc::new(TelegramHandler::new(
        engine,
        notifier.clone(),
        &config.telegram,
    ));

    let app = webhook_router(handler)
        .merge(health_router(storage.clone()))
        .merge(metrics_router(metrics_render));

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| OpsdeskError::Channel {
            message: format!("failed to bind webhook server to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    info!("webhook server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| OpsdeskError::Channel {
            message: format!("webhook server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    storage.shutdown().await
}

/// Unauthenticated health route for process supervision.
fn health_router(storage: Arc<SqliteTaskStore>) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .with_state(storage)
}

/// GET /health
async fn get_health(
    State(storage): State<Arc<SqliteTaskStore>>,
) -> (StatusCode, Json<serde_json::Value>) {
    match storage.health_check().await {
        Ok(HealthStatus::Healthy) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "healthy" })),
        ),
        Ok(HealthStatus::Degraded(detail)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "degraded", "detail": detail })),
        ),
        Ok(HealthStatus::Unhealthy(detail)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "unhealthy", "detail": detail })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "unhealthy", "detail": e.to_string() })),
        ),
    }
}

/// Unauthenticated Prometheus scrape route.
fn metrics_router(render: MetricsRender) -> Router {
    Router::new()
        .route("/metrics", get(get_metrics))
        .with_state(render)
}

/// GET /metrics
async fn get_metrics(State(render): State<MetricsRender>) -> String {
    render()
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("opsdesk={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::Request;
    use opsdesk_config::model::StorageConfig;
    use tempfile::tempdir;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_route_reports_healthy_storage() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let storage = Arc::new(SqliteTaskStore::new(StorageConfig {
            database_path: db_path.to_str().unwrap().to_string(),
            wal_mode: true,
        }));
        storage.initialize().await.unwrap();

        let response = health_router(storage)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_route_serves_rendered_text() {
        let render: MetricsRender = Arc::new(|| "intake_messages_total 3\n".to_string());
        let response = metrics_router(render)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/metrics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.starts_with(b"intake_messages_total"));
    }

    #[tokio::test]
    async fn health_route_reports_uninitialized_storage() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("uninit.db");
        let storage = Arc::new(SqliteTaskStore::new(StorageConfig {
            database_path: db_path.to_str().unwrap().to_string(),
            wal_mode: true,
        }));

        let response = health_router(storage)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
