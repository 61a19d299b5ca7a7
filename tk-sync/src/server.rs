use crate::pipeline::SyncRunner;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Serves the sync trigger endpoint. One route, no body required; the
/// response mirrors the run outcome.
pub async fn serve(runner: Arc<SyncRunner>, port: u16) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/sync", post(trigger_sync))
        .with_state(runner);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("listening on port {port}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn trigger_sync(State(runner): State<Arc<SyncRunner>>) -> Response {
    match runner.run().await {
        Ok(report) => Json(json!({ "message": report.message() })).into_response(),
        Err(err) => {
            error!("sync run failed: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
