//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::{ui::state::AppState, usecase::PublishError};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let connections = state.connect_subscriber_usecase.connection_count().await;
    Json(json!({"status": "ok", "connections": connections}))
}

/// Publish a notification to every connected subscriber
pub async fn publish_notification(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.publish_notification_usecase.execute(payload).await {
        Ok(delivered) => Ok(Json(json!({"success": true, "delivered": delivered}))),
        Err(e @ PublishError::InvalidPayload) => {
            tracing::warn!("Rejected notification: {}", e);
            Err((StatusCode::BAD_REQUEST, error_body(&e)))
        }
        Err(e @ PublishError::Serialization(_)) => {
            tracing::error!("{}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, error_body(&e)))
        }
    }
}

fn error_body(error: &PublishError) -> Json<Value> {
    Json(json!({"success": false, "error": true, "message": error.to_string()}))
}
