//! Status-check routes: `POST /api/status`, `GET /api/status`.
//!
//! A status check is a tiny heartbeat record deployments write to verify
//! the API and its storage end-to-end.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Most status checks ever returned from a single list call.
const LIST_CAP: usize = 1000;

/// Build the status router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/status", post(create_status_check).get(list_status_checks))
}

#[derive(Debug, Deserialize)]
pub struct CreateStatusRequest {
    pub client_name: String,
}

/// A stored status check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Record one status check.
async fn create_status_check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStatusRequest>,
) -> Result<Json<StatusCheck>, AppError> {
    let check = StatusCheck {
        id: Uuid::new_v4(),
        client_name: req.client_name,
        timestamp: Utc::now(),
    };

    let bytes = serde_json::to_vec(&check)
        .map_err(|e| AppError::Internal(format!("status serialization failed: {e}")))?;
    state
        .storage
        .put(&format!("status/{}", check.id), &bytes)
        .await?;

    Ok(Json(check))
}

/// List recorded status checks, oldest first.
async fn list_status_checks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StatusCheck>>, AppError> {
    let keys = state.storage.list("status/").await?;

    let mut checks = Vec::with_capacity(keys.len());
    for key in &keys {
        let Some(bytes) = state.storage.get(key).await? else {
            continue;
        };
        match serde_json::from_slice::<StatusCheck>(&bytes) {
            Ok(check) => checks.push(check),
            Err(e) => warn!(key = %key, error = %e, "skipping undecodable status check"),
        }
    }

    checks.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    checks.truncate(LIST_CAP);
    Ok(Json(checks))
}
