//! API hello route: `GET /api/`.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Build the info router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(hello))
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub message: String,
}

/// Liveness hello. Deployment checks assert this exact message.
async fn hello() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "Hello World".to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hello_says_hello_world() {
        let Json(body) = hello().await;
        assert_eq!(body.message, "Hello World");
    }
}
