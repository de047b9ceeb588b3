//! HTTP route handlers for the capture API.
//!
//! Routes are organized by resource:
//! - `info`: API hello route
//! - `leads`: lead create and newest-first listing
//! - `status`: status-check create and listing

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod info;
pub mod leads;
pub mod status;

/// Assemble the full `/api` router.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(info::router())
        .merge(leads::router())
        .merge(status::router())
}
