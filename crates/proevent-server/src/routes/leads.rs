//! Lead routes: `POST /api/leads`, `GET /api/leads`.
//!
//! Create validates the required contact fields, persists the lead, and
//! then forwards it best-effort; the response carries the acceptance
//! flag plus per-destination forwarding flags. Listing returns leads
//! newest first.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use proevent_core::lead::LeadForm;

use crate::error::AppError;
use crate::state::AppState;

/// Build the leads router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/leads", post(create_lead).get(list_leads))
}

// ── Request / response types ─────────────────────────────────────────

/// Incoming lead submission. All fields default to empty so validation,
/// not deserialization, decides what is missing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeadRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// A stored lead with its server-assigned fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub service: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Response for a created lead. `ok` is the acceptance flag clients key
/// on; the forwarding flags are informational.
#[derive(Debug, Serialize)]
pub struct CreateLeadResponse {
    pub ok: bool,
    pub stored: bool,
    pub forwarded: bool,
    pub email_sent: bool,
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Accept one lead: validate, persist, forward best-effort.
async fn create_lead(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateLeadRequest>,
) -> Result<Json<CreateLeadResponse>, AppError> {
    let form = LeadForm {
        name: req.name.clone(),
        email: req.email.clone(),
        phone: req.phone.clone(),
        company: req.company.clone(),
        service: req.service.clone(),
        message: req.message.clone(),
    };
    form.validate()?;

    let lead = Lead {
        id: Uuid::new_v4(),
        name: req.name,
        email: req.email,
        phone: req.phone,
        company: req.company,
        service: req.service.unwrap_or_default(),
        message: req.message,
        created_at: Utc::now(),
    };

    let bytes = serde_json::to_vec(&lead)
        .map_err(|e| AppError::Internal(format!("lead serialization failed: {e}")))?;
    state
        .storage
        .put(&format!("leads/{}", lead.id), &bytes)
        .await?;

    info!(id = %lead.id, service = %lead.service, "lead stored");

    let forwarded = state.forwarder.forward_webhook(&lead).await;
    let email_sent = state.forwarder.send_email(&lead).await;

    Ok(Json(CreateLeadResponse {
        ok: true,
        stored: true,
        forwarded,
        email_sent,
        id: lead.id,
    }))
}

/// List stored leads, newest first. `limit` defaults to 100.
async fn list_leads(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Lead>>, AppError> {
    let limit = params.limit.unwrap_or(100);
    let keys = state.storage.list("leads/").await?;

    let mut leads = Vec::with_capacity(keys.len());
    for key in &keys {
        let Some(bytes) = state.storage.get(key).await? else {
            continue;
        };
        match serde_json::from_slice::<Lead>(&bytes) {
            Ok(lead) => leads.push(lead),
            Err(e) => warn!(key = %key, error = %e, "skipping undecodable lead record"),
        }
    }

    leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    leads.truncate(limit);
    Ok(Json(leads))
}
