//! Relay handlers.
//!
//! - `GET /` reports liveness
//! - `POST /summarize` relays a host dataset to the agent pool

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::models::{HealthResponse, LIVENESS_MESSAGE, SummaryResponse};
use crate::errors::SummarizerError;
use crate::worker::{AgentPool, summarize_document};

/// Per-process service context handed to every handler.
#[derive(Clone)]
pub struct RelayState {
    pub pool: AgentPool,
}

impl RelayState {
    pub fn new(pool: AgentPool) -> Self {
        Self { pool }
    }
}

pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: LIVENESS_MESSAGE.to_string(),
    })
}

/// Relays one host dataset to the agent and returns its summary.
///
/// # Errors
///
/// Body rejections map to the extractor's 4xx status and never reach the
/// agent. Agent failures map to 502, timeouts to 504.
#[tracing::instrument(level = "info", skip_all, fields(correlation_id = %Uuid::new_v4()))]
pub async fn summarize(
    State(state): State<RelayState>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<SummaryResponse>, SummarizerError> {
    let Json(document) = body.map_err(|rejection| {
        warn!(
            status = rejection.status().as_u16(),
            "Rejected request body: {}",
            rejection.body_text()
        );
        SummarizerError::InvalidRequestBody {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    })?;

    info!(fields = document.len(), "Summarize request received");

    let summary = summarize_document(&state.pool, document).await?;
    Ok(Json(SummaryResponse { summary }))
}
