use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};
use crate::routes::validate_text;
use crate::state::ServerState;

/// Request to improve a text
#[derive(Debug, Deserialize)]
pub struct ImproveRequest {
    /// Text to improve. Required.
    #[serde(default)]
    pub text: Option<String>,
}

/// Response from the improve workflow
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveResponse {
    pub success: bool,
    pub original_text: String,
    pub improved_text: String,
    pub timestamp: String,
    /// True when entity extraction was simulated locally
    pub used_fallback: bool,
    /// Entity ids whose placeholder did not survive the rewrite; present
    /// only when the restoration was partial
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_placeholders: Vec<String>,
}

/// Improve a text through the full pseudonymization round trip.
///
/// The input is encoded as HOCR and sent to the entity-extraction
/// collaborator; recognized spans are replaced with placeholders before the
/// text goes to the language model, and the placeholders are substituted back
/// afterwards. The model never sees the original entity values.
pub async fn improve(
    State(state): State<ServerState>,
    Json(request): Json<ImproveRequest>,
) -> ServerResult<impl IntoResponse> {
    let text = validate_text(request.text, state.config.improve_max_chars)?;

    let outcome = textveil::improve_text(
        &text,
        &state.pipeline,
        state.extractor.as_ref(),
        state.improver.as_ref(),
    )
    .await
    .map_err(ServerError::from)?;

    Ok(Json(ImproveResponse {
        success: true,
        original_text: outcome.original_text,
        improved_text: outcome.improved_text,
        timestamp: Utc::now().to_rfc3339(),
        used_fallback: outcome.used_fallback,
        missing_placeholders: outcome.missing_placeholders,
    }))
}
