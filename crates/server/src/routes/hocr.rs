use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};
use crate::routes::validate_text;
use crate::state::ServerState;

/// Request to pseudonymize a text via the HOCR workflow
#[derive(Debug, Deserialize)]
pub struct HocrRequest {
    /// Text to pseudonymize. Required.
    #[serde(default)]
    pub text: Option<String>,
}

/// Response from the pseudonymization workflow
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HocrResponse {
    pub success: bool,
    pub original_text: String,
    /// Entity label → concatenated original text, as decoded from the
    /// extraction response. Empty when the local simulation ran.
    pub entity_mappings: BTreeMap<String, String>,
    pub pseudonymized_text: String,
    pub timestamp: String,
    /// True when entity extraction was simulated locally
    pub used_fallback: bool,
    /// Text rebuilt from the annotated document with entity ids in place of
    /// annotated words; only present for title-form extraction responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconstructed_text: Option<String>,
}

/// Pseudonymize a text: encode as HOCR, run entity extraction, substitute
/// recognized spans with category placeholders.
pub async fn hocr(
    State(state): State<ServerState>,
    Json(request): Json<HocrRequest>,
) -> ServerResult<impl IntoResponse> {
    let text = validate_text(request.text, state.config.hocr_max_chars)?;

    let outcome = textveil::pseudonymize_text(&text, &state.pipeline, state.extractor.as_ref())
        .await
        .map_err(ServerError::from)?;
    let used_fallback = outcome.used_fallback();

    Ok(Json(HocrResponse {
        success: true,
        original_text: outcome.original_text,
        entity_mappings: outcome.entity_mappings,
        pseudonymized_text: outcome.pseudonymized_text,
        timestamp: Utc::now().to_rfc3339(),
        used_fallback,
        reconstructed_text: outcome.reconstructed_text,
    }))
}
