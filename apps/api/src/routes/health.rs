use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::MODEL_ID;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "copydesk",
        "model": MODEL_ID,
        "active_sessions": state.sessions.len()
    }))
}
