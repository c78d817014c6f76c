//! Axum route handlers for the generation view.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{
    generate_content, generate_primary, generate_recommendations, GenerationOutcome, Panel,
};
use crate::generation::reveal::reveal_stream;
use crate::models::profile::CompanyProfile;
use crate::llm_client::TextGenerator;
use crate::models::request::ContentRequest;
use crate::state::AppState;

const GENERATING_STATUS: &str = "Generating content...";
const RECOMMENDATIONS_STATUS: &str = "Generating recommendations...";

/// Validates the submission, stores it as form memory and returns the
/// profile the prompts should use.
fn prepare(
    state: &AppState,
    session_id: Uuid,
    request: &ContentRequest,
) -> Result<Option<CompanyProfile>, AppError> {
    request.validate().map_err(AppError::Validation)?;

    let session = state
        .sessions
        .get(session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    state.sessions.remember_request(session_id, request.clone());

    Ok(session.company_profile().cloned())
}

/// POST /api/v1/sessions/:id/generate
///
/// Runs the generate action and returns both panels at once. A failed
/// recommendation call still returns the content panel.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ContentRequest>,
) -> Result<Json<GenerationOutcome>, AppError> {
    let profile = prepare(&state, session_id, &request)?;
    let outcome = generate_content(state.llm.as_ref(), profile.as_ref(), &request).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/sessions/:id/generate/stream
///
/// Same action, delivered as server-sent events so the page can reveal the
/// text character by character. The content panel is fully revealed before
/// the recommendation call starts. Closing the connection stops the reveal
/// and skips any call not yet made.
pub async fn handle_generate_stream(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ContentRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let profile = prepare(&state, session_id, &request)?;
    let delay = state.reveal_delay;
    let llm = state.llm.clone();
    let content_llm = llm.clone();
    let content_profile = profile.clone();

    let content = stream::once(async move {
        generate_primary(content_llm.as_ref(), content_profile.as_ref(), &request).await
    })
    .flat_map(move |result| match result {
        Ok(panel) => panel_events("content", panel, delay)
            .chain(status_event(RECOMMENDATIONS_STATUS))
            .chain(recommendation_events(llm.clone(), profile.clone(), delay))
            .boxed(),
        Err(e) => {
            let banner = json_event("error", json!({ "message": e.banner() }));
            stream::once(async move { banner }).boxed()
        }
    });

    let done = stream::once(async { Event::default().event("done").data("") });

    let events = status_event(GENERATING_STATUS)
        .chain(content)
        .chain(done)
        .map(Ok::<_, Infallible>);
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn recommendation_events(
    llm: Arc<dyn TextGenerator>,
    profile: Option<CompanyProfile>,
    delay: Duration,
) -> BoxStream<'static, Event> {
    stream::once(async move { generate_recommendations(llm.as_ref(), profile.as_ref()).await })
        .flat_map(move |panel| panel_events("recommendations", panel, delay))
        .boxed()
}

fn status_event(message: &'static str) -> BoxStream<'static, Event> {
    let status = json_event("status", json!({ "message": message }));
    stream::once(async move { status }).boxed()
}

fn panel_events(
    slot: &'static str,
    panel: Panel,
    delay: Duration,
) -> BoxStream<'static, Event> {
    match panel {
        Panel::Rendered { heading, text } => {
            let heading = json_event("heading", json!({ "panel": slot, "heading": heading }));
            stream::once(async move { heading })
                .chain(reveal_stream(text, delay).map(move |prefix| {
                    json_event("reveal", json!({ "panel": slot, "text": prefix }))
                }))
                .boxed()
        }
        Panel::Notice { message } => {
            let notice = json_event("notice", json!({ "panel": slot, "message": message }));
            stream::once(async move { notice }).boxed()
        }
        Panel::Failed { message } => {
            let failure = json_event("error", json!({ "panel": slot, "message": message }));
            stream::once(async move { failure }).boxed()
        }
    }
}

fn json_event(name: &str, payload: impl Serialize) -> Event {
    Event::default()
        .event(name)
        .json_data(payload)
        .unwrap_or_else(|e| {
            tracing::error!("Failed to encode {name} event: {e}");
            Event::default().event("error").data("event encoding failed")
        })
}
