use std::sync::Arc;
use std::time::Duration;

use crate::llm_client::TextGenerator;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The generation client. A trait object so tests can script replies.
    pub llm: Arc<dyn TextGenerator>,
    pub sessions: SessionStore,
    /// Pause between reveal frames on the streaming endpoint.
    pub reveal_delay: Duration,
}
