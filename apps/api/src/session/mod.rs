//! In-memory form state, one entry per browser session.
//!
//! The profile changes only through [`SessionStore::save_profile`]. The
//! generation view owns `last_request` and nothing else. Sessions live for
//! the lifetime of the process.

pub mod handlers;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::profile::{CompanyProfile, SavedProfile};
use crate::models::request::ContentRequest;

#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// `None` until the user saves company details.
    pub profile: Option<SavedProfile>,
    /// Fields of the most recent generate submission, to refill the form.
    pub last_request: Option<ContentRequest>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            profile: None,
            last_request: None,
        }
    }

    pub fn company_profile(&self) -> Option<&CompanyProfile> {
        self.profile.as_ref().map(|saved| &saved.profile)
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> SessionState {
        let session = SessionState::new();
        self.sessions.insert(session.id, session.clone());
        info!("Session {} created", session.id);
        session
    }

    /// Returns a snapshot of the session.
    pub fn get(&self, id: Uuid) -> Option<SessionState> {
        self.sessions.get(&id).map(|entry| entry.value().clone())
    }

    /// The "Save Company Details" transition.
    pub fn save_profile(&self, id: Uuid, profile: CompanyProfile) -> Option<SessionState> {
        let mut entry = self.sessions.get_mut(&id)?;
        entry.profile = Some(SavedProfile {
            profile,
            saved_at: Utc::now(),
        });
        info!("Company details saved for session {id}");
        Some(entry.value().clone())
    }

    pub fn remember_request(&self, id: Uuid, request: ContentRequest) -> Option<()> {
        let mut entry = self.sessions.get_mut(&id)?;
        entry.last_request = Some(request);
        Some(())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}
