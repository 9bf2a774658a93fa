//! Runtime for live advisor sessions
//!
//! Sessions live in memory only. Each one sits behind its own lock, so
//! turns on the same session are serialized while different sessions
//! proceed independently.
//!
//! There is no idle eviction: a session stays in the map until a client
//! ends it with `DELETE /api/sessions/:id` or the process exits.

#[cfg(test)]
pub mod testing;

use crate::controller::{DialogueController, TurnOutcome};
use crate::state_machine::{Mode, Profile, Session};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),
}

/// Optional changes to a session's external settings
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub mode: Option<Mode>,
    pub profile: Option<Profile>,
}

type SessionHandle = Arc<Mutex<Session>>;

/// Manager for all live sessions
pub struct SessionManager {
    controller: DialogueController,
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl SessionManager {
    pub fn new(controller: DialogueController) -> Self {
        Self {
            controller,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn controller(&self) -> &DialogueController {
        &self.controller
    }

    /// Start a new session in its greeting state
    pub async fn create(&self, mode: Mode, profile: Profile) -> Session {
        let session = Session::new(mode, profile);
        let snapshot = session.clone();
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, Arc::new(Mutex::new(session)));
        tracing::info!(
            session_id = %snapshot.id,
            mode = ?snapshot.mode,
            live_sessions = sessions.len(),
            "Session created"
        );
        snapshot
    }

    pub async fn get(&self, id: Uuid) -> Result<Session, SessionError> {
        let handle = self.handle(id).await?;
        let session = handle.lock().await;
        Ok(session.clone())
    }

    /// Run one turn and return its outcome with the updated session
    pub async fn chat(&self, id: Uuid, text: &str) -> Result<(TurnOutcome, Session), SessionError> {
        let handle = self.handle(id).await?;
        let mut session = handle.lock().await;
        let outcome = self.controller.handle(&mut session, text).await;
        Ok((outcome, session.clone()))
    }

    pub async fn reset(&self, id: Uuid) -> Result<Session, SessionError> {
        let handle = self.handle(id).await?;
        let mut session = handle.lock().await;
        self.controller.reset(&mut session);
        Ok(session.clone())
    }

    /// Change mode or profile; takes effect from the next turn
    pub async fn update_settings(
        &self,
        id: Uuid,
        update: SettingsUpdate,
    ) -> Result<Session, SessionError> {
        let handle = self.handle(id).await?;
        let mut session = handle.lock().await;
        if let Some(mode) = update.mode {
            session.mode = mode;
        }
        if let Some(profile) = update.profile {
            session.profile = profile;
        }
        Ok(session.clone())
    }

    /// Drop a session entirely
    pub async fn end(&self, id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| tracing::info!(session_id = %id, "Session ended"))
            .ok_or(SessionError::NotFound(id))
    }

    async fn handle(&self, id: Uuid) -> Result<SessionHandle, SessionError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }
}
