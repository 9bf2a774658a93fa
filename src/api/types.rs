//! API request and response types

use crate::controller::TurnOutcome;
use crate::state_machine::{
    HistoryEntry, Level, Mode, Profile, ReplyKind, Session, Stage, Subject,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to start a new session
#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub profile: Profile,
}

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Request to change external settings
#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    #[serde(default)]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub profile: Option<Profile>,
}

/// Public view of a session
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub mode: Mode,
    pub mode_label: &'static str,
    pub profile: Profile,
    pub stage: Stage,
    pub subject: Option<Subject>,
    pub level: Option<Level>,
    pub history: Vec<HistoryEntry>,
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            created_at: session.created_at,
            mode: session.mode,
            mode_label: session.mode.display_name(),
            stage: session.stage(),
            subject: session.subject(),
            level: session.level(),
            history: session.history().to_vec(),
            profile: session.profile,
        }
    }
}

/// Response with a single session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: SessionView,
}

/// Stage movement caused by a turn
#[derive(Debug, Serialize)]
pub struct TransitionInfo {
    pub from: Stage,
    pub to: Stage,
    pub rule: &'static str,
}

/// Response for chat action
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub reply_kind: ReplyKind,
    pub stage: Stage,
    pub transition: TransitionInfo,
    pub generation_failed: bool,
    pub session: SessionView,
}

impl ChatResponse {
    pub fn new(outcome: TurnOutcome, session: Session) -> Self {
        Self {
            reply: outcome.reply,
            reply_kind: outcome.reply_kind,
            stage: outcome.to,
            transition: TransitionInfo {
                from: outcome.from,
                to: outcome.to,
                rule: outcome.rule,
            },
            generation_failed: outcome.generation_failed,
            session: session.into(),
        }
    }
}

/// Canned prompts for quick demos
#[derive(Debug, Serialize)]
pub struct DemoPromptsResponse {
    pub prompts: &'static [&'static str],
}

/// Model information with metadata
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub provider: &'static str,
    pub description: &'static str,
}

/// Active reply strategy
#[derive(Debug, Serialize)]
pub struct GeneratorResponse {
    pub strategy: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub available_models: Vec<ModelInfo>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
