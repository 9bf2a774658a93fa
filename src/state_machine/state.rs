//! Conversation state types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Fixed opening message of every session.
pub const GREETING: &str = "Hi! I\u{2019}m JSS. Tell me what you\u{2019}re struggling with.";

// ============================================================================
// Slots
// ============================================================================

/// Subjects the advisor can coach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Math,
    Reading,
    Science,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Math, Subject::Reading, Subject::Science];

    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Reading => "reading",
            Subject::Science => "science",
        }
    }

    /// Capitalized name used in replies ("Math")
    pub fn title(self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::Reading => "Reading",
            Subject::Science => "Science",
        }
    }

    /// Exact match against the lowercase vocabulary
    pub fn parse(lowercase: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == lowercase)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-assessed proficiency collected during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    pub fn parse(lowercase: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == lowercase)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// External settings
// ============================================================================

/// Reply verbosity policy, chosen by the surrounding application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Voice or basic devices: short, single-action replies
    #[default]
    LowInfra,
    /// Personalized: longer plans and follow-up questions
    HighInfra,
}

impl Mode {
    pub fn display_name(self) -> &'static str {
        match self {
            Mode::LowInfra => "Low-infrastructure (Voice/Simple)",
            Mode::HighInfra => "High-infrastructure (Personalized)",
        }
    }
}

/// Student profile supplied out-of-band. The controller only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub daily_time: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

// ============================================================================
// History
// ============================================================================

/// Author of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ============================================================================
// Stage and Session
// ============================================================================

/// Conversation stage. Only ever advances in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    AwaitSubject,
    AwaitLevel,
    Coaching,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::AwaitSubject => "await_subject",
            Stage::AwaitLevel => "await_level",
            Stage::Coaching => "coaching",
        }
    }
}

/// One user conversation.
///
/// `stage`, `subject`, `level` and `history` are private so that only the
/// transition effects and the controller's append calls can change them.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub mode: Mode,
    pub profile: Profile,
    stage: Stage,
    subject: Option<Subject>,
    level: Option<Level>,
    history: Vec<HistoryEntry>,
}

impl Session {
    pub fn new(mode: Mode, profile: Profile) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            mode,
            profile,
            stage: Stage::AwaitSubject,
            subject: None,
            level: None,
            history: vec![HistoryEntry::assistant(GREETING)],
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn subject(&self) -> Option<Subject> {
        self.subject
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Clear conversation state and restore the greeting.
    ///
    /// Mode and profile are external settings and survive a reset.
    pub fn reset(&mut self) {
        self.stage = Stage::AwaitSubject;
        self.subject = None;
        self.level = None;
        self.history.clear();
        self.history.push(HistoryEntry::assistant(GREETING));
    }

    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
    }

    /// Slots are write-once; a second write is ignored.
    pub(crate) fn record_subject(&mut self, subject: Subject) {
        if self.subject.is_none() {
            self.subject = Some(subject);
        }
    }

    pub(crate) fn record_level(&mut self, level: Level) {
        if self.level.is_none() {
            self.level = Some(level);
        }
    }

    /// Stage never regresses; backwards moves are ignored.
    pub(crate) fn advance_to(&mut self, stage: Stage) {
        if stage > self.stage {
            self.stage = stage;
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Mode::default(), Profile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_single_greeting() {
        let session = Session::default();
        assert_eq!(session.stage(), Stage::AwaitSubject);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0], HistoryEntry::assistant(GREETING));
    }

    #[test]
    fn test_slots_are_write_once() {
        let mut session = Session::default();
        session.record_subject(Subject::Math);
        session.record_subject(Subject::Science);
        session.record_level(Level::Beginner);
        session.record_level(Level::Advanced);
        assert_eq!(session.subject(), Some(Subject::Math));
        assert_eq!(session.level(), Some(Level::Beginner));
    }

    #[test]
    fn test_stage_never_regresses() {
        let mut session = Session::default();
        session.advance_to(Stage::Coaching);
        session.advance_to(Stage::AwaitLevel);
        assert_eq!(session.stage(), Stage::Coaching);
    }

    #[test]
    fn test_reset_keeps_settings() {
        let profile = Profile {
            goal: Some("pass finals".to_string()),
            ..Default::default()
        };
        let mut session = Session::new(Mode::HighInfra, profile.clone());
        session.record_subject(Subject::Reading);
        session.advance_to(Stage::AwaitLevel);
        session.push(HistoryEntry::user("reading"));

        session.reset();
        session.reset();

        assert_eq!(session.stage(), Stage::AwaitSubject);
        assert_eq!(session.subject(), None);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.mode, Mode::HighInfra);
        assert_eq!(session.profile, profile);
    }

    #[test]
    fn test_vocabulary_parsing_is_exact() {
        assert_eq!(Subject::parse("math"), Some(Subject::Math));
        assert_eq!(Subject::parse("math!"), None);
        assert_eq!(Level::parse("advanced"), Some(Level::Advanced));
        assert_eq!(Level::parse("expert"), None);
    }
}
