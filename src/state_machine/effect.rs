//! Effects produced by state transitions

use super::state::{Level, Session, Stage, Subject};

/// Mutations to apply to the session after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fill the subject slot
    RecordSubject(Subject),
    /// Fill the level slot
    RecordLevel(Level),
    /// Move to a later stage
    AdvanceStage(Stage),
    /// Drop all conversation state and restore the greeting
    ResetSession,
}

impl Effect {
    pub fn apply(self, session: &mut Session) {
        match self {
            Effect::RecordSubject(subject) => session.record_subject(subject),
            Effect::RecordLevel(level) => session.record_level(level),
            Effect::AdvanceStage(stage) => session.advance_to(stage),
            Effect::ResetSession => session.reset(),
        }
    }
}
