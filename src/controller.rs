//! Dialogue controller
//!
//! Runs one turn: records the utterance, drives the stage machine,
//! applies its effects and appends exactly one assistant reply.

use crate::reply::{templates, GenerationContext, ResponseGenerator};
use crate::state_machine::policy::policy_for;
use crate::state_machine::{transition, Event, HistoryEntry, ReplyKind, Session, Stage};
use std::sync::Arc;

/// Reply used when a delegated generation fails
pub const GENERATION_FAILURE_REPLY: &str =
    "Sorry, I couldn't put together a reply just now. Please try again in a moment.";

/// What happened during one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub reply: String,
    pub reply_kind: ReplyKind,
    pub from: Stage,
    pub to: Stage,
    /// Name of the policy rule that fired
    pub rule: &'static str,
    pub generation_failed: bool,
}

pub struct DialogueController {
    generator: Arc<dyn ResponseGenerator>,
}

impl DialogueController {
    pub fn new(generator: Arc<dyn ResponseGenerator>) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &dyn ResponseGenerator {
        self.generator.as_ref()
    }

    /// Handle one user utterance against `session`.
    ///
    /// Appends the user entry, then exactly one assistant entry. Never fails:
    /// a generator error becomes the apology reply.
    pub async fn handle(&self, session: &mut Session, input: &str) -> TurnOutcome {
        let event = Event::user_message(input);
        let from = session.stage();
        let result = transition(from, &event);

        session.push(HistoryEntry::user(input));
        for effect in &result.effects {
            effect.apply(session);
        }

        let reply_kind = result.reply.unwrap_or(policy_for(from).fallback.reply);
        let (reply, generation_failed) = if reply_kind.is_coaching() {
            self.generate(session, reply_kind, input.trim()).await
        } else {
            let text = templates::render(reply_kind, session.mode, session.subject(), session.level());
            (text, false)
        };

        session.push(HistoryEntry::assistant(reply.as_str()));

        tracing::info!(
            session_id = %session.id,
            from = from.as_str(),
            to = result.new_stage.as_str(),
            rule = result.rule,
            family = ?reply_kind.family(),
            generation_failed,
            "Turn handled"
        );

        TurnOutcome {
            reply,
            reply_kind,
            from,
            to: result.new_stage,
            rule: result.rule,
            generation_failed,
        }
    }

    /// Return the session to its greeting state
    pub fn reset(&self, session: &mut Session) {
        let from = session.stage();
        let result = transition(from, &Event::Reset);
        for effect in &result.effects {
            effect.apply(session);
        }
        tracing::info!(session_id = %session.id, from = from.as_str(), "Session reset");
    }

    async fn generate(&self, session: &Session, reply: ReplyKind, utterance: &str) -> (String, bool) {
        // The just-recorded user entry is sent as the final message, not as history
        let prior_history = session
            .history()
            .split_last()
            .map_or(&[][..], |(_, prior)| prior);

        let ctx = GenerationContext {
            reply,
            utterance,
            mode: session.mode,
            profile: &session.profile,
            subject: session.subject(),
            level: session.level(),
            prior_history,
        };

        match self.generator.generate(&ctx).await {
            Ok(text) => (text, false),
            Err(e) => {
                tracing::warn!(
                    session_id = %session.id,
                    generator = self.generator.name(),
                    kind = e.kind.as_str(),
                    error = %e.message,
                    "Reply generation failed"
                );
                (GENERATION_FAILURE_REPLY.to_string(), true)
            }
        }
    }
}
