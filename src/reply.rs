//! Response generation strategies
//!
//! A generator turns the context of one coaching turn into reply text.
//! The fixed-template strategy never fails; the delegated strategy asks
//! an LLM service and may.

mod delegated;
pub mod templates;

pub use delegated::{LlmGenerator, DEFAULT_TIMEOUT, MAX_HISTORY_WINDOW};

use crate::llm::LlmError;
use crate::state_machine::{HistoryEntry, Level, Mode, Profile, ReplyKind, Subject};
use async_trait::async_trait;

/// Everything a generator may look at for one turn
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub reply: ReplyKind,
    /// The trimmed utterance being answered
    pub utterance: &'a str,
    pub mode: Mode,
    pub profile: &'a Profile,
    pub subject: Option<Subject>,
    pub level: Option<Level>,
    /// History before the utterance, oldest first
    pub prior_history: &'a [HistoryEntry],
}

/// Strategy for producing reply text
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String, LlmError>;

    /// Strategy name, for diagnostics
    fn name(&self) -> &'static str;

    /// Model behind the strategy, if any
    fn model_id(&self) -> Option<&str> {
        None
    }
}

/// Fixed per-mode replies
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

#[async_trait]
impl ResponseGenerator for TemplateGenerator {
    async fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String, LlmError> {
        Ok(templates::render(ctx.reply, ctx.mode, ctx.subject, ctx.level))
    }

    fn name(&self) -> &'static str {
        "template"
    }
}
