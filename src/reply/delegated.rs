//! Coaching replies delegated to an LLM service

use super::{GenerationContext, ResponseGenerator};
use crate::llm::{LlmError, LlmMessage, LlmRequest, LlmService, SystemContent};
use crate::system_prompt::{build_system_prompt, PromptContext};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Upper bound on prior history entries sent to the model
pub const MAX_HISTORY_WINDOW: usize = 12;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_REPLY_TOKENS: u32 = 600;

/// Generator that asks an LLM for each coaching reply
pub struct LlmGenerator {
    service: Arc<dyn LlmService>,
    history_window: usize,
    safety_notice: bool,
    timeout: Duration,
}

impl LlmGenerator {
    pub fn new(service: Arc<dyn LlmService>) -> Self {
        Self {
            service,
            history_window: MAX_HISTORY_WINDOW,
            safety_notice: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Number of prior entries to include, clamped to `1..=12`
    #[must_use]
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window.clamp(1, MAX_HISTORY_WINDOW);
        self
    }

    #[must_use]
    pub fn with_safety_notice(mut self, enabled: bool) -> Self {
        self.safety_notice = enabled;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request(&self, ctx: &GenerationContext<'_>) -> LlmRequest {
        let system = build_system_prompt(&PromptContext {
            mode: ctx.mode,
            profile: ctx.profile,
            subject: ctx.subject,
            level: ctx.level,
            safety_notice: self.safety_notice,
        });

        let skip = ctx.prior_history.len().saturating_sub(self.history_window);
        let mut messages: Vec<LlmMessage> = ctx.prior_history[skip..]
            .iter()
            .map(LlmMessage::from)
            .collect();
        messages.push(LlmMessage::user(ctx.utterance));

        LlmRequest {
            system: vec![SystemContent::new(system)],
            messages,
            max_tokens: Some(MAX_REPLY_TOKENS),
        }
    }
}

#[async_trait]
impl ResponseGenerator for LlmGenerator {
    async fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String, LlmError> {
        let request = self.build_request(ctx);

        let response = match timeout(self.timeout, self.service.complete(&request)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(LlmError::timeout(format!(
                    "No reply within {}s",
                    self.timeout.as_secs()
                )))
            }
        };

        let text = response.text();
        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::malformed("Model returned an empty reply"));
        }
        Ok(text.to_string())
    }

    fn name(&self) -> &'static str {
        "llm"
    }

    fn model_id(&self) -> Option<&str> {
        Some(self.service.model_id())
    }
}
