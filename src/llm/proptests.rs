//! Property-based tests for the provider-neutral LLM types
//!
//! - Status classification is total and consistent with transience
//! - History entries translate to messages without losing role or text
//! - Response text is the concatenation of its parts

use super::types::{LlmMessage, LlmResponse, MessageRole, Usage};
use super::{LlmError, LlmErrorKind};
use crate::state_machine::{HistoryEntry, Role};
use proptest::prelude::*;
use reqwest::StatusCode;

fn arb_error_status() -> impl Strategy<Value = StatusCode> {
    (400u16..600).prop_filter_map("valid status", |code| StatusCode::from_u16(code).ok())
}

fn arb_history_entry() -> impl Strategy<Value = HistoryEntry> {
    (any::<bool>(), "[a-zA-Z0-9 _.!?,']{0,80}").prop_map(|(is_user, text)| {
        if is_user {
            HistoryEntry::user(text)
        } else {
            HistoryEntry::assistant(text)
        }
    })
}

proptest! {
    #[test]
    fn server_errors_are_transient(code in 500u16..600) {
        let status = StatusCode::from_u16(code).unwrap();
        let err = LlmError::from_status(status, "boom");
        prop_assert_eq!(err.kind, LlmErrorKind::ServerError);
        prop_assert!(err.kind.is_transient());
    }

    #[test]
    fn client_errors_are_transient_only_when_rate_limited(status in arb_error_status()) {
        prop_assume!(status.is_client_error());
        let err = LlmError::from_status(status, "bad");
        prop_assert_eq!(err.kind.is_transient(), status == StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn classification_keeps_provider_message(status in arb_error_status(), msg in "[a-z ]{1,40}") {
        let err = LlmError::from_status(status, &msg);
        prop_assert!(err.message.contains(&msg));
    }

    #[test]
    fn history_translation_preserves_role_and_text(entries in prop::collection::vec(arb_history_entry(), 0..20)) {
        let messages: Vec<LlmMessage> = entries.iter().map(LlmMessage::from).collect();
        prop_assert_eq!(messages.len(), entries.len());
        for (entry, message) in entries.iter().zip(&messages) {
            let expected = match entry.role {
                Role::User => MessageRole::User,
                Role::Assistant => MessageRole::Assistant,
            };
            prop_assert_eq!(message.role, expected);
            prop_assert_eq!(&message.text, &entry.content);
        }
    }

    #[test]
    fn response_text_joins_parts(parts in prop::collection::vec("[a-z ]{0,20}", 0..6)) {
        let response = LlmResponse {
            content: parts.clone(),
            usage: Usage::default(),
        };
        prop_assert_eq!(response.text(), parts.concat());
    }
}
