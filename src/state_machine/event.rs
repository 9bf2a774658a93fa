//! Events that can occur in a conversation

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// Free-text input from the student
    UserMessage(Utterance),
    /// External request to start over
    Reset,
}

impl Event {
    pub fn user_message(text: &str) -> Self {
        Event::UserMessage(Utterance::new(text))
    }
}

/// Normalized user input.
///
/// English keywords match against `lowercase`; non-ASCII trigger
/// substrings match case-sensitively against `trimmed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub trimmed: String,
    pub lowercase: String,
}

impl Utterance {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().to_string();
        let lowercase = trimmed.to_lowercase();
        Self { trimmed, lowercase }
    }
}
