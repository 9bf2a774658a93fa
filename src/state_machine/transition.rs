//! Pure state transition function
//!
//! Given the same stage and event it always produces the same outcome,
//! with no I/O. The controller applies the effects and renders the reply.

use super::effect::Effect;
use super::event::Event;
use super::policy::{policy_for, Matched, ReplyKind};
use super::state::Stage;

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub new_stage: Stage,
    pub effects: Vec<Effect>,
    /// Reply to produce, `None` for events that do not answer the user
    pub reply: Option<ReplyKind>,
    /// Name of the policy rule that fired
    pub rule: &'static str,
}

impl TransitionResult {
    pub fn new(state: Stage, rule: &'static str) -> Self {
        Self {
            new_stage: state,
            effects: vec![],
            reply: None,
            rule,
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_reply(mut self, reply: ReplyKind) -> Self {
        self.reply = Some(reply);
        self
    }
}

/// Pure transition function. Total: every (stage, event) pair has an outcome.
pub fn transition(stage: Stage, event: &Event) -> TransitionResult {
    match event {
        Event::Reset => TransitionResult::new(Stage::AwaitSubject, "reset")
            .with_effect(Effect::ResetSession),

        Event::UserMessage(utterance) => {
            let (rule, matched) = policy_for(stage).select(utterance);
            let new_stage = rule.next_stage.unwrap_or(stage);
            let mut result = TransitionResult::new(new_stage, rule.name).with_reply(rule.reply);

            match matched {
                Matched::Subject(subject) => {
                    result = result.with_effect(Effect::RecordSubject(subject));
                }
                Matched::Level(level) => {
                    result = result.with_effect(Effect::RecordLevel(level));
                }
                Matched::Family(_) | Matched::Anything => {}
            }

            if new_stage != stage {
                result = result.with_effect(Effect::AdvanceStage(new_stage));
            }
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::state::{Level, Subject};

    #[test]
    fn test_accept_subject() {
        let result = transition(Stage::AwaitSubject, &Event::user_message("Math"));
        assert_eq!(result.new_stage, Stage::AwaitLevel);
        assert_eq!(result.reply, Some(ReplyKind::AskLevel));
        assert_eq!(
            result.effects,
            vec![
                Effect::RecordSubject(Subject::Math),
                Effect::AdvanceStage(Stage::AwaitLevel)
            ]
        );
    }

    #[test]
    fn test_fuzzy_subject_is_rejected() {
        let result = transition(Stage::AwaitSubject, &Event::user_message("Math!"));
        assert_eq!(result.new_stage, Stage::AwaitSubject);
        assert_eq!(result.reply, Some(ReplyKind::RepromptSubject));
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_accept_level() {
        let result = transition(Stage::AwaitLevel, &Event::user_message("INTERMEDIATE"));
        assert_eq!(result.new_stage, Stage::Coaching);
        assert_eq!(result.reply, Some(ReplyKind::AskHardestTopic));
        assert!(result.effects.contains(&Effect::RecordLevel(Level::Intermediate)));
    }

    #[test]
    fn test_coaching_self_loops() {
        for text in ["my grades", "I'm tired", "hello"] {
            let result = transition(Stage::Coaching, &Event::user_message(text));
            assert_eq!(result.new_stage, Stage::Coaching);
            assert!(result.effects.is_empty());
            assert!(result.reply.is_some_and(ReplyKind::is_coaching));
        }
    }

    #[test]
    fn test_reset_from_any_stage() {
        for stage in [Stage::AwaitSubject, Stage::AwaitLevel, Stage::Coaching] {
            let result = transition(stage, &Event::Reset);
            assert_eq!(result.new_stage, Stage::AwaitSubject);
            assert_eq!(result.effects, vec![Effect::ResetSession]);
            assert_eq!(result.reply, None);
        }
    }
}
