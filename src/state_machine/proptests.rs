//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::policy::ReplyKind;
use super::state::*;
use super::transition::*;
use super::*;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// Run the transition and apply its effects, like the controller does
fn step(session: &mut Session, event: &Event) -> TransitionResult {
    let result = transition(session.stage(), event);
    for effect in &result.effects {
        effect.apply(session);
    }
    result
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_vocabulary_word() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("math".to_string()),
        Just("Reading".to_string()),
        Just(" SCIENCE ".to_string()),
        Just("beginner".to_string()),
        Just("Intermediate".to_string()),
        Just("advanced".to_string()),
    ]
}

fn arb_trigger_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("my grades don't improve".to_string()),
        Just("I feel stressed".to_string()),
        Just("성적이 안 올라요".to_string()),
        Just("불안해요".to_string()),
        Just("so tired".to_string()),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_vocabulary_word(),
        arb_trigger_text(),
        "[a-zA-Z !?]{0,30}",
        "\\PC{0,20}",
    ]
}

fn arb_message() -> impl Strategy<Value = Event> {
    arb_text().prop_map(|text| Event::user_message(&text))
}

fn arb_non_subject() -> impl Strategy<Value = String> {
    "\\PC{0,30}".prop_filter("must not be a subject", |s| {
        Subject::parse(&s.trim().to_lowercase()).is_none()
    })
}

fn arb_coaching_session() -> impl Strategy<Value = Session> {
    (
        prop_oneof![Just(Subject::Math), Just(Subject::Reading), Just(Subject::Science)],
        prop_oneof![Just(Level::Beginner), Just(Level::Intermediate), Just(Level::Advanced)],
    )
        .prop_map(|(subject, level)| {
            let mut session = Session::default();
            step(&mut session, &Event::user_message(subject.as_str()));
            step(&mut session, &Event::user_message(level.as_str()));
            session
        })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: Stage never moves backwards without a reset
    #[test]
    fn prop_stage_is_monotonic(events in proptest::collection::vec(arb_message(), 0..20)) {
        let mut session = Session::default();
        for event in &events {
            let before = session.stage();
            let result = step(&mut session, event);
            prop_assert!(session.stage() >= before, "{:?} -> {:?}", before, session.stage());
            prop_assert_eq!(session.stage(), result.new_stage);
            prop_assert!(result.reply.is_some());
        }
    }

    // Invariant 2: Slots never change once set
    #[test]
    fn prop_slots_are_stable(events in proptest::collection::vec(arb_message(), 0..20)) {
        let mut session = Session::default();
        let mut seen_subject = None;
        let mut seen_level = None;
        for event in &events {
            step(&mut session, event);
            if seen_subject.is_some() {
                prop_assert_eq!(session.subject(), seen_subject);
            }
            if seen_level.is_some() {
                prop_assert_eq!(session.level(), seen_level);
            }
            seen_subject = session.subject();
            seen_level = session.level();
        }
    }

    // Invariant 3: Stage and slots stay consistent
    #[test]
    fn prop_stage_matches_slots(events in proptest::collection::vec(arb_message(), 0..20)) {
        let mut session = Session::default();
        for event in &events {
            step(&mut session, event);
            match session.stage() {
                Stage::AwaitSubject => {
                    prop_assert!(session.subject().is_none() && session.level().is_none());
                }
                Stage::AwaitLevel => {
                    prop_assert!(session.subject().is_some() && session.level().is_none());
                }
                Stage::Coaching => {
                    prop_assert!(session.subject().is_some() && session.level().is_some());
                }
            }
        }
    }

    // Invariant 4: Non-subjects are re-prompted without a transition
    #[test]
    fn prop_non_subject_reprompts(text in arb_non_subject()) {
        let mut session = Session::default();
        let result = step(&mut session, &Event::user_message(&text));
        prop_assert_eq!(session.stage(), Stage::AwaitSubject);
        prop_assert_eq!(result.reply, Some(ReplyKind::RepromptSubject));
        prop_assert!(result.effects.is_empty());
    }

    // Invariant 5: Grades tokens beat stress tokens in coaching
    #[test]
    fn prop_grades_beats_stress(
        session in arb_coaching_session(),
        prefix in "[a-z ]{0,10}",
        grades in prop_oneof![Just("grades"), Just("score"), Just("성적"), Just("improve")],
        stress in prop_oneof![Just("stress"), Just("anxious"), Just("tired"), Just("불안")],
        grades_first in any::<bool>()
    ) {
        let text = if grades_first {
            format!("{prefix} {grades} {stress}")
        } else {
            format!("{prefix} {stress} {grades}")
        };
        let result = transition(session.stage(), &Event::user_message(&text));
        prop_assert_eq!(result.reply, Some(ReplyKind::GradesPlan));
    }

    // Invariant 6: Reset always restores a fresh conversation
    #[test]
    fn prop_reset_restores_initial_state(events in proptest::collection::vec(arb_message(), 0..20)) {
        let mut session = Session::default();
        for event in &events {
            step(&mut session, event);
        }
        step(&mut session, &Event::Reset);
        prop_assert_eq!(session.stage(), Stage::AwaitSubject);
        prop_assert!(session.subject().is_none());
        prop_assert!(session.level().is_none());
        prop_assert_eq!(session.history().len(), 1);
        prop_assert_eq!(&session.history()[0].content, GREETING);
    }

    // Invariant 7: Coaching never leaves coaching
    #[test]
    fn prop_coaching_is_steady(
        session in arb_coaching_session(),
        events in proptest::collection::vec(arb_message(), 1..10)
    ) {
        let mut session = session;
        for event in &events {
            let result = step(&mut session, event);
            prop_assert_eq!(session.stage(), Stage::Coaching);
            prop_assert!(result.reply.is_some_and(ReplyKind::is_coaching));
        }
    }
}
