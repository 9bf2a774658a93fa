//! Fixed reply texts for every (reply kind, mode) pair

use crate::state_machine::{Level, Mode, ReplyKind, Subject};

/// Render the literal reply for a turn.
///
/// Subject and level are the session's slots after the turn's effects
/// were applied; they are always set when the kind refers to them.
pub fn render(kind: ReplyKind, mode: Mode, subject: Option<Subject>, level: Option<Level>) -> String {
    let subject_title = subject.map_or("Your subject", Subject::title);
    let level_name = level.map_or("your level", Level::as_str);

    match (kind, mode) {
        (ReplyKind::AskLevel, _) => format!(
            "Got it \u{2014} {subject_title}. What\u{2019}s your current level? (Beginner / Intermediate / Advanced)"
        ),
        (ReplyKind::RepromptSubject, _) => {
            "Tell me one subject you want to focus on today. (Math / Reading / Science)".to_string()
        }
        (ReplyKind::AskHardestTopic, Mode::LowInfra) => format!(
            "Okay. {subject_title} ({level_name}). Let\u{2019}s start small: 1 concept + 3 practice questions.\n\
             What topic is hardest for you? (e.g., fractions, equations)"
        ),
        (ReplyKind::AskHardestTopic, Mode::HighInfra) => format!(
            "Great. {subject_title} ({level_name}). What topic is hardest for you? (e.g., fractions, equations)\n\
             Also, what score/grade are you aiming for?"
        ),
        (ReplyKind::RepromptLevel, _) => {
            "Choose one level: Beginner / Intermediate / Advanced".to_string()
        }
        (ReplyKind::GradesPlan, Mode::LowInfra) => "I understand.\n\
             Today: pick ONE weak topic, do 5 questions, and review mistakes.\n\
             What topic should we start with?"
            .to_string(),
        (ReplyKind::GradesPlan, Mode::HighInfra) => "I understand how that feels.\n\
             Let\u{2019}s adjust your plan: focus on weak areas + spaced review + error log.\n\
             Tell me your weak topic and your recent score."
            .to_string(),
        (ReplyKind::StressGoal, Mode::LowInfra) => "That sounds hard.\n\
             Let\u{2019}s set a tiny goal: 10 minutes study + 3 questions.\n\
             After that, tell me: easy or hard?"
            .to_string(),
        (ReplyKind::StressGoal, Mode::HighInfra) => "That sounds stressful.\n\
             Let\u{2019}s reduce today\u{2019}s load and set one clear goal.\n\
             What is the hardest topic right now, and how long can you study today?"
            .to_string(),
        (ReplyKind::StudyPlan, Mode::LowInfra) => "Thanks. Here\u{2019}s a simple plan:\n\
             1) Review 10 min\n\
             2) Practice 5 questions\n\
             3) Check mistakes 5 min\n\
             Tell me if you want more practice questions."
            .to_string(),
        (ReplyKind::StudyPlan, Mode::HighInfra) => "Thanks. Here\u{2019}s a basic plan:\n\
             1) Review the concept (15 min)\n\
             2) Solve 10 questions (20 min)\n\
             3) Error log: write 3 mistake notes (10 min)\n\
             Want a weekly plan too? (Yes/No)"
            .to_string(),
    }
}
