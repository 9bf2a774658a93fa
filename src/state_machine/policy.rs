//! Response-selection policy table
//!
//! Each stage owns an ordered list of rules plus a catch-all. The first
//! rule whose matcher accepts the utterance decides the next stage and
//! the kind of reply; the catch-all applies when none does.

use super::event::Utterance;
use super::state::{Level, Stage, Subject};
use super::trigger::TriggerFamily;
use serde::Serialize;

/// What the assistant says back, independent of the literal wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Subject accepted, ask for level
    AskLevel,
    /// Subject not recognized
    RepromptSubject,
    /// Level accepted, ask for the hardest topic
    AskHardestTopic,
    /// Level not recognized
    RepromptLevel,
    /// Coaching: grades are not improving
    GradesPlan,
    /// Coaching: stress or low motivation
    StressGoal,
    /// Coaching: anything else
    StudyPlan,
}

impl ReplyKind {
    /// Coaching replies may be delegated to a generator; the rest are fixed.
    pub fn is_coaching(self) -> bool {
        matches!(
            self,
            ReplyKind::GradesPlan | ReplyKind::StressGoal | ReplyKind::StudyPlan
        )
    }

    pub fn family(self) -> Option<TriggerFamily> {
        match self {
            ReplyKind::GradesPlan => Some(TriggerFamily::Grades),
            ReplyKind::StressGoal => Some(TriggerFamily::Stress),
            _ => None,
        }
    }
}

/// Value extracted by a matching rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matched {
    Subject(Subject),
    Level(Level),
    Family(TriggerFamily),
    Anything,
}

/// One row of the policy table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub matcher: fn(&Utterance) -> Option<Matched>,
    /// Stage to advance to, `None` to stay
    pub next_stage: Option<Stage>,
    pub reply: ReplyKind,
}

/// Rules for a single stage
#[derive(Debug, Clone, Copy)]
pub struct StagePolicy {
    pub rules: &'static [Rule],
    pub fallback: Rule,
}

impl StagePolicy {
    /// First matching rule, or the fallback
    pub fn select(&self, utterance: &Utterance) -> (&Rule, Matched) {
        self.rules
            .iter()
            .find_map(|rule| (rule.matcher)(utterance).map(|m| (rule, m)))
            .unwrap_or((&self.fallback, Matched::Anything))
    }
}

fn match_subject(u: &Utterance) -> Option<Matched> {
    Subject::parse(&u.lowercase).map(Matched::Subject)
}

fn match_level(u: &Utterance) -> Option<Matched> {
    Level::parse(&u.lowercase).map(Matched::Level)
}

fn match_grades(u: &Utterance) -> Option<Matched> {
    TriggerFamily::Grades
        .matches(u)
        .then_some(Matched::Family(TriggerFamily::Grades))
}

fn match_stress(u: &Utterance) -> Option<Matched> {
    TriggerFamily::Stress
        .matches(u)
        .then_some(Matched::Family(TriggerFamily::Stress))
}

fn match_anything(_: &Utterance) -> Option<Matched> {
    Some(Matched::Anything)
}

const AWAIT_SUBJECT: StagePolicy = StagePolicy {
    rules: &[Rule {
        name: "accept_subject",
        matcher: match_subject,
        next_stage: Some(Stage::AwaitLevel),
        reply: ReplyKind::AskLevel,
    }],
    fallback: Rule {
        name: "reprompt_subject",
        matcher: match_anything,
        next_stage: None,
        reply: ReplyKind::RepromptSubject,
    },
};

const AWAIT_LEVEL: StagePolicy = StagePolicy {
    rules: &[Rule {
        name: "accept_level",
        matcher: match_level,
        next_stage: Some(Stage::Coaching),
        reply: ReplyKind::AskHardestTopic,
    }],
    fallback: Rule {
        name: "reprompt_level",
        matcher: match_anything,
        next_stage: None,
        reply: ReplyKind::RepromptLevel,
    },
};

// Order matters: grades before stress.
const COACHING: StagePolicy = StagePolicy {
    rules: &[
        Rule {
            name: "grades_family",
            matcher: match_grades,
            next_stage: None,
            reply: ReplyKind::GradesPlan,
        },
        Rule {
            name: "stress_family",
            matcher: match_stress,
            next_stage: None,
            reply: ReplyKind::StressGoal,
        },
    ],
    fallback: Rule {
        name: "study_plan",
        matcher: match_anything,
        next_stage: None,
        reply: ReplyKind::StudyPlan,
    },
};

/// Policy table lookup
pub fn policy_for(stage: Stage) -> &'static StagePolicy {
    match stage {
        Stage::AwaitSubject => &AWAIT_SUBJECT,
        Stage::AwaitLevel => &AWAIT_LEVEL,
        Stage::Coaching => &COACHING,
    }
}
