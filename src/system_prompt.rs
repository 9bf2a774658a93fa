//! System prompt construction for delegated coaching replies
//!
//! The prompt is a pure function of the reply mode, the student profile,
//! the collected subject/level slots and the safety setting, so the same
//! session always produces the same instruction.

use crate::state_machine::{Level, Mode, Profile, Subject};
use std::fmt::Write;

/// Base system prompt establishing the advisor's role
const BASE_PROMPT: &str = r"You are JSS, a warm and practical study advisor for students. Help the student plan what to study next, break work into small steps, and keep them motivated. Stay on the topic of studying.";

const LOW_INFRA_STYLE: &str = r"Style: the student may be using voice or a basic device. Use simple, everyday words. Keep every reply between 2 and 6 short sentences. Suggest only one small, concrete action at a time. Avoid tables, links and long lists.";

const HIGH_INFRA_STYLE: &str = r"Style: the student has a personalized setup. You may give more detail, explain the reasoning behind a plan, and propose multi-step or weekly study plans with time blocks. Ask one focused follow-up question when it helps.";

const SAFETY_NOTICE: &str = r"Safety: you are not a counselor or clinician. If the student mentions self-harm, hopelessness, abuse, or severe distress, respond with empathy, do not give clinical advice, and encourage them to reach out to a trusted adult, teacher, school counselor, or a mental health professional right away.";

const NOT_SPECIFIED: &str = "not specified";
const UNKNOWN: &str = "unknown";

/// Inputs to [`build_system_prompt`]
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub mode: Mode,
    pub profile: &'a Profile,
    pub subject: Option<Subject>,
    pub level: Option<Level>,
    pub safety_notice: bool,
}

/// Build the system instruction for one coaching turn
pub fn build_system_prompt(ctx: &PromptContext<'_>) -> String {
    let mut prompt = String::from(BASE_PROMPT);

    prompt.push_str("\n\n");
    prompt.push_str(match ctx.mode {
        Mode::LowInfra => LOW_INFRA_STYLE,
        Mode::HighInfra => HIGH_INFRA_STYLE,
    });

    let goal = field_or(ctx.profile.goal.as_deref(), NOT_SPECIFIED);
    let daily_time = field_or(ctx.profile.daily_time.as_deref(), NOT_SPECIFIED);
    // Self-reported profile level first, then the level collected in chat
    let level = ctx
        .profile
        .level
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .or_else(|| ctx.level.map(Level::as_str))
        .unwrap_or(UNKNOWN);
    let subject = ctx.subject.map_or(UNKNOWN, Subject::as_str);

    prompt.push_str("\n\n<student_profile>\n");
    let _ = writeln!(prompt, "- Goal: {goal}");
    let _ = writeln!(prompt, "- Daily study time: {daily_time}");
    let _ = writeln!(prompt, "- Level: {level}");
    let _ = writeln!(prompt, "- Subject: {subject}");
    prompt.push_str("</student_profile>");

    if ctx.safety_notice {
        prompt.push_str("\n\n");
        prompt.push_str(SAFETY_NOTICE);
    }

    prompt
}

fn field_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(fallback)
}
