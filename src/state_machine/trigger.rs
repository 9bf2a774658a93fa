//! Trigger families for coaching replies

use super::event::Utterance;
use serde::Serialize;

/// A family of substrings whose presence selects a coaching branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerFamily {
    /// Grades not improving, scores
    Grades,
    /// Stress, anxiety, fatigue
    Stress,
}

impl TriggerFamily {
    /// Lowercase English tokens, matched against the lowercased input
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            TriggerFamily::Grades => &["grades", "improve", "score"],
            TriggerFamily::Stress => &["stress", "anxious", "tired"],
        }
    }

    /// Korean equivalents, matched against the trimmed original input
    pub fn native_tokens(self) -> &'static [&'static str] {
        match self {
            TriggerFamily::Grades => &["성적", "안 오르"],
            TriggerFamily::Stress => &["무기력", "불안", "스트레스"],
        }
    }

    pub fn matches(self, utterance: &Utterance) -> bool {
        self.keywords()
            .iter()
            .any(|k| utterance.lowercase.contains(k))
            || self
                .native_tokens()
                .iter()
                .any(|t| utterance.trimmed.contains(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn families(text: &str) -> Vec<TriggerFamily> {
        let utterance = Utterance::new(text);
        [TriggerFamily::Grades, TriggerFamily::Stress]
            .into_iter()
            .filter(|f| f.matches(&utterance))
            .collect()
    }

    #[test]
    fn test_english_keywords_are_case_insensitive() {
        assert_eq!(families("My GRADES are bad"), vec![TriggerFamily::Grades]);
        assert_eq!(families("I feel Stressed"), vec![TriggerFamily::Stress]);
        assert_eq!(families("so tired today"), vec![TriggerFamily::Stress]);
    }

    #[test]
    fn test_korean_tokens() {
        assert_eq!(families("성적이 안 올라요"), vec![TriggerFamily::Grades]);
        assert_eq!(families("점수가 안 오르네요"), vec![TriggerFamily::Grades]);
        assert_eq!(families("요즘 너무 불안해요"), vec![TriggerFamily::Stress]);
        assert_eq!(families("무기력해요"), vec![TriggerFamily::Stress]);
    }

    #[test]
    fn test_both_families_can_match() {
        assert_eq!(
            families("I'm stressed because my score dropped"),
            vec![TriggerFamily::Grades, TriggerFamily::Stress]
        );
        assert_eq!(
            families("스트레스 때문에 성적이"),
            vec![TriggerFamily::Grades, TriggerFamily::Stress]
        );
    }

    #[test]
    fn test_no_family() {
        assert!(families("fractions are hard").is_empty());
        assert!(families("").is_empty());
    }
}
