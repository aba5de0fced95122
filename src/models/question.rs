use serde::{Deserialize, Serialize};

/// The five question formats a quiz mixes together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    FillBlank,
    Define,
    Enumeration,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 5] = [
        QuestionKind::MultipleChoice,
        QuestionKind::TrueFalse,
        QuestionKind::FillBlank,
        QuestionKind::Define,
        QuestionKind::Enumeration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "Multiple Choice",
            QuestionKind::TrueFalse => "True/False",
            QuestionKind::FillBlank => "Fill in the Blank",
            QuestionKind::Define => "Define",
            QuestionKind::Enumeration => "Enumeration",
        }
    }

    /// Whether the answer is typed rather than picked from a list.
    pub fn is_free_text(self) -> bool {
        matches!(
            self,
            QuestionKind::FillBlank | QuestionKind::Define | QuestionKind::Enumeration
        )
    }
}

/// What counts as the right answer, per format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expected {
    MultipleChoice { options: Vec<String>, correct: usize },
    TrueFalse { correct: bool },
    FillBlank { correct: String },
    Define { correct: String },
    Enumeration { correct: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub expected: Expected,
    pub time_limit_secs: u32,
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self.expected {
            Expected::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Expected::TrueFalse { .. } => QuestionKind::TrueFalse,
            Expected::FillBlank { .. } => QuestionKind::FillBlank,
            Expected::Define { .. } => QuestionKind::Define,
            Expected::Enumeration { .. } => QuestionKind::Enumeration,
        }
    }

    /// Options to pick from, if the question has any.
    pub fn options(&self) -> Option<&[String]> {
        match &self.expected {
            Expected::MultipleChoice { options, .. } => Some(options),
            _ => None,
        }
    }

    /// Human-readable form of the expected answer.
    pub fn correct_answer_text(&self) -> String {
        match &self.expected {
            Expected::MultipleChoice { options, correct } => {
                options.get(*correct).cloned().unwrap_or_default()
            }
            Expected::TrueFalse { correct } => bool_label(*correct).to_string(),
            Expected::FillBlank { correct } | Expected::Define { correct } => correct.clone(),
            Expected::Enumeration { correct } => correct.join(", "),
        }
    }

    /// Human-readable form of a given answer, or "No answer".
    pub fn describe_answer(&self, answer: Option<&Answer>) -> String {
        match (answer, &self.expected) {
            (None, _) => NO_ANSWER.to_string(),
            (Some(Answer::Choice(index)), Expected::MultipleChoice { options, .. }) => options
                .get(*index)
                .cloned()
                .unwrap_or_else(|| NO_ANSWER.to_string()),
            (Some(Answer::Bool(value)), _) => bool_label(*value).to_string(),
            (Some(Answer::Text(text)), _) if !text.is_empty() => text.clone(),
            _ => NO_ANSWER.to_string(),
        }
    }
}

pub const NO_ANSWER: &str = "No answer";

fn bool_label(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// A student's response to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Choice(usize),
    Bool(bool),
    Text(String),
}

impl Answer {
    /// Whether this answer is the right shape for the given question kind.
    pub fn fits(&self, kind: QuestionKind) -> bool {
        match self {
            Answer::Choice(_) => kind == QuestionKind::MultipleChoice,
            Answer::Bool(_) => kind == QuestionKind::TrueFalse,
            Answer::Text(_) => kind.is_free_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq() -> Question {
        Question {
            prompt: "What is the capital of the Philippines?".into(),
            expected: Expected::MultipleChoice {
                options: vec!["Manila".into(), "Cebu".into(), "Davao".into(), "Iloilo".into()],
                correct: 0,
            },
            time_limit_secs: 15,
        }
    }

    #[test]
    fn test_kind_and_correct_text() {
        let question = mcq();
        assert_eq!(question.kind(), QuestionKind::MultipleChoice);
        assert_eq!(question.correct_answer_text(), "Manila");
        assert_eq!(question.options().map(|o| o.len()), Some(4));
    }

    #[test]
    fn test_describe_answer() {
        let question = mcq();
        assert_eq!(question.describe_answer(None), "No answer");
        assert_eq!(question.describe_answer(Some(&Answer::Choice(1))), "Cebu");
        assert_eq!(question.describe_answer(Some(&Answer::Choice(9))), "No answer");
    }

    #[test]
    fn test_answer_fits_kind() {
        assert!(Answer::Choice(0).fits(QuestionKind::MultipleChoice));
        assert!(Answer::Text("x".into()).fits(QuestionKind::Enumeration));
        assert!(!Answer::Bool(true).fits(QuestionKind::FillBlank));
    }
}
