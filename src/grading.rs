//! Deciding whether an answer counts.
//!
//! Choice questions need an exact match. Typed answers are graded loosely:
//! containing the expected text is enough.

use crate::models::{Answer, Expected, Question};

/// How many listed items must match for an enumeration to pass.
const ENUMERATION_MIN_MATCHES: usize = 2;

pub fn is_correct(question: &Question, answer: Option<&Answer>) -> bool {
    let Some(answer) = answer else {
        return false;
    };

    match (&question.expected, answer) {
        (Expected::MultipleChoice { correct, .. }, Answer::Choice(choice)) => choice == correct,
        (Expected::TrueFalse { correct }, Answer::Bool(value)) => value == correct,
        (Expected::FillBlank { correct }, Answer::Text(text))
        | (Expected::Define { correct }, Answer::Text(text)) => contains_text(text, correct),
        (Expected::Enumeration { correct }, Answer::Text(text)) => {
            enumeration_matches(text, correct)
        }
        _ => false,
    }
}

/// Case-insensitive containment of `expected` in `given`. Blank input never passes.
fn contains_text(given: &str, expected: &str) -> bool {
    let given = given.trim();
    !given.is_empty() && given.to_lowercase().contains(&expected.to_lowercase())
}

/// Split on commas and newlines, then count items that contain, or are
/// contained by, an expected item.
fn enumeration_matches(given: &str, expected: &[String]) -> bool {
    if given.trim().is_empty() {
        return false;
    }

    let expected: Vec<String> = expected.iter().map(|item| item.to_lowercase()).collect();
    let lowered = given.to_lowercase();
    let matches = lowered
        .split([',', '\n'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter(|item| {
            expected
                .iter()
                .any(|correct| correct.contains(item) || item.contains(correct.as_str()))
        })
        .count();

    matches >= expected.len().min(ENUMERATION_MIN_MATCHES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(expected: Expected) -> Question {
        Question {
            prompt: String::new(),
            expected,
            time_limit_secs: 15,
        }
    }

    fn text(s: &str) -> Answer {
        Answer::Text(s.to_string())
    }

    fn islands() -> Question {
        question(Expected::Enumeration {
            correct: vec!["Luzon".into(), "Visayas".into(), "Mindanao".into()],
        })
    }

    #[test]
    fn test_multiple_choice_exact_index() {
        let q = question(Expected::MultipleChoice {
            options: vec!["Manila".into(), "Cebu".into(), "Davao".into(), "Iloilo".into()],
            correct: 2,
        });
        assert!(is_correct(&q, Some(&Answer::Choice(2))));
        for other in [0, 1, 3] {
            assert!(!is_correct(&q, Some(&Answer::Choice(other))));
        }
        assert!(!is_correct(&q, None));
    }

    #[test]
    fn test_true_false_exact() {
        let q = question(Expected::TrueFalse { correct: false });
        assert!(is_correct(&q, Some(&Answer::Bool(false))));
        assert!(!is_correct(&q, Some(&Answer::Bool(true))));
    }

    #[test]
    fn test_fill_blank_substring_any_case() {
        let q = question(Expected::FillBlank {
            correct: "Luzon".into(),
        });
        assert!(is_correct(&q, Some(&text("I think it's luzon"))));
        assert!(is_correct(&q, Some(&text("LUZON"))));
        assert!(!is_correct(&q, Some(&text("Visayas"))));
        assert!(!is_correct(&q, Some(&text("   "))));
    }

    #[test]
    fn test_define_needs_whole_reference_sentence() {
        let q = question(Expected::Define {
            correct: "ALU performs arithmetic and logical operations".into(),
        });
        assert!(is_correct(
            &q,
            Some(&text("it means: alu performs arithmetic and logical operations."))
        ));
        assert!(!is_correct(&q, Some(&text("does arithmetic"))));
    }

    #[test]
    fn test_enumeration_needs_two_matches() {
        let q = islands();
        assert!(is_correct(&q, Some(&text("luzon, visayas"))));
        assert!(is_correct(&q, Some(&text("Luzon\nMindanao island"))));
        assert!(!is_correct(&q, Some(&text("luzon"))));
        assert!(!is_correct(&q, Some(&text("cebu, bohol"))));
        assert!(!is_correct(&q, None));
    }

    #[test]
    fn test_short_enumeration_lowers_threshold() {
        let q = question(Expected::Enumeration {
            correct: vec!["Router".into()],
        });
        assert!(is_correct(&q, Some(&text("a router"))));

        let empty = question(Expected::Enumeration { correct: vec![] });
        assert!(is_correct(&empty, Some(&text("anything"))));
        assert!(!is_correct(&empty, Some(&text(""))));
    }

    #[test]
    fn test_mismatched_answer_shape_is_wrong() {
        let q = question(Expected::TrueFalse { correct: true });
        assert!(!is_correct(&q, Some(&text("true"))));
    }
}
