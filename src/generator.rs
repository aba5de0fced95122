//! Builds a quiz from a [`StudyContent`] vocabulary.
//!
//! Each format gets the same number of questions, indexed from zero. Items
//! are picked from the vocabulary by index with wraparound, so the output for
//! a given content is fixed apart from the option and question shuffles.
//! Sparse vocabularies give sparse (even blank) questions rather than errors.

use std::sync::LazyLock;

use rand::Rng;
use rand::seq::SliceRandom;
use regex::{Regex, RegexBuilder};

use crate::config::TimeLimits;
use crate::content::StudyContent;
use crate::models::{Expected, Question, QuestionKind};

pub const BLANK: &str = "______";
const DISTRACTORS: usize = 3;
const ENUMERATION_SIZE: usize = 3;

static IS_ARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("is|are").expect("negation pattern is valid"));
static CAN_WILL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("can|will").expect("negation pattern is valid"));

pub struct QuestionGenerator<'a> {
    content: &'a StudyContent,
    limits: TimeLimits,
    per_kind: usize,
}

impl<'a> QuestionGenerator<'a> {
    pub fn new(content: &'a StudyContent, limits: TimeLimits, per_kind: usize) -> Self {
        Self {
            content,
            limits,
            per_kind,
        }
    }

    /// All formats, concatenated and then shuffled once.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Question> {
        let mut questions = Vec::with_capacity(self.per_kind * QuestionKind::ALL.len());
        for kind in QuestionKind::ALL {
            for index in 0..self.per_kind {
                questions.push(self.question(kind, index, rng));
            }
        }
        questions.shuffle(rng);

        log::info!(
            "Generated {} questions about {}",
            questions.len(),
            self.content.primary_topic()
        );
        questions
    }

    pub fn question<R: Rng + ?Sized>(
        &self,
        kind: QuestionKind,
        index: usize,
        rng: &mut R,
    ) -> Question {
        let (prompt, expected) = match kind {
            QuestionKind::MultipleChoice => self.multiple_choice(index, rng),
            QuestionKind::TrueFalse => self.true_false(index),
            QuestionKind::FillBlank => self.fill_blank(index),
            QuestionKind::Define => self.define(index),
            QuestionKind::Enumeration => self.enumeration(index),
        };

        Question {
            prompt,
            expected,
            time_limit_secs: self.limits.for_kind(kind),
        }
    }

    fn multiple_choice<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> (String, Expected) {
        let key_terms = &self.content.key_terms;

        let Some(concept) = self.content.concepts.get(index) else {
            let options: Vec<String> = key_terms.iter().take(DISTRACTORS + 1).cloned().collect();
            return (
                format!(
                    "What is a key component related to {}?",
                    self.content.primary_topic()
                ),
                Expected::MultipleChoice {
                    options,
                    correct: 0,
                },
            );
        };

        let correct_term = cycle(key_terms, index).to_string();
        let mut options: Vec<String> = std::iter::once(correct_term.clone())
            .chain(
                key_terms
                    .iter()
                    .filter(|term| **term != correct_term)
                    .take(DISTRACTORS)
                    .cloned(),
            )
            .collect();
        options.shuffle(rng);
        let correct = options
            .iter()
            .position(|option| *option == correct_term)
            .unwrap_or(0);

        (
            format!("Which component is primarily responsible for: {}?", concept),
            Expected::MultipleChoice { options, correct },
        )
    }

    fn true_false(&self, index: usize) -> (String, Expected) {
        if let Some(fact) = self.content.facts.get(index) {
            return (fact.clone(), Expected::TrueFalse { correct: true });
        }

        let concept = cycle(&self.content.concepts, index);
        (negate(concept), Expected::TrueFalse { correct: false })
    }

    fn fill_blank(&self, index: usize) -> (String, Expected) {
        let term = cycle(&self.content.key_terms, index);
        let concept = cycle(&self.content.concepts, index);
        (
            blank_out(concept, term),
            Expected::FillBlank {
                correct: term.to_string(),
            },
        )
    }

    fn define(&self, index: usize) -> (String, Expected) {
        let term = cycle(&self.content.key_terms, index);
        let needle = term.to_lowercase();
        let concepts = &self.content.concepts;
        let related = concepts
            .iter()
            .find(|concept| concept.to_lowercase().contains(&needle))
            .or_else(|| concepts.first())
            .cloned()
            .unwrap_or_default();

        (
            format!(
                "Define \"{}\" in the context of {}",
                term,
                self.content.primary_topic()
            ),
            Expected::Define { correct: related },
        )
    }

    fn enumeration(&self, index: usize) -> (String, Expected) {
        let key_terms = &self.content.key_terms;
        let start = (index * ENUMERATION_SIZE).min(key_terms.len());
        let end = (start + ENUMERATION_SIZE).min(key_terms.len());

        (
            format!(
                "List three important components or concepts related to {}:",
                self.content.primary_topic()
            ),
            Expected::Enumeration {
                correct: key_terms[start..end].to_vec(),
            },
        )
    }
}

/// `items[index % len]`, or an empty string for an empty list.
fn cycle(items: &[String], index: usize) -> &str {
    if items.is_empty() {
        ""
    } else {
        &items[index % items.len()]
    }
}

/// Word-substitution "negation" of a statement. Only the first match of each
/// pattern is replaced, and matches inside longer words count.
pub fn negate(statement: &str) -> String {
    let once = IS_ARE.replace(statement, "is not");
    CAN_WILL.replace(&once, "cannot").into_owned()
}

/// Replace every case-insensitive occurrence of `term` with [`BLANK`].
pub fn blank_out(sentence: &str, term: &str) -> String {
    if term.is_empty() {
        return sentence.to_string();
    }
    match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern.replace_all(sentence, BLANK).into_owned(),
        Err(_) => sentence.to_string(),
    }
}
