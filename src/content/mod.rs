//! Turning an uploaded document into quiz vocabulary.
//!
//! No document is actually parsed. [`FilenameHeuristic`] guesses a topic from
//! the file name and hands back a canned vocabulary for it. Anything smarter
//! can be plugged in behind [`ContentSource`].

mod document;
mod topics;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::ContentError;

pub use document::{DocumentKind, UploadedDocument, mime_for_extension};
pub use topics::Topic;

/// Vocabulary the question generator draws from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudyContent {
    pub topics: Vec<String>,
    pub key_terms: Vec<String>,
    pub concepts: Vec<String>,
    pub facts: Vec<String>,
}

impl StudyContent {
    pub fn primary_topic(&self) -> &str {
        self.topics.first().map(String::as_str).unwrap_or_default()
    }
}

/// Document-to-vocabulary extraction.
pub trait ContentSource {
    fn extract(&self, doc: &UploadedDocument) -> Result<StudyContent, ContentError>;
}

/// Topic guessed from the file name, vocabulary from a fixed table.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenameHeuristic;

impl ContentSource for FilenameHeuristic {
    fn extract(&self, doc: &UploadedDocument) -> Result<StudyContent, ContentError> {
        let topic = Topic::classify(&doc.name);
        log::info!("Classified {} as {:?}", doc.name, topic);

        let mut content = StudyContent {
            topics: topic.labels().iter().map(|s| s.to_string()).collect(),
            ..StudyContent::default()
        };

        if let Some(text) = &doc.text {
            content.key_terms = extract_keywords(text);
        }

        if let Some(authored) = topic.authored() {
            content.key_terms = to_owned(authored.key_terms);
            content.concepts = to_owned(authored.concepts);
            content.facts = to_owned(authored.facts);
        }

        if content.concepts.is_empty() {
            log::warn!(
                "No authored concepts for {:?}; generated questions will be sparse",
                topic
            );
        }

        Ok(content)
    }
}

const MIN_TEXT_LEN: usize = 50;
const MIN_KEYWORDS: usize = 5;
const MAX_KEYWORDS: usize = 8;

const STOPWORDS: [&str; 30] = [
    "this", "that", "with", "have", "will", "been", "from", "they", "know", "want", "good",
    "much", "some", "time", "very", "when", "come", "here", "just", "like", "long", "make",
    "many", "over", "such", "take", "than", "them", "well", "were",
];

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z0-9_]{4,}\b").expect("word pattern is valid"));

/// First few distinct, non-trivial words of a text.
///
/// Returns nothing unless the text is long enough and yields more than
/// five candidates.
pub fn extract_keywords(text: &str) -> Vec<String> {
    if text.chars().count() <= MIN_TEXT_LEN {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    let mut seen = HashSet::new();
    let unique: Vec<String> = WORD
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| !STOPWORDS.contains(w))
        .filter(|w| seen.insert(*w))
        .map(str::to_string)
        .collect();

    if unique.len() > MIN_KEYWORDS {
        unique.into_iter().take(MAX_KEYWORDS).collect()
    } else {
        Vec::new()
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
