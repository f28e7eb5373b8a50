//! Naive sentence splitting with interjections for long paragraphs.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentence-terminal mark plus the whitespace that follows it.
static TERMINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.?!]\s*").expect("terminal pattern should compile"));

/// Paragraphs with more sentences than this get an interjection appended.
const LONG_PARAGRAPH_SENTENCES: usize = 3;

/// Filler interjections, in rotation order.
pub const DEFAULT_EXCLAMATIONS: &[&str] = &[
    "Capisce?",
    "Mamma mia!",
    "Che bene.",
    "🤌",
    "Eccolo!",
    "Ma dai!",
    "Bene.",
    "Eyyy.",
];

/// Rotating list of interjections.
///
/// One cycle is created per generation run so separate runs never share a
/// cursor.
#[derive(Debug, Clone)]
pub struct ExclamationCycle {
    exclamations: Vec<String>,
    cursor: usize,
}

impl Default for ExclamationCycle {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLAMATIONS.iter().map(|s| s.to_string()).collect())
    }
}

impl ExclamationCycle {
    pub fn new(exclamations: Vec<String>) -> Self {
        Self {
            exclamations,
            cursor: 0,
        }
    }

    /// Return the next interjection and move the cursor past it.
    ///
    /// Returns `None` when the cycle has no interjections at all.
    pub fn advance(&mut self) -> Option<&str> {
        if self.exclamations.is_empty() {
            return None;
        }
        let idx = self.cursor % self.exclamations.len();
        self.cursor += 1;
        Some(&self.exclamations[idx])
    }

    /// Number of interjections handed out so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Split a paragraph into sentences, adding an interjection to long ones.
pub fn segment(paragraph: &str, exclamations: &mut ExclamationCycle) -> Vec<String> {
    let mut sentences = split_sentences(paragraph);

    if sentences.len() > LONG_PARAGRAPH_SENTENCES {
        if let Some(exclamation) = exclamations.advance() {
            sentences.push(exclamation.to_string());
        }
    }

    sentences
}

/// Split after `.`, `?` or `!` when the next word starts with a capital.
///
/// A mark directly after a capital letter or digit is not a boundary, which
/// keeps "U.S. Army" and "Chapter 1. The" in one piece.
pub fn split_sentences(paragraph: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in TERMINAL.find_iter(paragraph) {
        let after_acronym = paragraph[..m.start()]
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if after_acronym {
            continue;
        }

        let starts_sentence = paragraph[m.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase());
        if !starts_sentence {
            continue;
        }

        // the mark itself is one byte
        sentences.push(paragraph[start..m.start() + 1].to_string());
        start = m.end();
    }

    if start < paragraph.len() {
        sentences.push(paragraph[start..].to_string());
    }

    sentences
}
