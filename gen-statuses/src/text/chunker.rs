//! Greedy packing of transformed sentences into postable chunks.

use super::Chunk;
use super::dialect::is_upper;
use crate::error::{GenerateError, Result};

/// Default maximum chunk length in characters.
pub const DEFAULT_MAX_LENGTH: usize = 280;

/// Continuation marker joining the members of a chunk group.
pub const ELLIPSIS: char = '\u{2026}';

/// Pack sentences, in order, into chunks shorter than `limit` characters.
///
/// All-caps sentences are headings and always stand alone. A sentence that
/// cannot fit in a chunk of its own becomes a [`Chunk::Group`].
///
/// # Errors
/// `UnsplittableToken` if a word is longer than `limit - 1` characters.
pub fn pack(sentences: &[String], limit: usize) -> Result<Vec<Chunk>> {
    if limit < 3 {
        return Err(GenerateError::InvalidLimit(limit));
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in sentences {
        if sentence.trim().is_empty() {
            continue;
        }

        let length = char_len(sentence);

        if is_heading(sentence) && length < limit {
            flush(&mut chunks, &mut current);
            chunks.push(Chunk::Single(sentence.clone()));
            continue;
        }

        if char_len(&current) + 1 + length < limit {
            current.push(' ');
            current.push_str(sentence);
            continue;
        }

        flush(&mut chunks, &mut current);

        if length < limit {
            current = sentence.clone();
            continue;
        }

        chunks.push(Chunk::Group(split_long_sentence(sentence, limit)?));
    }

    flush(&mut chunks, &mut current);
    Ok(chunks)
}

/// Whether a transformed sentence reads as a heading.
pub fn is_heading(sentence: &str) -> bool {
    !sentence.trim().is_empty() && is_upper(sentence)
}

/// Split one oversized sentence on word boundaries into linked members.
///
/// Every member but the last ends with an ellipsis and every member but the
/// first starts with one. Members keep one character of margin under `limit`
/// for the trailing marker.
fn split_long_sentence(sentence: &str, limit: usize) -> Result<Vec<String>> {
    let words: Vec<&str> = sentence.split_whitespace().collect();

    if let Some(word) = words.iter().find(|w| char_len(w) > limit - 1) {
        return Err(GenerateError::UnsplittableToken {
            token: word.to_string(),
            length: char_len(word),
            limit,
        });
    }

    let mut group = Vec::new();
    let mut current = String::new();

    for word in words {
        if char_len(&current) + 1 + char_len(word) < limit - 1 {
            current.push(' ');
            current.push_str(word);
        } else if current.is_empty() {
            current.push_str(word);
        } else {
            current.push(ELLIPSIS);
            group.push(current.trim().to_string());
            current = format!("{ELLIPSIS}{word}");
        }
    }

    if !current.trim().is_empty() {
        group.push(current.trim().to_string());
    }

    log::debug!("split {} chars into a group of {}", char_len(sentence), group.len());
    Ok(group)
}

fn flush(chunks: &mut Vec<Chunk>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        chunks.push(Chunk::Single(trimmed.to_string()));
    }
    current.clear();
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
