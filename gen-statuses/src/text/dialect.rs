//! Dialect rewriting: word substitution followed by positional grammar rules.
//!
//! The passes run in a fixed order and each one sees the output of the
//! previous one. Elision in particular fires on words that were only just
//! substituted, so the passes must not be merged.

use std::collections::{BTreeMap, HashSet};

/// Punctuation stripped from a token before table lookup.
const TRAILING_PUNCTUATION: &[char] = &[',', ':', '.', '!'];

/// Substitutions whose replacements mark the following word for elision.
const DEFAULT_INFLECTING: &[(&str, &str)] = &[
    ("then", "den"),
    ("this", "dis"),
    ("that", "dat"),
    ("these", "dese"),
    ("those", "doze"),
    ("they", "dey"),
    ("there", "dere"),
    ("their", "dere"),
];

/// Substitutions that never cause a "-a" inflection on the previous word.
const DEFAULT_PLAIN: &[(&str, &str)] = &[("italy", "Italy (Italia)")];

/// Articles produced by determiner contraction.
const ARTICLES: &[&str] = &["da", "de"];

const NEGATED_AUXILIARIES: &[&str] = &["were", "was", "is"];
const NEGATED_DO: &[&str] = &["do", "does"];
const DETERMINER_TRIGGERS: &[&str] = &["is", "was", "of", "as", "by"];
const POSSESSIVES: &[&str] = &["its", "it's", "of"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Replacement {
    word: String,
    inflecting: bool,
}

/// Case-insensitive word replacement table.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    entries: BTreeMap<String, Replacement>,
}

impl SubstitutionTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in dialect table.
    pub fn standard() -> Self {
        let table = DEFAULT_INFLECTING
            .iter()
            .fold(Self::new(), |t, (from, to)| t.with_inflecting(from, to));
        DEFAULT_PLAIN
            .iter()
            .fold(table, |t, (from, to)| t.with_plain(from, to))
    }

    /// Add a replacement that triggers elision on the word before it.
    pub fn with_inflecting(mut self, from: &str, to: &str) -> Self {
        self.insert(from, to, true);
        self
    }

    /// Add a replacement that is substituted but never triggers elision.
    pub fn with_plain(mut self, from: &str, to: &str) -> Self {
        self.insert(from, to, false);
        self
    }

    fn insert(&mut self, from: &str, to: &str, inflecting: bool) {
        self.entries.insert(
            from.to_lowercase(),
            Replacement {
                word: to.to_string(),
                inflecting,
            },
        );
    }

    /// Look up a word ignoring case.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries
            .get(&word.to_lowercase())
            .map(|r| r.word.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn inflecting_words(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter(|r| r.inflecting)
            .map(|r| r.word.as_str())
    }
}

/// Rewrites single sentences into dialect.
#[derive(Debug, Clone)]
pub struct DialectTransformer {
    table: SubstitutionTable,
    /// Words that trigger elision when they follow a consonant-final word
    dialect_words: HashSet<String>,
}

impl Default for DialectTransformer {
    fn default() -> Self {
        Self::new(SubstitutionTable::standard())
    }
}

impl DialectTransformer {
    pub fn new(table: SubstitutionTable) -> Self {
        let mut dialect_words = HashSet::new();
        for word in table.inflecting_words() {
            dialect_words.insert(word.to_string());
            dialect_words.insert(word.to_uppercase());
        }
        for article in ARTICLES {
            dialect_words.insert(article.to_string());
            dialect_words.insert(capitalize(article));
            dialect_words.insert(article.to_uppercase());
        }

        Self {
            table,
            dialect_words,
        }
    }

    /// Whether `word` (exact case) marks the previous word for elision.
    pub fn is_dialect_word(&self, word: &str) -> bool {
        self.dialect_words.contains(word)
    }

    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    /// Rewrite one sentence.
    pub fn transform(&self, sentence: &str) -> String {
        let mut words: Vec<String> = sentence
            .split_whitespace()
            .map(|w| self.substitute(w))
            .collect();

        inflect_negations(&mut words);
        contract_determiners(&mut words);
        elide_before_dialect(&mut words, &self.dialect_words);
        elide_possessives(&mut words);

        let result = words
            .into_iter()
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        log::trace!("{sentence}\n=>\n{result}");
        result
    }

    fn substitute(&self, token: &str) -> String {
        let (word, punctuation) = match token.char_indices().last() {
            Some((idx, c)) if TRAILING_PUNCTUATION.contains(&c) => token.split_at(idx),
            _ => (token, ""),
        };

        match self.table.lookup(word) {
            Some(replacement) => format!("{}{}", match_case(word, replacement), punctuation),
            None => token.to_string(),
        }
    }
}

/// "was not" becomes "no was"; "do not" becomes "no".
///
/// Single left-to-right pass; a window can see the rewrite made by the
/// previous window.
fn inflect_negations(words: &mut [String]) {
    for i in 0..words.len().saturating_sub(2) {
        if !is_word(&words[i + 2], "not") {
            continue;
        }

        let auxiliary = words[i + 1].clone();
        if NEGATED_AUXILIARIES.iter().any(|w| is_word(w, &auxiliary)) {
            words[i + 1] = match_case(&auxiliary, "no");
            words[i + 2] = auxiliary;
        } else if NEGATED_DO.iter().any(|w| is_word(w, &auxiliary)) {
            // "not" is dropped outright; there is no dialect form for it yet
            words[i + 1] = match_case(&auxiliary, "no");
            words[i + 2].clear();
        }
    }
}

/// "is a" becomes "is da", "of an" becomes "of de", "the" becomes "da"/"de".
fn contract_determiners(words: &mut [String]) {
    for i in 0..words.len().saturating_sub(1) {
        let (a, b) = (&words[i], &words[i + 1]);

        if DETERMINER_TRIGGERS.iter().any(|w| is_word(w, a))
            && (is_word(b, "a") || is_word(b, "an"))
        {
            let article = if is_word(b, "a") { "da" } else { "de" };
            words[i + 1] = match_case(b, article);
        } else if is_word(a, "the") {
            let article = if b.chars().next().is_some_and(is_vowel) {
                "de"
            } else {
                "da"
            };
            words[i] = match_case(a, article);
        }
    }
}

/// Append "-a" to a consonant-final word (other than "s") before a dialect word.
fn elide_before_dialect(words: &mut [String], dialect_words: &HashSet<String>) {
    for i in 0..words.len().saturating_sub(1) {
        if !dialect_words.contains(&words[i + 1]) {
            continue;
        }

        let Some(last) = words[i].chars().last() else {
            continue;
        };
        if last.is_ascii_alphabetic() && !is_vowel(last) && !last.eq_ignore_ascii_case(&'s') {
            words[i] = match_case(&words[i], &format!("{}-a", words[i]));
        }
    }
}

/// "its", "it's" and "of" always take "-a" unless they end the sentence.
fn elide_possessives(words: &mut [String]) {
    for i in 0..words.len().saturating_sub(1) {
        if POSSESSIVES.iter().any(|w| is_word(w, &words[i])) {
            words[i] = match_case(&words[i], &format!("{}-a", words[i]));
        }
    }
}

fn is_word(lhs: &str, rhs: &str) -> bool {
    lhs.to_lowercase() == rhs.to_lowercase()
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Whether the string is unchanged by uppercasing.
pub fn is_upper(s: &str) -> bool {
    s == s.to_uppercase()
}

/// Apply the case pattern of `from` to `to`.
///
/// All-caps source gives an all-caps result, a capitalized source gives a
/// capitalized result, anything else returns `to` as written.
pub fn match_case(from: &str, to: &str) -> String {
    if is_upper(from) {
        return to.to_uppercase();
    }
    if from.chars().next().is_some_and(char::is_uppercase) {
        return capitalize(to);
    }
    to.to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
