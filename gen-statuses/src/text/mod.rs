//! Text processing: dialect rewriting, sentence splitting, and chunking.

pub mod chunker;
mod cleaner;
pub mod dialect;
pub mod segmenter;

pub use chunker::{DEFAULT_MAX_LENGTH, ELLIPSIS, is_heading, pack};
pub use cleaner::paragraphs;
pub use dialect::{DialectTransformer, SubstitutionTable};
pub use segmenter::{DEFAULT_EXCLAMATIONS, ExclamationCycle, segment};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One postable unit.
///
/// Serialized untagged: a single status is a JSON string and a group is a
/// JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Chunk {
    /// A standalone status
    Single(String),
    /// Continuation statuses reconstituting one long sentence, posted as a thread
    Group(Vec<String>),
}

impl Chunk {
    /// The statuses to post for this chunk, in thread order.
    pub fn statuses(&self) -> Vec<String> {
        match self {
            Chunk::Single(text) => vec![text.clone()],
            Chunk::Group(members) => members.clone(),
        }
    }

    /// Number of statuses in this chunk.
    pub fn len(&self) -> usize {
        match self {
            Chunk::Single(_) => 1,
            Chunk::Group(members) => members.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Chunk::Group(_))
    }
}

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub max_length: usize,
    pub exclamations: Vec<String>,
    pub table: SubstitutionTable,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            exclamations: DEFAULT_EXCLAMATIONS.iter().map(|s| s.to_string()).collect(),
            table: SubstitutionTable::standard(),
        }
    }
}

/// Turn raw source text into postable chunks.
///
/// Paragraphs are split into sentences, each sentence is rewritten into
/// dialect, and the results are packed under `options.max_length`.
pub fn generate(text: &str, options: &GenerateOptions) -> Result<Vec<Chunk>> {
    let transformer = DialectTransformer::new(options.table.clone());
    let mut exclamations = ExclamationCycle::new(options.exclamations.clone());

    let paragraphs = paragraphs(text);
    let mut sentences = Vec::new();
    for paragraph in &paragraphs {
        for sentence in segment(paragraph, &mut exclamations) {
            let transformed = transformer.transform(&sentence);
            log::debug!("{} => {}", sentence, transformed);
            sentences.push(transformed);
        }
    }

    log::info!(
        "{} paragraphs, {} sentences, {} interjections",
        paragraphs.len(),
        sentences.len(),
        exclamations.cursor()
    );

    let chunks = pack(&sentences, options.max_length)?;
    log::info!(
        "{} chunks ({} groups)",
        chunks.len(),
        chunks.iter().filter(|c| c.is_group()).count()
    );

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateError;

    #[test]
    fn test_chunk_json_shape() {
        let chunks = vec![
            Chunk::Single("Dis is da test.".to_string()),
            Chunk::Group(vec!["one…".to_string(), "…two".to_string()]),
        ];

        let json = serde_json::to_string(&chunks).unwrap();
        assert_eq!(json, r#"["Dis is da test.",["one…","…two"]]"#);

        let parsed: Vec<Chunk> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, chunks);
    }

    #[test]
    fn test_chunk_statuses() {
        let single = Chunk::Single("Bene.".to_string());
        assert_eq!(single.statuses(), vec!["Bene."]);
        assert_eq!(single.len(), 1);
        assert!(!single.is_group());

        let group = Chunk::Group(vec!["a…".to_string(), "…b".to_string()]);
        assert_eq!(group.len(), 2);
        assert!(group.is_group());
    }

    #[test]
    fn test_generate_end_to_end() {
        let text = "THE BEGINNING\n\nThis is a test. They do not know that man.\n";
        let chunks = generate(text, &GenerateOptions::default()).unwrap();

        assert_eq!(
            chunks,
            vec![
                Chunk::Single("DA BEGINNING".to_string()),
                Chunk::Single("Dis is da test. Dey no know-a dat man.".to_string()),
            ]
        );
    }

    #[test]
    fn test_generate_adds_interjection_to_long_paragraphs() {
        let text = "One here. Two here. Three here. Four here.\nFive here. Six here. Seven here. Eight here.";
        let chunks = generate(text, &GenerateOptions::default()).unwrap();

        assert_eq!(chunks.len(), 1);
        let Chunk::Single(status) = &chunks[0] else {
            panic!("expected a single status");
        };
        assert!(status.contains("Four here. Capisce? Five here."));
        assert!(status.ends_with("Eight here. Mamma mia!"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let text = "Those were not the days. Their house is there.\nOF THE PEOPLE";
        let options = GenerateOptions::default();
        assert_eq!(
            generate(text, &options).unwrap(),
            generate(text, &options).unwrap()
        );
    }

    #[test]
    fn test_generate_respects_max_length() {
        let options = GenerateOptions {
            max_length: 40,
            ..GenerateOptions::default()
        };
        let text = "First sentence here. Second sentence here. Third sentence here.";
        let chunks = generate(text, &options).unwrap();

        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            for status in chunk.statuses() {
                assert!(status.chars().count() < 40);
            }
        }
    }

    #[test]
    fn test_generate_rejects_unsplittable_word() {
        let text = format!("A word like {} cannot be posted.", "z".repeat(300));
        assert!(matches!(
            generate(&text, &GenerateOptions::default()),
            Err(GenerateError::UnsplittableToken { .. })
        ));
    }
}
