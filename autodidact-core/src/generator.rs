//! Placeholder flashcard generator.
//!
//! Sentences become cards verbatim; there is no language processing. The
//! output always has [`CARDS_PER_CHUNK`] cards so downstream queues have a
//! predictable size.

use crate::Flashcard;
use serde::Deserialize;

pub const CARDS_PER_CHUNK: usize = 5;
const QUESTION_PREFIX_CHARS: usize = 40;

pub fn generate_flashcards(text: &str) -> Vec<Flashcard> {
    let mut cards: Vec<Flashcard> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(CARDS_PER_CHUNK)
        .map(|sentence| {
            let head: String = sentence.chars().take(QUESTION_PREFIX_CHARS).collect();
            Flashcard::new(format!("What does the text say about: '{head}'?"), sentence)
        })
        .collect();

    while cards.len() < CARDS_PER_CHUNK {
        let n = cards.len() + 1;
        cards.push(Flashcard::new(
            format!("Example question {n}"),
            format!("Example answer {n}"),
        ));
    }
    cards
}

/// One titled chunk of a `.transcript.json` file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct TranscriptChunk {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

/// A transcript file is either a bare chunk list or `{"chunks": [...]}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Transcript {
    Bare(Vec<TranscriptChunk>),
    Chunked {
        #[serde(default)]
        chunks: Vec<TranscriptChunk>,
    },
}

impl Transcript {
    pub fn chunks(&self) -> &[TranscriptChunk] {
        match self {
            Transcript::Bare(chunks) => chunks,
            Transcript::Chunked { chunks } => chunks,
        }
    }
}

/// Runs [`generate_flashcards`] over every non-empty chunk, reading each as
/// `"<title>. <lines joined by spaces>"`. Empty chunks add no cards.
pub fn generate_from_transcript(transcript: &Transcript) -> Vec<Flashcard> {
    transcript
        .chunks()
        .iter()
        .filter_map(|chunk| {
            let text = chunk.lines.join(" ");
            let content = if chunk.title.is_empty() {
                text
            } else {
                format!("{}. {}", chunk.title, text)
            };
            (!content.is_empty()).then(|| generate_flashcards(&content))
        })
        .flatten()
        .collect()
}
