pub mod catalog;

use serde::{Deserialize, Serialize};

/// A single vocabulary entry. Immutable once loaded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Word {
    pub word: String,
    pub difficulty: u32,
    pub frequency: u32,
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    pub language: String,
}

/// An ordered word list scoped by a deck name. The name keys the learned-words
/// set in the progress store, so it must be stable across runs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at `index`, tolerating out-of-range and unset cursors.
    pub fn word_at(&self, index: Option<usize>) -> Option<&Word> {
        index.and_then(|i| self.words.get(i))
    }
}
