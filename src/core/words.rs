/// Word list collaborator: vocabulary lookups, tier draws and scrambling
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use tracing::info;

use crate::core::tier::Tier;

/// Anything that can hand out words and answer vocabulary membership
pub trait WordSource {
    /// All words whose length is one of `lengths`
    fn words_of_length(&self, lengths: &[usize]) -> Vec<&str>;

    /// Full vocabulary membership test
    fn is_known_word(&self, word: &str) -> bool;
}

/// In-memory vocabulary: lowercase, alphabetic-only words
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<String>,
    known: HashSet<String>,
}

impl WordList {
    /// Load a newline-separated word file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read word list {}", path.display()))?;
        let list = Self::from_words(text.lines());
        info!(path = %path.display(), words = list.len(), "loaded word list");
        Ok(list)
    }

    /// Build from raw words; entries are trimmed, lowercased and dropped
    /// if they contain anything but letters
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for raw in words {
            let word = raw.as_ref().trim().to_lowercase();
            if word.is_empty() || !word.chars().all(char::is_alphabetic) {
                continue;
            }
            if list.known.insert(word.clone()) {
                list.words.push(word);
            }
        }
        list
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordSource for WordList {
    fn words_of_length(&self, lengths: &[usize]) -> Vec<&str> {
        self.words
            .iter()
            .filter(|w| lengths.contains(&w.chars().count()))
            .map(String::as_str)
            .collect()
    }

    fn is_known_word(&self, word: &str) -> bool {
        self.known.contains(word)
    }
}

/// Draw a random word for the tier, `None` when the vocabulary has none
pub fn pick_word<W, R>(source: &W, tier: Tier, rng: &mut R) -> Option<String>
where
    W: WordSource + ?Sized,
    R: Rng + ?Sized,
{
    source
        .words_of_length(tier.word_lengths())
        .choose(rng)
        .map(|w| w.to_string())
}

/// Shuffle the letters of `word`. The result differs from the input
/// whenever the word has at least two distinct letters.
pub fn jumble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    letters.shuffle(rng);

    let jumbled: String = letters.iter().collect();
    if jumbled != word || letters.len() < 2 {
        return jumbled;
    }

    // A one-step rotation only reproduces the word when every letter is equal
    letters.rotate_left(1);
    letters.into_iter().collect()
}
