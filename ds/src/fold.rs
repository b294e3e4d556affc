//! Case and diacritic folding
//!
//! Matching runs on folded text: NFD-decomposed, combining marks dropped,
//! lower-cased. Every folded character remembers which original character
//! produced it so spans found in folded text can be reported against the
//! original.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Folded copy of a text plus the mapping back to original char offsets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldedText {
    chars: Vec<char>,
    /// `origins[i]` is the original char index folded char `i` came from
    origins: Vec<usize>,
    /// Length of the original text in chars
    original_len: usize,
}

impl FoldedText {
    pub fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut origins = Vec::with_capacity(text.len());
        let mut original_len = 0;

        for (index, c) in text.chars().enumerate() {
            original_len = index + 1;
            for base in std::iter::once(c).nfd().filter(|&d| !is_combining_mark(d)) {
                for lower in base.to_lowercase() {
                    chars.push(lower);
                    origins.push(index);
                }
            }
        }

        Self {
            chars,
            origins,
            original_len,
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Whether folded position `index` starts a word
    pub fn is_word_start(&self, index: usize) -> bool {
        index == 0 || self.chars.get(index - 1).is_some_and(|c| !c.is_alphanumeric())
    }

    /// Map a folded half-open span to a half-open span of original chars
    ///
    /// Characters that folded away entirely (combining marks) directly after
    /// the span are included in it.
    pub fn original_span(&self, start: usize, end: usize) -> (usize, usize) {
        debug_assert!(start < end && end <= self.chars.len());
        let original_start = self.origins[start];
        let last = self.origins[end - 1];
        let original_end = match self.origins.get(end) {
            Some(&next) => next.max(last + 1),
            None => self.original_len,
        };
        (original_start, original_end)
    }
}
