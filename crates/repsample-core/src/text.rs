//! Sentence segmentation and word-length extraction.
//!
//! Segmentation is deliberately literal: every `.` ends a sentence. Abbreviations
//! ("e.g."), decimals and ellipses are split like any other period, so
//! `"It cost 3.50 dollars."` yields two sentences.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of any whitespace, newlines included.
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// One sentence of the source text with the lengths of its words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    text: String,
    word_lengths: Vec<usize>,
}

impl Sentence {
    /// Build a sentence from already-trimmed text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let word_lengths = word_lengths(&text);
        Self { text, word_lengths }
    }

    /// The trimmed sentence text, terminating period included.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Alphabetic character counts of each word, in source order.
    pub fn word_lengths(&self) -> &[usize] {
        &self.word_lengths
    }

    /// Number of words that contain at least one letter.
    pub fn word_count(&self) -> usize {
        self.word_lengths.len()
    }
}

/// Collapse every run of whitespace to a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Split text into sentence strings, breaking immediately after every `.`.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    let normalized = normalize_whitespace(text);
    normalized
        .split_inclusive('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Letter counts of each space-delimited token in a sentence.
///
/// Punctuation attached to a word is not counted. Tokens with no letters at
/// all (a lone dash, a number) are dropped.
///
/// A letter is any `char` with the Unicode `Alphabetic` property. That
/// includes the combining vowel signs of Indic scripts, so "हिंदी" counts 5.
pub fn word_lengths(sentence: &str) -> Vec<usize> {
    sentence
        .split(' ')
        .map(|token| token.chars().filter(|c| c.is_alphabetic()).count())
        .filter(|&len| len > 0)
        .collect()
}

/// Segment a document into [`Sentence`]s.
pub fn segment(text: &str) -> Vec<Sentence> {
    split_sentences(text).into_iter().map(Sentence::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_whitespace("  a\n\n b\t c  "), "a b c");
    }

    #[test]
    fn splits_after_every_period() {
        let sentences = split_sentences("Cat sat. Dog ran far away today.");
        assert_eq!(sentences, vec!["Cat sat.", "Dog ran far away today."]);
    }

    #[test]
    fn abbreviations_and_decimals_are_split() {
        let sentences = split_sentences("See e.g. this. It cost 3.50 dollars.");
        assert_eq!(
            sentences,
            vec!["See e.", "g.", "this.", "It cost 3.", "50 dollars."]
        );
    }

    #[test]
    fn trailing_text_without_period_is_a_sentence() {
        let sentences = split_sentences("One. Two without end");
        assert_eq!(sentences, vec!["One.", "Two without end"]);
    }

    #[test]
    fn no_periods_yields_one_sentence() {
        assert_eq!(split_sentences("just some words"), vec!["just some words"]);
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences(" \n\t ").is_empty());
    }

    #[test]
    fn consecutive_periods_drop_empty_pieces() {
        let sentences = split_sentences("Wait... what.");
        assert_eq!(sentences, vec!["Wait.", ".", ".", "what."]);
    }

    #[test]
    fn punctuation_excluded_from_word_length() {
        assert_eq!(word_lengths("Hello, world! (ok)"), vec![5, 5, 2]);
    }

    #[test]
    fn punctuation_only_tokens_dropped() {
        assert_eq!(word_lengths("a - 42 bc ."), vec![1, 2]);
    }

    #[test]
    fn non_ascii_letters_count() {
        assert_eq!(word_lengths("café naïve"), vec![4, 5]);
    }

    #[test]
    fn combining_vowel_signs_count_as_letters() {
        // ह ि ं द ी: two consonants, two vowel signs, one nasal mark.
        assert_eq!(word_lengths("हिंदी"), vec![5]);
        assert_eq!(word_lengths("Ελλάδα мир"), vec![6, 3]);
    }

    #[test]
    fn sentence_word_count_matches_lengths() {
        let sentence = Sentence::new("Dog ran far away today.");
        assert_eq!(sentence.word_lengths(), &[3, 3, 3, 4, 5]);
        assert_eq!(sentence.word_count(), 5);
        assert_eq!(sentence.text(), "Dog ran far away today.");
    }
}
