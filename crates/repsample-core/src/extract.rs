//! Extracts: the whole document or a contiguous window of its sentences.
//!
//! An extract is assembled with an [`ExtractBuilder`] (append, optionally drop
//! the last sentence once) and then frozen by finalizing it into an
//! [`Extract`]. Finalizing flattens the word lengths, records the sentence
//! lengths and scores them, so a finalized extract's membership can never
//! drift from its statistics.

use crate::error::{SampleError, SampleResult};
use crate::score::{self, Scores};
use crate::stats::{self, PopulationStats};
use crate::text::Sentence;

/// Identifies an extract in reports and file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractId {
    /// The whole document, used as the comparison baseline.
    Original,
    /// A window starting at this 1-based sentence position.
    Window(usize),
}

impl std::fmt::Display for ExtractId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Original => f.write_str("Original"),
            Self::Window(start) => write!(f, "{start}"),
        }
    }
}

/// An extract under construction.
#[derive(Debug, Clone)]
pub struct ExtractBuilder<'a> {
    id: ExtractId,
    sentences: Vec<&'a Sentence>,
}

impl<'a> ExtractBuilder<'a> {
    /// Start an empty extract.
    pub const fn new(id: ExtractId) -> Self {
        Self {
            id,
            sentences: Vec::new(),
        }
    }

    /// Append the next sentence.
    pub fn push(&mut self, sentence: &'a Sentence) {
        self.sentences.push(sentence);
    }

    /// Remove and return the most recently appended sentence.
    pub fn pop_last(&mut self) -> Option<&'a Sentence> {
        self.sentences.pop()
    }

    /// Number of sentences appended so far.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Whether no sentences have been appended.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Total words across the appended sentences.
    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(|s| s.word_count()).sum()
    }

    /// Freeze a window extract and score it against the document.
    pub fn finalize(self, population: &PopulationStats) -> SampleResult<Extract<'a>> {
        let (word_lengths, sentence_lengths) = self.lengths();
        Extract::new(self.id, self.sentences, word_lengths, sentence_lengths, population)
    }

    /// Freeze the whole-document extract, deriving the population statistics
    /// from it and scoring it against itself.
    ///
    /// The reference extract's own scores are always zero; it is reported as a
    /// baseline row and never ranked.
    #[tracing::instrument(skip_all, fields(sentences = self.sentences.len()))]
    pub fn finalize_reference(self) -> SampleResult<(Extract<'a>, PopulationStats)> {
        let (word_lengths, sentence_lengths) = self.lengths();
        let population = PopulationStats::from_lengths(&word_lengths, &sentence_lengths)?;
        let extract = Extract::new(
            self.id,
            self.sentences,
            word_lengths,
            sentence_lengths,
            &population,
        )?;
        Ok((extract, population))
    }

    fn lengths(&self) -> (Vec<usize>, Vec<usize>) {
        let word_lengths = self
            .sentences
            .iter()
            .flat_map(|s| s.word_lengths().iter().copied())
            .collect();
        let sentence_lengths = self.sentences.iter().map(|s| s.word_count()).collect();
        (word_lengths, sentence_lengths)
    }
}

/// A finalized, scored extract.
#[derive(Debug, Clone, PartialEq)]
pub struct Extract<'a> {
    id: ExtractId,
    sentences: Vec<&'a Sentence>,
    word_lengths: Vec<usize>,
    sentence_lengths: Vec<usize>,
    average_word_length: f64,
    average_sentence_length: f64,
    scores: Scores,
    rank: usize,
}

impl<'a> Extract<'a> {
    fn new(
        id: ExtractId,
        sentences: Vec<&'a Sentence>,
        word_lengths: Vec<usize>,
        sentence_lengths: Vec<usize>,
        population: &PopulationStats,
    ) -> SampleResult<Self> {
        let empty = || SampleError::EmptySample {
            extract: id.to_string(),
        };
        let scores = score::score(population, &word_lengths, &sentence_lengths).ok_or_else(empty)?;
        let average_word_length = stats::mean(&word_lengths).ok_or_else(empty)?;
        let average_sentence_length = stats::mean(&sentence_lengths).ok_or_else(empty)?;
        Ok(Self {
            id,
            sentences,
            word_lengths,
            sentence_lengths,
            average_word_length,
            average_sentence_length,
            scores,
            rank: 0,
        })
    }

    /// Which extract this is.
    pub const fn id(&self) -> ExtractId {
        self.id
    }

    /// The sentences in document order.
    pub fn sentences(&self) -> &[&'a Sentence] {
        &self.sentences
    }

    /// Every word length in the extract, in order.
    pub fn word_lengths(&self) -> &[usize] {
        &self.word_lengths
    }

    /// Word count of each sentence, in order.
    pub fn sentence_lengths(&self) -> &[usize] {
        &self.sentence_lengths
    }

    /// Number of words in the extract.
    pub fn word_count(&self) -> usize {
        self.word_lengths.len()
    }

    /// Average word length in letters.
    pub const fn average_word_length(&self) -> f64 {
        self.average_word_length
    }

    /// Average sentence length in words.
    pub const fn average_sentence_length(&self) -> f64 {
        self.average_sentence_length
    }

    /// Squared z-scores against the document.
    pub const fn scores(&self) -> Scores {
        self.scores
    }

    /// 1-based rank, or 0 if unranked (always 0 for the reference extract).
    pub const fn rank(&self) -> usize {
        self.rank
    }

    pub(crate) const fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }

    /// The extract's text: its sentences joined by single spaces.
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.text())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
