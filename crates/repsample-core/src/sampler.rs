//! End-to-end sampling of a document.
//!
//! ```no_run
//! use repsample_core::sampler::Document;
//!
//! let document = Document::parse(&std::fs::read_to_string("essay.txt").unwrap());
//! let sampling = document.sample(300).unwrap();
//! if let Some(winner) = sampling.winner() {
//!     println!("{}", winner.text());
//! }
//! ```

use tracing::info;

use crate::error::{SampleError, SampleResult};
use crate::extract::{Extract, ExtractBuilder, ExtractId};
use crate::markdown;
use crate::rank;
use crate::stats::PopulationStats;
use crate::text::{self, Sentence};
use crate::windows::Windows;

/// A segmented document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sentences: Vec<Sentence>,
}

impl Document {
    /// Segment plain text.
    pub fn parse(text: &str) -> Self {
        Self {
            sentences: text::segment(text),
        }
    }

    /// Segment the prose of a markdown document.
    pub fn from_markdown(text: &str) -> Self {
        Self::parse(&markdown::strip_to_prose(text))
    }

    /// The document's sentences in order.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Total alphabetic words in the document.
    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Sentence::word_count).sum()
    }

    /// Finalize the whole-document extract and derive the population statistics.
    pub fn reference(&self) -> SampleResult<(Extract<'_>, PopulationStats)> {
        let mut builder = ExtractBuilder::new(ExtractId::Original);
        for sentence in &self.sentences {
            builder.push(sentence);
        }
        builder.finalize_reference()
    }

    /// Candidate windows of roughly `sample_length` words, scored against `population`.
    pub fn windows<'p>(
        &self,
        population: &'p PopulationStats,
        sample_length: usize,
    ) -> Windows<'_, 'p> {
        Windows::new(&self.sentences, population, sample_length)
    }

    /// Run the full pipeline: baseline, windows, ranking.
    #[tracing::instrument(skip(self), fields(sentences = self.sentences.len()))]
    pub fn sample(&self, sample_length: usize) -> SampleResult<Sampling<'_>> {
        if sample_length == 0 {
            return Err(SampleError::InvalidSampleLength);
        }

        let (reference, population) = self.reference()?;
        let candidates: Vec<Extract<'_>> = self.windows(&population, sample_length).collect();
        let ranked = rank::rank(candidates);

        info!(
            words = reference.word_count(),
            candidates = ranked.len(),
            winner = ?ranked.first().map(|e| e.id().to_string()),
            "sampling complete"
        );

        Ok(Sampling {
            sample_length,
            population,
            reference,
            ranked,
        })
    }
}

/// The outcome of sampling a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampling<'a> {
    sample_length: usize,
    population: PopulationStats,
    reference: Extract<'a>,
    ranked: Vec<Extract<'a>>,
}

impl<'a> Sampling<'a> {
    /// Target words per sample.
    pub const fn sample_length(&self) -> usize {
        self.sample_length
    }

    /// Whole-document baseline statistics.
    pub const fn population(&self) -> &PopulationStats {
        &self.population
    }

    /// The whole-document extract (rank 0, scores 0).
    pub const fn reference(&self) -> &Extract<'a> {
        &self.reference
    }

    /// Candidate windows, best first.
    pub fn ranked(&self) -> &[Extract<'a>] {
        &self.ranked
    }

    /// The most representative window, if any window fit.
    pub fn winner(&self) -> Option<&Extract<'a>> {
        self.ranked.first()
    }
}
