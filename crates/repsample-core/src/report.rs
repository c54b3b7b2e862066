//! Report records for sampling results.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for use in
//! CLI JSON output, the CSV report and MCP tool responses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::extract::Extract;
use crate::sampler::Sampling;
use crate::stats::PopulationStats;

/// Column headings of the tabular report, in [`ExtractRecord::row`] order.
pub const REPORT_HEADINGS: [&str; 8] = [
    "Rank",
    "Sample #",
    "Words",
    "AWL",
    "AWL-Z²",
    "ASL",
    "ASL-Z²",
    "Combined Z",
];

/// One row of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractRecord {
    /// 1-based rank; 0 for the whole-document reference row.
    pub rank: usize,
    /// `"Original"` or the 1-based index of the window's first sentence.
    pub extract: String,
    /// Number of words.
    pub words: usize,
    /// Average word length in letters.
    pub awl: f64,
    /// Squared z-score of the average word length.
    pub awl_z_squared: f64,
    /// Average sentence length in words.
    pub asl: f64,
    /// Squared z-score of the average sentence length.
    pub asl_z_squared: f64,
    /// Sum of both squared z-scores.
    pub combined_z_squared: f64,
    /// The extract's text, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ExtractRecord {
    /// Build a record from a finalized extract.
    pub fn from_extract(extract: &Extract<'_>, include_text: bool) -> Self {
        let scores = extract.scores();
        Self {
            rank: extract.rank(),
            extract: extract.id().to_string(),
            words: extract.word_count(),
            awl: extract.average_word_length(),
            awl_z_squared: scores.awl_z_squared,
            asl: extract.average_sentence_length(),
            asl_z_squared: scores.asl_z_squared,
            combined_z_squared: scores.combined,
            text: include_text.then(|| extract.text()),
        }
    }

    /// The record's fields as strings, in [`REPORT_HEADINGS`] order.
    pub fn row(&self) -> [String; 8] {
        [
            self.rank.to_string(),
            self.extract.clone(),
            self.words.to_string(),
            self.awl.to_string(),
            self.awl_z_squared.to_string(),
            self.asl.to_string(),
            self.asl_z_squared.to_string(),
            self.combined_z_squared.to_string(),
        ]
    }
}

/// Full sampling report: the reference row followed by every ranked window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SampleReport {
    /// Target words per sample.
    pub sample_length: usize,
    /// Sentences found in the document.
    pub sentences: usize,
    /// Whole-document statistics used as the baseline.
    pub population: PopulationStats,
    /// Whole-document reference row.
    pub reference: ExtractRecord,
    /// Candidate windows, best first.
    pub ranked: Vec<ExtractRecord>,
}

impl SampleReport {
    /// Build a report from a sampling run.
    ///
    /// * `winner_text`: include the text of the rank-1 window.
    /// * `all_text`: include the text of every window.
    pub fn from_sampling(sampling: &Sampling<'_>, winner_text: bool, all_text: bool) -> Self {
        let ranked = sampling
            .ranked()
            .iter()
            .map(|e| ExtractRecord::from_extract(e, all_text || (winner_text && e.rank() == 1)))
            .collect();
        Self {
            sample_length: sampling.sample_length(),
            sentences: sampling.reference().sentences().len(),
            population: *sampling.population(),
            reference: ExtractRecord::from_extract(sampling.reference(), false),
            ranked,
        }
    }

    /// The rank-1 record, if any window fit.
    pub fn winner(&self) -> Option<&ExtractRecord> {
        self.ranked.first()
    }

    /// Reference row first, then ranked rows.
    pub fn rows(&self) -> impl Iterator<Item = &ExtractRecord> {
        std::iter::once(&self.reference).chain(&self.ranked)
    }
}
