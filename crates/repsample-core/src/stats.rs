//! Population statistics for the whole document.
//!
//! Standard deviations are population deviations (divide by N, not N-1).
//! Every z-score in the crate is measured against these values.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{SampleError, SampleResult};

/// The two measured axes of an extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Letters per word.
    WordLength,
    /// Words per sentence.
    SentenceLength,
}

impl Axis {
    /// Human-readable axis name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WordLength => "word length",
            Self::SentenceLength => "sentence length",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean and population standard deviation of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AxisStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl AxisStats {
    /// Compute the statistics of `values`, or `None` if it is empty.
    pub fn of(values: &[usize]) -> Option<Self> {
        let mean = mean(values)?;
        let variance = values
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / values.len() as f64;
        Some(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Squared z-score of a sample's mean against this population.
    ///
    /// `z = (sample_mean - mean) / (std_dev / sqrt(n))`. Returns `None` for an
    /// empty sample.
    pub fn z_squared(&self, sample: &[usize]) -> Option<f64> {
        let sample_mean = mean(sample)?;
        let standard_error = self.std_dev / (sample.len() as f64).sqrt();
        let z = (sample_mean - self.mean) / standard_error;
        Some(z * z)
    }
}

/// Whole-document baseline that every window is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PopulationStats {
    /// Letters per word across the document.
    pub word_length: AxisStats,
    /// Words per sentence across the document.
    pub sentence_length: AxisStats,
}

impl PopulationStats {
    /// Compute the baseline from the whole document's flattened lengths.
    ///
    /// Fails with [`SampleError::DegenerateInput`] when there are no sentences
    /// or no words, and with [`SampleError::ZeroVariance`] when either axis is
    /// constant.
    #[tracing::instrument(skip_all, fields(words = word_lengths.len(), sentences = sentence_lengths.len()))]
    pub fn from_lengths(word_lengths: &[usize], sentence_lengths: &[usize]) -> SampleResult<Self> {
        let (Some(word_length), Some(sentence_length)) =
            (AxisStats::of(word_lengths), AxisStats::of(sentence_lengths))
        else {
            return Err(SampleError::DegenerateInput);
        };

        for (axis, stats) in [
            (Axis::WordLength, word_length),
            (Axis::SentenceLength, sentence_length),
        ] {
            if stats.std_dev <= 0.0 {
                return Err(SampleError::ZeroVariance { axis });
            }
        }

        tracing::debug!(
            awl = word_length.mean,
            awl_sd = word_length.std_dev,
            asl = sentence_length.mean,
            asl_sd = sentence_length.std_dev,
            "population statistics computed"
        );
        Ok(Self {
            word_length,
            sentence_length,
        })
    }
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let total: usize = values.iter().sum();
    Some(total as f64 / values.len() as f64)
}
