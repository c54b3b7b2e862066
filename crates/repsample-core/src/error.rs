//! Error types for repsample-core.

use thiserror::Error;

use crate::stats::Axis;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while sampling a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// The document has no sentences or no alphabetic words.
    #[error("document has no scorable text (need at least one sentence with an alphabetic word)")]
    DegenerateInput,

    /// Every value on one axis is identical, so no z-score can be computed.
    #[error("{axis} has zero variance across the document; z-scores are undefined")]
    ZeroVariance {
        /// The axis whose population standard deviation is zero.
        axis: Axis,
    },

    /// An extract ended up with no words or no sentences after trimming.
    #[error("extract {extract} has no words to score")]
    EmptySample {
        /// Label of the offending extract.
        extract: String,
    },

    /// The requested sample length was zero.
    #[error("sample length must be at least 1 word")]
    InvalidSampleLength,
}

/// Result type alias using [`SampleError`].
pub type SampleResult<T> = Result<T, SampleError>;
