//! Core library for repsample.
//!
//! Finds the contiguous extract of a text whose word-length and
//! sentence-length statistics best match the text as a whole. Each candidate
//! window is scored by the sum of two squared z-scores (average word length
//! and average sentence length) against the whole-document population; the
//! lowest score is the most representative sample.
//!
//! # Modules
//!
//! - [`text`] - Sentence segmentation and word lengths
//! - [`stats`] - Whole-document population statistics
//! - [`extract`] - Extract builder and finalized extracts
//! - [`windows`] - Sliding-window candidate generation
//! - [`score`] - Combined z-score
//! - [`rank`] - Stable ranking of candidates
//! - [`sampler`] - The end-to-end pipeline
//! - [`report`] - Serializable report records
//! - [`markdown`] - Markdown-to-prose stripping
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use repsample_core::{Document, SampleReport};
//!
//! let text = std::fs::read_to_string("essay.txt").unwrap();
//! let document = Document::parse(&text);
//! let sampling = document.sample(300).expect("document has varied text");
//! let report = SampleReport::from_sampling(&sampling, true, false);
//!
//! if let Some(winner) = report.winner() {
//!     println!("best sample starts at sentence {}", winner.extract);
//! }
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod extract;
pub mod markdown;
pub mod rank;
pub mod report;
pub mod sampler;
pub mod score;
pub mod stats;
pub mod text;
pub mod windows;

pub use config::{Config, ConfigLoader, LogLevel};
pub use error::{ConfigError, ConfigResult, SampleError, SampleResult};
pub use extract::{Extract, ExtractId};
pub use report::{ExtractRecord, SampleReport};
pub use sampler::{Document, Sampling};

/// Target words per sample when none is configured.
pub const DEFAULT_SAMPLE_LENGTH: usize = 300;

/// Default maximum input size (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
