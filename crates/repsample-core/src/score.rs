//! Combined z-score of an extract against the document.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::stats::PopulationStats;

/// Squared z-scores of one extract. Lower is more representative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scores {
    /// Squared z-score of the average word length.
    pub awl_z_squared: f64,
    /// Squared z-score of the average sentence length.
    pub asl_z_squared: f64,
    /// `awl_z_squared + asl_z_squared`.
    pub combined: f64,
}

/// Score an extract's lengths against the population.
///
/// Returns `None` if either list is empty, since a mean of nothing cannot be
/// standardized.
pub fn score(
    population: &PopulationStats,
    word_lengths: &[usize],
    sentence_lengths: &[usize],
) -> Option<Scores> {
    let awl_z_squared = population.word_length.z_squared(word_lengths)?;
    let asl_z_squared = population.sentence_length.z_squared(sentence_lengths)?;
    Some(Scores {
        awl_z_squared,
        asl_z_squared,
        combined: awl_z_squared + asl_z_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::AxisStats;

    fn population() -> PopulationStats {
        PopulationStats {
            word_length: AxisStats {
                mean: 4.0,
                std_dev: 2.0,
            },
            sentence_length: AxisStats {
                mean: 10.0,
                std_dev: 5.0,
            },
        }
    }

    #[test]
    fn combined_is_sum_of_axes() {
        // awl: mean 6 over 4 words -> z = 2 / (2 / 2) = 2 -> 4
        // asl: mean 5 over 1 sentence -> z = -5 / 5 = -1 -> 1
        let scores = score(&population(), &[6, 6, 6, 6], &[5]).unwrap();
        assert!((scores.awl_z_squared - 4.0).abs() < 1e-12);
        assert!((scores.asl_z_squared - 1.0).abs() < 1e-12);
        assert!((scores.combined - 5.0).abs() < 1e-12);
    }

    #[test]
    fn exact_match_scores_zero() {
        let scores = score(&population(), &[4, 4], &[10]).unwrap();
        assert_eq!(scores.combined, 0.0);
    }

    #[test]
    fn empty_lists_cannot_be_scored() {
        assert!(score(&population(), &[], &[3]).is_none());
        assert!(score(&population(), &[3], &[]).is_none());
    }
}
