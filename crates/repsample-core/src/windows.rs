//! Sliding-window extract generation.
//!
//! Starting at each sentence in turn, sentences are appended until the running
//! word count reaches the target. If overshooting the target is worse than the
//! undershoot before the last sentence was added, that last sentence is
//! dropped again. An exact tie keeps it.
//!
//! Once a window runs off the end of the document without reaching the
//! target, generation stops: every later start would be shorter still.

use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::extract::{Extract, ExtractBuilder, ExtractId};
use crate::stats::PopulationStats;
use crate::text::Sentence;

/// Lazy iterator over the scored candidate windows of a document.
///
/// Windows are yielded in increasing start order. Windows that end up with no
/// words after trimming are logged and skipped.
#[derive(Debug, Clone)]
pub struct Windows<'s, 'p> {
    sentences: &'s [Sentence],
    population: &'p PopulationStats,
    target: usize,
    next_start: usize,
    exhausted: bool,
}

impl<'s, 'p> Windows<'s, 'p> {
    /// Generate windows of roughly `target` words over `sentences`.
    pub const fn new(
        sentences: &'s [Sentence],
        population: &'p PopulationStats,
        target: usize,
    ) -> Self {
        Self {
            sentences,
            population,
            target,
            next_start: 0,
            exhausted: false,
        }
    }

    /// Accumulate the window starting at `start`, or `None` if the rest of the
    /// document is too short to reach the target.
    fn accumulate(&self, start: usize) -> Option<ExtractBuilder<'s>> {
        let mut builder = ExtractBuilder::new(ExtractId::Window(start + 1));
        let mut counter = 0;
        let mut last_count = 0;

        for sentence in &self.sentences[start..] {
            counter += sentence.word_count();
            builder.push(sentence);
            if counter >= self.target {
                if counter - self.target > self.target - last_count {
                    builder.pop_last();
                }
                return Some(builder);
            }
            last_count = counter;
        }

        None
    }
}

impl<'s> Iterator for Windows<'s, '_> {
    type Item = Extract<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted && self.next_start < self.sentences.len() {
            let start = self.next_start;
            self.next_start += 1;

            let Some(builder) = self.accumulate(start) else {
                debug!(
                    start = start + 1,
                    target = self.target,
                    "remaining text too short for another window"
                );
                self.exhausted = true;
                break;
            };

            match builder.finalize(self.population) {
                Ok(extract) => return Some(extract),
                Err(err) => warn!(start = start + 1, error = %err, "skipping window"),
            }
        }
        None
    }
}

impl FusedIterator for Windows<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::segment;

    fn population_of(sentences: &[Sentence]) -> PopulationStats {
        let mut builder = ExtractBuilder::new(ExtractId::Original);
        sentences.iter().for_each(|s| builder.push(s));
        builder.finalize_reference().unwrap().1
    }

    /// Sentences of the given word counts, with varied word lengths.
    fn doc(word_counts: &[usize]) -> Vec<Sentence> {
        let words = ["a", "bb", "ccc", "dddd", "eeeee"];
        let text: String = word_counts
            .iter()
            .map(|&n| {
                let body: Vec<&str> = (0..n).map(|i| words[i % words.len()]).collect();
                format!("{}. ", body.join(" "))
            })
            .collect();
        segment(&text)
    }

    fn starts(windows: &[Extract<'_>]) -> Vec<String> {
        windows.iter().map(|w| w.id().to_string()).collect()
    }

    #[test]
    fn overshoot_larger_than_undershoot_is_trimmed() {
        // Cat sat (2) + Dog ran far away today (5): 7 - 3 = 4 > 3 - 2 = 1
        let sentences = segment("Cat sat. Dog ran far away today.");
        let population = population_of(&sentences);
        let windows: Vec<_> = Windows::new(&sentences, &population, 3).collect();

        assert_eq!(starts(&windows), vec!["1", "2"]);
        assert_eq!(windows[0].sentence_lengths(), &[2]);
        assert_eq!(windows[1].sentence_lengths(), &[5]);
    }

    #[test]
    fn exact_tie_keeps_last_sentence() {
        // target 4: 2 then 6 -> over by 2, under by 2 -> keep
        let sentences = doc(&[2, 4, 3]);
        let population = population_of(&sentences);
        let first = Windows::new(&sentences, &population, 4).next().unwrap();
        assert_eq!(first.sentence_lengths(), &[2, 4]);
    }

    #[test]
    fn smaller_overshoot_is_kept() {
        // target 5: 3 then 6 -> over by 1, under by 2 -> keep
        let sentences = doc(&[3, 3, 4]);
        let population = population_of(&sentences);
        let first = Windows::new(&sentences, &population, 5).next().unwrap();
        assert_eq!(first.sentence_lengths(), &[3, 3]);
        assert_eq!(first.word_count(), 6);
    }

    #[test]
    fn generation_stops_when_text_runs_out() {
        let sentences = doc(&[5, 5, 5, 1, 1]);
        let population = population_of(&sentences);
        let windows: Vec<_> = Windows::new(&sentences, &population, 10).collect();
        // Starting at the third sentence leaves only 7 words.
        assert_eq!(starts(&windows), vec!["1", "2"]);
    }

    #[test]
    fn window_trimmed_to_nothing_is_skipped() {
        // A 9-word sentence against target 4: 9 - 4 = 5 > 4 - 0 -> trimmed to empty.
        let sentences = doc(&[9, 2, 3]);
        let population = population_of(&sentences);
        let windows: Vec<_> = Windows::new(&sentences, &population, 4).collect();
        assert_eq!(starts(&windows), vec!["2"]);
        assert_eq!(windows[0].sentence_lengths(), &[2, 3]);
    }

    #[test]
    fn untrimmed_windows_reach_target() {
        let sentences = doc(&[4, 7, 2, 6, 3, 5, 8, 1, 4, 6]);
        let population = population_of(&sentences);
        let target = 9;
        for window in Windows::new(&sentences, &population, target) {
            assert_eq!(
                window.word_lengths().len(),
                window.sentence_lengths().iter().sum::<usize>()
            );
            let start = match window.id() {
                ExtractId::Window(n) => n - 1,
                ExtractId::Original => unreachable!(),
            };
            let kept = window.sentences().len();
            let kept_words = window.word_count();
            if kept_words < target {
                // Trimmed: adding the next sentence overshoots by strictly more.
                let next = sentences[start + kept].word_count();
                assert!(kept_words + next - target > target - kept_words);
            } else {
                // Untrimmed: dropping the last sentence undershoots by at least as much.
                let last = window.sentence_lengths()[kept - 1];
                assert!(kept_words - target <= target - (kept_words - last));
            }
        }
    }

    #[test]
    fn restarting_yields_identical_windows() {
        let sentences = doc(&[4, 7, 2, 6, 3, 5]);
        let population = population_of(&sentences);
        let first: Vec<_> = Windows::new(&sentences, &population, 8).collect();
        let second: Vec<_> = Windows::new(&sentences, &population, 8).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn fused_after_exhaustion() {
        let sentences = doc(&[3, 4]);
        let population = population_of(&sentences);
        let mut windows = Windows::new(&sentences, &population, 100);
        assert!(windows.next().is_none());
        assert!(windows.next().is_none());
    }
}
