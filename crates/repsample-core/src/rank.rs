//! Ranking of candidate windows.

use crate::extract::Extract;

/// Sort extracts by combined score, lowest first, and number them from 1.
///
/// The sort is stable, so equal scores keep their generation order and the
/// earliest window wins a tie.
#[tracing::instrument(skip_all, fields(candidates = extracts.len()))]
pub fn rank(mut extracts: Vec<Extract<'_>>) -> Vec<Extract<'_>> {
    extracts.sort_by(|a, b| a.scores().combined.total_cmp(&b.scores().combined));
    for (index, extract) in extracts.iter_mut().enumerate() {
        extract.set_rank(index + 1);
    }
    extracts
}
