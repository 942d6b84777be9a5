//! Ranked candidates and the shared budgeted-admission helper.
//!
//! All three engines collect `(rank, polarity, vid)` triples for the vids
//! missing from the lexicon, then hand them to [`admit`], which sorts
//! ascending on `(rank, vid)` and inserts the first N. The explicit vid key
//! keeps equal-rank admissions deterministic: the lower vid wins.

use log::{debug, trace};
use ordered_float::OrderedFloat;

use crate::polarity::{Polarity, PolarityMap, Vid};

/// Transient triple used only for ranking and budgeted admission.
/// Lower rank admits first; distance-based engines store the distance
/// directly, the KNN engine stores the negated vote confidence so that the
/// strongest vote still sorts first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankedCandidate {
    pub rank: f64,
    pub polarity: Polarity,
    pub vid: Vid,
}

impl RankedCandidate {
    pub fn new(rank: f64, polarity: Polarity, vid: Vid) -> Self {
        Self { rank, polarity, vid }
    }
}

/// Sort candidates ascending by `(rank, vid)` and insert the first `limit`
/// of them into the lexicon; `None` admits every candidate.
///
/// Returns the number of entries added. Engines only produce candidates for
/// unlabeled vids, so no existing entry is ever overwritten.
pub fn admit(
    lexicon: &mut PolarityMap,
    mut candidates: Vec<RankedCandidate>,
    limit: Option<usize>,
) -> usize {
    let available = candidates.len();
    candidates.sort_unstable_by_key(|c| (OrderedFloat(c.rank), c.vid));

    let take = limit.unwrap_or(available).min(available);
    let mut added = 0;
    for cand in candidates.into_iter().take(take) {
        let prev = lexicon.insert(cand.vid, cand.polarity);
        debug_assert!(
            prev.is_none(),
            "admission overwrote an existing label for vid {}",
            cand.vid
        );
        trace!(
            "admitted vid {} as {} (rank {:.6})",
            cand.vid,
            cand.polarity,
            cand.rank
        );
        added += 1;
    }

    debug!("admission: {} of {} candidates added", added, available);
    added
}
