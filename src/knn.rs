//! K-nearest-neighbor seed-set expansion with confidence-weighted voting.
//!
//! For every unlabeled column the K closest labeled columns are collected in a
//! bounded worst-of-K heap, each represented class is scored as
//! `count² / distance_sum`, and the winning class labels the candidate. The
//! vote confidence doubles as the admission rank: the strongest votes are
//! admitted first.
//!
//! Labeled vids are scanned in ascending vid order, and a neighbor is
//! displaced only by a strictly smaller distance, so distance ties resolve
//! toward the lowest labeled vid.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, info};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::distance::squared_col_distance;
use crate::polarity::{Polarity, PolarityMap, Vid, POLARITY_COUNT};
use crate::ranking::{admit, RankedCandidate};

/// Labeled neighbor of a candidate column. Max-heap ordering on distance so
/// the worst of the K sits on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Neighbor {
    distance: OrderedFloat<f64>,
    polarity: Polarity,
    vid: Vid,
}

impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.vid.cmp(&other.vid))
    }
}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Collect the K labeled columns closest to `vid`. The heap is bounded: once
/// full, a newly seen distance replaces the current worst only when strictly
/// smaller.
fn nearest_neighbors(
    vid: Vid,
    nwe: &DenseMatrix<f64>,
    labeled: &[(Vid, Polarity)],
    k: usize,
) -> Vec<Neighbor> {
    let mut heap: BinaryHeap<Neighbor> = BinaryHeap::with_capacity(k);

    for &(lvid, polarity) in labeled {
        let distance = OrderedFloat(squared_col_distance(nwe, vid, nwe, lvid));
        if heap.len() < k {
            heap.push(Neighbor {
                distance,
                polarity,
                vid: lvid,
            });
        } else if distance < heap.peek().expect("bounded heap is non-empty").distance {
            heap.pop();
            heap.push(Neighbor {
                distance,
                polarity,
                vid: lvid,
            });
        }
    }
    heap.into_vec()
}

/// Confidence-weighted majority vote over the collected neighbors.
///
/// A class with zero accumulated distance is ineligible for the scored vote
/// (guards the divide). Vids are disjoint between the labeled and unlabeled
/// sets, but vectors need not be: an unlabeled column duplicating a labeled
/// one puts all its neighbors at distance zero and empties the scored ballot.
/// Such an exact match falls back to the majority class among the
/// zero-distance neighbors (lowest ordinal on count ties) and outranks every
/// finite-confidence candidate. Panics only when no neighbors were collected
/// at all: every candidate has at least one neighbor once the lexicon is
/// non-empty, so that is an invariant violation.
fn vote(neighbors: &[Neighbor], vid: Vid) -> RankedCandidate {
    let mut counts = [0usize; POLARITY_COUNT];
    let mut distance_sums = [0.0f64; POLARITY_COUNT];
    for n in neighbors {
        counts[n.polarity.index()] += 1;
        distance_sums[n.polarity.index()] += n.distance.0;
    }

    let mut best: Option<(Polarity, f64)> = None;
    for pol in Polarity::ALL {
        let c = pol.index();
        if distance_sums[c] == 0.0 {
            continue;
        }
        let score = (counts[c] * counts[c]) as f64 / distance_sums[c];
        match best {
            Some((_, s)) if s >= score => {}
            _ => best = Some((pol, score)),
        }
    }

    // negated so the shared ascending admission order takes the strongest
    // votes first
    let (polarity, rank) = match best {
        Some((pol, score)) => (pol, -score),
        None => {
            assert!(
                !neighbors.is_empty(),
                "no neighbors collected for vid {}: \
                 every candidate must have at least one neighbor",
                vid
            );
            (zero_distance_majority(&counts), f64::NEG_INFINITY)
        }
    };
    RankedCandidate::new(rank, polarity, vid)
}

/// Majority class among zero-distance neighbors; count ties keep the lowest
/// ordinal.
fn zero_distance_majority(counts: &[usize; POLARITY_COUNT]) -> Polarity {
    let mut best: Option<(Polarity, usize)> = None;
    for pol in Polarity::ALL {
        let c = counts[pol.index()];
        if c == 0 {
            continue;
        }
        match best {
            Some((_, bc)) if bc >= c => {}
            _ => best = Some((pol, c)),
        }
    }
    let (pol, _) = best.expect("tally of a non-empty neighbor set is non-empty");
    pol
}

/// Expand the lexicon in place by K-nearest-neighbor voting.
///
/// `lexicon` is caller-owned and mutated in place. `limit` caps the number of
/// admitted terms (`None` admits all), `k` is the neighbor count.
///
/// Panics when the lexicon is empty or `k == 0`.
pub fn expand_knn(
    lexicon: &mut PolarityMap,
    nwe: &DenseMatrix<f64>,
    limit: Option<usize>,
    k: usize,
) {
    assert!(k > 0, "knn expansion requires k > 0");
    assert!(
        !lexicon.is_empty(),
        "knn expansion requires a non-empty seed lexicon"
    );
    let (rows, cols) = nwe.shape();
    info!(
        "knn expansion: {}x{} embeddings, {} seeds, k={}, limit {:?}",
        rows,
        cols,
        lexicon.len(),
        k,
        limit
    );

    // fixed scan order: ascending labeled vid
    let mut labeled: Vec<(Vid, Polarity)> = lexicon.iter().map(|(&v, &p)| (v, p)).collect();
    labeled.sort_unstable_by_key(|&(v, _)| v);

    let candidates: Vec<RankedCandidate> = (0..cols)
        .into_par_iter()
        .filter(|vid| !lexicon.contains_key(vid))
        .map(|vid| {
            let neighbors = nearest_neighbors(vid, nwe, &labeled, k);
            vote(&neighbors, vid)
        })
        .collect();

    debug!(
        "{} unlabeled candidates scored against {} labeled columns",
        candidates.len(),
        labeled.len()
    );
    let added = admit(lexicon, candidates, limit);
    info!("knn expansion admitted {} new terms", added);
}
