//! Nearest-centroid (Rocchio-style) seed-set expansion.
//!
//! Clusters every embedding column around one centroid per polarity class:
//! centroids are recomputed as class means and every column is reassigned to
//! its nearest centroid until assignments stop changing. Unlabeled columns are
//! then ranked by distance to their nearest centroid and admitted under the
//! shared budget.
//!
//! # Invariants
//!
//! - [`ClusterAssignment`] keeps its member sets and its vid → class map as
//!   mutual inverses after every reassignment pass.
//! - An empty class keeps an all-zero centroid column; that column is "no
//!   update", never a valid nearest-centroid target and never part of the
//!   convergence comparison.
//! - Termination: the matrix and class count are finite, so the number of
//!   total-assignment configurations is finite, and every changed iteration
//!   alters at least one assignment. Per-iteration progress is logged.

use std::collections::{HashMap, HashSet};

use log::{debug, info};
use rayon::prelude::*;
use smartcore::linalg::basic::arrays::{Array, Array2, MutArray};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::distance::squared_col_distance;
use crate::polarity::{Polarity, PolarityMap, Vid, POLARITY_COUNT};
use crate::ranking::{admit, RankedCandidate};

/// Class membership index and its inverse map.
#[derive(Clone, Debug, Default)]
pub struct ClusterAssignment {
    members: [HashSet<Vid>; POLARITY_COUNT],
    assigned: HashMap<Vid, Polarity>,
}

impl ClusterAssignment {
    /// Seed the clusters from the current lexicon.
    pub fn from_lexicon(lexicon: &PolarityMap) -> Self {
        let mut out = Self::default();
        for (&vid, &pol) in lexicon {
            out.members[pol.index()].insert(vid);
            out.assigned.insert(vid, pol);
        }
        out
    }

    pub fn members(&self, pol: Polarity) -> &HashSet<Vid> {
        &self.members[pol.index()]
    }

    pub fn class_size(&self, pol: Polarity) -> usize {
        self.members[pol.index()].len()
    }

    pub fn class_sizes(&self) -> [usize; POLARITY_COUNT] {
        let mut sizes = [0; POLARITY_COUNT];
        for pol in Polarity::ALL {
            sizes[pol.index()] = self.members[pol.index()].len();
        }
        sizes
    }

    pub fn assigned_class(&self, vid: Vid) -> Option<Polarity> {
        self.assigned.get(&vid).copied()
    }

    /// Move `vid` into `pol`, dropping it from its previous class when it had
    /// a different one. Returns `true` when the assignment actually changed.
    pub fn reassign(&mut self, vid: Vid, pol: Polarity) -> bool {
        match self.assigned.insert(vid, pol) {
            Some(prev) if prev == pol => false,
            Some(prev) => {
                self.members[prev.index()].remove(&vid);
                self.members[pol.index()].insert(vid);
                true
            }
            None => {
                self.members[pol.index()].insert(vid);
                true
            }
        }
    }

    /// Mutual-inverse consistency: every vid sits in exactly the member set
    /// its inverse map names.
    pub fn is_consistent(&self) -> bool {
        let total: usize = self.members.iter().map(|s| s.len()).sum();
        total == self.assigned.len()
            && self
                .assigned
                .iter()
                .all(|(vid, pol)| self.members[pol.index()].contains(vid))
    }
}

/// Outcome of the convergence loop: the settled centroid matrix plus the
/// per-iteration reassignment counts observed on the way there.
#[derive(Clone, Debug)]
pub struct ConvergenceRun {
    /// One column per polarity ordinal, rows matching the embedding matrix.
    pub centroids: DenseMatrix<f64>,
    /// Columns moved in each changed iteration, in order.
    pub reassignments: Vec<usize>,
}

impl ConvergenceRun {
    pub fn iterations(&self) -> usize {
        self.reassignments.len()
    }
}

/// Mean embedding vector per class, one column per polarity ordinal.
/// Empty classes keep an all-zero column.
fn compute_centroids(
    assignment: &ClusterAssignment,
    nwe: &DenseMatrix<f64>,
) -> DenseMatrix<f64> {
    let rows = nwe.shape().0;
    let mut centroids = DenseMatrix::zeros(rows, POLARITY_COUNT);

    for pol in Polarity::ALL {
        let members = assignment.members(pol);
        if members.is_empty() {
            continue;
        }
        let c = pol.index();
        for &vid in members {
            for r in 0..rows {
                centroids.set((r, c), *centroids.get((r, c)) + *nwe.get((r, vid)));
            }
        }
        let n = members.len() as f64;
        for r in 0..rows {
            centroids.set((r, c), *centroids.get((r, c)) / n);
        }
    }
    centroids
}

/// Convergence comparison over non-empty classes only; an empty class's zero
/// column is "no update", not a centroid value.
fn centroids_converged(
    old: &DenseMatrix<f64>,
    new: &DenseMatrix<f64>,
    assignment: &ClusterAssignment,
) -> bool {
    let rows = new.shape().0;
    for pol in Polarity::ALL {
        if assignment.class_size(pol) == 0 {
            continue;
        }
        let c = pol.index();
        for r in 0..rows {
            if new.get((r, c)) != old.get((r, c)) {
                return false;
            }
        }
    }
    true
}

/// Nearest non-empty-class centroid of column `vid`; returns the class and
/// the squared distance to it. Ties keep the first class in ordinal order.
fn nearest_centroid(
    centroids: &DenseMatrix<f64>,
    class_sizes: &[usize; POLARITY_COUNT],
    nwe: &DenseMatrix<f64>,
    vid: Vid,
) -> (Polarity, f64) {
    let mut best: Option<(Polarity, f64)> = None;
    for pol in Polarity::ALL {
        if class_sizes[pol.index()] == 0 {
            continue;
        }
        let d = squared_col_distance(nwe, vid, centroids, pol.index());
        match best {
            Some((_, bd)) if bd <= d => {}
            _ => best = Some((pol, d)),
        }
    }
    best.expect("no non-empty polarity class: cannot locate a nearest centroid")
}

/// Reassign every column (labeled or not) to its nearest centroid. Targets
/// are computed in parallel against the frozen centroid snapshot, then
/// applied serially. Returns the number of columns that moved.
fn assign_columns(
    assignment: &mut ClusterAssignment,
    centroids: &DenseMatrix<f64>,
    nwe: &DenseMatrix<f64>,
) -> usize {
    let cols = nwe.shape().1;
    let class_sizes = assignment.class_sizes();

    let targets: Vec<Polarity> = (0..cols)
        .into_par_iter()
        .map(|vid| nearest_centroid(centroids, &class_sizes, nwe, vid).0)
        .collect();

    let mut moved = 0;
    for (vid, pol) in targets.into_iter().enumerate() {
        if assignment.reassign(vid, pol) {
            moved += 1;
        }
    }
    debug_assert!(
        assignment.is_consistent(),
        "membership sets and inverse map disagree after reassignment"
    );
    moved
}

/// Run centroid recomputation + reassignment until the centroids of the
/// non-empty classes stop changing, or after one changed iteration when
/// `early_break` is set (that iteration's fresh centroids are used directly,
/// skipping the confirmatory convergence pass).
pub fn run_to_convergence(
    assignment: &mut ClusterAssignment,
    nwe: &DenseMatrix<f64>,
    early_break: bool,
) -> ConvergenceRun {
    let rows = nwe.shape().0;
    let mut centroids = DenseMatrix::zeros(rows, POLARITY_COUNT);
    let mut reassignments = Vec::new();

    loop {
        let new_centroids = compute_centroids(assignment, nwe);
        if centroids_converged(&centroids, &new_centroids, assignment) {
            debug!(
                "centroids stable after {} changed iterations",
                reassignments.len()
            );
            break;
        }

        let moved = assign_columns(assignment, &new_centroids, nwe);
        centroids = new_centroids;
        reassignments.push(moved);
        info!(
            "rocchio iteration {}: {} columns reassigned",
            reassignments.len(),
            moved
        );

        if early_break {
            debug!("early break requested: keeping first-iteration centroids");
            break;
        }
    }

    ConvergenceRun {
        centroids,
        reassignments,
    }
}

/// Expand the lexicon in place with the unlabeled columns nearest to the
/// converged centroids.
///
/// `lexicon` is caller-owned and mutated in place; it is the engine's sole
/// output. `limit` caps the number of admitted terms (`None` admits all).
///
/// Panics when the lexicon is empty: no centroid can be derived.
pub fn expand_nearest_centroids(
    lexicon: &mut PolarityMap,
    nwe: &DenseMatrix<f64>,
    limit: Option<usize>,
    early_break: bool,
) {
    assert!(
        !lexicon.is_empty(),
        "nearest-centroid expansion requires a non-empty seed lexicon"
    );
    let (rows, cols) = nwe.shape();
    info!(
        "rocchio expansion: {}x{} embeddings, {} seeds, limit {:?}, early_break={}",
        rows,
        cols,
        lexicon.len(),
        limit,
        early_break
    );

    let mut assignment = ClusterAssignment::from_lexicon(lexicon);
    let run = run_to_convergence(&mut assignment, nwe, early_break);
    debug!(
        "clustering settled after {} changed iterations",
        run.iterations()
    );

    let class_sizes = assignment.class_sizes();
    let candidates: Vec<RankedCandidate> = (0..cols)
        .into_par_iter()
        .filter(|vid| !lexicon.contains_key(vid))
        .map(|vid| {
            let (pol, sq) = nearest_centroid(&run.centroids, &class_sizes, nwe, vid);
            // the one place an absolute distance is reported
            RankedCandidate::new(sq.sqrt(), pol, vid)
        })
        .collect();

    let added = admit(lexicon, candidates, limit);
    info!("rocchio expansion admitted {} new terms", added);
}
