//! Principal-component polarity classifier.
//!
//! Consumes an externally computed projection of the embedding matrix onto its
//! principal components (row per vector, column per component) together with
//! the component loadings (consulted only for the component count). The
//! classifier locates the single component that best separates the positive
//! and negative classes, derives per-class mean and deviation along it, and
//! labels every unlabeled vector against the resulting thresholds. Candidates
//! are ranked by distance from the neutral mean on that component.

use log::{debug, info};
use rayon::prelude::*;
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::polarity::{Polarity, PolarityMap, POLARITY_COUNT};
use crate::ranking::{admit, RankedCandidate};

/// Per-class statistics along the discriminating component, derived once per
/// classifier call.
#[derive(Clone, Debug, PartialEq)]
pub struct PolarityStats {
    /// Component index with the best positive/negative separation.
    pub dim: usize,
    /// Class sizes, indexed by polarity ordinal.
    pub counts: [usize; POLARITY_COUNT],
    /// Class means along `dim`.
    pub means: [f64; POLARITY_COUNT],
    /// Population deviation along `dim`: sum of squared deviations from the
    /// class mean, divided by the class size.
    pub deviations: [f64; POLARITY_COUNT],
}

impl PolarityStats {
    /// Derive statistics from the labeled rows of `projected`.
    ///
    /// Panics when the positive or negative class is empty: no discriminating
    /// dimension or threshold can be derived and expansion must not proceed.
    /// An absent neutral class is recoverable; its mean stays at zero and it
    /// contributes nothing to the dimension choice.
    pub fn compute(lexicon: &PolarityMap, projected: &DenseMatrix<f64>) -> PolarityStats {
        let n_dims = projected.shape().1;

        let mut counts = [0usize; POLARITY_COUNT];
        for &pol in lexicon.values() {
            counts[pol.index()] += 1;
        }
        assert!(
            counts[Polarity::Positive.index()] > 0 && counts[Polarity::Negative.index()] > 0,
            "pca statistics require non-empty positive and negative seed classes"
        );

        // per-component class means
        let mut dim_means = vec![[0.0f64; POLARITY_COUNT]; n_dims];
        for (&vid, &pol) in lexicon {
            for (d, means) in dim_means.iter_mut().enumerate() {
                means[pol.index()] += *projected.get((vid, d));
            }
        }
        for means in dim_means.iter_mut() {
            for pol in Polarity::ALL {
                let n = counts[pol.index()];
                if n > 0 {
                    means[pol.index()] /= n as f64;
                }
            }
        }

        // The best component maximizes `|pos - neg|`, penalized by the
        // neutral mean drifting away from the midpoint between the two:
        // `|pos - neg| - |(pos + neg)/2 - neut|` when neutral seeds exist.
        let has_neutral = counts[Polarity::Neutral.index()] > 0;
        let mut dim = 0;
        let mut max_delta = f64::NEG_INFINITY;
        for (d, means) in dim_means.iter().enumerate() {
            let pos = means[Polarity::Positive.index()];
            let neg = means[Polarity::Negative.index()];
            let spread = (pos - neg).abs();
            let delta = if has_neutral {
                let neut = means[Polarity::Neutral.index()];
                spread - (pos - (pos - neg) / 2.0 - neut).abs()
            } else {
                spread
            };
            if delta > max_delta {
                max_delta = delta;
                dim = d;
            }
        }

        let mut deviations = [0.0f64; POLARITY_COUNT];
        for (&vid, &pol) in lexicon {
            let diff = *projected.get((vid, dim)) - dim_means[dim][pol.index()];
            deviations[pol.index()] += diff * diff;
        }
        for pol in Polarity::ALL {
            let n = counts[pol.index()];
            if n > 0 {
                deviations[pol.index()] /= n as f64;
            }
        }

        PolarityStats {
            dim,
            counts,
            means: dim_means[dim],
            deviations,
        }
    }

    pub fn mean(&self, pol: Polarity) -> f64 {
        self.means[pol.index()]
    }

    pub fn deviation(&self, pol: Polarity) -> f64 {
        self.deviations[pol.index()]
    }
}

/// Expand the lexicon in place by threshold classification along the
/// discriminating principal component.
///
/// `projected` is the embedding matrix projected onto its principal
/// components (row per vector, column per component); `loadings` only fixes
/// the expected component count. `lexicon` is caller-owned and mutated in
/// place; `limit` caps the number of admitted terms (`None` admits all).
///
/// Panics when the positive or negative seed class is empty, or when
/// `projected` and `loadings` disagree on the component count.
pub fn expand_pca(
    lexicon: &mut PolarityMap,
    projected: &DenseMatrix<f64>,
    loadings: &DenseMatrix<f64>,
    limit: Option<usize>,
) {
    let (n_vectors, n_components) = projected.shape();
    assert_eq!(
        n_components,
        loadings.shape().1,
        "projection and loadings disagree on the component count"
    );
    info!(
        "pca expansion: {} vectors x {} components, {} seeds, limit {:?}",
        n_vectors,
        n_components,
        lexicon.len(),
        limit
    );

    let stats = PolarityStats::compute(lexicon, projected);
    debug!(
        "discriminating component {}: pos {:.6}±{:.6}, neg {:.6}±{:.6}, neut {:.6}",
        stats.dim,
        stats.mean(Polarity::Positive),
        stats.deviation(Polarity::Positive),
        stats.mean(Polarity::Negative),
        stats.deviation(Polarity::Negative),
        stats.mean(Polarity::Neutral)
    );

    let pos_mean = stats.mean(Polarity::Positive);
    let neg_mean = stats.mean(Polarity::Negative);
    let (min, max, low, high) = if neg_mean < pos_mean {
        (
            neg_mean + stats.deviation(Polarity::Negative),
            pos_mean - stats.deviation(Polarity::Positive),
            Polarity::Negative,
            Polarity::Positive,
        )
    } else {
        (
            pos_mean + stats.deviation(Polarity::Positive),
            neg_mean - stats.deviation(Polarity::Negative),
            Polarity::Positive,
            Polarity::Negative,
        )
    };
    let neut_mean = stats.mean(Polarity::Neutral);
    debug!(
        "class boundaries on component {}: min {:.6} ({} below), max {:.6} ({} above)",
        stats.dim, min, low, max, high
    );

    let candidates: Vec<RankedCandidate> = (0..n_vectors)
        .into_par_iter()
        .filter(|vid| !lexicon.contains_key(vid))
        .map(|vid| {
            let coord = *projected.get((vid, stats.dim));
            let polarity = if coord < min {
                low
            } else if coord > max {
                high
            } else {
                Polarity::Neutral
            };
            RankedCandidate::new((neut_mean - coord).abs(), polarity, vid)
        })
        .collect();

    let added = admit(lexicon, candidates, limit);
    info!("pca expansion admitted {} new terms", added);
}
