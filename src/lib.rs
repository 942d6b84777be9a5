//! # vec2pol
//!
//! Expands a small seed set of polarity-labeled word vectors (positive /
//! negative / neutral) into a larger polarity lexicon using only the geometry
//! of a pre-trained dense word-embedding matrix. The embedding matrix is a
//! [`smartcore`] `DenseMatrix<f64>` whose columns are word vectors; the column
//! index is the vector id and the primary key of the
//! [`PolarityMap`](crate::polarity::PolarityMap).
//!
//! # Engines
//!
//! Three independent label-propagation engines read the same
//! (matrix, label-map) pair and extend the caller-owned map in place:
//!
//! - [`rocchio::expand_nearest_centroids`]: iterative nearest-centroid
//!   clustering; one centroid per class, recomputed and reassigned until
//!   convergence, unlabeled columns admitted by distance to their nearest
//!   centroid.
//! - [`knn::expand_knn`]: K-nearest-neighbor voting; per-class confidence
//!   `count² / distance_sum`, strongest votes admitted first.
//! - [`pca::expand_pca`]: threshold classification along the principal
//!   component that best separates the positive and negative seed classes
//!   (the decomposition itself is supplied by the caller).
//!
//! Every engine ranks its candidates deterministically (ties broken by lower
//! vid) and honors the shared admission budget (`None` = admit all).
//!
//! # Usage
//!
//! ```ignore
//! use vec2pol::{expand_nearest_centroids, Polarity, PolarityMap};
//!
//! let mut lexicon = PolarityMap::new();
//! lexicon.insert(0, Polarity::Positive);
//! lexicon.insert(1, Polarity::Negative);
//!
//! // nwe: DenseMatrix<f64>, one column per word
//! expand_nearest_centroids(&mut lexicon, &nwe, Some(1000), false);
//! ```
//!
//! All engines emit structured logs (info/debug/trace) for observability,
//! compatible with env_logger or tracing backends; call [`init`] in tests and
//! demos.

pub mod distance;
pub mod knn;
pub mod pca;
pub mod polarity;
pub mod ranking;
pub mod rocchio;

#[cfg(test)]
mod tests;

pub use crate::knn::expand_knn;
pub use crate::pca::{expand_pca, PolarityStats};
pub use crate::polarity::{Polarity, PolarityMap, Vid, POLARITY_COUNT};
pub use crate::ranking::RankedCandidate;
pub use crate::rocchio::{expand_nearest_centroids, ClusterAssignment, ConvergenceRun};

use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Driver-facing parameter bundle for the three engines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpansionConfig {
    /// Admission budget per call; `None` admits every candidate.
    pub limit: Option<usize>,
    /// Neighbor count for the KNN engine.
    pub knn_k: usize,
    /// Stop the nearest-centroid loop after its first changed iteration.
    pub early_break: bool,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            limit: None,
            knn_k: 5,
            early_break: false,
        }
    }
}

impl ExpansionConfig {
    /// Run the nearest-centroid engine with these parameters.
    pub fn run_nearest_centroids(&self, lexicon: &mut PolarityMap, nwe: &DenseMatrix<f64>) {
        expand_nearest_centroids(lexicon, nwe, self.limit, self.early_break);
    }

    /// Run the KNN engine with these parameters.
    pub fn run_knn(&self, lexicon: &mut PolarityMap, nwe: &DenseMatrix<f64>) {
        expand_knn(lexicon, nwe, self.limit, self.knn_k);
    }

    /// Run the PCA classifier with these parameters over a pre-computed
    /// projection.
    pub fn run_pca(
        &self,
        lexicon: &mut PolarityMap,
        projected: &DenseMatrix<f64>,
        loadings: &DenseMatrix<f64>,
    ) {
        expand_pca(lexicon, projected, loadings, self.limit);
    }
}

/// Initialise the env_logger backend once; safe to call repeatedly.
pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}
