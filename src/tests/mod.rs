//! Internal test suite, one module per engine plus the shared primitives.

mod test_config;
mod test_pca;

use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::polarity::{Polarity, PolarityMap, Vid};

/// Build an embedding matrix from per-word column vectors
/// (rows = embedding dimension, cols = vocabulary).
pub fn nwe_from_columns(columns: &[Vec<f64>]) -> DenseMatrix<f64> {
    let rows = columns[0].len();
    let data: Vec<Vec<f64>> = (0..rows)
        .map(|r| columns.iter().map(|c| c[r]).collect())
        .collect();
    DenseMatrix::from_2d_vec(&data).unwrap()
}

pub fn seeds(entries: &[(Vid, Polarity)]) -> PolarityMap {
    entries.iter().copied().collect()
}

/// Two seeds and three unlabeled columns in a 2-dimensional space:
/// 0: positive at (10, 10), 1: negative at (-10, -10),
/// unlabeled 2 at (9, 9), 3 at (-9, -9), 4 at (0, 0).
pub fn two_cluster_scenario() -> (DenseMatrix<f64>, PolarityMap) {
    let nwe = nwe_from_columns(&[
        vec![10.0, 10.0],
        vec![-10.0, -10.0],
        vec![9.0, 9.0],
        vec![-9.0, -9.0],
        vec![0.0, 0.0],
    ]);
    let lexicon = seeds(&[(0, Polarity::Positive), (1, Polarity::Negative)]);
    (nwe, lexicon)
}
