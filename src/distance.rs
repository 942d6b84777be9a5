//! Euclidean distance primitives shared by all three expansion engines.
//!
//! Every engine only ranks by relative distance, so the hot path stays on the
//! squared form; the square root is taken exactly once, when an absolute
//! distance is recorded into a ranking structure that gets compared across
//! heterogeneous computations.

use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Sum of squared elementwise differences, no root.
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "distance over unequal-length vectors");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Squared distance between column `i` of `a` and column `j` of `b`.
/// Both matrices must share their row count.
pub fn squared_col_distance(
    a: &DenseMatrix<f64>,
    i: usize,
    b: &DenseMatrix<f64>,
    j: usize,
) -> f64 {
    let rows = a.shape().0;
    debug_assert_eq!(rows, b.shape().0, "column distance over unequal row counts");

    let mut acc = 0.0;
    for r in 0..rows {
        let d = *a.get((r, i)) - *b.get((r, j));
        acc += d * d;
    }
    acc
}
