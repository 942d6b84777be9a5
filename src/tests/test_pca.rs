use approx::assert_relative_eq;
use smartcore::linalg::basic::arrays::Array2;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::pca::{expand_pca, PolarityStats};
use crate::polarity::{Polarity, PolarityMap};
use crate::tests::seeds;

/// Projection fixture: component 0 is noise, component 1 separates the
/// classes. Rows 0..=5 are seeds (two per class), rows 6..=8 unlabeled.
fn projection() -> DenseMatrix<f64> {
    DenseMatrix::from_2d_vec(&vec![
        vec![0.1, 4.0],   // 0: positive
        vec![-0.1, 6.0],  // 1: positive
        vec![0.2, -4.0],  // 2: negative
        vec![0.0, -6.0],  // 3: negative
        vec![0.1, 0.5],   // 4: neutral
        vec![-0.1, -0.5], // 5: neutral
        vec![0.0, 4.5],   // 6: unlabeled, above the positive boundary
        vec![0.0, -4.5],  // 7: unlabeled, below the negative boundary
        vec![0.0, 1.0],   // 8: unlabeled, inside the neutral band
    ])
    .unwrap()
}

fn projection_seeds() -> PolarityMap {
    seeds(&[
        (0, Polarity::Positive),
        (1, Polarity::Positive),
        (2, Polarity::Negative),
        (3, Polarity::Negative),
        (4, Polarity::Neutral),
        (5, Polarity::Neutral),
    ])
}

fn loadings(n_components: usize) -> DenseMatrix<f64> {
    DenseMatrix::zeros(2, n_components)
}

#[test]
fn statistics_pick_the_separating_component() {
    let stats = PolarityStats::compute(&projection_seeds(), &projection());

    assert_eq!(stats.dim, 1);
    assert_eq!(stats.counts, [2, 2, 2]);
    assert_relative_eq!(stats.mean(Polarity::Positive), 5.0);
    assert_relative_eq!(stats.mean(Polarity::Negative), -5.0);
    assert_relative_eq!(stats.mean(Polarity::Neutral), 0.0);
    // population deviation: sum of squared offsets over the class size
    assert_relative_eq!(stats.deviation(Polarity::Positive), 1.0);
    assert_relative_eq!(stats.deviation(Polarity::Negative), 1.0);
    assert_relative_eq!(stats.deviation(Polarity::Neutral), 0.25);
}

#[test]
fn classification_assigns_by_threshold() {
    crate::init();
    let mut lexicon = projection_seeds();

    // boundaries: min = -5 + 1 = -4, max = 5 - 1 = 4
    expand_pca(&mut lexicon, &projection(), &loadings(2), None);

    assert_eq!(lexicon.len(), 9);
    assert_eq!(lexicon.get(&6), Some(&Polarity::Positive));
    assert_eq!(lexicon.get(&7), Some(&Polarity::Negative));
    assert_eq!(lexicon.get(&8), Some(&Polarity::Neutral));
}

#[test]
fn candidates_rank_by_distance_from_the_neutral_mean() {
    let mut lexicon = projection_seeds();

    expand_pca(&mut lexicon, &projection(), &loadings(2), Some(1));

    // vid 8 sits closest to the neutral mean (|0 - 1.0| = 1.0)
    assert_eq!(lexicon.len(), 7);
    assert_eq!(lexicon.get(&8), Some(&Polarity::Neutral));
    assert!(!lexicon.contains_key(&6));
    assert!(!lexicon.contains_key(&7));
}

#[test]
fn reversed_class_orientation_swaps_the_boundaries() {
    // flip the seed classes so the negative mean is the greater one
    let mut lexicon = seeds(&[
        (0, Polarity::Negative),
        (1, Polarity::Negative),
        (2, Polarity::Positive),
        (3, Polarity::Positive),
        (4, Polarity::Neutral),
        (5, Polarity::Neutral),
    ]);

    expand_pca(&mut lexicon, &projection(), &loadings(2), None);

    assert_eq!(lexicon.get(&6), Some(&Polarity::Negative));
    assert_eq!(lexicon.get(&7), Some(&Polarity::Positive));
    assert_eq!(lexicon.get(&8), Some(&Polarity::Neutral));
}

#[test]
fn absent_neutral_class_still_yields_a_neutral_band() {
    let mut lexicon = seeds(&[
        (0, Polarity::Positive),
        (1, Polarity::Positive),
        (2, Polarity::Negative),
        (3, Polarity::Negative),
    ]);

    expand_pca(&mut lexicon, &projection(), &loadings(2), None);

    // rows 4, 5, 8 fall between the boundaries and become neutral even
    // though no neutral seed exists
    assert_eq!(lexicon.get(&4), Some(&Polarity::Neutral));
    assert_eq!(lexicon.get(&5), Some(&Polarity::Neutral));
    assert_eq!(lexicon.get(&8), Some(&Polarity::Neutral));
    assert_eq!(lexicon.get(&6), Some(&Polarity::Positive));
    assert_eq!(lexicon.get(&7), Some(&Polarity::Negative));
}

#[test]
fn relabeling_a_full_lexicon_is_idempotent() {
    let mut lexicon = projection_seeds();
    expand_pca(&mut lexicon, &projection(), &loadings(2), None);

    let snapshot = lexicon.clone();
    expand_pca(&mut lexicon, &projection(), &loadings(2), Some(0));
    assert_eq!(lexicon, snapshot);
}

#[test]
#[should_panic(expected = "non-empty positive and negative seed classes")]
fn empty_positive_class_is_fatal() {
    let mut lexicon = seeds(&[(2, Polarity::Negative), (3, Polarity::Negative)]);
    expand_pca(&mut lexicon, &projection(), &loadings(2), None);
}

#[test]
#[should_panic(expected = "component count")]
fn loadings_component_mismatch_is_fatal() {
    let mut lexicon = projection_seeds();
    expand_pca(&mut lexicon, &projection(), &loadings(3), None);
}
