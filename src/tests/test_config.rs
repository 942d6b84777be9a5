use smartcore::linalg::basic::arrays::Array2;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::polarity::Polarity;
use crate::tests::two_cluster_scenario;
use crate::ExpansionConfig;

#[test]
fn default_config_is_unbounded() {
    let config = ExpansionConfig::default();
    assert_eq!(config.limit, None);
    assert_eq!(config.knn_k, 5);
    assert!(!config.early_break);
}

#[test]
fn config_drives_the_centroid_engine() {
    let (nwe, mut lexicon) = two_cluster_scenario();
    let config = ExpansionConfig {
        limit: Some(2),
        ..ExpansionConfig::default()
    };

    config.run_nearest_centroids(&mut lexicon, &nwe);
    assert_eq!(lexicon.len(), 4);
}

#[test]
fn config_drives_the_knn_engine() {
    let (nwe, mut lexicon) = two_cluster_scenario();
    let config = ExpansionConfig {
        knn_k: 1,
        ..ExpansionConfig::default()
    };

    config.run_knn(&mut lexicon, &nwe);
    assert_eq!(lexicon.len(), 5);
    assert_eq!(lexicon.get(&2), Some(&Polarity::Positive));
    assert_eq!(lexicon.get(&3), Some(&Polarity::Negative));
}

#[test]
fn config_drives_the_pca_engine() {
    let projected = DenseMatrix::from_2d_vec(&vec![
        vec![5.0],
        vec![-5.0],
        vec![6.0],
        vec![-6.0],
        vec![0.1],
    ])
    .unwrap();
    let loadings: DenseMatrix<f64> = DenseMatrix::zeros(1, 1);
    let mut lexicon = crate::tests::seeds(&[(0, Polarity::Positive), (1, Polarity::Negative)]);

    ExpansionConfig::default().run_pca(&mut lexicon, &projected, &loadings);

    assert_eq!(lexicon.len(), 5);
    assert_eq!(lexicon.get(&2), Some(&Polarity::Positive));
    assert_eq!(lexicon.get(&3), Some(&Polarity::Negative));
    assert_eq!(lexicon.get(&4), Some(&Polarity::Neutral));
}
