//! End-to-end embedding scenarios: periodic tone vs. noisy ramp

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use sliding_window_tda::{
    embed, DimensionReduction, EmbedderConfig, EmbeddingError, EmbeddingParameters, Pca,
    SlidingWindowEmbedder,
};
use std::f64::consts::PI;

fn tone(n: usize, period: f64) -> Vec<f64> {
    (0..n).map(|k| (2.0 * PI * k as f64 / period).cos()).collect()
}

fn noisy_ramp(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.05).unwrap();
    (0..n)
        .map(|k| k as f64 / 40.0 + noise.sample(&mut rng))
        .collect()
}

#[test]
fn test_periodic_embedding_is_round() {
    let signal = tone(160, 40.0);
    let embedding = embed(&signal, 20, 1.0, 0.5).unwrap();

    assert_eq!(embedding.candidate_windows(), 280);
    assert_eq!(embedding.nrows(), 277);
    assert_eq!(embedding.dim(), 20);

    let proj = Pca.reduce(embedding.points(), 3).unwrap();
    let ratio = proj.variance_ratio(0, 1).unwrap();
    println!("Top variances: {:?}, ratio = {:.5}", proj.explained_variance, ratio);

    assert!((ratio - 1.0).abs() < 0.01);
    // The loop is planar: almost nothing outside the top two axes
    assert!(proj.explained_variance[2] < 1e-3 * proj.explained_variance[0]);
}

#[test]
fn test_ramp_embedding_is_not_round() {
    let signal = noisy_ramp(400, 7);
    let embedding = embed(&signal, 20, 1.0, 0.5).unwrap();

    assert_eq!(embedding.candidate_windows(), 760);
    assert_eq!(embedding.nrows(), 757);

    let proj = Pca.reduce(embedding.points(), 2).unwrap();
    let ratio = proj.variance_ratio(0, 1).unwrap();
    println!("Top variances: {:?}, ratio = {:.6}", proj.explained_variance, ratio);

    assert!(ratio < 0.05);
}

#[test]
fn test_oversized_window_is_typed_failure() {
    let signal = tone(40, 40.0);
    let err = embed(&signal, 20, 2.0, 0.5).unwrap_err();
    assert_eq!(
        err,
        EmbeddingError::InsufficientSignalLength {
            len: 40,
            extent: 40.0,
            d_t: 0.5,
        }
    );
}

#[test]
fn test_repeat_calls_identical() {
    let signal = noisy_ramp(200, 11);
    let params = EmbeddingParameters::new(7, 2.3, 0.7);

    let first = SlidingWindowEmbedder::default().embed(&signal, &params).unwrap();
    let second = SlidingWindowEmbedder::new(EmbedderConfig::sequential())
        .embed(&signal, &params)
        .unwrap();

    assert_eq!(first.points(), second.points());
}

#[test]
fn test_extent_matched_to_period() {
    // dim·τ = period: every window covers exactly one cycle
    let params = EmbeddingParameters::from_extent(10, 40.0, 1.0).unwrap();
    let signal = tone(200, 40.0);
    let embedding = SlidingWindowEmbedder::default().embed(&signal, &params).unwrap();

    // τ = 4 and dT = 1 keep every coordinate on the sample lattice
    for i in 0..embedding.nrows() {
        for j in 0..10 {
            assert_eq!(embedding.row(i)[j], signal[i + 4 * j]);
        }
    }

    let proj = Pca.reduce(embedding.points(), 2).unwrap();
    assert!((proj.variance_ratio(0, 1).unwrap() - 1.0).abs() < 0.02);
}
