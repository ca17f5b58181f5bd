//! Property tests for the adaptive distance metrics.
//!
//! ## Test Organization
//!
//! 1. **PSD Property** - metrics stay symmetric positive semi-definite over
//!    long random update sequences, in every metric mode
//! 2. **Statistic Consistency** - decayed statistics still satisfy their
//!    defining identities after long streams
//! 3. **Diagonal Mode** - off-diagonal entries never appear

use lwpr_rs::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn build(metric_shape: MetricShape, meta: bool, update_metric: bool) -> LwprModel<f64> {
    Lwpr::new(2, 1)
        .kernel(Gaussian)
        .metric_shape(metric_shape)
        .init_metric_spherical(15.0)
        .init_alpha(100.0)
        .penalty(1.0e-5)
        .meta(meta)
        .update_metric(update_metric)
        .build()
        .expect("valid configuration")
}

fn train_random(model: &mut LwprModel<f64>, seed: u64, samples: usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..samples {
        let a: f64 = rng.gen_range(-1.0..1.0);
        let b: f64 = rng.gen_range(-1.0..1.0);
        let y = (3.0 * a).sin() * (2.0 * b).cos() + 0.01 * rng.gen_range(-1.0..1.0);
        model.update(&[a, b], &[y]).expect("update ok");
    }
}

/// Assert every field's metric is symmetric and PSD, by direct symmetry
/// comparison and by probing the quadratic form with random vectors.
fn assert_all_metrics_symmetric_psd(model: &LwprModel<f64>, rng: &mut ChaCha8Rng) {
    let n = model.n_in();
    for sub in model.submodels() {
        for (_, rf) in sub.fields().iter() {
            for i in 0..n {
                for j in 0..n {
                    assert_eq!(
                        rf.d_metric[i * n + j],
                        rf.d_metric[j * n + i],
                        "metric asymmetric at ({i},{j})"
                    );
                    assert!(rf.d_metric[i * n + j].is_finite());
                }
            }
            for _ in 0..16 {
                let v: Vec<f64> = (0..n).map(|_| rng.gen_range(-2.0..2.0)).collect();
                let mut quad = 0.0;
                for i in 0..n {
                    for j in 0..n {
                        quad += v[i] * rf.d_metric[i * n + j] * v[j];
                    }
                }
                assert!(
                    quad >= -1e-9,
                    "quadratic form went negative: {quad}"
                );
            }
        }
    }
}

// ============================================================================
// PSD Property
// ============================================================================

/// Full-metric mode: symmetric PSD after a long random stream.
#[test]
fn metrics_stay_psd_full_mode() {
    let mut model = build(MetricShape::Full, false, true);
    train_random(&mut model, 7, 4000);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    assert_all_metrics_symmetric_psd(&model, &mut rng);
}

/// Diagonal mode: symmetric PSD after a long random stream.
#[test]
fn metrics_stay_psd_diagonal_mode() {
    let mut model = build(MetricShape::Diagonal, false, true);
    train_random(&mut model, 11, 4000);
    let mut rng = ChaCha8Rng::seed_from_u64(100);
    assert_all_metrics_symmetric_psd(&model, &mut rng);
}

/// Meta layer enabled: still symmetric PSD.
#[test]
fn metrics_stay_psd_with_meta() {
    let mut model = build(MetricShape::Full, true, true);
    train_random(&mut model, 13, 3000);
    let mut rng = ChaCha8Rng::seed_from_u64(101);
    assert_all_metrics_symmetric_psd(&model, &mut rng);
}

/// With adaptation disabled, every field keeps the initial metric exactly.
#[test]
fn disabled_adaptation_freezes_the_metric() {
    let mut model = build(MetricShape::Full, false, false);
    train_random(&mut model, 17, 1000);
    for sub in model.submodels() {
        for (_, rf) in sub.fields().iter() {
            assert_eq!(rf.d_metric, model.config().init_d);
        }
    }
}

// ============================================================================
// Statistic Consistency
// ============================================================================

/// After a long stream the incrementally maintained quantities still satisfy
/// their defining identities: coefficients are the ratio of their decayed
/// sums, and directions are unit vectors (or still untrained zeros).
#[test]
fn decayed_statistics_remain_consistent() {
    let mut model = build(MetricShape::Diagonal, false, true);
    train_random(&mut model, 23, 5000);

    for sub in model.submodels() {
        for (_, rf) in sub.fields().iter() {
            for r in 0..rf.n_reg() {
                if rf.ss_s2[r] > 1e-12 {
                    let expect = rf.ss_sy[r] / rf.ss_s2[r];
                    assert!(
                        (rf.beta[r] - expect).abs() <= 1e-9 * (1.0 + expect.abs()),
                        "beta[{r}] drifted from its defining ratio"
                    );
                }
                let norm: f64 = rf.u[r].iter().map(|v| v * v).sum::<f64>().sqrt();
                assert!(
                    (norm - 1.0).abs() < 1e-9 || norm < 1e-9,
                    "direction {r} has norm {norm}"
                );
            }
            // Activation weights always lie in (0, 1].
            assert!(rf.w > 0.0 && rf.w <= 1.0);
        }
    }
}

// ============================================================================
// Diagonal Mode
// ============================================================================

/// Diagonal-only adaptation never produces off-diagonal entries.
#[test]
fn diagonal_mode_keeps_metric_diagonal() {
    let mut model = build(MetricShape::Diagonal, false, true);
    train_random(&mut model, 31, 3000);

    for sub in model.submodels() {
        for (_, rf) in sub.fields().iter() {
            assert_eq!(rf.d_metric[1], 0.0);
            assert_eq!(rf.d_metric[2], 0.0);
            assert!(rf.d_metric[0] > 0.0);
            assert!(rf.d_metric[3] > 0.0);
        }
    }
}
