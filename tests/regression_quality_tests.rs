//! End-to-end regression quality on a standard 1-D benchmark.
//!
//! The target is `y = 5 + 10·sin(7.8·ln(1+x)) / (1 + 0.1·x²)` with
//! input-scaled Gaussian noise, sampled uniformly on [0, 10] — fast
//! oscillation near zero, long smooth tail — exactly the regime adaptive
//! footprints are for.

use lwpr_rs::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

fn target(x: f64) -> f64 {
    5.0 + 10.0 * (7.8 * (1.0 + x).ln()).sin() / (1.0 + 0.1 * x * x)
}

/// Diagonal-metric model, 500 training samples, 20 epochs of random-order
/// passes: the normalized MSE on a held-out grid of 500 points must fall
/// below 0.1.
#[test]
fn one_dimensional_benchmark_reaches_nmse_below_0_1() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let noise = Normal::new(0.0, 1.0).expect("valid distribution");

    // Training set with input-proportional noise.
    let n_train = 500;
    let mut xs = Vec::with_capacity(n_train);
    let mut ys = Vec::with_capacity(n_train);
    for _ in 0..n_train {
        let x: f64 = rng.gen_range(0.0..10.0);
        let y = target(x) + 0.1 * noise.sample(&mut rng) * x;
        xs.push(x);
        ys.push(y);
    }

    let y_mean = ys.iter().sum::<f64>() / n_train as f64;
    let y_var = ys.iter().map(|y| (y - y_mean).powi(2)).sum::<f64>() / n_train as f64;

    let mut model = Lwpr::new(1, 1)
        .kernel(Gaussian)
        .metric_shape(Diagonal)
        .init_metric_spherical(20.0)
        .init_alpha(40.0)
        .penalty(1.0e-4)
        .build()
        .expect("valid configuration");

    let mut order: Vec<usize> = (0..n_train).collect();
    let mut nmse_by_epoch = Vec::new();
    for _ in 0..20 {
        order.shuffle(&mut rng);
        let mut sse = 0.0;
        for &i in &order {
            let y_pred = model.update_scalar(&[xs[i]], ys[i]).expect("update ok");
            sse += (ys[i] - y_pred) * (ys[i] - y_pred);
        }
        nmse_by_epoch.push(sse / n_train as f64 / y_var);
    }

    // Held-out grid against the noise-free target.
    let n_test = 500;
    let mut sse = 0.0;
    for k in 0..n_test {
        let x = 10.0 * k as f64 / (n_test - 1) as f64;
        let y_pred = model.predict_scalar(&[x]).expect("predict ok");
        sse += (target(x) - y_pred) * (target(x) - y_pred);
    }
    let nmse = sse / n_test as f64 / y_var;

    assert!(
        nmse < 0.1,
        "held-out nMSE {nmse:.4} (training nMSE by epoch: {nmse_by_epoch:.3?}), \
         {} receptive fields",
        model.num_rfs()[0]
    );

    // Training error must also have improved over the epochs.
    assert!(
        nmse_by_epoch[19] < nmse_by_epoch[0],
        "training nMSE did not improve: {nmse_by_epoch:?}"
    );
}

/// The confidence band on the benchmark model is tighter inside the sampled
/// range than far outside it.
#[test]
fn confidence_band_reflects_data_coverage() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut model = Lwpr::new(1, 1)
        .kernel(Gaussian)
        .metric_shape(Diagonal)
        .init_metric_spherical(20.0)
        .init_alpha(40.0)
        .build()
        .expect("valid configuration");

    for _ in 0..2000 {
        let x: f64 = rng.gen_range(0.0..10.0);
        model.update_scalar(&[x], target(x)).expect("update ok");
    }

    let (_, inside) = model.predict_conf(&[5.0]).expect("ok");
    let (_, outside) = model.predict_conf(&[50.0]).expect("ok");
    assert!(inside[0].is_finite());
    assert!(outside[0] > inside[0]);
}
