//! Tests for the model driver.
//!
//! ## Test Organization
//!
//! 1. **First Update** - a fresh model's first sample
//! 2. **Input Validation** - atomic rejection of bad inputs
//! 3. **Determinism** - identical streams give identical models
//! 4. **Multi-Output** - submodel independence
//! 5. **Normalization** - input/output scaling equivalence
//! 6. **Introspection** - counters and summary

use approx::assert_relative_eq;
use lwpr_rs::prelude::*;

fn model_1d() -> LwprModel<f64> {
    Lwpr::new(1, 1)
        .kernel(Gaussian)
        .metric_shape(Diagonal)
        .init_metric_spherical(20.0)
        .init_alpha(40.0)
        .build()
        .expect("valid configuration")
}

// ============================================================================
// First Update
// ============================================================================

/// The first update on an empty model creates exactly one field and returns
/// the trained target: a single fresh field's local model reduces to fitting
/// that one point.
#[test]
fn first_update_creates_one_field_and_fits_the_point() {
    let mut model = model_1d();
    let y_pred = model.update(&[2.5], &[7.25]).expect("update ok");

    assert_eq!(model.num_rfs(), vec![1]);
    assert_eq!(model.n_data(), 1);
    assert_relative_eq!(y_pred[0], 7.25, max_relative = 1e-10);

    // The read-only path agrees at the trained point.
    let y = model.predict(&[2.5]).expect("predict ok");
    assert_relative_eq!(y[0], 7.25, max_relative = 1e-10);
}

// ============================================================================
// Input Validation
// ============================================================================

/// A wrong-length input fails with InvalidDimension semantics and mutates
/// nothing: `n_data` and the field count are unchanged.
#[test]
fn dimension_mismatch_is_atomic() {
    let mut model = model_1d();
    model.update(&[1.0], &[1.0]).expect("update ok");

    let err = model.update(&[1.0, 2.0], &[1.0]).unwrap_err();
    assert_eq!(err, LwprError::InputDimension { expected: 1, got: 2 });
    assert_eq!(model.n_data(), 1);
    assert_eq!(model.num_rfs(), vec![1]);

    let err = model.update(&[1.0], &[1.0, 2.0]).unwrap_err();
    assert_eq!(err, LwprError::OutputDimension { expected: 1, got: 2 });
    assert_eq!(model.n_data(), 1);

    let err = model.update(&[f64::NAN], &[1.0]).unwrap_err();
    assert_eq!(err, LwprError::NonFiniteInput { name: "x", index: 0 });
    assert_eq!(model.n_data(), 1);
    assert_eq!(model.num_rfs(), vec![1]);
}

/// Prediction validates input length too.
#[test]
fn predict_rejects_wrong_dimension() {
    let model = model_1d();
    let err = model.predict(&[1.0, 2.0]).unwrap_err();
    assert_eq!(err, LwprError::InputDimension { expected: 1, got: 2 });
}

// ============================================================================
// Determinism
// ============================================================================

/// Replaying an identical ordered stream on two fresh models yields
/// identical predictions, update by update.
#[test]
fn identical_streams_give_identical_models() {
    let mut a = model_1d();
    let mut b = model_1d();

    for i in 0..500 {
        let x = ((i * 37) % 100) as f64 / 10.0;
        let y = (x * 0.9).sin() * 4.0 + 1.0;
        let ya = a.update(&[x], &[y]).expect("update ok");
        let yb = b.update(&[x], &[y]).expect("update ok");
        assert_eq!(ya, yb, "training predictions diverged at step {i}");
    }

    assert_eq!(a.num_rfs(), b.num_rfs());
    for i in 0..100 {
        let x = [i as f64 / 10.0];
        assert_eq!(
            a.predict(&x).expect("ok"),
            b.predict(&x).expect("ok"),
            "predictions diverged at x={}",
            x[0]
        );
    }
}

// ============================================================================
// Multi-Output
// ============================================================================

/// Output dimensions learn independently: each submodel tracks its own
/// target and keeps its own roster.
#[test]
fn output_dimensions_are_independent() {
    let mut model = Lwpr::new(1, 2)
        .kernel(Gaussian)
        .metric_shape(Diagonal)
        .init_metric_spherical(20.0)
        .init_alpha(40.0)
        .build()
        .expect("valid configuration");

    for i in 0..400 {
        let x = (i % 40) as f64 / 4.0;
        model
            .update(&[x], &[2.0 * x, -x + 3.0])
            .expect("update ok");
    }

    let y = model.predict(&[5.0]).expect("predict ok");
    assert_relative_eq!(y[0], 10.0, max_relative = 0.1);
    assert_relative_eq!(y[1], -2.0, epsilon = 0.5);
}

// ============================================================================
// Normalization
// ============================================================================

/// Scaling inputs and outputs while supplying matching normalization
/// factors reproduces the unscaled model's predictions.
#[test]
fn normalization_matches_unscaled_training() {
    let mut plain = model_1d();
    let mut scaled = Lwpr::new(1, 1)
        .kernel(Gaussian)
        .metric_shape(Diagonal)
        .init_metric_spherical(20.0)
        .init_alpha(40.0)
        .norm_in(&[10.0])
        .norm_out(&[4.0])
        .build()
        .expect("valid configuration");

    for i in 0..300 {
        let x = (i % 30) as f64 / 3.0;
        let y = (x * 0.7).cos() * 2.0;
        plain.update(&[x], &[y]).expect("update ok");
        // Same sample expressed in scaled units.
        scaled.update(&[x * 10.0], &[y * 4.0]).expect("update ok");
    }

    for i in 0..20 {
        let x = i as f64 / 2.0;
        let yp = plain.predict(&[x]).expect("ok")[0];
        let ys = scaled.predict(&[x * 10.0]).expect("ok")[0] / 4.0;
        assert_relative_eq!(yp, ys, max_relative = 1e-9, epsilon = 1e-9);
    }
}

// ============================================================================
// Introspection
// ============================================================================

/// Counters and the human-readable summary reflect training.
#[test]
fn introspection_reports_counters() {
    let mut model = model_1d();
    for i in 0..50 {
        let x = (i % 10) as f64;
        model.update(&[x], &[x * 0.5]).expect("update ok");
    }

    assert_eq!(model.n_data(), 50);
    assert_eq!(model.n_in(), 1);
    assert_eq!(model.n_out(), 1);
    assert!(model.num_rfs()[0] >= 2, "spread data must create fields");

    // Running input statistics cover the seen range.
    assert!(model.mean_x()[0] > 0.0 && model.mean_x()[0] < 10.0);
    assert!(model.var_x()[0] > 0.0);

    let summary = model.to_string();
    assert!(summary.contains("LWPR model: 1 -> 1"));
    assert!(summary.contains("receptive fields"));
}

/// Confidence bands are positive, finite near data, and grow away from it.
#[test]
fn confidence_band_grows_away_from_data() {
    let mut model = model_1d();
    for i in 0..200 {
        let x = (i % 20) as f64 / 10.0; // inputs in [0, 1.9]
        model.update(&[x], &[x * 2.0]).expect("update ok");
    }

    let (_, near) = model.predict_conf(&[1.0]).expect("ok");
    let (_, far) = model.predict_conf(&[100.0]).expect("ok");
    assert!(near[0].is_finite());
    assert!(near[0] >= 0.0);
    // Far from every field the band is infinite (empty-model prior).
    assert!(far[0] > near[0]);
}
