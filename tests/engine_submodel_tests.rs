//! Tests for roster bookkeeping: creation, pruning, and counter consistency.

use lwpr_rs::prelude::*;

fn builder() -> Lwpr<f64> {
    Lwpr::new(1, 1)
        .kernel(Gaussian)
        .metric_shape(Diagonal)
        .init_metric_spherical(20.0)
        .init_alpha(40.0)
}

// ============================================================================
// Counter Consistency
// ============================================================================

/// The field count only ever changes by +1 (creation, at most one per
/// update) or −1 per pruned field, and creations minus prunings always
/// equals the roster size.
#[test]
fn field_count_is_consistent_with_add_prune_history() {
    let mut model = builder().prune_interval(50).build().expect("valid");

    let mut prev_rfs = 0usize;
    let mut prev_pruned = 0u64;
    for i in 0..2000 {
        let x = ((i * 13) % 100) as f64 / 10.0;
        let y = (x * 1.3).sin();
        model.update(&[x], &[y]).expect("update ok");

        let rfs = model.num_rfs()[0];
        let pruned = model.n_pruned()[0];

        // Creations this step: roster delta plus prunings this step.
        let created = (rfs + pruned as usize) - (prev_rfs + prev_pruned as usize);
        assert!(created <= 1, "more than one field created in one update");
        assert!(pruned >= prev_pruned, "prune counter went backwards");

        prev_rfs = rfs;
        prev_pruned = pruned;
    }

    // Lifetime identity: creations == roster + prunings <= samples.
    let creations = model.num_rfs()[0] as u64 + model.n_pruned()[0];
    assert!(creations <= model.n_data());
    assert!(model.num_rfs()[0] >= 1);
}

/// Spread-out inputs produce a roster that covers the range: several fields,
/// none negative, and a stable count once coverage is complete.
#[test]
fn coverage_stabilizes_on_a_fixed_distribution() {
    let mut model = builder().build().expect("valid");

    for epoch in 0..10 {
        for i in 0..100 {
            let x = i as f64 / 10.0;
            model.update(&[x], &[x * 0.3]).expect("update ok");
        }
        if epoch == 0 {
            assert!(model.num_rfs()[0] >= 3, "first epoch must seed coverage");
        }
    }

    let after_ten = model.num_rfs()[0];
    for i in 0..100 {
        let x = i as f64 / 10.0;
        model.update(&[x], &[x * 0.3]).expect("update ok");
    }
    // Linear target, fixed distribution: coverage does not keep growing.
    assert!(model.num_rfs()[0] <= after_ten + 2);
}

// ============================================================================
// Pruning
// ============================================================================

/// Two fields that end up claiming the same recent inputs above `w_prune`
/// are reduced to one, and the survivor is the finer (larger-trace) field.
#[test]
fn redundant_overlap_is_pruned_to_the_finer_field() {
    // A wide initial metric and a low prune threshold force overlap: every
    // field spans the whole sampled range.
    let mut model = builder()
        .w_prune(0.5)
        .w_gen(0.9999)
        .prune_interval(10)
        .build()
        .expect("valid");

    // Nearby samples under a high w_gen spawn several nearly-coincident
    // fields before the first prune scan runs.
    for i in 0..40 {
        let x = (i % 5) as f64 * 0.05;
        model.update(&[x], &[1.0]).expect("update ok");
    }

    assert!(
        model.n_pruned()[0] >= 1,
        "coincident fields must trigger pruning"
    );
    // At most the five distinct centers can be live at once.
    assert!(model.num_rfs()[0] <= 5);
}

/// With a prune threshold no pair can reach, nothing is ever pruned.
#[test]
fn no_pruning_without_overlap() {
    let mut model = builder().w_prune(0.999999).build().expect("valid");
    for i in 0..1000 {
        let x = (i % 50) as f64 / 5.0;
        model.update(&[x], &[(x).cos()]).expect("update ok");
    }
    assert_eq!(model.n_pruned(), vec![0]);
}
