//! End-to-end rotation scenarios.

use approx::assert_relative_eq;
use gparot::prelude::*;
use gparot::{Orthogonal, Rotation};
use nalgebra::DMatrix;
use pretty_assertions::assert_eq;

fn example_loadings() -> DMatrix<f64> {
    DMatrix::from_row_slice(3, 2, &[0.8, 0.1, 0.1, 0.8, 0.6, 0.6])
}

// The textbook matrix above is varimax-stationary at the identity: swapping
// its first two rows and its columns maps it onto itself, which makes the
// projected gradient vanish before the first step. Scenarios that need the
// orthogonal optimizer to actually move start from this asymmetric variant.
fn asymmetric_loadings() -> DMatrix<f64> {
    DMatrix::from_row_slice(3, 2, &[0.8, 0.3, 0.1, 0.7, 0.6, 0.5])
}

fn orthogonality_defect(rotation: &Rotation<f64>) -> f64 {
    let p = rotation.rotation.ncols();
    (rotation.factor_correlations() - DMatrix::identity(p, p)).norm()
}

/// Summed per-column variance of the squared loadings; the quantity
/// varimax drives up.
fn squared_loading_variance(loadings: &DMatrix<f64>) -> f64 {
    let d = loadings.nrows() as f64;
    let l2 = loadings.component_mul(loadings);
    l2.column_iter()
        .map(|column| {
            let mean = column.sum() / d;
            column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / d
        })
        .sum()
}

#[test]
fn varimax_rotates_example_to_simple_structure() {
    let f = asymmetric_loadings();
    let rotation = rotate(&f, &Varimax, &RotationOptions::default()).unwrap();

    assert!(rotation.iterations < 1000);
    assert!(rotation.gradient_norm < 1e-6);
    assert!(orthogonality_defect(&rotation) < 1e-8);

    // Rotation improved the structure the criterion measures.
    assert!(squared_loading_variance(&rotation.loadings) > squared_loading_variance(&f));

    // Descent: the accepted solution is no worse than the identity start.
    let (initial_value, _) = Criterion::<f64>::evaluate(&Varimax, &f);
    assert!(rotation.value <= initial_value);
}

#[test]
fn quartimin_rotates_example_on_unit_column_manifold() {
    let f = example_loadings();
    let rotation = rotate(&f, &Quartimin, &RotationOptions::default()).unwrap();

    assert!(rotation.iterations < 1000);
    assert!(rotation.gradient_norm < 1e-6);
    for j in 0..2 {
        assert_relative_eq!(rotation.rotation.column(j).norm(), 1.0, epsilon = 1e-8);
    }

    let (initial_value, _) = Criterion::<f64>::evaluate(&Quartimin, &f);
    assert!(rotation.value <= initial_value);
}

#[test]
fn quartimin_leaves_perfect_simple_structure_alone() {
    // One nonzero factor per variable: the quartimin gradient vanishes at
    // the identity, so the optimizer converges in zero iterations and
    // returns F and the identity untouched.
    let f = DMatrix::from_row_slice(4, 2, &[0.9, 0.0, 0.0, 0.8, 0.0, 0.7, 0.6, 0.0]);
    let rotation = rotate(&f, &Quartimin, &RotationOptions::default()).unwrap();

    assert_eq!(rotation.iterations, 0);
    assert_eq!(rotation.rotation, DMatrix::identity(2, 2));
    assert_relative_eq!(rotation.loadings, f, epsilon = 1e-14);
}

#[test]
fn varimax_leaves_symmetric_loadings_alone() {
    // Column-swap symmetry puts the textbook matrix at a varimax
    // stationary point, so the identity is already optimal.
    let f = example_loadings();
    let rotation = rotate(&f, &Varimax, &RotationOptions::default()).unwrap();

    assert_eq!(rotation.iterations, 0);
    assert_eq!(rotation.rotation, DMatrix::identity(2, 2));
    assert_relative_eq!(rotation.loadings, f, epsilon = 1e-14);
    assert!(rotation.gradient_norm < 1e-12);
}

#[test]
fn fewer_than_two_variables_passes_through_unrotated() {
    let f = DMatrix::from_row_slice(1, 2, &[0.8, 0.3]);

    let orthogonal = rotate(&f, &Varimax, &RotationOptions::default()).unwrap();
    assert_eq!(orthogonal.loadings, f);
    assert_eq!(orthogonal.rotation, DMatrix::identity(2, 2));
    assert_eq!(orthogonal.iterations, 0);

    let oblique = rotate(&f, &Quartimin, &RotationOptions::default()).unwrap();
    assert_eq!(oblique.loadings, f);
    assert_eq!(oblique.rotation, DMatrix::identity(2, 2));
}

#[test]
fn zero_iteration_budget_is_a_non_convergence_error() {
    let f = asymmetric_loadings();
    let options = RotationOptions::default().with_max_iterations(0);

    let result = rotate(&f, &Varimax, &options);
    match result {
        Err(RotationError::NotConverged {
            iterations,
            gradient_norm,
            tolerance,
        }) => {
            assert_eq!(iterations, 0);
            assert!(gradient_norm >= tolerance);
        }
        other => panic!("expected NotConverged, got {other:?}"),
    }

    let result = rotate(&f, &Quartimin, &options);
    assert!(matches!(result, Err(RotationError::NotConverged { .. })));
}

#[test]
fn crawford_ferguson_kappa_rejected_before_rotation() {
    assert!(matches!(
        CrawfordFerguson::<f64, Orthogonal>::new(-1.0),
        Err(RotationError::InvalidParameter { .. })
    ));
}

#[test]
fn crawford_ferguson_varimax_weighting_matches_varimax() {
    // CF at kappa = 1/d differs from varimax only by a term that is
    // invariant under orthogonal rotation, so both optimizers walk the
    // same path from the identity start.
    let f = asymmetric_loadings();
    let options = RotationOptions::default();

    let varimax = rotate(&f, &Varimax, &options).unwrap();
    let criterion = CrawfordFerguson::<f64, Orthogonal>::varimax(f.nrows()).unwrap();
    let cf = rotate(&f, &criterion, &options).unwrap();

    assert_relative_eq!(cf.loadings, varimax.loadings, epsilon = 1e-4);
    assert_relative_eq!(cf.rotation, varimax.rotation, epsilon = 1e-4);
}

#[test]
fn oblimin_gamma_zero_matches_quartimin() {
    let f = example_loadings();
    let options = RotationOptions::default();

    let quartimin = rotate(&f, &Quartimin, &options).unwrap();
    let oblimin = rotate(&f, &Oblimin::<f64, Oblique>::new(0.0), &options).unwrap();

    assert_relative_eq!(oblimin.loadings, quartimin.loadings, epsilon = 1e-12);
    assert_relative_eq!(oblimin.rotation, quartimin.rotation, epsilon = 1e-12);
    assert_relative_eq!(oblimin.value, quartimin.value, epsilon = 1e-12);
}

#[test]
fn row_normalization_preserves_row_norms_under_orthogonal_rotation() {
    let f = example_loadings();
    let options = RotationOptions::default().with_row_normalization(true);
    let rotation = rotate(&f, &Varimax, &options).unwrap();

    // Orthogonal rotation preserves row norms, and the Kaiser rescaling
    // restores the original ones exactly.
    for i in 0..f.nrows() {
        assert_relative_eq!(
            rotation.loadings.row(i).norm(),
            f.row(i).norm(),
            epsilon = 1e-10
        );
    }
    assert!(orthogonality_defect(&rotation) < 1e-8);
}

#[test]
fn random_start_still_lands_on_the_manifold() {
    let f = example_loadings();
    let options = RotationOptions::default()
        .with_random_init(true)
        .with_max_iterations(5000);

    let orthogonal = rotate(&f, &Varimax, &options).unwrap();
    assert!(orthogonality_defect(&orthogonal) < 1e-8);

    let oblique = rotate(&f, &Quartimin, &options).unwrap();
    for j in 0..2 {
        assert_relative_eq!(oblique.rotation.column(j).norm(), 1.0, epsilon = 1e-8);
    }
}

#[test]
fn minimum_entropy_rotation_converges_on_dense_loadings() {
    let f = example_loadings();
    let rotation = rotate(&f, &MinimumEntropy, &RotationOptions::default()).unwrap();
    assert!(orthogonality_defect(&rotation) < 1e-8);
    assert!(rotation.value.is_finite());
}

#[test]
fn crawford_ferguson_works_obliquely() {
    // kappa = 0 under the oblique method is the quartimin objective, so
    // the two criteria agree step for step.
    let f = example_loadings();
    let options = RotationOptions::default();

    let cf = rotate(&f, &CrawfordFerguson::<f64, Oblique>::quartimax(), &options).unwrap();
    let quartimin = rotate(&f, &Quartimin, &options).unwrap();
    assert_relative_eq!(cf.loadings, quartimin.loadings, epsilon = 1e-10);
}

#[test]
fn quartimax_concentrates_variables() {
    let f = example_loadings();
    let rotation = rotate(&f, &Quartimax, &RotationOptions::default()).unwrap();
    assert!(orthogonality_defect(&rotation) < 1e-8);

    // The sum of fourth powers (the quantity quartimax maximizes) grew.
    let fourth = |m: &DMatrix<f64>| m.iter().map(|x| x.powi(4)).sum::<f64>();
    assert!(fourth(&rotation.loadings) >= fourth(&f));
}
