//! Gradient projection on the oblique (unit-column) manifold.
//!
//! Structurally parallel to the orthogonal optimizer, with three swaps:
//! the loadings come from a solve against the transformation rather than a
//! plain product, the tangent projection removes each column's radial
//! component so unit norms survive small steps, and the retraction rescales
//! columns instead of taking a polar factor. The transformation is never
//! inverted explicitly; both reconstructions go through an LU solve.

use gparot_core::{Criterion, Oblique, Result, RotationError, Scalar};
use nalgebra::DMatrix;
use rand_distr::{Distribution, StandardNormal};

use crate::rotate::{GradientProjection, Rotation, RotationOptions};

impl<T: Scalar> GradientProjection<T> for Oblique {
    fn optimize<C>(
        factors: &DMatrix<T>,
        criterion: &C,
        options: &RotationOptions<T>,
    ) -> Result<Rotation<T>>
    where
        C: Criterion<T, Method = Self>,
    {
        let p = factors.ncols();
        let half = <T as Scalar>::from_f64(0.5);
        let two = <T as Scalar>::from_f64(2.0);

        let mut rotation = if options.random_init {
            random_unit_columns::<T>(p)
        } else {
            DMatrix::identity(p, p)
        };
        let mut loadings = reconstruct_loadings(factors, &rotation)?;
        let (mut value, initial_gradient) = criterion.evaluate(&loadings);
        let mut gradient = euclidean_gradient(&rotation, &initial_gradient, &loadings)?;
        let mut step = T::one();
        let trials = options.line_search_iterations.max(1);

        for iteration in 0..options.max_iterations {
            let projected = tangent_projection(&rotation, &gradient);
            let norm = projected.norm();
            if norm < options.tolerance {
                return Ok(Rotation {
                    loadings,
                    rotation,
                    value,
                    iterations: iteration,
                    gradient_norm: norm,
                });
            }

            // Same backtracking schedule as the orthogonal variant: double
            // on entry, halve per rejected trial, commit the last trial if
            // the budget runs out.
            step *= two;
            let mut trial = 0;
            let (new_rotation, new_loadings, new_value, new_gradient) = loop {
                let candidate = &rotation - &projected * step;
                let trial_rotation = unit_column_retraction(candidate);
                let trial_loadings = reconstruct_loadings(factors, &trial_rotation)?;
                let (trial_value, trial_gradient) = criterion.evaluate(&trial_loadings);
                trial += 1;
                if trial_value < value - half * norm * norm * step || trial >= trials {
                    break (trial_rotation, trial_loadings, trial_value, trial_gradient);
                }
                step *= half;
            };

            gradient = euclidean_gradient(&new_rotation, &new_gradient, &new_loadings)?;
            rotation = new_rotation;
            loadings = new_loadings;
            value = new_value;
        }

        let projected = tangent_projection(&rotation, &gradient);
        Err(RotationError::not_converged(
            options.max_iterations,
            projected.norm().to_f64(),
            options.tolerance.to_f64(),
        ))
    }
}

/// Reconstructs the rotated loadings L = (T⁻¹Fᵗ)ᵗ through an LU solve of
/// T·Lᵗ = Fᵗ.
fn reconstruct_loadings<T: Scalar>(
    factors: &DMatrix<T>,
    rotation: &DMatrix<T>,
) -> Result<DMatrix<T>> {
    let solved = rotation
        .clone()
        .lu()
        .solve(&factors.transpose())
        .ok_or_else(|| RotationError::numerical("oblique transformation is singular"))?;
    Ok(solved.transpose())
}

/// Euclidean gradient of the criterion with respect to T,
/// ∇f = T⁻ᵗ·(−∇QᵗL), via a solve against Tᵗ.
fn euclidean_gradient<T: Scalar>(
    rotation: &DMatrix<T>,
    criterion_gradient: &DMatrix<T>,
    loadings: &DMatrix<T>,
) -> Result<DMatrix<T>> {
    let cross = criterion_gradient.transpose() * loadings;
    let solved = rotation
        .transpose()
        .lu()
        .solve(&cross)
        .ok_or_else(|| RotationError::numerical("oblique transformation is singular"))?;
    Ok(-solved)
}

/// Projects a Euclidean gradient onto the tangent space of the unit-column
/// manifold at `rotation`.
///
/// Per column the radial component along the column itself is removed:
/// ∇fp = ∇f − T·diag(colsum(T⊙∇f)).
fn tangent_projection<T: Scalar>(rotation: &DMatrix<T>, gradient: &DMatrix<T>) -> DMatrix<T> {
    let mut projected = gradient.clone();
    for j in 0..rotation.ncols() {
        let radial = rotation.column(j).dot(&gradient.column(j));
        projected
            .column_mut(j)
            .axpy(-radial, &rotation.column(j), T::one());
    }
    projected
}

/// Retracts a candidate onto the manifold by rescaling every column to
/// unit norm. Near-zero columns are left untouched.
fn unit_column_retraction<T: Scalar>(mut candidate: DMatrix<T>) -> DMatrix<T> {
    for mut column in candidate.column_iter_mut() {
        let norm = column.norm();
        if norm > T::EPSILON {
            column.scale_mut(T::one() / norm);
        }
    }
    candidate
}

/// Draws a random p×p matrix with unit-norm columns.
fn random_unit_columns<T: Scalar>(p: usize) -> DMatrix<T> {
    let mut rng = rand::thread_rng();
    let random = DMatrix::from_fn(p, p, |_, _| {
        let sample: f64 = StandardNormal.sample(&mut rng);
        <T as Scalar>::from_f64(sample)
    });
    unit_column_retraction(random)
}
