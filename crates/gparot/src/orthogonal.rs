//! Gradient projection on the orthogonal manifold.
//!
//! Implements the orthogonal variant of Jennrich's gradient-projection
//! rotation: at every outer iteration the Euclidean gradient with respect
//! to T is projected onto the tangent space of the orthogonal group at T,
//! a backtracking line search steps against the projected gradient, and
//! the trial point is retracted onto the manifold through the polar factor
//! of its SVD.

use gparot_core::{Criterion, Orthogonal, Result, RotationError, Scalar};
use nalgebra::DMatrix;
use rand_distr::{Distribution, StandardNormal};

use crate::rotate::{GradientProjection, Rotation, RotationOptions};

impl<T: Scalar> GradientProjection<T> for Orthogonal {
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
            random_orthogonal::<T>(p)
        } else {
            DMatrix::identity(p, p)
        };
        let mut loadings = factors * &rotation;
        let (mut value, initial_gradient) = criterion.evaluate(&loadings);
        let mut gradient = factors.transpose() * initial_gradient;
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

            // Backtracking with retraction: the step doubles between outer
            // iterations and halves on every rejected trial. The sufficient
            // decrease threshold is f - s^2*alpha/2. If the trial budget
            // runs out the last candidate is committed with its tiny step,
            // matching the reference gradient-projection algorithm.
            step *= two;
            let mut trial = 0;
            let (new_rotation, new_loadings, new_value, new_gradient) = loop {
                let candidate = &rotation - &projected * step;
                let trial_rotation = polar_factor(candidate)?;
                let trial_loadings = factors * &trial_rotation;
                let (trial_value, trial_gradient) = criterion.evaluate(&trial_loadings);
                trial += 1;
                if trial_value < value - half * norm * norm * step || trial >= trials {
                    break (trial_rotation, trial_loadings, trial_value, trial_gradient);
                }
                step *= half;
            };

            rotation = new_rotation;
            loadings = new_loadings;
            value = new_value;
            gradient = factors.transpose() * new_gradient;
        }

        let projected = tangent_projection(&rotation, &gradient);
        Err(RotationError::not_converged(
            options.max_iterations,
            projected.norm().to_f64(),
            options.tolerance.to_f64(),
        ))
    }
}

/// Projects a Euclidean gradient onto the tangent space of the orthogonal
/// group at `rotation`.
///
/// Removes the symmetric part of Tᵗ∇f, the component that would move T off
/// the manifold: ∇fp = ∇f − T·sym(Tᵗ∇f).
fn tangent_projection<T: Scalar>(rotation: &DMatrix<T>, gradient: &DMatrix<T>) -> DMatrix<T> {
    let inner = rotation.transpose() * gradient;
    let symmetric = (&inner + inner.transpose()) * <T as Scalar>::from_f64(0.5);
    gradient - rotation * symmetric
}

/// Retracts a square matrix onto the orthogonal manifold through the polar
/// factor U·Vᵗ of its SVD.
fn polar_factor<T: Scalar>(candidate: DMatrix<T>) -> Result<DMatrix<T>> {
    let svd = candidate.svd(true, true);
    let u = svd
        .u
        .ok_or_else(|| RotationError::numerical("SVD did not produce U in polar retraction"))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| RotationError::numerical("SVD did not produce Vᵗ in polar retraction"))?;
    Ok(u * v_t)
}

/// Draws a random p×p orthogonal matrix as the Q factor of a
/// standard-normal draw.
fn random_orthogonal<T: Scalar>(p: usize) -> DMatrix<T> {
    let mut rng = rand::thread_rng();
    let random = DMatrix::from_fn(p, p, |_, _| {
        let sample: f64 = StandardNormal.sample(&mut rng);
        <T as Scalar>::from_f64(sample)
    });
    random.qr().q()
}
