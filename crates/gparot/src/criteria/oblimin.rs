//! Oblimin criterion family.

use std::marker::PhantomData;

use gparot_core::{Criterion, Oblique, RotationMethod, Scalar};
use nalgebra::DMatrix;

use super::{off_diagonal_ones, squared};

/// The oblimin criterion family with free parameter γ.
///
/// Starting from the cross-products matrix `C = L2·N`, γ ≠ 0 centers it as
/// `C ← (I - γ/d·1·1ᵗ)·C`, and
///
/// ```text
/// Q(L) = Σ L2 ⊙ C / 4
/// ```
///
/// γ = 0 gives quartimin (oblique) or quartimax-like behavior (orthogonal);
/// γ = d/2 corresponds to the equamax/orthomax weighting. γ is
/// unconstrained and negative values are useful for oblique rotation, so no
/// construction-time validation applies.
#[derive(Debug, Clone, Copy)]
pub struct Oblimin<T: Scalar, M: RotationMethod = Oblique> {
    gamma: T,
    method: PhantomData<M>,
}

impl<T: Scalar, M: RotationMethod> Oblimin<T, M> {
    /// Creates the criterion with the given γ.
    pub fn new(gamma: T) -> Self {
        Self {
            gamma,
            method: PhantomData,
        }
    }

    /// Returns γ.
    pub fn gamma(&self) -> T {
        self.gamma
    }
}

impl<T: Scalar, M: RotationMethod> Default for Oblimin<T, M> {
    /// γ = 0, the quartimin weighting.
    fn default() -> Self {
        Self::new(T::zero())
    }
}

/// Shared evaluation for oblimin and quartimin.
///
/// `gamma = 0` skips the centering step entirely, leaving `C = L2·N`.
pub(super) fn evaluate_oblimin<T: Scalar>(loadings: &DMatrix<T>, gamma: T) -> (T, DMatrix<T>) {
    let (d, p) = loadings.shape();
    let l2 = squared(loadings);
    let mut cross = &l2 * off_diagonal_ones::<T>(p);

    if gamma != T::zero() {
        let scale = gamma / <T as Scalar>::from_usize(d);
        for mut column in cross.column_iter_mut() {
            let shift = column.sum() * scale;
            column.add_scalar_mut(-shift);
        }
    }

    let value = l2.dot(&cross) * <T as Scalar>::from_f64(0.25);
    let gradient = loadings.component_mul(&cross);
    (value, gradient)
}

impl<T: Scalar, M: RotationMethod> Criterion<T> for Oblimin<T, M> {
    type Method = M;

    fn name(&self) -> &str {
        "oblimin"
    }

    fn evaluate(&self, loadings: &DMatrix<T>) -> (T, DMatrix<T>) {
        evaluate_oblimin(loadings, self.gamma)
    }
}
