//! Quartimin criterion.

use gparot_core::{Criterion, Oblique, Scalar};
use nalgebra::DMatrix;

use super::oblimin::evaluate_oblimin;

/// The quartimin criterion.
///
/// ```text
/// Q(L) = Σ L2 ⊙ (L2·N) / 4
/// ```
///
/// Penalizes, for every variable, the co-occurrence of squared loadings on
/// distinct factors. Identical to [`Oblimin`](super::Oblimin) at γ = 0,
/// fixed to oblique rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quartimin;

impl<T: Scalar> Criterion<T> for Quartimin {
    type Method = Oblique;

    fn name(&self) -> &str {
        "quartimin"
    }

    fn evaluate(&self, loadings: &DMatrix<T>) -> (T, DMatrix<T>) {
        evaluate_oblimin(loadings, T::zero())
    }
}
