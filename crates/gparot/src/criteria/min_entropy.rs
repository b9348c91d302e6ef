//! Minimum entropy criterion.

use gparot_core::{Criterion, Orthogonal, Scalar};
use nalgebra::DMatrix;
use num_traits::Float;

use super::squared;

/// The minimum entropy criterion.
///
/// Minimizes the entropy of the squared loadings:
///
/// ```text
/// Q(L) = -Σ L2 ⊙ log(L2) / 2
/// ```
///
/// Defined for orthogonal rotation only; no oblique analogue exists.
///
/// # Domain restriction
///
/// The formula is undefined where a loading is exactly zero: `log(L2)`
/// produces `-∞` there and the value/gradient become NaN. This mirrors the
/// defining formula rather than special-casing zeros; callers must keep
/// exact zeros out of the loadings they rotate under this criterion.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumEntropy;

impl<T: Scalar> Criterion<T> for MinimumEntropy {
    type Method = Orthogonal;

    fn name(&self) -> &str {
        "minimum entropy"
    }

    fn evaluate(&self, loadings: &DMatrix<T>) -> (T, DMatrix<T>) {
        let l2 = squared(loadings);
        let log_l2 = l2.map(|x| <T as Float>::ln(x));
        let value = -l2.dot(&log_l2) * <T as Scalar>::from_f64(0.5);
        let gradient = -loadings.component_mul(&log_l2) - loadings;
        (value, gradient)
    }
}
