//! Quartimax criterion.

use gparot_core::{Criterion, Orthogonal, Scalar};
use nalgebra::DMatrix;

use super::squared;

/// The quartimax criterion.
///
/// Maximizes the sum of fourth powers of the loadings, in minimization
/// form:
///
/// ```text
/// Q(L) = -‖L2‖² / 4
/// ```
///
/// Quartimax concentrates each variable on a single factor but, unlike
/// varimax, does nothing to spread variance across factors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quartimax;

impl<T: Scalar> Criterion<T> for Quartimax {
    type Method = Orthogonal;

    fn name(&self) -> &str {
        "quartimax"
    }

    fn evaluate(&self, loadings: &DMatrix<T>) -> (T, DMatrix<T>) {
        let l2 = squared(loadings);
        let value = -l2.norm_squared() * <T as Scalar>::from_f64(0.25);
        let gradient = -loadings.component_mul(&l2);
        (value, gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::gradient_check::{assert_gradient_matches, sample_loadings};
    use approx::assert_relative_eq;

    #[test]
    fn test_gradient_matches_finite_differences() {
        assert_gradient_matches(&Quartimax, &sample_loadings(), 1e-6);
    }

    #[test]
    fn test_value_is_negative_quarter_sum_of_fourth_powers() {
        let loadings = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 0.0, 1.0]);
        let (value, _) = Criterion::<f64>::evaluate(&Quartimax, &loadings);
        assert_relative_eq!(value, -(1.0 + 16.0 + 0.0 + 1.0) / 4.0, epsilon = 1e-15);
    }
}
