//! Varimax criterion.

use gparot_core::{Criterion, Orthogonal, Scalar};
use nalgebra::DMatrix;

use super::squared;

/// The varimax criterion.
///
/// Maximizes the summed per-column variance of the squared loadings, written
/// here in minimization form:
///
/// ```text
/// Q(L) = -‖L2 - colmean(L2)‖² / 4
/// ```
///
/// where `colmean` broadcasts each column's mean over its entries. This is
/// the most common orthogonal criterion; the Crawford-Ferguson family
/// reproduces it at κ = 1/d.
#[derive(Debug, Clone, Copy, Default)]
pub struct Varimax;

impl<T: Scalar> Criterion<T> for Varimax {
    type Method = Orthogonal;

    fn name(&self) -> &str {
        "varimax"
    }

    fn evaluate(&self, loadings: &DMatrix<T>) -> (T, DMatrix<T>) {
        let d = loadings.nrows();
        let mut centered = squared(loadings);
        let mean_scale = T::one() / <T as Scalar>::from_usize(d);
        for mut column in centered.column_iter_mut() {
            let mean = column.sum() * mean_scale;
            column.add_scalar_mut(-mean);
        }

        let value = -centered.norm_squared() * <T as Scalar>::from_f64(0.25);
        let gradient = -loadings.component_mul(&centered);
        (value, gradient)
    }
}
