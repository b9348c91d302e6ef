//! Crawford-Ferguson criterion family.

use std::marker::PhantomData;

use gparot_core::{Criterion, Orthogonal, Result, RotationError, RotationMethod, Scalar};
use nalgebra::DMatrix;

use super::{off_diagonal_ones, squared};

/// The Crawford-Ferguson criterion with complexity weight κ ≥ 0.
///
/// With `N` and `M` the off-diagonal all-ones matrices of sizes p and d,
///
/// ```text
/// Q(L) = (1-κ)/4 · Σ L2 ⊙ (L2·N)  +  κ/4 · Σ L2 ⊙ (M·L2)
/// ```
///
/// The first term penalizes row (variable) complexity, the second column
/// (factor) complexity, and κ trades them off. Classical orthogonal
/// criteria are recovered at special values of κ: quartimax at 0, varimax
/// at 1/d, equamax at p/2d, parsimax at (p-1)/(d+p-2), and factor
/// parsimony at 1. The method tag is free: the family is defined for both
/// orthogonal and oblique rotation.
#[derive(Debug, Clone, Copy)]
pub struct CrawfordFerguson<T: Scalar, M: RotationMethod = Orthogonal> {
    kappa: T,
    method: PhantomData<M>,
}

impl<T: Scalar, M: RotationMethod> CrawfordFerguson<T, M> {
    /// Creates the criterion with the given complexity weight.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::InvalidParameter`] if `kappa` is negative.
    pub fn new(kappa: T) -> Result<Self> {
        if kappa < T::zero() {
            return Err(RotationError::invalid_parameter(format!(
                "Crawford-Ferguson kappa must be non-negative, got {kappa}"
            )));
        }
        Ok(Self {
            kappa,
            method: PhantomData,
        })
    }

    /// Returns the complexity weight κ.
    pub fn kappa(&self) -> T {
        self.kappa
    }

    /// κ = 0: the quartimax weighting.
    pub fn quartimax() -> Self {
        Self {
            kappa: T::zero(),
            method: PhantomData,
        }
    }

    /// κ = 1/d for a d-variable loading matrix: the varimax weighting.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::InvalidParameter`] if `variables` is zero.
    pub fn varimax(variables: usize) -> Result<Self> {
        if variables == 0 {
            return Err(RotationError::invalid_parameter(
                "varimax weighting requires at least one variable",
            ));
        }
        Ok(Self {
            kappa: T::one() / <T as Scalar>::from_usize(variables),
            method: PhantomData,
        })
    }

    /// κ = p/2d: the equamax weighting for a d×p loading matrix.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::InvalidParameter`] if `variables` is zero.
    pub fn equamax(variables: usize, factors: usize) -> Result<Self> {
        if variables == 0 {
            return Err(RotationError::invalid_parameter(
                "equamax weighting requires at least one variable",
            ));
        }
        Ok(Self {
            kappa: <T as Scalar>::from_usize(factors)
                / (<T as Scalar>::from_f64(2.0) * <T as Scalar>::from_usize(variables)),
            method: PhantomData,
        })
    }

    /// κ = (p-1)/(d+p-2): the parsimax weighting for a d×p loading matrix.
    ///
    /// # Errors
    ///
    /// Returns [`RotationError::InvalidParameter`] if `factors` is zero or
    /// `variables + factors < 3`, which leaves the weight undefined.
    pub fn parsimax(variables: usize, factors: usize) -> Result<Self> {
        if factors == 0 || variables + factors < 3 {
            return Err(RotationError::invalid_parameter(format!(
                "parsimax weighting is undefined for {variables} variables and {factors} factors"
            )));
        }
        Ok(Self {
            kappa: <T as Scalar>::from_usize(factors - 1)
                / <T as Scalar>::from_usize(variables + factors - 2),
            method: PhantomData,
        })
    }

    /// κ = 1: the factor-parsimony weighting.
    pub fn factor_parsimony() -> Self {
        Self {
            kappa: T::one(),
            method: PhantomData,
        }
    }
}

impl<T: Scalar, M: RotationMethod> Criterion<T> for CrawfordFerguson<T, M> {
    type Method = M;

    fn name(&self) -> &str {
        "Crawford-Ferguson"
    }

    fn evaluate(&self, loadings: &DMatrix<T>) -> (T, DMatrix<T>) {
        let (d, p) = loadings.shape();
        let l2 = squared(loadings);
        let row_complexity = &l2 * off_diagonal_ones::<T>(p);
        let column_complexity = off_diagonal_ones::<T>(d) * &l2;

        let quarter = <T as Scalar>::from_f64(0.25);
        let row_weight = T::one() - self.kappa;
        let value = (row_weight * l2.dot(&row_complexity)
            + self.kappa * l2.dot(&column_complexity))
            * quarter;
        let gradient = loadings.component_mul(&row_complexity) * row_weight
            + loadings.component_mul(&column_complexity) * self.kappa;
        (value, gradient)
    }
}
