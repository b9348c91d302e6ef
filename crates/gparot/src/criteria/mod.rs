//! Rotation criteria.
//!
//! Each criterion is an immutable value struct implementing
//! [`Criterion`](gparot_core::Criterion): a pure map from a rotated d×p
//! loading matrix L to `(value, gradient)`. Parameterized criteria
//! (Crawford-Ferguson κ, oblimin γ) validate their parameters at
//! construction and never mutate them afterwards.
//!
//! Conventions shared by the formulas below: `L2` is the elementwise square
//! of L, `N` is the p×p all-ones matrix with a zero diagonal, and `M` is the
//! d×d analogue. Minimizing the criterion value drives L toward simple
//! structure.

mod crawford_ferguson;
mod min_entropy;
mod oblimin;
mod quartimax;
mod quartimin;
mod varimax;

pub use crawford_ferguson::CrawfordFerguson;
pub use min_entropy::MinimumEntropy;
pub use oblimin::Oblimin;
pub use quartimax::Quartimax;
pub use quartimin::Quartimin;
pub use varimax::Varimax;

use gparot_core::Scalar;
use nalgebra::DMatrix;

/// Elementwise square of the loadings.
pub(crate) fn squared<T: Scalar>(loadings: &DMatrix<T>) -> DMatrix<T> {
    loadings.component_mul(loadings)
}

/// n×n all-ones matrix with a zero diagonal.
///
/// Right-multiplying `L2` by this sums, for every entry, the squares in the
/// other columns of the same row; left-multiplying sums the other rows of
/// the same column.
pub(crate) fn off_diagonal_ones<T: Scalar>(n: usize) -> DMatrix<T> {
    let mut ones = DMatrix::from_element(n, n, T::one());
    ones.fill_diagonal(T::zero());
    ones
}
