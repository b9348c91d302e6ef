//! Gradient-projection rotation of factor loading matrices.
//!
//! Given a d×p matrix of factor loadings produced by exploratory factor
//! analysis, this crate rotates it toward "simple structure" by minimizing
//! a differentiable criterion over a constraint manifold: the orthogonal
//! group for orthogonal rotation, or the set of unit-column matrices for
//! oblique rotation. The optimizer is Jennrich's gradient-projection
//! algorithm: project the Euclidean gradient onto the manifold's tangent
//! space, backtrack along it with a retraction, and accept steps under a
//! sufficient-decrease test.
//!
//! # Criteria
//!
//! | Criterion | Methods | Parameter |
//! |---|---|---|
//! | [`CrawfordFerguson`] | orthogonal, oblique | κ ≥ 0 |
//! | [`Varimax`] | orthogonal | — |
//! | [`Quartimax`] | orthogonal | — |
//! | [`MinimumEntropy`] | orthogonal | — |
//! | [`Oblimin`] | orthogonal, oblique | γ free |
//! | [`Quartimin`] | oblique | — |
//!
//! The method is part of the criterion's type, so [`rotate`] picks the
//! right optimizer at compile time.
//!
//! # Examples
//!
//! ```
//! use gparot::prelude::*;
//! use nalgebra::DMatrix;
//!
//! let loadings = DMatrix::from_row_slice(3, 2, &[0.8, 0.1, 0.1, 0.8, 0.6, 0.6]);
//! let rotation = rotate(&loadings, &Varimax, &RotationOptions::default())?;
//!
//! // The transformation is orthogonal and the solution is stationary.
//! assert!(rotation.gradient_norm < 1e-6);
//! let gram = rotation.factor_correlations();
//! assert!((gram - DMatrix::identity(2, 2)).norm() < 1e-8);
//! # Ok::<(), gparot::RotationError>(())
//! ```
//!
//! Oblique rotation works the same way with an oblique criterion:
//!
//! ```
//! use gparot::prelude::*;
//! use nalgebra::DMatrix;
//!
//! let loadings = DMatrix::from_row_slice(3, 2, &[0.8, 0.1, 0.1, 0.8, 0.6, 0.6]);
//! let rotation = rotate(&loadings, &Quartimin, &RotationOptions::default())?;
//! # Ok::<(), gparot::RotationError>(())
//! ```

pub mod criteria;
mod oblique;
mod orthogonal;
mod rotate;

pub use criteria::{CrawfordFerguson, MinimumEntropy, Oblimin, Quartimax, Quartimin, Varimax};
pub use gparot_core::{Criterion, Oblique, Orthogonal, Result, RotationError, RotationMethod, Scalar};
pub use rotate::{
    has_unit_columns, is_orthogonal, rotate, GradientProjection, Rotation, RotationOptions,
};

/// Convenience re-exports for typical use.
pub mod prelude {
    pub use crate::criteria::{
        CrawfordFerguson, MinimumEntropy, Oblimin, Quartimax, Quartimin, Varimax,
    };
    pub use crate::rotate::{rotate, Rotation, RotationOptions};
    pub use gparot_core::{Criterion, Oblique, Orthogonal, Result, RotationError};
}
