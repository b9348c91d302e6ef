//! Rotation criterion interface.
//!
//! A rotation criterion is a differentiable scalar function Q of the rotated
//! loading matrix whose minimization defines "simple structure". Every
//! criterion carries a compile-time method tag selecting the constraint
//! manifold the optimizer works on: [`Orthogonal`] (TᵗT = I) or [`Oblique`]
//! (unit-norm columns of T). The tag is an associated type, so the choice of
//! optimizer is made by the type system rather than by a runtime branch in
//! the iteration loop.

use nalgebra::DMatrix;
use std::fmt::Debug;

use crate::types::Scalar;

mod private {
    /// Seals [`super::RotationMethod`]; the two manifolds are a closed set.
    pub trait Sealed {}
    impl Sealed for super::Orthogonal {}
    impl Sealed for super::Oblique {}
}

/// Marker trait for the two rotation methods.
///
/// Implemented only by [`Orthogonal`] and [`Oblique`]; the trait is sealed
/// because the optimizers are written against exactly these two constraint
/// manifolds.
pub trait RotationMethod: private::Sealed + Debug + 'static {
    /// Human-readable method name for diagnostics.
    const NAME: &'static str;
}

/// Orthogonal rotation: the transformation satisfies TᵗT = I.
///
/// The rotation matrix lives on the orthogonal group (the square case of
/// the Stiefel manifold) and factor orthogonality is preserved.
#[derive(Debug, Clone, Copy)]
pub struct Orthogonal;

/// Oblique rotation: every column of the transformation has unit norm.
///
/// The rotation matrix lives on the oblique manifold, a product of spheres,
/// and the factors are allowed to correlate.
#[derive(Debug, Clone, Copy)]
pub struct Oblique;

impl RotationMethod for Orthogonal {
    const NAME: &'static str = "orthogonal";
}

impl RotationMethod for Oblique {
    const NAME: &'static str = "oblique";
}

/// Trait for rotation criteria.
///
/// A criterion maps a rotated d×p loading matrix L to a scalar value Q(L)
/// and the Euclidean gradient ∇Q(L) of the same shape. The optimizers call
/// [`Criterion::evaluate`] at every outer iteration and every line-search
/// trial, so implementations must be pure functions of `loadings` and the
/// criterion's own parameters, and must allocate a fresh gradient (the
/// optimizer keeps the previous one alive for the commit step).
pub trait Criterion<T: Scalar>: Debug {
    /// The constraint manifold this criterion is minimized on.
    type Method: RotationMethod;

    /// Human-readable criterion name for diagnostics.
    fn name(&self) -> &str;

    /// Evaluates the criterion at the given rotated loadings.
    ///
    /// Returns `(value, gradient)` where `gradient` has the same shape as
    /// `loadings`.
    fn evaluate(&self, loadings: &DMatrix<T>) -> (T, DMatrix<T>);
}
