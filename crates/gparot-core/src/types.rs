//! Type definitions and numeric trait bounds.
//!
//! This module provides the scalar trait used throughout the library,
//! combining the nalgebra and num-traits bounds the rotation algorithms
//! need, plus per-type tolerance constants.

use nalgebra::RealField;
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in rotation (f32 or f64).
///
/// This trait combines all the numeric traits required by the
/// gradient-projection algorithms: field arithmetic for the matrix
/// operations, `Float` for elementwise maps, and conversions for
/// constants and diagnostics.
pub trait Scalar:
    nalgebra::Scalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default convergence tolerance on the projected-gradient norm.
    const DEFAULT_TOLERANCE: Self;

    /// Tolerance for checking that a point satisfies the manifold
    /// constraint (orthogonality, unit columns).
    const MANIFOLD_TOLERANCE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a
    /// non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for error reporting and display).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_to_f64` for a
    /// non-panicking version.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Try to convert to f64.
    fn try_to_f64(self) -> Option<f64> {
        num_traits::cast(self)
    }

    /// Convert from usize (for dimension-dependent constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn from_usize(v: usize) -> Self {
        <Self as FromPrimitive>::from_usize(v).expect("Failed to convert from usize")
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-4;
    const MANIFOLD_TOLERANCE: Self = 1e-5;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-6;
    const MANIFOLD_TOLERANCE: Self = 1e-8;
}
