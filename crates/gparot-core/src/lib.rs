//! Core traits and types for gradient-projection factor rotation.
//!
//! This crate defines the pieces shared by every rotation algorithm:
//!
//! - [`types::Scalar`], the numeric trait bound (f32 or f64) used throughout;
//! - [`error::RotationError`], the error taxonomy for construction-time
//!   validation and optimizer failures;
//! - [`criterion::Criterion`], the interface a rotation criterion exposes to
//!   the optimizers, together with the [`criterion::Orthogonal`] and
//!   [`criterion::Oblique`] method markers that select the constraint
//!   manifold at compile time.
//!
//! Concrete criteria and the optimizers themselves live in the `gparot`
//! crate.

pub mod criterion;
pub mod error;
pub mod types;

pub use criterion::{Criterion, Oblique, Orthogonal, RotationMethod};
pub use error::{Result, RotationError};
pub use types::Scalar;
