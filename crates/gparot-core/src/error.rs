//! Error types for factor rotation.
//!
//! Two failure kinds matter to callers and they react differently to each:
//! an invalid criterion parameter means the input must be fixed, while
//! non-convergence means the iteration budget or tolerance should be
//! loosened. They are therefore distinct variants and never collapsed into
//! a generic failure.

use thiserror::Error;

/// Errors that can occur while constructing a criterion or rotating a
/// loading matrix.
#[derive(Debug, Clone, Error)]
pub enum RotationError {
    /// A criterion parameter failed construction-time validation.
    ///
    /// Raised, for example, when Crawford-Ferguson is given a negative κ.
    /// Not retryable; the caller must fix the parameter.
    #[error("Invalid criterion parameter: {reason}")]
    InvalidParameter {
        /// Description of the violated constraint.
        reason: String,
    },

    /// The gradient-projection iteration did not converge.
    ///
    /// The projected-gradient norm stayed at or above the tolerance for the
    /// whole iteration budget. The final norm and the tolerance are carried
    /// so a caller can decide whether to retry with a larger budget or a
    /// looser tolerance. A non-converged rotation is never returned
    /// silently.
    #[error(
        "Rotation did not converge after {iterations} iterations: \
         projected gradient norm {gradient_norm:e} >= tolerance {tolerance:e}"
    )]
    NotConverged {
        /// Number of outer iterations attempted.
        iterations: usize,
        /// Projected-gradient norm at the last accepted point.
        gradient_norm: f64,
        /// Convergence tolerance that was not reached.
        tolerance: f64,
    },

    /// A dense decomposition failed mid-iteration.
    ///
    /// Raised when the oblique transformation matrix becomes singular in a
    /// solve, or when an SVD fails to produce its factors.
    #[error("Numerical failure: {reason}")]
    Numerical {
        /// Description of the failed operation.
        reason: String,
    },
}

impl RotationError {
    /// Create an `InvalidParameter` error with a custom reason.
    pub fn invalid_parameter<S: Into<String>>(reason: S) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Create a `NotConverged` error from the optimizer's final state.
    pub fn not_converged(iterations: usize, gradient_norm: f64, tolerance: f64) -> Self {
        Self::NotConverged {
            iterations,
            gradient_norm,
            tolerance,
        }
    }

    /// Create a `Numerical` error with a custom reason.
    pub fn numerical<S: Into<String>>(reason: S) -> Self {
        Self::Numerical {
            reason: reason.into(),
        }
    }
}

/// Result type alias for rotation operations.
pub type Result<T> = std::result::Result<T, RotationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = RotationError::invalid_parameter("kappa must be non-negative");
        assert!(err.to_string().contains("kappa must be non-negative"));

        let err = RotationError::not_converged(1000, 1e-3, 1e-6);
        let msg = err.to_string();
        assert!(msg.contains("1000 iterations"));
        assert!(msg.contains("1e-3"));
        assert!(msg.contains("1e-6"));
    }

    #[test]
    fn test_not_converged_fields() {
        match RotationError::not_converged(42, 0.5, 1e-6) {
            RotationError::NotConverged {
                iterations,
                gradient_norm,
                tolerance,
            } => {
                assert_eq!(iterations, 42);
                assert_eq!(gradient_norm, 0.5);
                assert_eq!(tolerance, 1e-6);
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }
}
