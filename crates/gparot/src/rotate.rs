//! Public rotation entry point, options, and result.

use gparot_core::{Criterion, Result, Scalar};
use nalgebra::{DMatrix, DVector};
use num_traits::Float;

/// Options controlling a single rotation run.
///
/// # Examples
///
/// ```
/// use gparot::RotationOptions;
///
/// let options = RotationOptions::<f64>::new()
///     .with_max_iterations(5000)
///     .with_tolerance(1e-8)
///     .with_row_normalization(true);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RotationOptions<T: Scalar> {
    /// Rescale the rows of the input to unit norm before optimizing and
    /// undo the scaling on the returned loadings (Kaiser normalization).
    pub normalize_rows: bool,
    /// Start from a random point on the constraint manifold instead of the
    /// identity.
    pub random_init: bool,
    /// Ceiling on outer gradient-projection iterations.
    pub max_iterations: usize,
    /// Ceiling on backtracking trials per outer iteration. At least one
    /// trial is always performed.
    pub line_search_iterations: usize,
    /// Convergence tolerance on the projected-gradient Frobenius norm.
    pub tolerance: T,
}

impl<T: Scalar> Default for RotationOptions<T> {
    fn default() -> Self {
        Self {
            normalize_rows: false,
            random_init: false,
            max_iterations: 1000,
            line_search_iterations: 10,
            tolerance: <T as Scalar>::from_f64(1e-6),
        }
    }
}

impl<T: Scalar> RotationOptions<T> {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets row normalization.
    pub fn with_row_normalization(mut self, normalize: bool) -> Self {
        self.normalize_rows = normalize;
        self
    }

    /// Sets random initialization of the rotation matrix.
    pub fn with_random_init(mut self, random: bool) -> Self {
        self.random_init = random;
        self
    }

    /// Sets the outer iteration ceiling.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the per-iteration line-search trial ceiling.
    pub fn with_line_search_iterations(mut self, trials: usize) -> Self {
        self.line_search_iterations = trials;
        self
    }

    /// Sets the convergence tolerance on the projected-gradient norm.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// A converged rotation.
///
/// Carries the rotated loadings, the transformation that produced them,
/// and the optimizer's terminal diagnostics.
#[derive(Debug, Clone)]
pub struct Rotation<T: Scalar> {
    /// Rotated d×p loading matrix L.
    pub loadings: DMatrix<T>,
    /// The p×p transformation T: orthogonal (TᵗT = I) or unit-column,
    /// depending on the criterion's method.
    pub rotation: DMatrix<T>,
    /// Criterion value at the solution.
    pub value: T,
    /// Outer iterations performed before convergence.
    pub iterations: usize,
    /// Projected-gradient norm at the solution.
    pub gradient_norm: T,
}

impl<T: Scalar> Rotation<T> {
    /// Implied factor correlation matrix TᵗT.
    ///
    /// Identity (within tolerance) for orthogonal solutions; for oblique
    /// solutions the off-diagonal entries are the correlations the
    /// rotation introduced among the factors.
    pub fn factor_correlations(&self) -> DMatrix<T> {
        self.rotation.transpose() * &self.rotation
    }
}

/// Gradient-projection optimization on one of the two constraint manifolds.
///
/// Implemented by the [`Orthogonal`](gparot_core::Orthogonal) and
/// [`Oblique`](gparot_core::Oblique) method markers, so that
/// [`rotate`] resolves the optimizer variant from the criterion's
/// associated method at compile time.
pub trait GradientProjection<T: Scalar>: gparot_core::RotationMethod + Sized {
    /// Runs the gradient-projection iteration for `criterion` on
    /// `loadings`, which is assumed to have at least two rows.
    fn optimize<C>(
        loadings: &DMatrix<T>,
        criterion: &C,
        options: &RotationOptions<T>,
    ) -> Result<Rotation<T>>
    where
        C: Criterion<T, Method = Self>;
}

/// Rotates a loading matrix toward simple structure.
///
/// Minimizes `criterion` over the rotation manifold selected by the
/// criterion's method tag and returns the rotated loadings together with
/// the transformation.
///
/// # Errors
///
/// [`RotationError::NotConverged`](gparot_core::RotationError::NotConverged)
/// if the projected-gradient norm does not drop below
/// `options.tolerance` within `options.max_iterations` outer iterations;
/// [`RotationError::Numerical`](gparot_core::RotationError::Numerical) if a
/// decomposition fails mid-iteration (singular oblique transformation).
///
/// # Examples
///
/// ```
/// use gparot::prelude::*;
/// use nalgebra::DMatrix;
///
/// let f = DMatrix::from_row_slice(3, 2, &[0.8, 0.1, 0.1, 0.8, 0.6, 0.6]);
/// let rotation = rotate(&f, &Varimax, &RotationOptions::default())?;
/// assert!(rotation.gradient_norm < 1e-6);
/// # Ok::<(), gparot::RotationError>(())
/// ```
pub fn rotate<T, C>(
    loadings: &DMatrix<T>,
    criterion: &C,
    options: &RotationOptions<T>,
) -> Result<Rotation<T>>
where
    T: Scalar,
    C: Criterion<T>,
    C::Method: GradientProjection<T>,
{
    let (d, p) = loadings.shape();

    // With fewer than two observed variables every rotation of F is
    // equivalent; return F unrotated under the identity.
    if d < 2 {
        let (value, _) = criterion.evaluate(loadings);
        return Ok(Rotation {
            loadings: loadings.clone(),
            rotation: DMatrix::identity(p, p),
            value,
            iterations: 0,
            gradient_norm: T::zero(),
        });
    }

    if options.normalize_rows {
        let (normalized, row_norms) = normalized_rows(loadings);
        let mut rotation =
            <C::Method as GradientProjection<T>>::optimize(&normalized, criterion, options)?;
        rescale_rows(&mut rotation.loadings, &row_norms);
        Ok(rotation)
    } else {
        <C::Method as GradientProjection<T>>::optimize(loadings, criterion, options)
    }
}

/// Returns a row-normalized copy of `loadings` and the original row norms.
///
/// Rows with a near-zero norm are left untouched; `rescale_rows` applies
/// the same guard so such rows round-trip unchanged.
fn normalized_rows<T: Scalar>(loadings: &DMatrix<T>) -> (DMatrix<T>, DVector<T>) {
    let mut normalized = loadings.clone();
    let norms = DVector::from_iterator(
        loadings.nrows(),
        loadings.row_iter().map(|row| row.norm()),
    );
    for i in 0..normalized.nrows() {
        if norms[i] > T::EPSILON {
            normalized.row_mut(i).scale_mut(T::one() / norms[i]);
        }
    }
    (normalized, norms)
}

/// Undoes `normalized_rows` on the rotated loadings.
fn rescale_rows<T: Scalar>(loadings: &mut DMatrix<T>, norms: &DVector<T>) {
    for i in 0..loadings.nrows() {
        if norms[i] > T::EPSILON {
            loadings.row_mut(i).scale_mut(norms[i]);
        }
    }
}

/// Checks whether a p×p matrix is orthogonal within `tolerance`.
///
/// Useful for verifying the transformation returned by an orthogonal
/// rotation.
pub fn is_orthogonal<T: Scalar>(matrix: &DMatrix<T>, tolerance: T) -> bool {
    let p = matrix.ncols();
    let gram = matrix.transpose() * matrix;
    for i in 0..p {
        for j in 0..p {
            let expected = if i == j { T::one() } else { T::zero() };
            if <T as Float>::abs(gram[(i, j)] - expected) > tolerance {
                return false;
            }
        }
    }
    true
}

/// Checks whether every column of a matrix has unit norm within `tolerance`.
///
/// Useful for verifying the transformation returned by an oblique rotation.
pub fn has_unit_columns<T: Scalar>(matrix: &DMatrix<T>, tolerance: T) -> bool {
    matrix
        .column_iter()
        .all(|column| <T as Float>::abs(column.norm() - T::one()) <= tolerance)
}
