//! # Eigen-Decomposition
//!
//! [`EigenDecomposition`] pairs `N` eigenvectors of length `N` with `N`
//! eigenvalues. It is either supplied by a caller (and validated) or derived
//! from a component matrix with [`nalgebra::SymmetricEigen`].
//!
//! ## Ordering
//!
//! `SymmetricEigen` makes no ordering promise, so derived decompositions are
//! re-sorted descending by eigenvalue. The sort is stable: equal eigenvalues
//! keep the order the solver produced them in. Each derived eigenvector is
//! sign-normalised so that its largest-magnitude component is positive,
//! which makes the output deterministic for a given matrix.
//!
//! Diagonal input skips the iterative solver and yields the coordinate axes
//! and the diagonal entries exactly.

use nalgebra::{DMatrix, DVector, SymmetricEigen};

use crate::error::TensorError;

/// An ordered set of eigenvector/eigenvalue pairs for an `N`-dimensional
/// tensor.
///
/// The shape invariant (`N` vectors of length `N`, `N` values, `N >= 1`)
/// holds for every value of this type.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenDecomposition {
    vectors: Vec<DVector<f64>>,
    values: Vec<f64>,
}

impl EigenDecomposition {
    /// Build a decomposition from explicit pairs, kept in the given order.
    ///
    /// The dimension is taken from the number of vectors.
    pub fn new(vectors: Vec<DVector<f64>>, values: Vec<f64>) -> Result<Self, TensorError> {
        check_shape(&vectors, &values, vectors.len())?;
        Ok(Self { vectors, values })
    }

    /// Pairs whose shape the caller has already checked.
    pub(crate) fn from_validated(vectors: Vec<DVector<f64>>, values: Vec<f64>) -> Self {
        debug_assert!(check_shape(&vectors, &values, vectors.len()).is_ok());
        Self { vectors, values }
    }

    /// Decompose the symmetric part of a square matrix.
    ///
    /// Only the lower triangle (diagonal included) is read.
    pub fn of_symmetric(matrix: &DMatrix<f64>) -> Result<Self, TensorError> {
        if matrix.nrows() != matrix.ncols() {
            return Err(TensorError::NotSquare {
                rows: matrix.nrows(),
                cols: matrix.ncols(),
            });
        }
        if matrix.is_empty() {
            return Err(TensorError::EmptyTensor);
        }
        Ok(Self::decompose(matrix))
    }

    /// Decompose a matrix already known to be square and non-empty.
    pub(crate) fn decompose(matrix: &DMatrix<f64>) -> Self {
        let n = matrix.nrows();
        if !is_symmetric(matrix) {
            tracing::warn!(
                dimension = n,
                "decomposing non-symmetric components; only the lower triangle contributes"
            );
        }

        let mut decomposition = if is_lower_diagonal(matrix) {
            Self {
                vectors: (0..n).map(|axis| unit_axis(n, axis)).collect(),
                values: matrix.diagonal().iter().copied().collect(),
            }
        } else {
            let eigen = SymmetricEigen::new(matrix.clone());
            Self {
                vectors: eigen
                    .eigenvectors
                    .column_iter()
                    .map(|column| canonical_sign(column.into_owned()))
                    .collect(),
                values: eigen.eigenvalues.iter().copied().collect(),
            }
        };
        decomposition.sort_descending();

        tracing::trace!(dimension = n, values = ?decomposition.values, "decomposed tensor");
        decomposition
    }

    /// Tensor dimension `N`.
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// The eigenvalues, index-aligned with [`vectors`](Self::vectors).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The eigenvectors, index-aligned with [`values`](Self::values).
    pub fn vectors(&self) -> &[DVector<f64>] {
        &self.vectors
    }

    /// The eigenvector at `index`, if in range.
    pub fn vector(&self, index: usize) -> Option<&DVector<f64>> {
        self.vectors.get(index)
    }

    /// Reorder the pairs so eigenvalues are descending. Stable on ties.
    pub fn sort_descending(&mut self) {
        let values = std::mem::take(&mut self.values);
        let vectors = std::mem::take(&mut self.vectors);
        let mut pairs: Vec<(f64, DVector<f64>)> = values.into_iter().zip(vectors).collect();
        pairs.sort_by(|a, b| b.0.total_cmp(&a.0));
        let (values, vectors): (Vec<f64>, Vec<DVector<f64>>) = pairs.into_iter().unzip();
        self.values = values;
        self.vectors = vectors;
    }

    /// Rebuild the component matrix `Σ λ_i · (v_i ⊗ v_i)`.
    pub fn reconstruct(&self) -> DMatrix<f64> {
        let n = self.dimension();
        let mut components = DMatrix::zeros(n, n);
        for (vector, &value) in self.vectors.iter().zip(&self.values) {
            components.ger(value, vector, vector, 1.0);
        }
        components
    }

    /// Split into `(vectors, values)`.
    pub fn into_parts(self) -> (Vec<DVector<f64>>, Vec<f64>) {
        (self.vectors, self.values)
    }
}

/// Validate an eigen pair set against a required dimension.
///
/// Checks run in a fixed order: dimension, vector count, value count, then
/// each vector's length.
pub(crate) fn check_shape(
    vectors: &[DVector<f64>],
    values: &[f64],
    dimension: usize,
) -> Result<(), TensorError> {
    if dimension == 0 {
        return Err(TensorError::EmptyTensor);
    }
    if vectors.len() != dimension {
        return Err(TensorError::EigenvectorCount {
            expected: dimension,
            actual: vectors.len(),
        });
    }
    if values.len() != vectors.len() {
        return Err(TensorError::EigenvalueCount {
            vectors: vectors.len(),
            values: values.len(),
        });
    }
    check_lengths(vectors, dimension)
}

/// Every vector must have exactly `dimension` components.
pub(crate) fn check_lengths(vectors: &[DVector<f64>], dimension: usize) -> Result<(), TensorError> {
    match vectors.iter().position(|v| v.len() != dimension) {
        Some(index) => Err(TensorError::EigenvectorLength {
            index,
            expected: dimension,
            actual: vectors[index].len(),
        }),
        None => Ok(()),
    }
}

fn unit_axis(dimension: usize, axis: usize) -> DVector<f64> {
    let mut vector = DVector::zeros(dimension);
    vector[axis] = 1.0;
    vector
}

fn is_symmetric(matrix: &DMatrix<f64>) -> bool {
    let n = matrix.nrows();
    (0..n).all(|i| (0..i).all(|j| matrix[(i, j)] == matrix[(j, i)]))
}

fn is_lower_diagonal(matrix: &DMatrix<f64>) -> bool {
    let n = matrix.nrows();
    (0..n).all(|i| (0..i).all(|j| matrix[(i, j)] == 0.0))
}

/// Flip `vector` so its largest-magnitude component (first one on ties) is
/// positive.
fn canonical_sign(mut vector: DVector<f64>) -> DVector<f64> {
    let pivot = vector
        .iter()
        .copied()
        .fold(0.0_f64, |best, x| if x.abs() > best.abs() { x } else { best });
    if pivot < 0.0 {
        // `+ 0.0` keeps zero entries at +0 rather than -0.
        vector.iter_mut().for_each(|x| *x = -*x + 0.0);
    }
    vector
}
