//! # Dyadic Tensor
//!
//! [`DyadicTensor`] is a rank-2 tensor of runtime dimension `N >= 1`. It owns
//! a dense `N × N` component matrix and, optionally, an explicit
//! [`EigenDecomposition`]. Tensors built from eigenvectors or eigen pairs keep
//! theirs; for every other tensor one is derived from the symmetric part of
//! the components on each eigen query.
//!
//! ## Construction
//!
//! Each input shape has its own named factory and its own validation:
//!
//! | Factory | Input | Components | Eigens |
//! |---------|-------|------------|--------|
//! | `from_eigenvectors` | `N` vectors of length `N` | columns | `(v/‖v‖, ‖v‖)` |
//! | `from_eigens` | vectors + eigenvalues | `Σ λ v⊗v` | as given |
//! | `from_symmetric_elements` | `N(N+1)/2` values | symmetric fill | derived |
//! | `from_matrix` | square matrix | as given | derived |
//!
//! ## Algebra
//!
//! `+`, `-` and `*` act entry by entry: `*` between two tensors is the
//! Hadamard product. True matrix multiplication is
//! [`contract`](DyadicTensor::contract). The operator traits panic on a
//! dimension mismatch; the `try_*` methods return [`TensorError`] instead.
//!
//! ## Text Form
//!
//! `Display` writes the components column by column as
//! `[v0 v1 ... v(N*N-1)]`. For a symmetric tensor this is the row-major
//! flattening; for an eigenvector-built tensor it is the eigenvectors
//! concatenated. `FromStr` reads the same form back.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::eigen::{check_lengths, check_shape, EigenDecomposition};
use crate::error::TensorError;

/// A symmetric rank-2 tensor of runtime dimension `N`.
///
/// Equality compares dimension and components exactly; the eigen
/// representation does not take part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TensorRecord", into = "TensorRecord")]
pub struct DyadicTensor {
    components: DMatrix<f64>,
    /// Decomposition supplied through `from_eigens`/`set_eigens`. Cleared by
    /// every other mutation.
    eigens: Option<EigenDecomposition>,
}

impl DyadicTensor {
    // -- construction ---------------------------------------------------

    /// Lay `N` eigenvectors of length `N` out as the columns of the
    /// component matrix.
    ///
    /// Each vector is also kept as an eigen pair: its direction `v/‖v‖` is
    /// the eigenvector and its length `‖v‖` the eigenvalue, in the given
    /// order. Unit vectors therefore carry eigenvalue one. A zero vector is
    /// kept as is with eigenvalue zero.
    pub fn from_eigenvectors(vectors: &[DVector<f64>]) -> Result<Self, TensorError> {
        if vectors.is_empty() {
            return Err(TensorError::EmptyTensor);
        }
        check_lengths(vectors, vectors.len())?;
        Ok(Self::from_vector_columns(vectors))
    }

    /// Build from an explicit decomposition; the components become
    /// `Σ λ_i · (v_i ⊗ v_i)` and the pairs are kept in the given order.
    pub fn from_eigens(vectors: &[DVector<f64>], values: &[f64]) -> Result<Self, TensorError> {
        let decomposition = EigenDecomposition::new(vectors.to_vec(), values.to_vec())?;
        Ok(Self {
            components: decomposition.reconstruct(),
            eigens: Some(decomposition),
        })
    }

    /// Unpack the upper triangle of a symmetric matrix, given row by row.
    ///
    /// For `N = 3` the order is `xx xy xz yy yz zz`. The element count must
    /// be a triangular number `N(N+1)/2` with `N >= 1`.
    pub fn from_symmetric_elements(elements: &[f64]) -> Result<Self, TensorError> {
        let dimension = triangular_root(elements.len()).ok_or_else(|| TensorError::ElementCount {
            expected: "N(N+1)/2 for some N >= 1".into(),
            actual: elements.len(),
        })?;
        Ok(Self::from_components(upper_triangle(dimension, elements)))
    }

    /// Wrap a square, non-empty component matrix.
    pub fn from_matrix(matrix: DMatrix<f64>) -> Result<Self, TensorError> {
        if matrix.nrows() != matrix.ncols() {
            return Err(TensorError::NotSquare {
                rows: matrix.nrows(),
                cols: matrix.ncols(),
            });
        }
        if matrix.is_empty() {
            return Err(TensorError::EmptyTensor);
        }
        Ok(Self::from_components(matrix))
    }

    /// A tensor with every component equal to `value`.
    pub fn filled(dimension: usize, value: f64) -> Result<Self, TensorError> {
        if dimension == 0 {
            return Err(TensorError::EmptyTensor);
        }
        Ok(Self::from_components(DMatrix::from_element(
            dimension, dimension, value,
        )))
    }

    /// The identity tensor.
    pub fn identity(dimension: usize) -> Result<Self, TensorError> {
        if dimension == 0 {
            return Err(TensorError::EmptyTensor);
        }
        Ok(Self::from_components(DMatrix::identity(dimension, dimension)))
    }

    /// Column layout plus `(direction, length)` eigen pairs. Callers have
    /// checked that there are `N` vectors of length `N`.
    pub(crate) fn from_vector_columns(vectors: &[DVector<f64>]) -> Self {
        let (directions, lengths): (Vec<DVector<f64>>, Vec<f64>) = vectors
            .iter()
            .map(|vector| {
                let length = vector.norm();
                if length > 0.0 {
                    (vector / length, length)
                } else {
                    (vector.clone(), 0.0)
                }
            })
            .unzip();
        Self {
            components: DMatrix::from_columns(vectors),
            eigens: Some(EigenDecomposition::from_validated(directions, lengths)),
        }
    }

    /// Components must be square and non-empty; callers guarantee it.
    pub(crate) fn from_components(components: DMatrix<f64>) -> Self {
        debug_assert!(components.is_square() && !components.is_empty());
        Self {
            components,
            eigens: None,
        }
    }

    // -- components -----------------------------------------------------

    /// Tensor dimension `N`.
    pub fn dimension(&self) -> usize {
        self.components.nrows()
    }

    /// The dense component matrix.
    pub fn components(&self) -> &DMatrix<f64> {
        &self.components
    }

    /// Component at `(row, col)`, if in range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.components.get((row, col)).copied()
    }

    /// All components in text order (column by column).
    pub fn to_flat_vec(&self) -> Vec<f64> {
        self.components.iter().copied().collect()
    }

    /// Whether the component matrix equals its transpose exactly.
    pub fn is_symmetric(&self) -> bool {
        self.components == self.components.transpose()
    }

    /// Scalar assignment: set every component to `value`.
    pub fn fill(&mut self, value: f64) {
        self.components.fill(value);
        self.eigens = None;
    }

    // -- eigens ---------------------------------------------------------

    /// The eigen pairs: the stored ones if any, otherwise a fresh
    /// descending decomposition of the components.
    pub fn eigen_decomposition(&self) -> EigenDecomposition {
        match &self.eigens {
            Some(eigens) => eigens.clone(),
            None => EigenDecomposition::decompose(&self.components),
        }
    }

    /// Eigenvalues, index-aligned with [`eigenvectors`](Self::eigenvectors).
    pub fn eigenvalues(&self) -> Vec<f64> {
        match &self.eigens {
            Some(eigens) => eigens.values().to_vec(),
            None => self.eigen_decomposition().into_parts().1,
        }
    }

    /// Eigenvectors, index-aligned with [`eigenvalues`](Self::eigenvalues).
    pub fn eigenvectors(&self) -> Vec<DVector<f64>> {
        match &self.eigens {
            Some(eigens) => eigens.vectors().to_vec(),
            None => self.eigen_decomposition().into_parts().0,
        }
    }

    /// The eigenvector at `index`.
    pub fn eigenvector(&self, index: usize) -> Result<DVector<f64>, TensorError> {
        self.eigen_decomposition()
            .vector(index)
            .cloned()
            .ok_or(TensorError::IndexOutOfRange {
                index,
                dimension: self.dimension(),
            })
    }

    /// Atomically replace the decomposition.
    ///
    /// Requires `vectors.len() == values.len() == N` and every vector of
    /// length `N`. On error the tensor is left untouched. On success the
    /// pairs are kept verbatim and the components become `Σ λ v⊗v`.
    pub fn set_eigens(
        &mut self,
        vectors: &[DVector<f64>],
        values: &[f64],
    ) -> Result<(), TensorError> {
        check_shape(vectors, values, self.dimension())?;
        let decomposition = EigenDecomposition::new(vectors.to_vec(), values.to_vec())?;
        tracing::debug!(
            dimension = self.dimension(),
            values = ?values,
            "replacing tensor eigens"
        );
        self.install(decomposition);
        Ok(())
    }

    pub(crate) fn install(&mut self, decomposition: EigenDecomposition) {
        self.components = decomposition.reconstruct();
        self.eigens = Some(decomposition);
    }

    /// Reorder stored eigen pairs descending; derived ones already are.
    pub(crate) fn sort_eigens(&mut self) {
        if let Some(eigens) = &mut self.eigens {
            eigens.sort_descending();
        }
    }

    // -- algebra --------------------------------------------------------

    /// Matrix product of the two component matrices.
    pub fn contract(&self, other: &Self) -> Result<Self, TensorError> {
        self.check_dimension(other)?;
        Ok(Self::from_components(&self.components * &other.components))
    }

    /// Entry-wise sum.
    pub fn try_add(&self, other: &Self) -> Result<Self, TensorError> {
        self.check_dimension(other)?;
        Ok(Self::from_components(&self.components + &other.components))
    }

    /// Entry-wise difference.
    pub fn try_sub(&self, other: &Self) -> Result<Self, TensorError> {
        self.check_dimension(other)?;
        Ok(Self::from_components(&self.components - &other.components))
    }

    /// Entry-wise (Hadamard) product.
    pub fn try_hadamard(&self, other: &Self) -> Result<Self, TensorError> {
        self.check_dimension(other)?;
        Ok(Self::from_components(
            self.components.component_mul(&other.components),
        ))
    }

    /// Every component multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_components(&self.components * factor)
    }

    fn check_dimension(&self, other: &Self) -> Result<(), TensorError> {
        if self.dimension() == other.dimension() {
            Ok(())
        } else {
            Err(TensorError::DimensionMismatch {
                left: self.dimension(),
                right: other.dimension(),
            })
        }
    }

    // -- norms ----------------------------------------------------------

    /// Square root of the sum of squared components.
    pub fn frobenius_norm(&self) -> f64 {
        self.components.norm()
    }

    /// Largest absolute component.
    pub fn max_norm(&self) -> f64 {
        self.components.amax()
    }

    /// Sum of the diagonal components.
    pub fn trace(&self) -> f64 {
        self.components.trace()
    }
}

/// Side length `N` of a triangle holding `count = N(N+1)/2` elements.
fn triangular_root(count: usize) -> Option<usize> {
    (1..=count).take_while(|n| n * (n + 1) / 2 <= count).find(|n| n * (n + 1) / 2 == count)
}

/// Symmetric matrix from its upper triangle, row by row.
pub(crate) fn upper_triangle(dimension: usize, elements: &[f64]) -> DMatrix<f64> {
    let mut matrix = DMatrix::zeros(dimension, dimension);
    let mut next = elements.iter().copied();
    for row in 0..dimension {
        for col in row..dimension {
            let value = next.next().unwrap_or_default();
            matrix[(row, col)] = value;
            matrix[(col, row)] = value;
        }
    }
    matrix
}

// ---------------------------------------------------------------------------
// Equality, indexing, text
// ---------------------------------------------------------------------------

impl PartialEq for DyadicTensor {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Index<(usize, usize)> for DyadicTensor {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.components[index]
    }
}

impl IndexMut<(usize, usize)> for DyadicTensor {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        self.eigens = None;
        &mut self.components[index]
    }
}

impl fmt::Display for DyadicTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl FromStr for DyadicTensor {
    type Err = TensorError;

    /// Parse `[v0 v1 ...]` as written by `Display`. The number count must be
    /// a non-zero perfect square.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = parse_bracketed(s)?;
        let dimension = (1..=values.len())
            .take_while(|n| n * n <= values.len())
            .find(|n| n * n == values.len())
            .ok_or_else(|| {
                TensorError::Parse(format!("{} values do not form a square tensor", values.len()))
            })?;
        Ok(Self::from_components(DMatrix::from_column_slice(
            dimension, dimension, &values,
        )))
    }
}

/// Split `[a b c]` into its numbers.
pub(crate) fn parse_bracketed(s: &str) -> Result<Vec<f64>, TensorError> {
    let inner = s
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| TensorError::Parse(format!("expected '[...]', got {s:?}")))?;
    inner
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|e| TensorError::Parse(format!("{token:?}: {e}")))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Wire form of a [`DyadicTensor`]. Components are column-major; stored
/// eigens travel alongside them and are restored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TensorRecord {
    dimension: usize,
    components: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    eigenvalues: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    eigenvectors: Option<Vec<Vec<f64>>>,
}

impl From<DyadicTensor> for TensorRecord {
    fn from(tensor: DyadicTensor) -> Self {
        let (eigenvectors, eigenvalues) = match tensor.eigens {
            Some(eigens) => {
                let (vectors, values) = eigens.into_parts();
                (
                    Some(vectors.iter().map(|v| v.iter().copied().collect()).collect()),
                    Some(values),
                )
            }
            None => (None, None),
        };
        Self {
            dimension: tensor.components.nrows(),
            components: tensor.components.iter().copied().collect(),
            eigenvalues,
            eigenvectors,
        }
    }
}

impl TryFrom<TensorRecord> for DyadicTensor {
    type Error = TensorError;

    fn try_from(record: TensorRecord) -> Result<Self, Self::Error> {
        let dimension = record.dimension;
        if dimension == 0 {
            return Err(TensorError::EmptyTensor);
        }
        let expected = dimension * dimension;
        if record.components.len() != expected {
            return Err(TensorError::ElementCount {
                expected: expected.to_string(),
                actual: record.components.len(),
            });
        }
        let eigens = match (record.eigenvectors, record.eigenvalues) {
            (Some(vectors), Some(values)) => {
                let vectors: Vec<DVector<f64>> =
                    vectors.iter().map(|v| DVector::from_column_slice(v)).collect();
                check_shape(&vectors, &values, dimension)?;
                Some(EigenDecomposition::new(vectors, values)?)
            }
            (None, None) => None,
            (Some(vectors), None) => {
                return Err(TensorError::EigenvalueCount {
                    vectors: vectors.len(),
                    values: 0,
                })
            }
            (None, Some(values)) => {
                return Err(TensorError::EigenvalueCount {
                    vectors: 0,
                    values: values.len(),
                })
            }
        };
        Ok(Self {
            components: DMatrix::from_column_slice(dimension, dimension, &record.components),
            eigens,
        })
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

fn expect_same_dimension(result: Result<DyadicTensor, TensorError>) -> DyadicTensor {
    match result {
        Ok(tensor) => tensor,
        Err(e) => panic!("{e}"),
    }
}

/// Implements a binary entry-wise operator for every owned/borrowed operand
/// combination, plus its compound-assignment form.
macro_rules! entrywise_op {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident, $checked:ident) => {
        /// # Panics
        ///
        /// Panics if the operands differ in dimension.
        impl $op<&DyadicTensor> for &DyadicTensor {
            type Output = DyadicTensor;

            fn $method(self, rhs: &DyadicTensor) -> DyadicTensor {
                expect_same_dimension(self.$checked(rhs))
            }
        }

        impl $op<DyadicTensor> for DyadicTensor {
            type Output = DyadicTensor;

            fn $method(self, rhs: DyadicTensor) -> DyadicTensor {
                (&self).$method(&rhs)
            }
        }

        impl $op<&DyadicTensor> for DyadicTensor {
            type Output = DyadicTensor;

            fn $method(self, rhs: &DyadicTensor) -> DyadicTensor {
                (&self).$method(rhs)
            }
        }

        impl $op<DyadicTensor> for &DyadicTensor {
            type Output = DyadicTensor;

            fn $method(self, rhs: DyadicTensor) -> DyadicTensor {
                self.$method(&rhs)
            }
        }

        impl $assign<&DyadicTensor> for DyadicTensor {
            fn $assign_method(&mut self, rhs: &DyadicTensor) {
                *self = (&*self).$method(rhs);
            }
        }

        impl $assign<DyadicTensor> for DyadicTensor {
            fn $assign_method(&mut self, rhs: DyadicTensor) {
                *self = (&*self).$method(&rhs);
            }
        }
    };
}

entrywise_op!(Add, add, AddAssign, add_assign, try_add);
entrywise_op!(Sub, sub, SubAssign, sub_assign, try_sub);
entrywise_op!(Mul, mul, MulAssign, mul_assign, try_hadamard);

impl Mul<f64> for &DyadicTensor {
    type Output = DyadicTensor;

    fn mul(self, factor: f64) -> DyadicTensor {
        self.scaled(factor)
    }
}

impl Mul<f64> for DyadicTensor {
    type Output = DyadicTensor;

    fn mul(self, factor: f64) -> DyadicTensor {
        self.scaled(factor)
    }
}

impl Mul<DyadicTensor> for f64 {
    type Output = DyadicTensor;

    fn mul(self, tensor: DyadicTensor) -> DyadicTensor {
        tensor.scaled(self)
    }
}

impl Mul<&DyadicTensor> for f64 {
    type Output = DyadicTensor;

    fn mul(self, tensor: &DyadicTensor) -> DyadicTensor {
        tensor.scaled(self)
    }
}

impl MulAssign<f64> for DyadicTensor {
    fn mul_assign(&mut self, factor: f64) {
        self.components *= factor;
        self.eigens = None;
    }
}

impl Neg for DyadicTensor {
    type Output = DyadicTensor;

    fn neg(self) -> DyadicTensor {
        self.scaled(-1.0)
    }
}

impl Neg for &DyadicTensor {
    type Output = DyadicTensor;

    fn neg(self) -> DyadicTensor {
        self.scaled(-1.0)
    }
}
