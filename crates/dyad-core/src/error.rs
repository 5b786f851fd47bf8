//! # Error Types
//!
//! Every shape or precondition violation a tensor operation can detect is a
//! distinct [`TensorError`] variant. Errors are returned before any mutation
//! takes place, so a failed constructor yields no tensor and a failed setter
//! leaves its receiver untouched.

use thiserror::Error;

/// Precondition violations raised by tensor construction, mutation and parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    /// A tensor must have at least one dimension.
    #[error("tensor dimension must be at least 1")]
    EmptyTensor,

    /// The number of eigenvectors does not match the tensor dimension.
    #[error("expected {expected} eigenvectors, got {actual}")]
    EigenvectorCount {
        /// Required number of eigenvectors.
        expected: usize,
        /// Number of eigenvectors supplied.
        actual: usize,
    },

    /// An eigenvector has the wrong number of components.
    #[error("eigenvector {index} has {actual} components, expected {expected}")]
    EigenvectorLength {
        /// Position of the offending vector in the input.
        index: usize,
        /// Required vector length (the tensor dimension).
        expected: usize,
        /// Length of the supplied vector.
        actual: usize,
    },

    /// Eigenvalue and eigenvector counts disagree.
    #[error("got {values} eigenvalues for {vectors} eigenvectors")]
    EigenvalueCount {
        /// Number of eigenvectors supplied.
        vectors: usize,
        /// Number of eigenvalues supplied.
        values: usize,
    },

    /// A flat element list cannot be unpacked into a symmetric matrix.
    #[error("cannot unpack {actual} elements into a symmetric tensor (expected {expected})")]
    ElementCount {
        /// Human-readable description of the accepted counts.
        expected: String,
        /// Number of elements supplied.
        actual: usize,
    },

    /// A component matrix is not square.
    #[error("component matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Row count of the supplied matrix.
        rows: usize,
        /// Column count of the supplied matrix.
        cols: usize,
    },

    /// An eigen index lies outside `[0, dimension)`.
    #[error("eigen index {index} out of range for dimension {dimension}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Tensor dimension.
        dimension: usize,
    },

    /// Two operands (or an operand and an operation) disagree on dimension.
    #[error("dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Dimension of the receiver or left operand.
        left: usize,
        /// Dimension of the argument or right operand.
        right: usize,
    },

    /// Text could not be parsed into a tensor.
    #[error("malformed tensor text: {0}")]
    Parse(String),
}
