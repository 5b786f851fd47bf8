#![deny(missing_docs)]

//! # dyad-core: Symmetric Dyadic Tensors
//!
//! Value types for second-order tensors used in diffusion and anisotropy
//! analysis. A tensor owns a dense component matrix and can report its
//! eigen-decomposition, combine with other tensors, and summarise itself
//! through norms and anisotropy measures.
//!
//! - **[`DyadicTensor`]** (`tensor.rs`): runtime dimension `N`. Entry-wise
//!   algebra, contraction, norms, eigen accessors and the `[v0 v1 ...]` text
//!   form.
//! - **[`Dyadic3DTensor`]** (`tensor3d.rs`): the `N = 3` case with six/nine
//!   element unpacking and the linear/planar/spherical certainty measures.
//! - **[`EigenDecomposition`]** (`eigen.rs`): validated eigen pairs, derived
//!   with `nalgebra::SymmetricEigen` and sorted descending.
//! - **[`ScalarMetric`]** (`metric.rs`): catalogue of named scalar queries.
//!
//! ## Crate Policy
//!
//! - Shape violations surface as [`TensorError`] before any mutation. The
//!   arithmetic operator traits are the only panicking paths, and only on a
//!   dimension mismatch between operands.
//! - No `unsafe`, no interior mutability: tensors are `Send + Sync` values.
//! - Logging goes through `tracing`; the crate never installs a subscriber.

pub mod eigen;
pub mod error;
pub mod metric;
pub mod tensor;
pub mod tensor3d;

// Re-export primary types at crate root for ergonomic imports.
pub use eigen::EigenDecomposition;
pub use error::TensorError;
pub use metric::{ScalarMetric, UnknownMetric};
pub use tensor::DyadicTensor;
pub use tensor3d::Dyadic3DTensor;

/// The numeric primitive the tensor API is expressed in.
pub use nalgebra;
