//! # Dyadic 3-D Tensor
//!
//! [`Dyadic3DTensor`] is a [`DyadicTensor`] whose dimension is fixed at
//! three. It dereferences to the generic tensor for every read-only query
//! and adds the construction paths and anisotropy measures used to classify
//! diffusion tensors.
//!
//! ## Eigenvalue Order
//!
//! Eigenvalues are always read descending, `λ0 ≥ λ1 ≥ λ2`. Derived
//! decompositions are sorted by [`EigenDecomposition`]. Stored pairs are
//! sorted on the way in, whether they come from eigenvector construction,
//! [`set_eigens`](Dyadic3DTensor::set_eigens) or conversion from a generic
//! tensor (`TryFrom`, deserialization, [`ScalarMetric`](crate::ScalarMetric)).
//!
//! ## Certainty Measures
//!
//! With `S = λ0 + λ1 + λ2`:
//!
//! ```text
//! c_l = (λ0 − λ1) / S
//! c_p = 2 (λ1 − λ2) / S
//! c_s = 3 λ2 / S
//! ```
//!
//! The three sum to one for any triple with `S ≠ 0`. A zero sum yields NaN
//! and logs a warning; callers classifying degenerate tensors must check.

use std::fmt;
use std::ops::{Add, AddAssign, Deref, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use nalgebra::{DMatrix, DVector, Vector3};
use serde::{Deserialize, Serialize};

use crate::eigen::{check_shape, EigenDecomposition};
use crate::error::TensorError;
use crate::tensor::{upper_triangle, DyadicTensor};

const DIM: usize = 3;

/// A dyadic tensor of dimension three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DyadicTensor", into = "DyadicTensor")]
pub struct Dyadic3DTensor(DyadicTensor);

impl Dyadic3DTensor {
    /// Symmetric tensor from its six independent components.
    pub fn new(xx: f64, xy: f64, xz: f64, yy: f64, yz: f64, zz: f64) -> Self {
        Self(DyadicTensor::from_components(upper_triangle(
            DIM,
            &[xx, xy, xz, yy, yz, zz],
        )))
    }

    /// Unpack 6 upper-triangle values (`xx xy xz yy yz zz`) or 9 full-matrix
    /// values in row-major order.
    pub fn from_elements(elements: &[f64]) -> Result<Self, TensorError> {
        let components = match elements.len() {
            6 => upper_triangle(DIM, elements),
            9 => DMatrix::from_row_slice(DIM, DIM, elements),
            actual => {
                return Err(TensorError::ElementCount {
                    expected: "6 (upper triangle) or 9 (full matrix)".into(),
                    actual,
                })
            }
        };
        Ok(Self(DyadicTensor::from_components(components)))
    }

    /// Exactly three native vectors, laid out as columns. Eigen pairs are
    /// `(v/‖v‖, ‖v‖)`, sorted descending.
    pub fn from_vectors(vectors: &[Vector3<f64>]) -> Result<Self, TensorError> {
        check_count(vectors.len())?;
        let columns: Vec<DVector<f64>> = vectors.iter().map(to_column).collect();
        Ok(Self::sorted(DyadicTensor::from_vector_columns(&columns)))
    }

    /// Three native vectors, laid out as columns, with eigen pairs as in
    /// [`from_vectors`](Self::from_vectors).
    pub fn from_axes(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Self {
        Self::sorted(DyadicTensor::from_vector_columns(&[
            to_column(&a),
            to_column(&b),
            to_column(&c),
        ]))
    }

    /// Exactly three column vectors of length three, laid out as columns,
    /// with eigen pairs as in [`from_vectors`](Self::from_vectors).
    pub fn from_eigenvectors(vectors: &[DVector<f64>]) -> Result<Self, TensorError> {
        check_count(vectors.len())?;
        DyadicTensor::from_eigenvectors(vectors).map(Self::sorted)
    }

    /// Three column vectors of length three, laid out as columns.
    pub fn from_columns(
        a: &DVector<f64>,
        b: &DVector<f64>,
        c: &DVector<f64>,
    ) -> Result<Self, TensorError> {
        Self::from_eigenvectors(&[a.clone(), b.clone(), c.clone()])
    }

    /// Explicit decomposition; pairs are stored sorted descending.
    pub fn from_eigens(vectors: &[Vector3<f64>], values: &[f64]) -> Result<Self, TensorError> {
        let columns: Vec<DVector<f64>> = vectors.iter().map(to_column).collect();
        let mut tensor = Self::identity();
        tensor.set_eigens(&columns, values)?;
        Ok(tensor)
    }

    /// The identity tensor.
    pub fn identity() -> Self {
        Self(DyadicTensor::from_components(DMatrix::identity(DIM, DIM)))
    }

    /// A tensor with all nine components equal to `value`.
    pub fn filled(value: f64) -> Self {
        Self(DyadicTensor::from_components(DMatrix::from_element(
            DIM, DIM, value,
        )))
    }

    fn sorted(mut tensor: DyadicTensor) -> Self {
        tensor.sort_eigens();
        Self(tensor)
    }

    /// Borrow the generic tensor.
    pub fn as_tensor(&self) -> &DyadicTensor {
        &self.0
    }

    /// Unwrap into the generic tensor.
    pub fn into_inner(self) -> DyadicTensor {
        self.0
    }

    /// Replace the decomposition. Requires exactly three pairs of length-three
    /// vectors; the pairs are sorted descending by eigenvalue before being
    /// stored. On error the tensor is untouched.
    pub fn set_eigens(
        &mut self,
        vectors: &[DVector<f64>],
        values: &[f64],
    ) -> Result<(), TensorError> {
        check_shape(vectors, values, DIM)?;
        let mut decomposition = EigenDecomposition::new(vectors.to_vec(), values.to_vec())?;
        decomposition.sort_descending();
        tracing::debug!(values = ?decomposition.values(), "replacing 3-D tensor eigens");
        self.0.install(decomposition);
        Ok(())
    }

    /// Scalar assignment: set every component to `value`.
    pub fn fill(&mut self, value: f64) {
        self.0.fill(value);
    }

    /// Matrix product of the two component matrices.
    pub fn contract(&self, other: &Self) -> Self {
        Self(DyadicTensor::from_components(
            self.0.components() * other.0.components(),
        ))
    }

    /// Every component multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self(self.0.scaled(factor))
    }

    /// Eigenvalues `[λ0, λ1, λ2]`, descending.
    pub fn principal_eigenvalues(&self) -> [f64; 3] {
        let values = self.0.eigenvalues();
        [values[0], values[1], values[2]]
    }

    /// Line-likeness `(λ0 − λ1) / (λ0 + λ1 + λ2)`.
    pub fn linear_certainty(&self) -> f64 {
        let [l0, l1, l2] = self.principal_eigenvalues();
        (l0 - l1) / eigenvalue_sum(l0, l1, l2)
    }

    /// Plane-likeness `2 (λ1 − λ2) / (λ0 + λ1 + λ2)`.
    pub fn planar_certainty(&self) -> f64 {
        let [l0, l1, l2] = self.principal_eigenvalues();
        2.0 * (l1 - l2) / eigenvalue_sum(l0, l1, l2)
    }

    /// Sphere-likeness `3 λ2 / (λ0 + λ1 + λ2)`.
    pub fn spherical_certainty(&self) -> f64 {
        let [l0, l1, l2] = self.principal_eigenvalues();
        3.0 * l2 / eigenvalue_sum(l0, l1, l2)
    }

    /// Fractional anisotropy: 0 for an isotropic tensor, 1 for a purely
    /// linear one.
    pub fn fractional_anisotropy(&self) -> f64 {
        let [l0, l1, l2] = self.principal_eigenvalues();
        let spread = (l0 - l1).powi(2) + (l1 - l2).powi(2) + (l2 - l0).powi(2);
        let magnitude = l0 * l0 + l1 * l1 + l2 * l2;
        if magnitude == 0.0 {
            tracing::warn!("zero tensor has no fractional anisotropy");
        }
        (0.5 * spread / magnitude).sqrt()
    }

    /// Mean of the eigenvalues, i.e. a third of the trace.
    pub fn mean_diffusivity(&self) -> f64 {
        let [l0, l1, l2] = self.principal_eigenvalues();
        (l0 + l1 + l2) / 3.0
    }
}

fn check_count(actual: usize) -> Result<(), TensorError> {
    if actual == DIM {
        Ok(())
    } else {
        Err(TensorError::EigenvectorCount {
            expected: DIM,
            actual,
        })
    }
}

fn to_column(vector: &Vector3<f64>) -> DVector<f64> {
    DVector::from_column_slice(vector.as_slice())
}

fn eigenvalue_sum(l0: f64, l1: f64, l2: f64) -> f64 {
    let sum = l0 + l1 + l2;
    if sum == 0.0 {
        tracing::warn!(l0, l1, l2, "eigenvalue sum is zero; certainty measures are undefined");
    }
    sum
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl Deref for Dyadic3DTensor {
    type Target = DyadicTensor;

    fn deref(&self) -> &DyadicTensor {
        &self.0
    }
}

impl TryFrom<DyadicTensor> for Dyadic3DTensor {
    type Error = TensorError;

    fn try_from(tensor: DyadicTensor) -> Result<Self, Self::Error> {
        if tensor.dimension() == DIM {
            Ok(Self::sorted(tensor))
        } else {
            Err(TensorError::DimensionMismatch {
                left: DIM,
                right: tensor.dimension(),
            })
        }
    }
}

impl From<Dyadic3DTensor> for DyadicTensor {
    fn from(tensor: Dyadic3DTensor) -> Self {
        tensor.0
    }
}

impl PartialEq<DyadicTensor> for Dyadic3DTensor {
    fn eq(&self, other: &DyadicTensor) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Dyadic3DTensor> for DyadicTensor {
    fn eq(&self, other: &Dyadic3DTensor) -> bool {
        *self == other.0
    }
}

impl Index<(usize, usize)> for Dyadic3DTensor {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<(usize, usize)> for Dyadic3DTensor {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.0[index]
    }
}

impl fmt::Display for Dyadic3DTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Dyadic3DTensor {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<DyadicTensor>()?.try_into()
    }
}

// ---------------------------------------------------------------------------
// Operators (same dimension by construction, so infallible)
// ---------------------------------------------------------------------------

macro_rules! entrywise_op_3d {
    ($op:ident, $method:ident, $assign:ident, $assign_method:ident) => {
        impl $op<&Dyadic3DTensor> for &Dyadic3DTensor {
            type Output = Dyadic3DTensor;

            fn $method(self, rhs: &Dyadic3DTensor) -> Dyadic3DTensor {
                Dyadic3DTensor((&self.0).$method(&rhs.0))
            }
        }

        impl $op<Dyadic3DTensor> for Dyadic3DTensor {
            type Output = Dyadic3DTensor;

            fn $method(self, rhs: Dyadic3DTensor) -> Dyadic3DTensor {
                (&self).$method(&rhs)
            }
        }

        impl $op<&Dyadic3DTensor> for Dyadic3DTensor {
            type Output = Dyadic3DTensor;

            fn $method(self, rhs: &Dyadic3DTensor) -> Dyadic3DTensor {
                (&self).$method(rhs)
            }
        }

        impl $assign<&Dyadic3DTensor> for Dyadic3DTensor {
            fn $assign_method(&mut self, rhs: &Dyadic3DTensor) {
                self.0.$assign_method(&rhs.0);
            }
        }

        impl $assign<Dyadic3DTensor> for Dyadic3DTensor {
            fn $assign_method(&mut self, rhs: Dyadic3DTensor) {
                self.0.$assign_method(&rhs.0);
            }
        }
    };
}

entrywise_op_3d!(Add, add, AddAssign, add_assign);
entrywise_op_3d!(Sub, sub, SubAssign, sub_assign);
entrywise_op_3d!(Mul, mul, MulAssign, mul_assign);

impl Mul<f64> for &Dyadic3DTensor {
    type Output = Dyadic3DTensor;

    fn mul(self, factor: f64) -> Dyadic3DTensor {
        self.scaled(factor)
    }
}

impl Mul<f64> for Dyadic3DTensor {
    type Output = Dyadic3DTensor;

    fn mul(self, factor: f64) -> Dyadic3DTensor {
        self.scaled(factor)
    }
}

impl Mul<Dyadic3DTensor> for f64 {
    type Output = Dyadic3DTensor;

    fn mul(self, tensor: Dyadic3DTensor) -> Dyadic3DTensor {
        tensor.scaled(self)
    }
}

impl MulAssign<f64> for Dyadic3DTensor {
    fn mul_assign(&mut self, factor: f64) {
        self.0 *= factor;
    }
}

impl Neg for Dyadic3DTensor {
    type Output = Dyadic3DTensor;

    fn neg(self) -> Dyadic3DTensor {
        self.scaled(-1.0)
    }
}
