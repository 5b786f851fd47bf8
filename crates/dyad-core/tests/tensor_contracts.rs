//! # Tensor Contract Tests
//!
//! Construction, ordering, equality, algebra and certainty contracts for
//! [`DyadicTensor`] and [`Dyadic3DTensor`], exercised through the public API
//! only.

use dyad_core::nalgebra::{DVector, Vector3};
use dyad_core::{Dyadic3DTensor, DyadicTensor, TensorError};

fn native_vectors() -> Vec<Vector3<f64>> {
    vec![
        Vector3::new(1.6, 0.9, 4.3),
        Vector3::new(4.0, 6.4, 7.0),
        Vector3::new(6.0, 34.0, 1.0),
    ]
}

fn column_vectors() -> Vec<DVector<f64>> {
    native_vectors()
        .iter()
        .map(|v| DVector::from_column_slice(v.as_slice()))
        .collect()
}

fn col(values: &[f64]) -> DVector<f64> {
    DVector::from_column_slice(values)
}

fn pair(a: &[f64], b: &[f64]) -> DyadicTensor {
    DyadicTensor::from_eigenvectors(&[col(a), col(b)]).unwrap()
}

const NATIVE_TEXT: &str = "[1.6 0.9 4.3 4 6.4 7 6 34 1]";

// ---------------------------------------------------------------------------
// 3-D construction
// ---------------------------------------------------------------------------

#[test]
fn construct_from_native_vector_list() {
    let t = Dyadic3DTensor::from_vectors(&native_vectors()).unwrap();
    assert_eq!(t.to_string(), NATIVE_TEXT);
}

#[test]
fn construct_from_three_native_vectors() {
    let v = native_vectors();
    let t = Dyadic3DTensor::from_axes(v[0], v[1], v[2]);
    assert_eq!(t.to_string(), NATIVE_TEXT);
}

#[test]
fn construct_from_column_vector_list() {
    let t = Dyadic3DTensor::from_eigenvectors(&column_vectors()).unwrap();
    assert_eq!(t.to_string(), NATIVE_TEXT);
}

#[test]
fn construct_from_three_column_vectors() {
    let v = column_vectors();
    let t = Dyadic3DTensor::from_columns(&v[0], &v[1], &v[2]).unwrap();
    assert_eq!(t.to_string(), NATIVE_TEXT);
}

#[test]
fn construct_from_six_doubles() {
    let t = Dyadic3DTensor::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    assert_eq!(t.to_string(), "[1 2 3 2 4 5 3 5 6]");
}

#[test]
fn six_and_nine_element_arrays_agree() {
    let six = Dyadic3DTensor::from_elements(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let nine =
        Dyadic3DTensor::from_elements(&[1.0, 2.0, 3.0, 2.0, 4.0, 5.0, 3.0, 5.0, 6.0]).unwrap();
    assert_eq!(six.to_string(), "[1 2 3 2 4 5 3 5 6]");
    assert_eq!(nine.to_string(), "[1 2 3 2 4 5 3 5 6]");
    assert_eq!(six, nine);
}

#[test]
fn orthonormal_axes_render_sum_of_outer_products() {
    let t = Dyadic3DTensor::from_axes(Vector3::x(), Vector3::y(), Vector3::z());
    assert_eq!(t.to_string(), "[1 0 0 0 1 0 0 0 1]");
    assert_eq!(t, Dyadic3DTensor::identity());
}

#[test]
fn too_few_native_vectors_rejected() {
    let v = native_vectors();
    assert_eq!(
        Dyadic3DTensor::from_vectors(&v[..2]),
        Err(TensorError::EigenvectorCount {
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn too_few_column_vectors_rejected() {
    let v = column_vectors();
    assert_eq!(
        Dyadic3DTensor::from_eigenvectors(&v[..2]),
        Err(TensorError::EigenvectorCount {
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn too_many_native_vectors_rejected() {
    let mut v = native_vectors();
    v.push(v[0]);
    assert_eq!(
        Dyadic3DTensor::from_vectors(&v),
        Err(TensorError::EigenvectorCount {
            expected: 3,
            actual: 4
        })
    );
}

#[test]
fn too_many_column_vectors_rejected() {
    let mut v = column_vectors();
    v.push(v[0].clone());
    assert_eq!(
        Dyadic3DTensor::from_eigenvectors(&v),
        Err(TensorError::EigenvectorCount {
            expected: 3,
            actual: 4
        })
    );
}

#[test]
fn short_column_vector_rejected() {
    let result = Dyadic3DTensor::from_columns(
        &col(&[1.0, 0.0, 0.0]),
        &col(&[0.0, 1.0]),
        &col(&[0.0, 0.0, 1.0]),
    );
    assert_eq!(
        result,
        Err(TensorError::EigenvectorLength {
            index: 1,
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn five_doubles_rejected() {
    assert!(matches!(
        Dyadic3DTensor::from_elements(&[1.0, 2.0, 3.0, 4.0, 5.0]),
        Err(TensorError::ElementCount { actual: 5, .. })
    ));
}

#[test]
fn seven_doubles_rejected() {
    assert!(matches!(
        Dyadic3DTensor::from_elements(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]),
        Err(TensorError::ElementCount { actual: 7, .. })
    ));
}

// ---------------------------------------------------------------------------
// Generic construction and text
// ---------------------------------------------------------------------------

#[test]
fn generic_tensor_from_four_vectors() {
    let mut n = 0.0;
    let vectors: Vec<DVector<f64>> = (0..4)
        .map(|_| {
            DVector::from_fn(4, |_, _| {
                n += 1.0;
                n
            })
        })
        .collect();
    let t = DyadicTensor::from_eigenvectors(&vectors).unwrap();
    assert_eq!(t.to_string(), "[1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16]");
}

#[test]
fn string_conversion_round_trips() {
    let t = Dyadic3DTensor::from_vectors(&native_vectors()).unwrap();
    let text = t.to_string();
    let back: Dyadic3DTensor = text.parse().unwrap();
    assert_eq!(back, t);
    let generic: DyadicTensor = text.parse().unwrap();
    assert_eq!(generic, t);
}

// ---------------------------------------------------------------------------
// Eigen accessors
// ---------------------------------------------------------------------------

fn scaled_axes() -> Vec<DVector<f64>> {
    (0..3)
        .map(|i| DVector::from_fn(3, |j, _| if i == j { (i + 1) as f64 } else { 0.0 }))
        .collect()
}

#[test]
fn eigenvalues_are_descending() {
    let vectors = vec![
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 2.0, 0.0),
        Vector3::new(0.0, 0.0, 3.0),
    ];
    let t = Dyadic3DTensor::from_vectors(&vectors).unwrap();
    let values = t.eigenvalues();
    assert_eq!(values[0], 3.0);
    assert_eq!(values[1], 2.0);
    assert_eq!(values[2], 1.0);
}

#[test]
fn eigenvectors_follow_eigenvalue_order() {
    let t = Dyadic3DTensor::from_eigenvectors(&scaled_axes()).unwrap();
    let vectors = t.eigenvectors();
    assert_eq!(vectors[0], col(&[0.0, 0.0, 1.0]));
    assert_eq!(vectors[1], col(&[0.0, 1.0, 0.0]));
    assert_eq!(vectors[2], col(&[1.0, 0.0, 0.0]));
}

#[test]
fn single_eigenvector_matches_middle_eigenvalue() {
    let t = Dyadic3DTensor::from_eigenvectors(&scaled_axes()).unwrap();
    assert_eq!(t.eigenvector(1), Ok(col(&[0.0, 1.0, 0.0])));
    assert_eq!(
        t.eigenvector(3),
        Err(TensorError::IndexOutOfRange {
            index: 3,
            dimension: 3
        })
    );
}

#[test]
fn set_eigens_keeps_pairs_verbatim() {
    let mut t = pair(&[3.0, 0.0], &[0.0, 6.0]);
    let values = vec![3.0, 4.0];
    let vectors = vec![col(&[0.0, 1.0]), col(&[1.0, 0.0])];
    t.set_eigens(&vectors, &values).unwrap();
    assert_eq!(t.eigenvalues(), values);
    assert_eq!(t.eigenvectors(), vectors);
    assert_eq!(t, pair(&[4.0, 0.0], &[0.0, 3.0]));
}

#[test]
fn set_eigens_rejects_wrong_vector_count() {
    let mut t = DyadicTensor::from_eigenvectors(&[
        col(&[3.0, 0.0, 0.0]),
        col(&[0.0, 0.0, 0.0]),
        col(&[0.0, 0.0, 6.0]),
    ])
    .unwrap();
    let before = t.clone();
    let result = t.set_eigens(&[col(&[0.0, 1.0]), col(&[1.0, 0.0])], &[3.0, 4.0, 5.0]);
    assert_eq!(
        result,
        Err(TensorError::EigenvectorCount {
            expected: 3,
            actual: 2
        })
    );
    assert_eq!(t, before);
}

#[test]
fn set_eigens_rejects_wrong_value_count() {
    let mut t = DyadicTensor::identity(3).unwrap();
    let before = t.clone();
    let result = t.set_eigens(
        &[
            col(&[0.0, 0.0, 1.0]),
            col(&[1.0, 0.0, 0.0]),
            col(&[0.0, 1.0, 0.0]),
        ],
        &[3.0, 4.0],
    );
    assert_eq!(
        result,
        Err(TensorError::EigenvalueCount {
            vectors: 3,
            values: 2
        })
    );
    assert_eq!(t, before);
}

#[test]
fn set_eigens_rejects_wrong_vector_length() {
    let mut t = DyadicTensor::identity(2).unwrap();
    let result = t.set_eigens(&[col(&[0.0, 1.0, 0.0]), col(&[1.0, 0.0])], &[1.0, 2.0]);
    assert!(matches!(
        result,
        Err(TensorError::EigenvectorLength { index: 0, .. })
    ));
    assert_eq!(t, DyadicTensor::identity(2).unwrap());
}

// ---------------------------------------------------------------------------
// Equality
// ---------------------------------------------------------------------------

#[test]
fn equivalence() {
    let t = Dyadic3DTensor::from_vectors(&native_vectors()).unwrap();
    let t2 = DyadicTensor::from_eigenvectors(&scaled_axes()).unwrap();
    assert!(!(t == t2));
    assert!(t != t2);
    assert!(t == t);
    assert!(t2 == t2);
}

#[test]
fn different_dimensions_never_equal() {
    let t = DyadicTensor::identity(3).unwrap();
    let t2 = DyadicTensor::identity(4).unwrap();
    assert!(t != t2);
    assert!(DyadicTensor::filled(2, 0.0).unwrap() != DyadicTensor::filled(3, 0.0).unwrap());
}

#[test]
fn component_assignment_breaks_equality() {
    let t = DyadicTensor::identity(3).unwrap();
    let mut t2 = t.clone();
    assert!(t == t2);
    t2[(1, 1)] = 3.0;
    assert!(t != t2);
}

#[test]
fn scalar_assignment_fills_every_component() {
    let mut t = DyadicTensor::identity(3).unwrap();
    let t2 = DyadicTensor::from_eigenvectors(&[
        col(&[5.0, 5.0, 5.0]),
        col(&[5.0, 5.0, 5.0]),
        col(&[5.0, 5.0, 5.0]),
    ])
    .unwrap();
    t.fill(5.0);
    assert!(t == t2);

    let mut t3 = Dyadic3DTensor::identity();
    t3.fill(5.0);
    assert_eq!(t3, Dyadic3DTensor::filled(5.0));
    assert_eq!(t3, t2);
}

// ---------------------------------------------------------------------------
// Algebra
// ---------------------------------------------------------------------------

fn lhs() -> DyadicTensor {
    pair(&[2.0, 8.0], &[5.0, 3.0])
}

fn rhs() -> DyadicTensor {
    pair(&[6.0, 3.0], &[4.0, 6.0])
}

#[test]
fn plus_operator() {
    assert_eq!(lhs() + rhs(), pair(&[8.0, 11.0], &[9.0, 9.0]));
}

#[test]
fn plus_equals_operator() {
    let mut result = lhs();
    result += rhs();
    assert_eq!(result, pair(&[8.0, 11.0], &[9.0, 9.0]));
}

#[test]
fn multiply_tensor_operator_is_coefficient_wise() {
    assert_eq!(&lhs() * &rhs(), pair(&[12.0, 24.0], &[20.0, 18.0]));
}

#[test]
fn multiply_equals_tensor_operator() {
    let mut result = lhs();
    result *= &rhs();
    assert_eq!(result, pair(&[12.0, 24.0], &[20.0, 18.0]));
}

#[test]
fn multiply_double_operator() {
    assert_eq!(lhs() * 2.5, pair(&[5.0, 20.0], &[12.5, 7.5]));
}

#[test]
fn contraction_is_matrix_product() {
    assert_eq!(
        lhs().contract(&rhs()),
        Ok(pair(&[27.0, 57.0], &[38.0, 50.0]))
    );
}

#[test]
fn minus_operator() {
    assert_eq!(lhs() - rhs(), pair(&[-4.0, 5.0], &[1.0, -3.0]));
}

#[test]
fn minus_equals_operator() {
    let mut result = lhs();
    result -= &rhs();
    assert_eq!(result, pair(&[-4.0, 5.0], &[1.0, -3.0]));
}

// ---------------------------------------------------------------------------
// Norms and certainties
// ---------------------------------------------------------------------------

#[test]
fn frobenius_norm() {
    let t = pair(&[3.0, 0.0], &[0.0, 6.0]);
    assert_eq!(t.frobenius_norm(), 45f64.sqrt());
}

#[test]
fn max_norm() {
    let t = pair(&[3.0, 0.0], &[0.0, 6.0]);
    assert_eq!(t.max_norm(), 6.0);
    assert_eq!(pair(&[-7.0, 0.0], &[0.0, 6.0]).max_norm(), 7.0);
}

fn certainty_tensor() -> Dyadic3DTensor {
    Dyadic3DTensor::from_columns(
        &col(&[1.0, 0.0, 0.0]),
        &col(&[0.0, 5.0, 0.0]),
        &col(&[0.0, 0.0, 2.0]),
    )
    .unwrap()
}

#[test]
fn linear_certainty() {
    assert_eq!(certainty_tensor().linear_certainty(), 3.0 / 8.0);
}

#[test]
fn planar_certainty() {
    assert_eq!(certainty_tensor().planar_certainty(), 1.0 / 4.0);
}

#[test]
fn spherical_certainty() {
    assert_eq!(certainty_tensor().spherical_certainty(), 3.0 / 8.0);
}

#[test]
fn certainty_sum() {
    let t = certainty_tensor();
    assert_eq!(
        t.linear_certainty() + t.planar_certainty() + t.spherical_certainty(),
        1.0
    );
}

#[test]
fn tensors_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DyadicTensor>();
    assert_send_sync::<Dyadic3DTensor>();
}
