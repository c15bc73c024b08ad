use crate::unit_tests::fixtures::{
    constant_triangle, constant_vector_triangle, p1_interval, p1_triangle, vector_p1_interval,
    AffineGeometry, IdentityGeometry, LinearMonomialBasis,
};
use febasis::element::{CompositeElementDescriptor, ElementFamily, MappingKind};
use febasis::evaluate::{
    evaluate_basis_derivatives, evaluate_basis_derivatives_all, evaluate_basis_derivatives_into,
};
use febasis::Error;
use matrixcompare::assert_matrix_eq;
use nalgebra::{DMatrix, DVector};

#[test]
fn order_zero_equals_plain_basis_evaluation() {
    let element = CompositeElementDescriptor::from(p1_triangle());
    let basis = LinearMonomialBasis;
    let geometry = IdentityGeometry { dimension: 2 };

    let values = evaluate_basis_derivatives_all(&element, &basis, &geometry, &[0.3, 0.4], 0)
        .unwrap();
    // One value per dof: N₀ = 1 - ξ - η, N₁ = ξ, N₂ = η.
    let expected = DVector::from_column_slice(&[0.3, 0.3, 0.4]);
    assert_matrix_eq!(values, expected, comp = abs, tol = 1e-14);
}

#[test]
fn p1_interval_derivative_is_the_constant_slope() {
    let element = CompositeElementDescriptor::from(p1_interval());
    let basis = LinearMonomialBasis;
    let geometry = IdentityGeometry { dimension: 1 };

    // The first derivative of a linear basis function is its slope, independent of
    // the evaluation point.
    for point in [0.0, 0.25, 0.9] {
        let values =
            evaluate_basis_derivatives(&element, &basis, &geometry, 0, &[point], 1).unwrap();
        assert_matrix_eq!(
            values,
            DVector::from_column_slice(&[-1.0]),
            comp = abs,
            tol = 1e-14
        );
        let values =
            evaluate_basis_derivatives(&element, &basis, &geometry, 1, &[point], 1).unwrap();
        assert_matrix_eq!(
            values,
            DVector::from_column_slice(&[1.0]),
            comp = abs,
            tol = 1e-14
        );
    }
}

#[test]
fn physical_derivatives_follow_the_chain_rule_on_a_scaled_interval() {
    let element = CompositeElementDescriptor::from(p1_interval());
    let basis = LinearMonomialBasis;
    // Physical cell [1, 3]: x = 2ξ + 1.
    let geometry = AffineGeometry::new(
        DMatrix::from_element(1, 1, 2.0),
        DVector::from_element(1, 1.0),
    );

    // Values are mapped through the inverse geometry: x = 2 maps to ξ = 0.5.
    let values = evaluate_basis_derivatives(&element, &basis, &geometry, 1, &[2.0], 0).unwrap();
    assert_matrix_eq!(
        values,
        DVector::from_column_slice(&[0.5]),
        comp = abs,
        tol = 1e-14
    );

    // Reference slope 1 becomes physical slope 1/2.
    let values = evaluate_basis_derivatives(&element, &basis, &geometry, 1, &[2.0], 1).unwrap();
    assert_matrix_eq!(
        values,
        DVector::from_column_slice(&[0.5]),
        comp = abs,
        tol = 1e-14
    );
}

#[test]
fn second_derivatives_of_linear_elements_vanish() {
    let element = CompositeElementDescriptor::from(p1_triangle());
    let basis = LinearMonomialBasis;
    let geometry = IdentityGeometry { dimension: 2 };

    for dof in 0..3 {
        let values =
            evaluate_basis_derivatives(&element, &basis, &geometry, dof, &[0.1, 0.2], 2).unwrap();
        // Four mixed second partials, all zero.
        assert_matrix_eq!(values, DVector::<f64>::zeros(4), comp = abs, tol = 1e-14);
    }
}

#[test]
fn gradient_of_p1_triangle_at_identity_geometry() {
    let element = CompositeElementDescriptor::from(p1_triangle());
    let basis = LinearMonomialBasis;
    let geometry = IdentityGeometry { dimension: 2 };

    let values = evaluate_basis_derivatives_all(&element, &basis, &geometry, &[0.3, 0.3], 1)
        .unwrap();
    // Layout: dof-major, then component (one), then derivative direction.
    let expected = DVector::from_column_slice(&[-1.0, -1.0, 1.0, 0.0, 0.0, 1.0]);
    assert_matrix_eq!(values, expected, comp = abs, tol = 1e-14);
}

#[test]
fn constant_element_returns_stored_value_and_zero_derivatives() {
    let element = CompositeElementDescriptor::from(constant_triangle(2.5));
    let basis = LinearMonomialBasis;
    let geometry = IdentityGeometry { dimension: 2 };

    let values = evaluate_basis_derivatives(&element, &basis, &geometry, 0, &[0.1, 0.1], 0).unwrap();
    assert_matrix_eq!(
        values,
        DVector::from_column_slice(&[2.5]),
        comp = abs,
        tol = 1e-14
    );

    // Derivatives of any positive order are an all-zero table of the correct shape.
    let values = evaluate_basis_derivatives(&element, &basis, &geometry, 0, &[0.1, 0.1], 1).unwrap();
    assert_matrix_eq!(values, DVector::<f64>::zeros(2), comp = abs, tol = 1e-14);

    let values =
        evaluate_basis_derivatives_all(&element, &basis, &geometry, &[0.1, 0.1], 2).unwrap();
    assert_matrix_eq!(values, DVector::<f64>::zeros(4), comp = abs, tol = 1e-14);

    let error = evaluate_basis_derivatives(&element, &basis, &geometry, 1, &[0.1, 0.1], 0)
        .unwrap_err();
    assert_eq!(
        error,
        Error::DofOutOfBounds {
            dof: 1,
            space_dimension: 1
        }
    );
}

#[test]
fn dof_out_of_bounds_is_an_error() {
    let element = CompositeElementDescriptor::from(p1_triangle());
    let basis = LinearMonomialBasis;
    let geometry = IdentityGeometry { dimension: 2 };

    let error = evaluate_basis_derivatives(&element, &basis, &geometry, 3, &[0.1, 0.1], 0)
        .unwrap_err();
    assert_eq!(
        error,
        Error::DofOutOfBounds {
            dof: 3,
            space_dimension: 3
        }
    );
}

#[test]
fn single_dof_evaluation_accumulates_into_the_buffer() {
    let element = CompositeElementDescriptor::from(p1_interval());
    let basis = LinearMonomialBasis;
    let geometry = IdentityGeometry { dimension: 1 };

    let mut values = vec![0.0];
    evaluate_basis_derivatives_into(&mut values, &element, &basis, &geometry, 1, &[0.25], 0)
        .unwrap();
    evaluate_basis_derivatives_into(&mut values, &element, &basis, &geometry, 1, &[0.25], 0)
        .unwrap();
    // Two contributions add up; the buffer is never overwritten.
    assert!((values[0] - 0.5).abs() < 1e-14);
}

#[test]
#[should_panic]
fn single_dof_evaluation_panics_on_wrong_buffer_length() {
    let element = CompositeElementDescriptor::from(p1_interval());
    let basis = LinearMonomialBasis;
    let geometry = IdentityGeometry { dimension: 1 };

    let mut values = vec![0.0, 0.0];
    let _ = evaluate_basis_derivatives_into(&mut values, &element, &basis, &geometry, 0, &[0.25], 0);
}

#[test]
fn composite_element_writes_disjoint_component_blocks() {
    let element = vector_p1_interval();
    let basis = LinearMonomialBasis;
    let geometry = IdentityGeometry { dimension: 1 };

    let values = evaluate_basis_derivatives_all(&element, &basis, &geometry, &[0.25], 0).unwrap();
    // Layout [dof][component][derivative]: dofs 0-1 populate component 0, dofs 2-3
    // populate component 1, each with the scalar interval values at ξ = 0.25.
    let expected = DVector::from_column_slice(&[
        0.75, 0.0, // dof 0
        0.25, 0.0, // dof 1
        0.0, 0.75, // dof 2
        0.0, 0.25, // dof 3
    ]);
    assert_matrix_eq!(values, expected, comp = abs, tol = 1e-14);
}

#[test]
fn contravariant_piola_mixes_components_through_the_jacobian() {
    let element = CompositeElementDescriptor::from(constant_vector_triangle(
        ElementFamily::RaviartThomas,
        MappingKind::ContravariantPiola,
    ));
    let basis = LinearMonomialBasis;
    let geometry = AffineGeometry::new(
        DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 3.0]),
        DVector::zeros(2),
    );

    // physical = J · reference / det J, with det J = 6.
    let values = evaluate_basis_derivatives(&element, &basis, &geometry, 0, &[0.2, 0.3], 0).unwrap();
    assert_matrix_eq!(
        values,
        DVector::from_column_slice(&[1.0 / 3.0, 0.0]),
        comp = abs,
        tol = 1e-14
    );
    let values = evaluate_basis_derivatives(&element, &basis, &geometry, 1, &[0.2, 0.3], 0).unwrap();
    assert_matrix_eq!(
        values,
        DVector::from_column_slice(&[0.0, 0.5]),
        comp = abs,
        tol = 1e-14
    );
}

#[test]
fn covariant_piola_mixes_components_through_the_inverse_jacobian() {
    let element = CompositeElementDescriptor::from(constant_vector_triangle(
        ElementFamily::NedelecFirstKind,
        MappingKind::CovariantPiola,
    ));
    let basis = LinearMonomialBasis;
    let geometry = AffineGeometry::new(
        DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 3.0]),
        DVector::zeros(2),
    );

    // physical = J⁻ᵀ · reference.
    let values = evaluate_basis_derivatives(&element, &basis, &geometry, 0, &[0.2, 0.3], 0).unwrap();
    assert_matrix_eq!(
        values,
        DVector::from_column_slice(&[0.5, 0.0]),
        comp = abs,
        tol = 1e-14
    );
    let values = evaluate_basis_derivatives(&element, &basis, &geometry, 1, &[0.2, 0.3], 0).unwrap();
    assert_matrix_eq!(
        values,
        DVector::from_column_slice(&[0.0, 1.0 / 3.0]),
        comp = abs,
        tol = 1e-14
    );
}
