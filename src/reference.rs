//! Reference-cell derivative values via matrix-chain differentiation.

use crate::element::ElementDescriptor;
use nalgebra::{DMatrix, DVector, RealField};

/// Computes the reference-cell derivative values of one basis function, before any
/// geometric transform or Piola pullback is applied.
///
/// For every derivative combination `r`, the order-`n` differentiation operator is
/// built in expansion-coefficient space by replaying the combination's directions in
/// index order: the accumulator starts as the identity and step `k` left-multiplies it
/// by `dmats[c_k]`, so the final operator is `dmats[c_{n-1}] · … · dmats[c_0]`. The
/// operator is rebuilt from the identity for every combination. The derivative value
/// of component `c` is then `coefficients[c].row(local_dof) · operator · expansion_values`.
///
/// For `order == 0` the operator stays the identity and this reduces to plain basis
/// evaluation.
///
/// `reference_derivatives` must have one row per value component of `element` and one
/// column per entry of `combinations`; every entry is overwritten.
///
/// # Panics
///
/// Panics if `reference_derivatives`, `expansion_values` or `local_dof` do not match
/// the element's dimensions.
pub fn populate_reference_derivatives<T>(
    reference_derivatives: &mut DMatrix<T>,
    element: &ElementDescriptor<T>,
    local_dof: usize,
    expansion_values: &[T],
    combinations: &[Vec<usize>],
) where
    T: RealField,
{
    let num_members = element.num_expansion_members();
    assert_eq!(
        expansion_values.len(),
        num_members,
        "expansion_values must have one entry per expansion member"
    );
    assert_eq!(
        reference_derivatives.nrows(),
        element.num_components(),
        "reference_derivatives must have one row per value component"
    );
    assert_eq!(
        reference_derivatives.ncols(),
        combinations.len(),
        "reference_derivatives must have one column per derivative combination"
    );
    assert!(
        local_dof < element.space_dimension(),
        "local_dof must be a valid dof of the element"
    );

    let expansion_values = DVector::from_column_slice(expansion_values);
    for (r, combination) in combinations.iter().enumerate() {
        let mut operator = DMatrix::identity(num_members, num_members);
        for &direction in combination {
            operator = &element.dmats()[direction] * operator;
        }
        let differentiated = &operator * &expansion_values;
        for (component, coefficients) in element.coefficients().iter().enumerate() {
            let value = (coefficients.row(local_dof) * &differentiated)[(0, 0)].clone();
            reference_derivatives[(component, r)] = value;
        }
    }
}
