//! Evaluation entry points: single-dof and all-dof basis derivative evaluation.

use crate::derivatives::{derivative_combinations, num_derivatives};
use crate::element::CompositeElementDescriptor;
use crate::error::Error;
use crate::geometry::{ExpansionBasis, GeometryMap};
use crate::reference::populate_reference_derivatives;
use crate::transform::{apply_pullback, geometric_transform_matrix};
use nalgebra::{DMatrix, DVector, RealField};
use num::Zero;

/// Evaluates all order-`order` derivatives of basis function `dof` at a physical point,
/// accumulating into a caller-supplied buffer.
///
/// The buffer holds `num_components * num_derivatives(topological_dimension, order)`
/// values, component-major and derivative-combination-minor. Results are *added* to the
/// buffer, never assigned: the sub-elements of a composite element contribute to
/// disjoint component ranges of one shared buffer, so the caller must zero-initialize
/// it exactly once before the first contribution. `order == 0` yields the plain basis
/// values, with no geometric transform or Piola pullback applied.
///
/// All scratch state is local to this call; descriptors are only read, so any number
/// of evaluations may run concurrently over the same descriptor.
///
/// # Panics
///
/// Panics if `values` does not have the length described above.
pub fn evaluate_basis_derivatives_into<T, Basis, Geometry>(
    values: &mut [T],
    element: &CompositeElementDescriptor<T>,
    basis: &Basis,
    geometry: &Geometry,
    dof: usize,
    physical_point: &[T],
    order: usize,
) -> Result<(), Error>
where
    T: RealField,
    Basis: ExpansionBasis<T>,
    Geometry: GeometryMap<T>,
{
    let topological_dimension = element.topological_dimension();
    let num_derivs = num_derivatives(topological_dimension, order);
    assert_eq!(
        values.len(),
        element.num_components() * num_derivs,
        "values must have num_components * num_derivatives entries"
    );

    let total_space_dimension = element.total_space_dimension();
    if dof >= total_space_dimension {
        return Err(Error::DofOutOfBounds {
            dof,
            space_dimension: total_space_dimension,
        });
    }

    // Constant elements bypass the derivative machinery: the value of the single basis
    // function is stored directly in the coefficient tables (the expansion basis of a
    // constant space is the constant one), and every derivative of order one or higher
    // vanishes identically.
    if element.sub_elements().len() == 1 && total_space_dimension == 1 {
        if order == 0 {
            let constant = &element.sub_elements()[0];
            for (component, coefficients) in constant.coefficients().iter().enumerate() {
                values[component * num_derivs] += coefficients[(0, 0)].clone();
            }
        }
        return Ok(());
    }

    let location = element.sub_element_for_dof(dof)?;
    let sub = &element.sub_elements()[location.sub_element];

    let reference_point = geometry.reference_coords(physical_point);
    let jacobian_data = geometry.jacobian_data(physical_point);
    let combinations = derivative_combinations(topological_dimension, order);
    let transform = geometric_transform_matrix(&jacobian_data.inverse_jacobian, &combinations);

    let mut expansion_values = vec![T::zero(); sub.num_expansion_members()];
    basis.populate_expansion_values(sub, &mut expansion_values, reference_point.as_slice());

    let mut reference_derivatives = DMatrix::zeros(sub.num_components(), num_derivs);
    populate_reference_derivatives(
        &mut reference_derivatives,
        sub,
        location.local_dof,
        &expansion_values,
        &combinations,
    );
    apply_pullback(sub.mapping(), &jacobian_data, &mut reference_derivatives);

    // Contract the geometric transform with the mapped reference derivatives and
    // accumulate into the caller's buffer at this sub-element's component offset.
    for component in 0..sub.num_components() {
        for r in 0..num_derivs {
            let mut physical_value = T::zero();
            for r_ref in 0..num_derivs {
                physical_value += transform[(r, r_ref)].clone()
                    * reference_derivatives[(component, r_ref)].clone();
            }
            values[(location.component_offset + component) * num_derivs + r] += physical_value;
        }
    }
    Ok(())
}

/// Evaluates all order-`order` derivatives of basis function `dof` at a physical point,
/// returning a freshly allocated buffer.
///
/// See [`evaluate_basis_derivatives_into`] for the layout of the result.
pub fn evaluate_basis_derivatives<T, Basis, Geometry>(
    element: &CompositeElementDescriptor<T>,
    basis: &Basis,
    geometry: &Geometry,
    dof: usize,
    physical_point: &[T],
    order: usize,
) -> Result<DVector<T>, Error>
where
    T: RealField,
    Basis: ExpansionBasis<T>,
    Geometry: GeometryMap<T>,
{
    let num_derivs = num_derivatives(element.topological_dimension(), order);
    let mut values = DVector::zeros(element.num_components() * num_derivs);
    evaluate_basis_derivatives_into(
        values.as_mut_slice(),
        element,
        basis,
        geometry,
        dof,
        physical_point,
        order,
    )?;
    Ok(values)
}

/// Evaluates all order-`order` derivatives of *every* basis function at a physical point.
///
/// The result is a flat buffer of logical shape
/// `[total_space_dimension][num_components][num_derivatives]`, dof-major, then
/// component, then derivative-combination-minor. Downstream assembly code relies on
/// this exact layout.
///
/// Each dof's block is produced by the single-dof pipeline; the per-dof blocks are
/// disjoint, so the whole buffer is zeroed once up front.
pub fn evaluate_basis_derivatives_all<T, Basis, Geometry>(
    element: &CompositeElementDescriptor<T>,
    basis: &Basis,
    geometry: &Geometry,
    physical_point: &[T],
    order: usize,
) -> Result<DVector<T>, Error>
where
    T: RealField,
    Basis: ExpansionBasis<T>,
    Geometry: GeometryMap<T>,
{
    let num_derivs = num_derivatives(element.topological_dimension(), order);
    let block_len = element.num_components() * num_derivs;
    let total_space_dimension = element.total_space_dimension();
    let mut values = DVector::zeros(total_space_dimension * block_len);
    for dof in 0..total_space_dimension {
        let dof_values = &mut values.as_mut_slice()[dof * block_len..(dof + 1) * block_len];
        evaluate_basis_derivatives_into(
            dof_values,
            element,
            basis,
            geometry,
            dof,
            physical_point,
            order,
        )?;
    }
    Ok(values)
}
