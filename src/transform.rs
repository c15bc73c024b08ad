//! Coordinate transforms between reference and physical derivatives.

use crate::element::MappingKind;
use crate::geometry::JacobianData;
use itertools::izip;
use nalgebra::{DMatrix, RealField};
use num::One;

/// Builds the order-`n` chain rule matrix from the inverse Jacobian.
///
/// For a combination table of size `N = d^n`, the result `T` is `N × N` with
///
/// ```text
/// T[r][r'] = ∏_k inverse_jacobian[combinations[r][k]][combinations[r'][k]]
/// ```
///
/// so that the physical derivative indexed by combination `r` is the linear combination
/// `Σ_{r'} T[r][r'] · (reference derivative r')`. For `n == 0` the result is the `1 × 1`
/// identity, and for `n == 1` it is the inverse Jacobian itself. Since both the Jacobian
/// and the order vary per query, the matrix is rebuilt on every evaluation.
pub fn geometric_transform_matrix<T>(
    inverse_jacobian: &DMatrix<T>,
    combinations: &[Vec<usize>],
) -> DMatrix<T>
where
    T: RealField,
{
    let num_derivatives = combinations.len();
    DMatrix::from_fn(num_derivatives, num_derivatives, |row, col| {
        izip!(&combinations[row], &combinations[col]).fold(T::one(), |product, (&i, &j)| {
            product * inverse_jacobian[(i, j)].clone()
        })
    })
}

/// Applies the element's Piola pullback to reference derivative values in place.
///
/// `reference_derivatives` has one row per value component and one column per
/// derivative combination. Component mixing acts on the component axis only and is
/// applied independently for every combination, so the whole pullback is a single
/// matrix product on the left:
///
/// - contravariant: `physical[i] = (1 / det J) Σ_j J[i][j] · reference[j]`,
/// - covariant: `physical[i] = Σ_j J⁻¹[j][i] · reference[j]`.
///
/// Affine elements need no component mixing and the values are left untouched.
pub fn apply_pullback<T>(
    mapping: MappingKind,
    jacobian_data: &JacobianData<T>,
    reference_derivatives: &mut DMatrix<T>,
) where
    T: RealField,
{
    match mapping {
        MappingKind::Affine => {}
        MappingKind::ContravariantPiola => {
            let det_inv = T::one() / jacobian_data.determinant.clone();
            *reference_derivatives =
                (&jacobian_data.jacobian * &*reference_derivatives) * det_inv;
        }
        MappingKind::CovariantPiola => {
            *reference_derivatives =
                jacobian_data.inverse_jacobian.transpose() * &*reference_derivatives;
        }
    }
}
