//! Collaborator traits for the geometric map and the expansion basis.
//!
//! Both are treated as black boxes: the evaluation routines never compute Jacobians or
//! expansion basis values themselves, they only consume what these traits provide.

use crate::element::ElementDescriptor;
use nalgebra::{DMatrix, DVector, Scalar};

/// Jacobian information for the reference-to-physical coordinate map at a point.
///
/// The index conventions match the evaluation routines: the physical derivative along
/// direction `i` is the combination `Σ_j inverse_jacobian[(i, j)] · (reference derivative j)`,
/// and the covariant Piola transform reads `inverse_jacobian[(j, i)]`. For affine cells
/// this data is constant over the cell.
#[derive(Debug, Clone, PartialEq)]
pub struct JacobianData<T: Scalar> {
    pub jacobian: DMatrix<T>,
    pub inverse_jacobian: DMatrix<T>,
    pub determinant: T,
}

/// The geometric map between the reference cell and one physical cell.
///
/// Implementations are expected to reject cell domains they do not support when they
/// are constructed; the evaluation routines assume the map matches the element's cell.
pub trait GeometryMap<T: Scalar> {
    /// Maps a point in the physical cell to reference coordinates.
    fn reference_coords(&self, physical_point: &[T]) -> DVector<T>;

    /// The Jacobian, inverse Jacobian and Jacobian determinant at a physical point.
    fn jacobian_data(&self, physical_point: &[T]) -> JacobianData<T>;
}

/// Evaluation of the polynomial expansion basis of an element.
pub trait ExpansionBasis<T: Scalar> {
    /// Evaluates the expansion basis of `element` at the given reference coordinates,
    /// writing one value per expansion member into `values`.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `values` does not have length
    /// `element.num_expansion_members()`.
    fn populate_expansion_values(
        &self,
        element: &ElementDescriptor<T>,
        values: &mut [T],
        reference_coords: &[T],
    );
}
