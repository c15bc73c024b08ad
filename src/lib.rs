//! Pointwise evaluation of finite element basis functions and their derivatives.
//!
//! Given a precomputed description of a finite element — its polynomial expansion basis,
//! coefficient matrices and per-direction differentiation matrices — this crate evaluates
//! every partial derivative of every basis function at an arbitrary point, for a derivative
//! order chosen at run time. Reference-cell values are mapped to the physical cell through
//! the higher-order chain rule, including covariant/contravariant Piola pullbacks for
//! vector-valued elements and composition over mixed (vector/tensor/block) elements.
//!
//! The crate deliberately does *not* tabulate elements, evaluate the raw expansion basis
//! or compute Jacobians of the geometric map. Those concerns live behind the
//! [`ExpansionBasis`](crate::geometry::ExpansionBasis) and
//! [`GeometryMap`](crate::geometry::GeometryMap) traits, so that any tabulation library
//! and any geometry representation can drive the evaluation.
//!
//! The main entry points are
//! [`evaluate_basis_derivatives_into`](crate::evaluate::evaluate_basis_derivatives_into)
//! for a single degree of freedom and
//! [`evaluate_basis_derivatives_all`](crate::evaluate::evaluate_basis_derivatives_all)
//! for all degrees of freedom of an element.

pub mod derivatives;
pub mod element;
pub mod error;
pub mod evaluate;
pub mod geometry;
pub mod reference;
pub mod transform;

pub use error::Error;

pub extern crate nalgebra;
