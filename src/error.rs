//! Error types for descriptor validation and evaluation.
use crate::element::CellDomain;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Library-wide error type.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The element family name is not in the supported set.
    UnknownElementFamily(String),
    /// The number of differentiation matrices does not match the topological dimension.
    DmatsCountMismatch { expected: usize, actual: usize },
    /// A differentiation matrix is not square of size `num_expansion_members`.
    DmatsShapeMismatch {
        index: usize,
        nrows: usize,
        ncols: usize,
        num_expansion_members: usize,
    },
    /// The number of coefficient matrices does not match the number of value components.
    CoefficientCountMismatch {
        num_components: usize,
        actual: usize,
    },
    /// A coefficient matrix does not have shape `space_dimension × num_expansion_members`.
    CoefficientShapeMismatch {
        component: usize,
        nrows: usize,
        ncols: usize,
        space_dimension: usize,
        num_expansion_members: usize,
    },
    /// A composite element must contain at least one sub-element.
    EmptyCompositeElement,
    /// Sub-elements of a composite element are defined on different reference cells.
    CellDomainMismatch {
        expected: CellDomain,
        actual: CellDomain,
    },
    /// Sub-elements of a composite element have different geometric dimensions.
    GeometricDimensionMismatch { expected: usize, actual: usize },
    /// The requested degree of freedom is outside the element's dof range.
    DofOutOfBounds { dof: usize, space_dimension: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElementFamily(family) => {
                write!(f, "unknown element family \"{family}\"")
            }
            Self::DmatsCountMismatch { expected, actual } => {
                write!(
                    f,
                    "expected one differentiation matrix per reference direction ({expected}), found {actual}"
                )
            }
            Self::DmatsShapeMismatch {
                index,
                nrows,
                ncols,
                num_expansion_members,
            } => {
                write!(
                    f,
                    "differentiation matrix {index} has shape {nrows}x{ncols}, \
                     expected square of size {num_expansion_members}"
                )
            }
            Self::CoefficientCountMismatch {
                num_components,
                actual,
            } => {
                write!(
                    f,
                    "expected one coefficient matrix per value component ({num_components}), found {actual}"
                )
            }
            Self::CoefficientShapeMismatch {
                component,
                nrows,
                ncols,
                space_dimension,
                num_expansion_members,
            } => {
                write!(
                    f,
                    "coefficient matrix for component {component} has shape {nrows}x{ncols}, \
                     expected {space_dimension}x{num_expansion_members}"
                )
            }
            Self::EmptyCompositeElement => {
                write!(f, "composite element must contain at least one sub-element")
            }
            Self::CellDomainMismatch { expected, actual } => {
                write!(
                    f,
                    "sub-element is defined on {actual:?}, but the composite element uses {expected:?}"
                )
            }
            Self::GeometricDimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "sub-element has geometric dimension {actual}, \
                     but the composite element uses {expected}"
                )
            }
            Self::DofOutOfBounds {
                dof,
                space_dimension,
            } => {
                write!(
                    f,
                    "degree of freedom {dof} is outside the valid range [0, {space_dimension})"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
