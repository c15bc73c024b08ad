//! Element descriptors: precomputed tabulation data for finite elements.
//!
//! The descriptors in this module are produced once by an external tabulation library
//! (which computes the expansion basis, its coefficients and the differentiation
//! matrices) and are treated as immutable by the evaluation routines. They may be read
//! concurrently from any number of threads.

use crate::error::Error;
use log::debug;
use nalgebra::{DMatrix, Scalar};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The reference cell that an element is defined on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellDomain {
    Interval,
    Triangle,
    Tetrahedron,
}

impl CellDomain {
    /// The topological dimension of the reference cell.
    pub fn topological_dimension(&self) -> usize {
        match self {
            Self::Interval => 1,
            Self::Triangle => 2,
            Self::Tetrahedron => 3,
        }
    }
}

/// How basis function values are mapped from the reference cell to a physical cell.
///
/// Affine elements map values unchanged. Vector-valued elements conforming in H(div)
/// or H(curl) additionally mix value components through the Jacobian of the geometric
/// map (contravariant and covariant Piola transforms, respectively).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappingKind {
    Affine,
    CovariantPiola,
    ContravariantPiola,
}

/// The supported element families.
///
/// The set is closed: tabulation data tagged with any other family name is rejected
/// when the name is parsed, before a descriptor is ever constructed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementFamily {
    Lagrange,
    DiscontinuousLagrange,
    CrouzeixRaviart,
    RaviartThomas,
    DiscontinuousRaviartThomas,
    BrezziDouglasMarini,
    BrezziDouglasFortinMarini,
    NedelecFirstKind,
    NedelecSecondKind,
    Bubble,
    Real,
}

impl ElementFamily {
    /// The conventional name of the family, as used by tabulation libraries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lagrange => "Lagrange",
            Self::DiscontinuousLagrange => "Discontinuous Lagrange",
            Self::CrouzeixRaviart => "Crouzeix-Raviart",
            Self::RaviartThomas => "Raviart-Thomas",
            Self::DiscontinuousRaviartThomas => "Discontinuous Raviart-Thomas",
            Self::BrezziDouglasMarini => "Brezzi-Douglas-Marini",
            Self::BrezziDouglasFortinMarini => "Brezzi-Douglas-Fortin-Marini",
            Self::NedelecFirstKind => "Nedelec 1st kind H(curl)",
            Self::NedelecSecondKind => "Nedelec 2nd kind H(curl)",
            Self::Bubble => "Bubble",
            Self::Real => "Real",
        }
    }
}

impl Display for ElementFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ElementFamily {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        match name {
            "Lagrange" => Ok(Self::Lagrange),
            "Discontinuous Lagrange" => Ok(Self::DiscontinuousLagrange),
            "Crouzeix-Raviart" => Ok(Self::CrouzeixRaviart),
            "Raviart-Thomas" => Ok(Self::RaviartThomas),
            "Discontinuous Raviart-Thomas" => Ok(Self::DiscontinuousRaviartThomas),
            "Brezzi-Douglas-Marini" => Ok(Self::BrezziDouglasMarini),
            "Brezzi-Douglas-Fortin-Marini" => Ok(Self::BrezziDouglasFortinMarini),
            "Nedelec 1st kind H(curl)" => Ok(Self::NedelecFirstKind),
            "Nedelec 2nd kind H(curl)" => Ok(Self::NedelecSecondKind),
            "Bubble" => Ok(Self::Bubble),
            "Real" => Ok(Self::Real),
            _ => Err(Error::UnknownElementFamily(name.to_string())),
        }
    }
}

/// Precomputed tabulation data for a single (non-composite) finite element.
///
/// Basis functions are represented as linear combinations of a fixed polynomial
/// expansion basis of size `m = num_expansion_members`: the value of component `c`
/// of basis function `d` is `coefficients[c].row(d) · expansion_values`, where
/// `expansion_values` are the expansion basis values at the evaluation point.
/// `dmats[i]` expresses the action of differentiation along reference direction `i`
/// on expansion coefficients.
///
/// All invariants relating the shapes of `dmats` and `coefficients` to
/// `space_dimension` and `num_expansion_members` are checked by
/// [`ElementDescriptor::new`]; the evaluation routines rely on them without
/// re-checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor<T: Scalar> {
    family: ElementFamily,
    cell_domain: CellDomain,
    mapping: MappingKind,
    value_shape: Vec<usize>,
    space_dimension: usize,
    geometric_dimension: usize,
    num_expansion_members: usize,
    dmats: Vec<DMatrix<T>>,
    coefficients: Vec<DMatrix<T>>,
}

impl<T: Scalar> ElementDescriptor<T> {
    /// Constructs a descriptor from tabulated element data, validating shape invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        family: ElementFamily,
        cell_domain: CellDomain,
        mapping: MappingKind,
        value_shape: Vec<usize>,
        space_dimension: usize,
        geometric_dimension: usize,
        num_expansion_members: usize,
        dmats: Vec<DMatrix<T>>,
        coefficients: Vec<DMatrix<T>>,
    ) -> Result<Self, Error> {
        let topological_dimension = cell_domain.topological_dimension();
        if dmats.len() != topological_dimension {
            return Err(Error::DmatsCountMismatch {
                expected: topological_dimension,
                actual: dmats.len(),
            });
        }
        for (index, dmat) in dmats.iter().enumerate() {
            if dmat.nrows() != num_expansion_members || dmat.ncols() != num_expansion_members {
                return Err(Error::DmatsShapeMismatch {
                    index,
                    nrows: dmat.nrows(),
                    ncols: dmat.ncols(),
                    num_expansion_members,
                });
            }
        }

        // Scalar elements have an empty value shape and a single component.
        let num_components = value_shape.iter().sum::<usize>().max(1);
        if coefficients.len() != num_components {
            return Err(Error::CoefficientCountMismatch {
                num_components,
                actual: coefficients.len(),
            });
        }
        for (component, matrix) in coefficients.iter().enumerate() {
            if matrix.nrows() != space_dimension || matrix.ncols() != num_expansion_members {
                return Err(Error::CoefficientShapeMismatch {
                    component,
                    nrows: matrix.nrows(),
                    ncols: matrix.ncols(),
                    space_dimension,
                    num_expansion_members,
                });
            }
        }

        debug!(
            "Validated {} element on {:?}: {} dofs, {} components, {} expansion members",
            family, cell_domain, space_dimension, num_components, num_expansion_members
        );

        Ok(Self {
            family,
            cell_domain,
            mapping,
            value_shape,
            space_dimension,
            geometric_dimension,
            num_expansion_members,
            dmats,
            coefficients,
        })
    }

    pub fn family(&self) -> ElementFamily {
        self.family
    }

    pub fn cell_domain(&self) -> CellDomain {
        self.cell_domain
    }

    pub fn mapping(&self) -> MappingKind {
        self.mapping
    }

    /// The value shape of the element. Empty for scalar elements.
    pub fn value_shape(&self) -> &[usize] {
        &self.value_shape
    }

    /// The number of value components. Scalar elements have one component.
    pub fn num_components(&self) -> usize {
        self.value_shape.iter().sum::<usize>().max(1)
    }

    /// The number of degrees of freedom of the element.
    pub fn space_dimension(&self) -> usize {
        self.space_dimension
    }

    pub fn topological_dimension(&self) -> usize {
        self.cell_domain.topological_dimension()
    }

    pub fn geometric_dimension(&self) -> usize {
        self.geometric_dimension
    }

    /// The size of the polynomial expansion basis.
    pub fn num_expansion_members(&self) -> usize {
        self.num_expansion_members
    }

    /// Per-direction differentiation matrices acting on expansion coefficients.
    pub fn dmats(&self) -> &[DMatrix<T>] {
        &self.dmats
    }

    /// Per-component coefficient matrices of shape `space_dimension × num_expansion_members`.
    pub fn coefficients(&self) -> &[DMatrix<T>] {
        &self.coefficients
    }
}

/// Location of a global degree of freedom within a composite element.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SubElementDof {
    /// Index of the owning sub-element.
    pub sub_element: usize,
    /// The dof index local to the owning sub-element.
    pub local_dof: usize,
    /// Offset of the owning sub-element's first value component in the composite
    /// element's component index space.
    pub component_offset: usize,
}

/// An ordered collection of sub-elements forming a mixed (vector/tensor/block) element.
///
/// The sub-elements partition both the dof index space and the value-component index
/// space into contiguous, non-overlapping ranges, in order. A single non-composite
/// element is represented as a composite with one sub-element (see the `From` impl).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeElementDescriptor<T: Scalar> {
    sub_elements: Vec<ElementDescriptor<T>>,
}

impl<T: Scalar> CompositeElementDescriptor<T> {
    /// Constructs a composite element from its ordered sub-elements.
    ///
    /// All sub-elements must be defined on the same reference cell and share the same
    /// geometric dimension.
    pub fn new(sub_elements: Vec<ElementDescriptor<T>>) -> Result<Self, Error> {
        let first = sub_elements.first().ok_or(Error::EmptyCompositeElement)?;
        let cell_domain = first.cell_domain();
        let geometric_dimension = first.geometric_dimension();
        for sub in &sub_elements {
            if sub.cell_domain() != cell_domain {
                return Err(Error::CellDomainMismatch {
                    expected: cell_domain,
                    actual: sub.cell_domain(),
                });
            }
            if sub.geometric_dimension() != geometric_dimension {
                return Err(Error::GeometricDimensionMismatch {
                    expected: geometric_dimension,
                    actual: sub.geometric_dimension(),
                });
            }
        }
        Ok(Self { sub_elements })
    }

    pub fn sub_elements(&self) -> &[ElementDescriptor<T>] {
        &self.sub_elements
    }

    pub fn cell_domain(&self) -> CellDomain {
        self.sub_elements[0].cell_domain()
    }

    pub fn topological_dimension(&self) -> usize {
        self.sub_elements[0].topological_dimension()
    }

    pub fn geometric_dimension(&self) -> usize {
        self.sub_elements[0].geometric_dimension()
    }

    /// The total number of degrees of freedom across all sub-elements.
    pub fn total_space_dimension(&self) -> usize {
        self.sub_elements.iter().map(|sub| sub.space_dimension()).sum()
    }

    /// The total number of value components across all sub-elements.
    pub fn num_components(&self) -> usize {
        self.sub_elements.iter().map(|sub| sub.num_components()).sum()
    }

    /// Routes a global dof index to the unique sub-element whose dof range contains it.
    ///
    /// The sub-element dof ranges are contiguous and non-overlapping by construction,
    /// so the lookup walks the sub-elements in order while tracking the dof and
    /// component offsets. A dof outside `[0, total_space_dimension)` is a contract
    /// violation and reported as an error, never silently ignored.
    pub fn sub_element_for_dof(&self, dof: usize) -> Result<SubElementDof, Error> {
        let mut dof_offset = 0;
        let mut component_offset = 0;
        for (sub_element, sub) in self.sub_elements.iter().enumerate() {
            if dof < dof_offset + sub.space_dimension() {
                return Ok(SubElementDof {
                    sub_element,
                    local_dof: dof - dof_offset,
                    component_offset,
                });
            }
            dof_offset += sub.space_dimension();
            component_offset += sub.num_components();
        }
        Err(Error::DofOutOfBounds {
            dof,
            space_dimension: dof_offset,
        })
    }
}

impl<T: Scalar> From<ElementDescriptor<T>> for CompositeElementDescriptor<T> {
    fn from(element: ElementDescriptor<T>) -> Self {
        Self {
            sub_elements: vec![element],
        }
    }
}
