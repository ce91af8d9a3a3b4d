//! Polynomial index sets.
//!
//! A basis is the set of multi-indices whose polynomials are kept in the
//! expansion. For a single input, the tensor-product set of maximum order `p`
//! is just `{0, 1, ..., p}`; we still model it as an index set so that term
//! ordering and sizes are explicit.

use crate::domain::Parameter;

/// Index set construction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasisKind {
    Tensor,
}

/// Retained polynomial degrees, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    kind: BasisKind,
    indices: Vec<usize>,
}

impl Basis {
    /// Tensor basis for a single parameter.
    pub fn tensor(parameter: &Parameter) -> Self {
        Self {
            kind: BasisKind::Tensor,
            indices: (0..=parameter.order()).collect(),
        }
    }

    pub fn kind(&self) -> BasisKind {
        self.kind
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of terms (cardinality of the index set).
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn max_degree(&self) -> usize {
        self.indices.last().copied().unwrap_or(0)
    }

    /// Quadrature points needed to project every retained term exactly for
    /// polynomial targets up to the basis degree (`max_degree + 1`).
    pub fn quadrature_points(&self) -> usize {
        self.max_degree() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tensor_basis_covers_zero_through_order() {
        let p = Parameter::gaussian(0.0, 1.0, 5).unwrap();
        let basis = Basis::tensor(&p);
        assert_eq!(basis.kind(), BasisKind::Tensor);
        assert_eq!(basis.indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(basis.len(), 6);
        assert_eq!(basis.quadrature_points(), 6);
    }
}
