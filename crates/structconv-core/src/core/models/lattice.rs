use nalgebra::{Matrix3, Vector3};

/// A single cell edge vector in Cartesian coordinates (Angstroms).
pub type LatticeVector = Vector3<f64>;

/// The three edge vectors of a periodic simulation cell.
///
/// A lattice is immutable once parsed; readers construct it from exactly three vectors and
/// writers emit them in the order they were read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice {
    vectors: [LatticeVector; 3],
}

impl Lattice {
    /// Creates a lattice from its three edge vectors `a`, `b` and `c`.
    pub fn new(vectors: [LatticeVector; 3]) -> Self {
        Self { vectors }
    }

    /// Returns the edge vectors in `a`, `b`, `c` order.
    pub fn vectors(&self) -> &[LatticeVector; 3] {
        &self.vectors
    }

    /// Returns the lattice as a matrix whose rows are the edge vectors.
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::from_rows(&[
            self.vectors[0].transpose(),
            self.vectors[1].transpose(),
            self.vectors[2].transpose(),
        ])
    }

    /// Returns the cell volume in cubic Angstroms.
    pub fn volume(&self) -> f64 {
        self.matrix().determinant().abs()
    }
}
