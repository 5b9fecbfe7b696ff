use nalgebra::{Point3, Vector3};

/// One snapshot of a structure trajectory: its total energy and atomic positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Total energy of the snapshot in eV.
    pub energy: f64,
    /// Cartesian positions in file order.
    pub positions: Vec<Point3<f64>>,
}

impl Frame {
    pub fn new(energy: f64, positions: Vec<Point3<f64>>) -> Self {
        Self { energy, positions }
    }

    pub fn atom_count(&self) -> usize {
        self.positions.len()
    }
}

/// The per-atom forces of one trajectory snapshot, in eV/Angstrom.
///
/// Force frames carry no identity of their own; the i-th force frame belongs to the i-th
/// structure [`Frame`] of the paired archive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForceFrame {
    pub forces: Vec<Vector3<f64>>,
}

impl ForceFrame {
    pub fn new(forces: Vec<Vector3<f64>>) -> Self {
        Self { forces }
    }

    pub fn atom_count(&self) -> usize {
        self.forces.len()
    }
}
