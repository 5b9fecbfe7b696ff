use nalgebra::Point3;

/// Per-axis mobility flags for an atom, as written in a selective-dynamics block.
///
/// Every flag defaults to `true`, meaning the atom may relax freely along that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mobility {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Default for Mobility {
    fn default() -> Self {
        Self {
            x: true,
            y: true,
            z: true,
        }
    }
}

impl Mobility {
    /// Creates mobility flags for the three Cartesian axes.
    pub fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    /// Returns the flags as `T`/`F` characters in x, y, z order.
    pub fn flags(&self) -> [char; 3] {
        let flag = |mobile: bool| if mobile { 'T' } else { 'F' };
        [flag(self.x), flag(self.y), flag(self.z)]
    }
}

/// An atom of a cell-description structure, positioned in fractional coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// The species label exactly as it appeared in the input (e.g. `Pd`).
    pub species: String,
    /// Fractional coordinates with respect to the cell's lattice vectors.
    pub position: Point3<f64>,
    /// Selective-dynamics flags, all mobile unless stated otherwise.
    pub mobility: Mobility,
}

impl AtomRecord {
    /// Creates a fully mobile atom record.
    pub fn new(species: impl Into<String>, position: Point3<f64>) -> Self {
        Self {
            species: species.into(),
            position,
            mobility: Mobility::default(),
        }
    }
}

/// An atom read from a CAR archive, positioned in Cartesian coordinates.
///
/// The running sequence index is not stored here; it is assigned by the archive writer
/// after the atoms have been put into canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveAtom {
    /// The chemical element symbol recovered from the raw atom label.
    pub element: String,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
}

impl ArchiveAtom {
    /// Creates an archive atom from a raw label such as `H12` or `PD3`.
    ///
    /// The label is normalized through [`element_from_label`].
    pub fn from_label(label: &str, position: Point3<f64>) -> Self {
        Self {
            element: element_from_label(label),
            position,
        }
    }
}

/// Recovers an element symbol from an atom label.
///
/// All ASCII digits are removed and the remainder is capitalized: the first character is
/// upper-cased and every following character lower-cased, so `PD12` becomes `Pd`.
pub fn element_from_label(label: &str) -> String {
    let mut chars = label.chars().filter(|c| !c.is_ascii_digit());
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
