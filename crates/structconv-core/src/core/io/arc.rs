use crate::core::io::car::CarStructure;
use crate::core::io::sorting::sorter::sort_archive_atoms;
use std::io::{self, Write};
use tracing::warn;

const SIGNATURE_LINE: &str = "!BIOSYM archive 2";
const PBC_FLAG_LINE: &str = "PBC=ON";
const ENERGY_LINE: &str = "                      Energy         0          0.0301         -6.768682        C1";
const DATE_LINE: &str = "!DATE";
const CORE_TAG: &str = " CORE";
const END_LINE: &str = "end";

/// Formats one atom record of a BIOSYM archive.
///
/// `index` is the 1-based position of the atom in the sorted output and appears both as the
/// residue number and as the trailing atom serial.
pub fn format_atom_line(element: &str, x: f64, y: f64, z: f64, index: usize) -> String {
    format!(
        "{:<4}{:15.9}{:15.9}{:15.9}{:>6}{:>6}{:>4}{:>4}{:>10.4}{:>8}",
        element, x, y, z, CORE_TAG, index, element, element, 0.0, index
    )
}

pub struct ArcFile;

impl ArcFile {
    /// Writes a CAR structure as a single-frame BIOSYM archive.
    ///
    /// Atoms are emitted in canonical archive order (element rank, then height). Lines are
    /// separated by `\n` and the final `end` line carries no trailing newline.
    pub fn write_to(structure: &CarStructure, writer: &mut impl Write) -> io::Result<()> {
        let mut lines: Vec<String> = vec![
            SIGNATURE_LINE.to_string(),
            PBC_FLAG_LINE.to_string(),
            ENERGY_LINE.to_string(),
            DATE_LINE.to_string(),
        ];

        match &structure.periodic_line {
            Some(line) => lines.push(line.clone()),
            None => warn!("No 'PBC ... (P1)' cell line found; archive will have no cell record."),
        }

        let mut atoms = structure.atoms.clone();
        sort_archive_atoms(&mut atoms);
        lines.extend(atoms.iter().enumerate().map(|(i, atom)| {
            let p = atom.position;
            format_atom_line(&atom.element, p.x, p.y, p.z, i + 1)
        }));

        lines.push(END_LINE.to_string());
        lines.push(END_LINE.to_string());

        write!(writer, "{}", lines.join("\n"))
    }
}
