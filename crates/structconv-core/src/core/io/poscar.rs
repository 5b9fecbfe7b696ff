use crate::core::io::cell::CellStructure;
use crate::core::io::sorting::sorter::sort_by_height;
use crate::core::models::species::SpeciesTally;
use std::io::{self, Write};
use tracing::debug;

const INDENT: &str = "   ";
const SCALE_LINE: &str = "   1.00000000";
const SELECTIVE_DYNAMICS_LINE: &str = "Selective Dynamics";
const DIRECT_LINE: &str = "Direct";

fn format_components(values: [f64; 3]) -> String {
    format!("{:19.15} {:19.15} {:19.15}", values[0], values[1], values[2])
}

fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct PoscarFile;

impl PoscarFile {
    /// Writes a structure as a VASP 5 POSCAR with selective dynamics and direct coordinates.
    ///
    /// Atoms are written in ascending order of their fractional z coordinate; the input
    /// structure itself is left untouched.
    pub fn write_to(structure: &CellStructure, writer: &mut impl Write) -> io::Result<()> {
        let tally = SpeciesTally::from_atoms(&structure.atoms);
        let species_line = join(tally.species());
        debug!(
            atoms = tally.total(),
            species = tally.len(),
            "Writing POSCAR."
        );

        writeln!(writer, "{}", species_line)?;
        writeln!(writer, "{}", SCALE_LINE)?;
        for vector in structure.lattice.vectors() {
            writeln!(
                writer,
                "{}{}",
                INDENT,
                format_components([vector.x, vector.y, vector.z])
            )?;
        }
        writeln!(writer, "{}{}", INDENT, species_line)?;
        writeln!(writer, "{}{}", INDENT, join(tally.counts()))?;
        writeln!(writer, "{}", SELECTIVE_DYNAMICS_LINE)?;
        writeln!(writer, "{}", DIRECT_LINE)?;

        let mut atoms = structure.atoms.clone();
        sort_by_height(&mut atoms);
        for atom in &atoms {
            let p = atom.position;
            writeln!(
                writer,
                "{}{}{}{}",
                INDENT,
                format_components([p.x, p.y, p.z]),
                INDENT,
                join(atom.mobility.flags())
            )?;
        }
        Ok(())
    }
}
