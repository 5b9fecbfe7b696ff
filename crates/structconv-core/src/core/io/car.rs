use crate::core::io::cursor::{LineCursor, parse_triple};
use crate::core::models::atom::ArchiveAtom;
use nalgebra::Point3;
use tracing::{debug, trace};

const PERIODIC_PREFIX: &str = "PBC";
const SPACE_GROUP_MARKER: &str = "P1";

/// The content of a Materials Studio CAR file that survives conversion to an archive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarStructure {
    /// The first `PBC ... (P1)` cell line, trimmed, if the file has one.
    pub periodic_line: Option<String>,
    /// Atoms in input order.
    pub atoms: Vec<ArchiveAtom>,
}

pub struct CarFile;

impl CarFile {
    /// Reads the cell line and atom records of a CAR file.
    ///
    /// Any line with at least four tokens whose second to fourth tokens are numbers is treated
    /// as an atom, unless its first token starts with `PBC`. Everything else is ignored, so
    /// this never fails.
    pub fn parse(text: &str) -> CarStructure {
        let periodic_line = Self::find_periodic_line(text);

        let mut atoms = Vec::new();
        for (line_num, line) in LineCursor::new(text) {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 4 {
                continue;
            }
            let Some([x, y, z]) = parse_triple(&tokens[1..]) else {
                trace!(line = line_num, "Skipping line without numeric coordinates.");
                continue;
            };
            if tokens[0].starts_with(PERIODIC_PREFIX) {
                continue;
            }
            atoms.push(ArchiveAtom::from_label(tokens[0], Point3::new(x, y, z)));
        }

        debug!(
            atoms = atoms.len(),
            has_cell = periodic_line.is_some(),
            "Parsed CAR structure."
        );
        CarStructure {
            periodic_line,
            atoms,
        }
    }

    /// Returns the first P1 cell line. Scanning stops at the first match.
    fn find_periodic_line(text: &str) -> Option<String> {
        let mut cursor = LineCursor::new(text);
        cursor
            .seek(|line| {
                line.trim().starts_with(PERIODIC_PREFIX) && line.contains(SPACE_GROUP_MARKER)
            })
            .map(|(_, line)| line.trim().to_string())
    }
}
