use crate::core::io::cell::CellFile;
use crate::core::io::poscar::PoscarFile;
use crate::core::io::traits::TextConverter;
use crate::workflows::error::ConversionError;
use tracing::{info, instrument};

/// Converts a CASTEP cell file into a VASP POSCAR.
///
/// The POSCAR lists species in lexicographic order, marks every atom as mobile, and stacks the
/// atoms by ascending fractional z coordinate.
///
/// # Errors
///
/// Returns [`ConversionError::Cell`] if the lattice or positions block is missing or the
/// lattice cannot be read.
#[instrument(skip_all, name = "cell_to_poscar")]
pub fn convert(input: &str) -> Result<String, ConversionError> {
    let structure = CellFile::parse(input)?;
    info!(atoms = structure.atoms.len(), "Writing POSCAR.");

    let mut buffer = Vec::new();
    PoscarFile::write_to(&structure, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// [`TextConverter`] adapter for [`convert`].
pub struct CellToPoscar;

impl TextConverter for CellToPoscar {
    type Error = ConversionError;

    fn convert_str(input: &str) -> Result<String, Self::Error> {
        convert(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::cell::CellError;
    use std::collections::BTreeSet;

    const TWO_ATOM_CELL: &str = "\
%BLOCK LATTICE_CART
1.0 0.0 0.0
0.0 1.0 0.0
0.0 0.0 1.0
%ENDBLOCK LATTICE_CART
%BLOCK POSITIONS_FRAC
Pd 0.0 0.0 0.5
H 0.0 0.0 0.1
%ENDBLOCK POSITIONS_FRAC
";

    const SLAB_CELL: &str = "\
%BLOCK LATTICE_CART
   5.502300000000000   0.000000000000000   0.000000000000000
  -2.751150000000000   4.765131579000000   0.000000000000000
   0.000000000000000   0.000000000000000  35.216700000000000
%ENDBLOCK LATTICE_CART

%BLOCK POSITIONS_FRAC
   Pd   0.0000000000000000   0.0000000000000000   0.3000000000000000
   Pd   0.3333333333333333   0.6666666666666666   0.3600000000000000
   H    0.0000000000000000   0.0000000000000000   0.4100000000000000
   Pd   0.6666666666666666   0.3333333333333333   0.2400000000000000
   O    0.5000000000000000   0.5000000000000000   0.4500000000000000
   H    0.3333333333333333   0.6666666666666666   0.0100000000000000
%ENDBLOCK POSITIONS_FRAC

KPOINTS_MP_GRID 4 4 1
";

    fn atom_heights(poscar: &str) -> Vec<f64> {
        poscar
            .lines()
            .skip(9)
            .map(|line| line.split_whitespace().nth(2).unwrap().parse().unwrap())
            .collect()
    }

    #[test]
    fn two_atom_scenario_orders_species_counts_and_heights() {
        let output = convert(TWO_ATOM_CELL).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "H Pd");
        assert_eq!(lines[1], "   1.00000000");
        assert_eq!(lines[5], "   H Pd");
        assert_eq!(lines[6], "   1 1");
        assert_eq!(lines[7], "Selective Dynamics");
        assert_eq!(lines[8], "Direct");
        assert!(lines[9].contains("0.100000000000000"));
        assert!(lines[10].contains("0.500000000000000"));
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn species_header_matches_distinct_input_species() {
        let output = convert(SLAB_CELL).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        let header: BTreeSet<&str> = lines[0].split_whitespace().collect();
        assert_eq!(header, BTreeSet::from(["H", "O", "Pd"]));
        assert_eq!(lines[0], "H O Pd");

        let counts: Vec<usize> = lines[6]
            .split_whitespace()
            .map(|c| c.parse().unwrap())
            .collect();
        assert_eq!(counts, vec![2, 1, 3]);
        assert_eq!(counts.iter().sum::<usize>(), 6);
    }

    #[test]
    fn atoms_are_non_decreasing_in_height() {
        let output = convert(SLAB_CELL).unwrap();
        let heights = atom_heights(&output);
        assert_eq!(heights.len(), 6);
        assert!(heights.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn every_atom_line_is_fully_mobile() {
        let output = convert(SLAB_CELL).unwrap();
        assert!(output.lines().skip(9).all(|line| line.ends_with("   T T T")));
    }

    #[test]
    fn missing_blocks_fail_instead_of_producing_output() {
        let result = convert("KPOINTS_MP_GRID 4 4 1\n");
        assert!(matches!(
            result,
            Err(ConversionError::Cell(CellError::MissingRecord(_)))
        ));
    }

    #[test]
    fn text_converter_adapter_round_trips_through_paths() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("slab.cell");
        let output = dir.path().join("POSCAR");
        std::fs::write(&input, SLAB_CELL).unwrap();

        CellToPoscar::convert_path(&input, &output).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, convert(SLAB_CELL).unwrap());
    }

    #[test]
    fn failed_path_conversion_creates_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.cell");
        let output = dir.path().join("POSCAR");
        std::fs::write(&input, "%BLOCK POSITIONS_FRAC\n").unwrap();

        assert!(CellToPoscar::convert_path(&input, &output).is_err());
        assert!(!output.exists());
    }
}
