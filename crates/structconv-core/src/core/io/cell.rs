use crate::core::io::cursor::{LineCursor, parse_triple};
use crate::core::models::atom::AtomRecord;
use crate::core::models::lattice::{Lattice, LatticeVector};
use nalgebra::Point3;
use thiserror::Error;
use tracing::{debug, trace};

const LATTICE_BLOCK: &str = "LATTICE_CART";
const POSITIONS_BLOCK: &str = "POSITIONS_FRAC";
/// The only length unit accepted in a lattice block; no conversion is performed.
const ANGSTROM_UNIT: &str = "ang";

/// A periodic structure read from a CASTEP cell file.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStructure {
    pub lattice: Lattice,
    /// Atoms in input order, in fractional coordinates.
    pub atoms: Vec<AtomRecord>,
}

#[derive(Debug, Error)]
pub enum CellError {
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: CellParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum CellParseErrorKind {
    #[error("Lattice vector must have three numeric components (found '{value}')")]
    InvalidLatticeVector { value: String },
    #[error("Unsupported length unit '{unit}' (only 'ang' is accepted)")]
    UnsupportedUnit { unit: String },
    #[error("Block %BLOCK {block} appears more than once")]
    DuplicateBlock { block: &'static str },
}

/// Returns true if `line` opens (`%BLOCK name`) or closes (`%ENDBLOCK name`) the named block.
///
/// Keywords are case-insensitive and may be separated by any amount of whitespace.
fn is_block_marker(line: &str, keyword: &str, name: &str) -> bool {
    let mut tokens = line.split_whitespace();
    matches!(
        (tokens.next(), tokens.next(), tokens.next()),
        (Some(k), Some(n), None) if k.eq_ignore_ascii_case(keyword) && n.eq_ignore_ascii_case(name)
    )
}

fn is_ignorable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('!') || trimmed.starts_with('#')
}

pub struct CellFile;

impl CellFile {
    /// Parses the lattice and fractional positions of a cell file.
    ///
    /// All other blocks and keywords are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::MissingRecord`] if either required block is absent or the
    /// positions block is never closed, and [`CellError::Parse`] if a lattice line is malformed.
    /// Malformed atom lines are skipped rather than reported.
    pub fn parse(text: &str) -> Result<CellStructure, CellError> {
        let mut cursor = LineCursor::new(text);
        let mut lattice: Option<Lattice> = None;
        let mut atoms: Option<Vec<AtomRecord>> = None;

        while let Some((line_num, line)) = cursor.next_line() {
            if is_block_marker(line, "%BLOCK", LATTICE_BLOCK) {
                if lattice.is_some() {
                    return Err(CellError::Parse {
                        line: line_num,
                        kind: CellParseErrorKind::DuplicateBlock {
                            block: LATTICE_BLOCK,
                        },
                    });
                }
                lattice = Some(Self::read_lattice(&mut cursor)?);
            } else if is_block_marker(line, "%BLOCK", POSITIONS_BLOCK) {
                Self::read_positions(&mut cursor, atoms.get_or_insert_with(Vec::new))?;
            }
        }

        let lattice =
            lattice.ok_or_else(|| CellError::MissingRecord(format!("%BLOCK {LATTICE_BLOCK}")))?;
        let atoms =
            atoms.ok_or_else(|| CellError::MissingRecord(format!("%BLOCK {POSITIONS_BLOCK}")))?;

        debug!(
            atoms = atoms.len(),
            volume = lattice.volume(),
            "Parsed cell structure."
        );
        Ok(CellStructure { lattice, atoms })
    }

    fn read_lattice(cursor: &mut LineCursor) -> Result<Lattice, CellError> {
        let mut vectors: Vec<LatticeVector> = Vec::with_capacity(3);

        while vectors.len() < 3 {
            let Some((line_num, line)) = cursor.next_line() else {
                return Err(CellError::MissingRecord(format!(
                    "three lattice vectors in %BLOCK {LATTICE_BLOCK}"
                )));
            };
            if is_ignorable(line) {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();

            if vectors.is_empty() && tokens.len() == 1 && tokens[0].parse::<f64>().is_err() {
                if tokens[0].eq_ignore_ascii_case(ANGSTROM_UNIT) {
                    continue;
                }
                return Err(CellError::Parse {
                    line: line_num,
                    kind: CellParseErrorKind::UnsupportedUnit {
                        unit: tokens[0].to_string(),
                    },
                });
            }

            let [x, y, z] = parse_triple(&tokens).ok_or_else(|| CellError::Parse {
                line: line_num,
                kind: CellParseErrorKind::InvalidLatticeVector {
                    value: line.trim().to_string(),
                },
            })?;
            vectors.push(LatticeVector::new(x, y, z));
        }

        Ok(Lattice::new([vectors[0], vectors[1], vectors[2]]))
    }

    fn read_positions(
        cursor: &mut LineCursor,
        atoms: &mut Vec<AtomRecord>,
    ) -> Result<(), CellError> {
        loop {
            let Some((line_num, line)) = cursor.next_line() else {
                return Err(CellError::MissingRecord(format!(
                    "%ENDBLOCK {POSITIONS_BLOCK}"
                )));
            };
            if is_block_marker(line, "%ENDBLOCK", POSITIONS_BLOCK) {
                return Ok(());
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 4 {
                trace!(line = line_num, "Skipping short line in positions block.");
                continue;
            }
            match parse_triple(&tokens[1..]) {
                Some([x, y, z]) => atoms.push(AtomRecord::new(tokens[0], Point3::new(x, y, z))),
                None => trace!(line = line_num, "Skipping non-numeric atom line."),
            }
        }
    }
}
