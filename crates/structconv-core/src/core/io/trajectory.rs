use crate::core::io::cursor::{LineCursor, parse_triple};
use crate::core::models::atom::element_from_label;
use crate::core::models::frame::{ForceFrame, Frame};
use nalgebra::{Point3, Vector3};
use std::io;
use thiserror::Error;
use tracing::{debug, trace};

const ENERGY_MARKER: &str = "Energy";
const PERIODIC_MARKER: &str = "PBC";
const FRAME_END_MARKER: &str = "end";
const FORCE_MARKER: &str = "For";
/// Header lines following a force marker, counting the marker line itself.
const FORCE_HEADER_LINES: usize = 2;

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: TrajectoryParseErrorKind,
    },
    #[error("Frame starting on line {frame_line} has no '{record}' record before end of file")]
    MissingRecord {
        frame_line: usize,
        record: &'static str,
    },
    #[error("Frame count mismatch: {structures} structure frame(s) but {forces} force frame(s)")]
    FrameCountMismatch { structures: usize, forces: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum TrajectoryParseErrorKind {
    #[error("Invalid energy value '{value}'")]
    InvalidEnergy { value: String },
}

/// How an atom label is compared against the allowed element symbols.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ElementMatch {
    /// The label starts with an allowed symbol, so `H` also admits `He1` and `Hf2`.
    #[default]
    Prefix,
    /// The label's element, digits stripped, equals an allowed symbol.
    Exact,
}

/// Selects which atom lines of a structure archive become frame positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementFilter {
    allowed: Vec<String>,
    mode: ElementMatch,
}

impl ElementFilter {
    /// Accepts atoms whose label starts with one of `elements`.
    ///
    /// Symbols are normalized the same way atom labels are, so `pd` and `PD` both mean `Pd`.
    /// An empty list accepts every element.
    pub fn new<S: AsRef<str>>(elements: impl IntoIterator<Item = S>) -> Self {
        Self {
            allowed: elements
                .into_iter()
                .map(|e| element_from_label(e.as_ref().trim()))
                .filter(|e| !e.is_empty())
                .collect(),
            mode: ElementMatch::Prefix,
        }
    }

    /// A filter that accepts every element.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ElementMatch) -> Self {
        self.mode = mode;
        self
    }

    pub fn elements(&self) -> &[String] {
        &self.allowed
    }

    pub fn mode(&self) -> ElementMatch {
        self.mode
    }

    /// Returns true if an atom with the raw `label` should be kept.
    pub fn accepts(&self, label: &str) -> bool {
        if self.allowed.is_empty() {
            return true;
        }
        match self.mode {
            ElementMatch::Prefix => {
                let label = label.trim();
                self.allowed.iter().any(|allowed| label.starts_with(allowed.as_str()))
            }
            ElementMatch::Exact => {
                let element = element_from_label(label);
                self.allowed.iter().any(|allowed| *allowed == element)
            }
        }
    }
}

/// Reads every frame of a multi-frame structure archive (`allstr.arc`).
///
/// A frame starts at a line beginning with `Energy`, whose last token is the frame energy.
/// Its atoms follow the next `PBC` line and run until a line beginning with `end`.
///
/// # Errors
///
/// Returns [`TrajectoryError::Parse`] if a frame energy is not a number and
/// [`TrajectoryError::MissingRecord`] if the input ends inside a frame. Atom lines that are
/// filtered out or lack numeric coordinates are skipped.
pub fn read_structure_frames(
    text: &str,
    filter: &ElementFilter,
) -> Result<Vec<Frame>, TrajectoryError> {
    let mut cursor = LineCursor::new(text);
    let mut frames = Vec::new();

    while let Some((frame_line, line)) = cursor.next_line() {
        let trimmed = line.trim();
        if !trimmed.starts_with(ENERGY_MARKER) {
            continue;
        }

        let energy_token = trimmed.split_whitespace().last().unwrap_or_default();
        let energy: f64 = energy_token.parse().map_err(|_| TrajectoryError::Parse {
            line: frame_line,
            kind: TrajectoryParseErrorKind::InvalidEnergy {
                value: energy_token.to_string(),
            },
        })?;

        cursor
            .seek(|l| l.trim().starts_with(PERIODIC_MARKER))
            .ok_or(TrajectoryError::MissingRecord {
                frame_line,
                record: PERIODIC_MARKER,
            })?;

        let mut positions = Vec::new();
        loop {
            let Some((line_num, atom_line)) = cursor.next_line() else {
                return Err(TrajectoryError::MissingRecord {
                    frame_line,
                    record: FRAME_END_MARKER,
                });
            };
            let atom_line = atom_line.trim();
            if atom_line.starts_with(FRAME_END_MARKER) {
                break;
            }

            let tokens: Vec<&str> = atom_line.split_whitespace().collect();
            let Some(label) = tokens.first() else {
                continue;
            };
            if !filter.accepts(label) {
                continue;
            }
            match parse_triple(&tokens[1..]) {
                Some([x, y, z]) => positions.push(Point3::new(x, y, z)),
                None => trace!(line = line_num, "Skipping atom line without coordinates."),
            }
        }

        frames.push(Frame::new(energy, positions));
    }

    debug!(frames = frames.len(), "Read structure archive.");
    Ok(frames)
}

/// Reads every force block of a force archive (`allfor.arc`).
///
/// A block starts at a line beginning with `For`; after one further header line, each line of
/// exactly three numbers is a force vector. The block ends at a blank line, the next `For`
/// line, or the end of input. Every marker yields one frame, even if it holds no forces.
pub fn read_force_frames(text: &str) -> Vec<ForceFrame> {
    let mut cursor = LineCursor::new(text);
    let mut frames = Vec::new();

    while let Some(line) = cursor.peek() {
        if !line.trim().starts_with(FORCE_MARKER) {
            cursor.advance(1);
            continue;
        }
        cursor.advance(FORCE_HEADER_LINES);

        let mut forces = Vec::new();
        while let Some(force_line) = cursor.peek() {
            let trimmed = force_line.trim();
            if trimmed.is_empty() || trimmed.starts_with(FORCE_MARKER) {
                break;
            }
            let line_num = cursor.line_number();
            cursor.advance(1);

            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            if tokens.len() != 3 {
                continue;
            }
            match parse_triple(&tokens) {
                Some([x, y, z]) => forces.push(Vector3::new(x, y, z)),
                None => trace!(line = line_num, "Skipping non-numeric force line."),
            }
        }
        frames.push(ForceFrame::new(forces));
    }

    debug!(frames = frames.len(), "Read force archive.");
    frames
}
