//! # structconv Core Library
//!
//! Converters between the plain-text structure and trajectory formats that show up
//! around atomistic simulation codes: CASTEP cell files, VASP POSCAR files,
//! Materials Studio CAR/ARC archives and OUTCAR-style force reports.
//!
//! ## Architectural Philosophy
//!
//! The library follows a two-layer split:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Lattice`, `AtomRecord`,
//!   `ArchiveAtom`, `Frame`), the line-oriented readers and fixed-width writers for each
//!   format, and the canonical ordering rules applied before output.
//!
//! - **[`workflows`]: The Public API.** One entry point per conversion
//!   ([`workflows::positions::convert`], [`workflows::archive::convert`],
//!   [`workflows::trajectory::merge`]) plus a directory-scanning batch driver that runs
//!   them over every matching file it finds.
//!
//! Every conversion is a pure function of its input text: the whole file is read into
//! memory, reshaped, and written back out in one piece.

pub mod core;
pub mod workflows;
