//! # Workflows Module
//!
//! High-level entry points that turn one input document into one output document, and a
//! batch driver that applies them to every matching file in a directory.
//!
//! ## Architecture
//!
//! - **Cell to POSCAR** ([`positions`]) - CASTEP lattice and fractional positions to a VASP
//!   POSCAR with selective dynamics, atoms stacked by height
//! - **CAR to archive** ([`archive`]) - Materials Studio CAR atoms to a BIOSYM archive,
//!   grouped by element
//! - **Trajectory merge** ([`trajectory`]) - Paired structure and force archives to an
//!   OUTCAR-style force report
//! - **Batch driver** ([`batch`]) - Directory discovery, per-file error isolation and
//!   progress reporting ([`progress`])
//!
//! Every converter fails loudly through [`error::ConversionError`] instead of producing
//! partial output.

pub mod archive;
pub mod batch;
pub mod error;
pub mod positions;
pub mod progress;
pub mod trajectory;
