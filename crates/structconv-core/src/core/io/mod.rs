//! Provides input/output functionality for structure and trajectory text formats.
//!
//! Every reader in this module walks its input with a forward-only [`cursor::LineCursor`]
//! and every writer reproduces its target format with literal fixed-width format
//! specifications, so boilerplate lines match downstream tools byte for byte.

pub mod arc;
pub mod car;
pub mod cell;
pub mod cursor;
pub mod outcar;
pub mod poscar;
pub mod sorting;
pub mod traits;
pub mod trajectory;
