//! # Core Models Module
//!
//! Plain data structures produced by the readers in [`crate::core::io`] and consumed by the
//! writers. All of them are owned by a single conversion call and carry no cross-file state.
//!
//! ## Key Components
//!
//! - [`lattice`] - The three cell vectors of a periodic structure
//! - [`atom`] - Fractional-coordinate atom records and Cartesian archive atoms
//! - [`species`] - Per-species atom counts in deterministic order
//! - [`frame`] - Trajectory snapshots of positions, energies and forces

pub mod atom;
pub mod frame;
pub mod lattice;
pub mod species;
