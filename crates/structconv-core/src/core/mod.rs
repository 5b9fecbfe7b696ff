//! # Core Module
//!
//! Fundamental building blocks shared by all converters.
//!
//! ## Architecture
//!
//! - **Structural Representation** ([`models`]) - Lattices, atom records, species tallies and
//!   trajectory frames
//! - **File I/O** ([`io`]) - Line-cursor readers and fixed-width writers for each supported
//!   format, together with the canonical atom ordering used on output
//!
//! Nothing in this module performs filesystem discovery or batch orchestration; that lives in
//! [`crate::workflows`].

pub mod io;
pub mod models;
