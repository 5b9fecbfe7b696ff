//! Utilities for sorting atoms into canonical output order.
//!
//! Two orderings are provided: archive atoms are grouped by their element's position in the
//! periodic table and then stacked by height, while fractional cell atoms are ordered purely by
//! their z coordinate. Both sorts are stable, so atoms that compare equal keep their input order.

pub mod rules;
pub mod sorter;
