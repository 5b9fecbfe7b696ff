use super::atom::AtomRecord;
use std::collections::BTreeMap;

/// Number of atoms per species label, keyed in lexicographic label order.
///
/// Both the POSCAR title line and the species/count lines are rendered from one tally, so
/// label order and count order cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesTally {
    counts: BTreeMap<String, usize>,
}

impl SpeciesTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tally from a set of atom records.
    pub fn from_atoms<'a>(atoms: impl IntoIterator<Item = &'a AtomRecord>) -> Self {
        let mut tally = Self::new();
        for atom in atoms {
            tally.add(&atom.species);
        }
        tally
    }

    /// Records one more atom of `species`.
    pub fn add(&mut self, species: &str) {
        *self.counts.entry(species.to_string()).or_insert(0) += 1;
    }

    /// Iterates over the distinct species labels in sorted order.
    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Iterates over the per-species counts, aligned with [`Self::species`].
    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.counts.values().copied()
    }

    /// Total number of atoms across all species.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct species.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
