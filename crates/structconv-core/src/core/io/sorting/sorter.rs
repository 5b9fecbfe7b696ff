use crate::core::io::sorting::rules::{KNOWN_ELEMENT_COUNT, PERIODIC_TABLE_RANKS};
use crate::core::models::atom::{ArchiveAtom, AtomRecord, element_from_label};
use std::cmp::Ordering;

/// Rank given to every symbol that is not a known element; sorts after all of them.
pub const UNKNOWN_ELEMENT_RANK: usize = KNOWN_ELEMENT_COUNT;

/// Returns the periodic-table rank of an element symbol.
///
/// The symbol is normalized first, so `pd`, `PD` and `Pd2` all rank as palladium.
pub fn element_rank(symbol: &str) -> usize {
    let normalized = element_from_label(symbol.trim());
    PERIODIC_TABLE_RANKS
        .get(normalized.as_str())
        .copied()
        .unwrap_or(UNKNOWN_ELEMENT_RANK)
}

/// Orders archive atoms by element, then by ascending height.
pub fn compare_archive_atoms(a: &ArchiveAtom, b: &ArchiveAtom) -> Ordering {
    // Level 1: periodic-table rank of the element.
    element_rank(&a.element)
        .cmp(&element_rank(&b.element))
        // Level 2: z coordinate.
        .then_with(|| a.position.z.total_cmp(&b.position.z))
}

/// Sorts archive atoms into canonical archive order in place.
pub fn sort_archive_atoms(atoms: &mut [ArchiveAtom]) {
    atoms.sort_by(compare_archive_atoms);
}

/// Sorts cell atoms by ascending fractional z coordinate in place.
pub fn sort_by_height(atoms: &mut [AtomRecord]) {
    atoms.sort_by(|a, b| a.position.z.total_cmp(&b.position.z));
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn archive_atom(element: &str, z: f64) -> ArchiveAtom {
        ArchiveAtom {
            element: element.to_string(),
            position: Point3::new(0.0, 0.0, z),
        }
    }

    fn layout(atoms: &[ArchiveAtom]) -> Vec<(String, f64)> {
        atoms
            .iter()
            .map(|a| (a.element.clone(), a.position.z))
            .collect()
    }

    #[test]
    fn element_rank_follows_atomic_number() {
        assert_eq!(element_rank("H"), 0);
        assert_eq!(element_rank("He"), 1);
        assert_eq!(element_rank("Pd"), 45);
        assert_eq!(element_rank("Og"), 117);
    }

    #[test]
    fn element_rank_normalizes_case_and_digits() {
        assert_eq!(element_rank("pd"), element_rank("Pd"));
        assert_eq!(element_rank("PD3"), element_rank("Pd"));
        assert_eq!(element_rank(" O "), element_rank("O"));
    }

    #[test]
    fn unknown_elements_rank_after_all_known_ones() {
        assert_eq!(element_rank("Xx"), UNKNOWN_ELEMENT_RANK);
        assert_eq!(element_rank(""), UNKNOWN_ELEMENT_RANK);
        assert!(element_rank("Og") < element_rank("Xx"));
    }

    #[test]
    fn periodic_table_ranks_are_a_permutation() {
        let mut ranks: Vec<usize> = PERIODIC_TABLE_RANKS.values().copied().collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (0..KNOWN_ELEMENT_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn archive_atoms_sort_by_element_then_height() {
        let mut atoms = vec![
            archive_atom("Pd", 2.0),
            archive_atom("H", 5.0),
            archive_atom("Xx", -1.0),
            archive_atom("Pd", 1.0),
            archive_atom("H", 3.0),
            archive_atom("C", 9.0),
        ];
        sort_archive_atoms(&mut atoms);
        assert_eq!(
            layout(&atoms),
            vec![
                ("H".to_string(), 3.0),
                ("H".to_string(), 5.0),
                ("C".to_string(), 9.0),
                ("Pd".to_string(), 1.0),
                ("Pd".to_string(), 2.0),
                ("Xx".to_string(), -1.0),
            ]
        );
    }

    #[test]
    fn archive_sort_is_idempotent() {
        let mut atoms = vec![
            archive_atom("O", 0.3),
            archive_atom("Ti", 0.1),
            archive_atom("O", 0.2),
            archive_atom("Unk", 0.0),
        ];
        sort_archive_atoms(&mut atoms);
        let once = atoms.clone();
        sort_archive_atoms(&mut atoms);
        assert_eq!(atoms, once);
    }

    #[test]
    fn archive_sort_is_stable_for_equal_keys() {
        let mut atoms = vec![
            ArchiveAtom {
                element: "H".into(),
                position: Point3::new(1.0, 0.0, 0.5),
            },
            ArchiveAtom {
                element: "H".into(),
                position: Point3::new(2.0, 0.0, 0.5),
            },
        ];
        sort_archive_atoms(&mut atoms);
        assert_eq!(atoms[0].position.x, 1.0);
        assert_eq!(atoms[1].position.x, 2.0);
    }

    #[test]
    fn sort_by_height_orders_by_z_only() {
        let mut atoms = vec![
            AtomRecord::new("Pd", Point3::new(0.0, 0.0, 0.5)),
            AtomRecord::new("H", Point3::new(0.9, 0.9, 0.1)),
            AtomRecord::new("Pd", Point3::new(0.0, 0.0, 0.3)),
        ];
        sort_by_height(&mut atoms);
        let heights: Vec<f64> = atoms.iter().map(|a| a.position.z).collect();
        assert_eq!(heights, vec![0.1, 0.3, 0.5]);
        assert!(heights.windows(2).all(|w| w[0] <= w[1]));
    }
}
