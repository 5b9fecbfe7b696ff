use crate::core::io::outcar::OutcarReport;
use crate::core::io::trajectory::{ElementFilter, read_force_frames, read_structure_frames};
use crate::workflows::error::ConversionError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, instrument};

/// Elements kept from structure archives unless configured otherwise.
pub const DEFAULT_ELEMENTS: [&str; 2] = ["H", "Pd"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    /// Elements whose atom lines are read from the structure archive.
    pub elements: ElementFilter,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            elements: ElementFilter::new(DEFAULT_ELEMENTS),
        }
    }
}

impl MergeOptions {
    pub fn with_elements<S: AsRef<str>>(elements: impl IntoIterator<Item = S>) -> Self {
        Self {
            elements: ElementFilter::new(elements),
        }
    }
}

/// Merges a structure archive and a force archive into an OUTCAR-style report.
///
/// Frames are paired strictly by position: the i-th energy/position frame is written with the
/// i-th force block.
///
/// # Errors
///
/// Returns [`ConversionError::Trajectory`] if the structure archive is truncated or malformed,
/// or if the two archives hold different numbers of frames. No output is produced in either case.
#[instrument(skip_all, name = "trajectory_merge")]
pub fn merge(
    structure_text: &str,
    force_text: &str,
    options: &MergeOptions,
) -> Result<String, ConversionError> {
    let frames = read_structure_frames(structure_text, &options.elements)?;
    let forces = read_force_frames(force_text);
    info!(
        structure_frames = frames.len(),
        force_frames = forces.len(),
        "Merging trajectory frames."
    );

    let mut buffer = Vec::new();
    OutcarReport::write_to(&frames, &forces, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Merges the archives at `structures` and `forces` and writes the report to `output`.
///
/// The output file is only created after the merge has succeeded.
pub fn merge_paths<P, Q, R>(
    structures: P,
    forces: Q,
    output: R,
    options: &MergeOptions,
) -> Result<(), ConversionError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let structure_text = fs::read_to_string(structures)?;
    let force_text = fs::read_to_string(forces)?;
    let report = merge(&structure_text, &force_text, options)?;

    let mut writer = BufWriter::new(File::create(output)?);
    writer.write_all(report.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::trajectory::TrajectoryError;

    fn structure_archive(energies: &[f64]) -> String {
        let mut text = String::from("!BIOSYM archive 2\nPBC=ON\n");
        for (i, energy) in energies.iter().enumerate() {
            text.push_str(&format!(
                "                     Energy      {}  0.0000  {}\n!DATE\n",
                i + 1,
                energy
            ));
            text.push_str("PBC    5.5023    5.5023   35.2167   90.0000   90.0000  120.0000\n");
            text.push_str(
                "Pd1      0.000000000    0.000000000    1.000000000 CORE    1 Pd  Pd  0.0000    1\n",
            );
            text.push_str(
                "C2       5.000000000    5.000000000    5.000000000 CORE    2 C   C   0.0000    2\n",
            );
            text.push_str(
                "H3       1.000000000    2.000000000    3.000000000 CORE    3 H   H   0.0000    3\n",
            );
            text.push_str("end\nend\n");
        }
        text
    }

    fn force_archive(frames: usize) -> String {
        let mut text = String::new();
        for i in 0..frames {
            text.push_str(&format!(" For   {}  2\n  atom forces\n", i + 1));
            text.push_str("  0.010000  -0.020000  0.030000\n");
            text.push_str("  -0.100000  0.200000  -0.300000\n\n");
        }
        text
    }

    #[test]
    fn single_frame_report_ends_with_energy_line() {
        let report = merge(
            &structure_archive(&[-6.123456]),
            &force_archive(1),
            &MergeOptions::default(),
        )
        .unwrap();

        assert!(
            report
                .lines()
                .any(|line| line.ends_with("free  energy   TOTEN  =  -6.123456 eV"))
        );
        assert!(report.contains(
            "     0.00000    0.00000    1.00000         0.010000    -0.020000     0.030000\n"
        ));
        assert!(report.contains(
            "     1.00000    2.00000    3.00000        -0.100000     0.200000    -0.300000\n"
        ));
    }

    #[test]
    fn emits_one_block_per_frame() {
        let energies = [-1.0, -2.0, -3.5];
        let report = merge(
            &structure_archive(&energies),
            &force_archive(3),
            &MergeOptions::default(),
        )
        .unwrap();
        assert_eq!(report.matches("TOTEN").count(), 3);
        assert_eq!(report.matches("TOTAL-FORCE").count(), 3);
    }

    #[test]
    fn empty_archives_produce_an_empty_report() {
        let report = merge("", "", &MergeOptions::default()).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn frame_count_mismatch_is_fatal() {
        let result = merge(
            &structure_archive(&[-1.0, -2.0]),
            &force_archive(1),
            &MergeOptions::default(),
        );
        assert!(matches!(
            result,
            Err(ConversionError::Trajectory(
                TrajectoryError::FrameCountMismatch {
                    structures: 2,
                    forces: 1
                }
            ))
        ));
    }

    #[test]
    fn element_filter_controls_which_atoms_are_paired() {
        let options = MergeOptions::with_elements(["C"]);
        let report = merge(&structure_archive(&[-1.0]), &force_archive(1), &options).unwrap();
        assert!(report.contains(
            "     5.00000    5.00000    5.00000         0.010000    -0.020000     0.030000\n"
        ));
    }

    #[test]
    fn merge_paths_writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let structures = dir.path().join("allstr.arc");
        let forces = dir.path().join("allfor.arc");
        let output = dir.path().join("OUTCAR_formatted");
        std::fs::write(&structures, structure_archive(&[-4.25])).unwrap();
        std::fs::write(&forces, force_archive(1)).unwrap();

        merge_paths(&structures, &forces, &output, &MergeOptions::default()).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("TOTEN  =  -4.250000 eV"));
    }

    #[test]
    fn merge_paths_leaves_no_file_on_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let structures = dir.path().join("allstr.arc");
        let forces = dir.path().join("allfor.arc");
        let output = dir.path().join("OUTCAR_formatted");
        std::fs::write(&structures, structure_archive(&[-4.25])).unwrap();
        std::fs::write(&forces, "").unwrap();

        assert!(merge_paths(&structures, &forces, &output, &MergeOptions::default()).is_err());
        assert!(!output.exists());
    }
}
