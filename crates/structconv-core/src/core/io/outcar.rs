use crate::core::io::trajectory::TrajectoryError;
use crate::core::models::frame::{ForceFrame, Frame};
use std::io::Write;
use tracing::{debug, warn};

/// Stress-tensor and cell report written ahead of every frame.
///
/// This is fixed text from a reference calculation, not derived from the input frames; it is
/// kept only so that tools expecting an OUTCAR-shaped file find the sections they look for.
pub const STRESS_BLOCK: &str = r"  FORCE on cell =-STRESS in cart. coord.  units (eV):
  Direction    XX          YY          ZZ          XY          YZ          ZX
  --------------------------------------------------------------------------------------
  Alpha Z   298.02544   298.02544   298.02544
  Ewald  177866.49851177847.36875************    -8.31195     1.46315    -3.85925
  Hartree181790.08961181790.27974************    -3.65745    -0.44000    -0.38074
  E(xc)   -1071.12601 -1071.39406 -1074.89159    -0.05158     0.05776    -0.03247
  Local  ************************365866.27796    10.20220     0.87667     2.89802
  n-local   -72.78798   -71.94424   -96.06013     0.06837    -1.29760    -0.07144
  augment  1478.54031  1478.99491  1495.18004    -0.01742     0.78135     0.12311
  Kinetic  2782.13009  2790.47201  2812.58416     1.52447    -1.98583     1.22756
  Fock        0.00000     0.00000     0.00000     0.00000     0.00000     0.00000
  vdW       -11.37779   -11.38310    -8.44230     0.00239     0.00439    -0.00006
  -------------------------------------------------------------------------------------
  Total      -8.71449    -8.64777    -0.17541    -0.24097    -0.54011    -0.09527
  in kB     -15.12114   -15.00537    -0.30436    -0.41812    -0.93718    -0.16531
  external pressure =      -27.84 kB  Pullay stress =       17.70 kB

  kinetic pressure (ideal gas correction) =      1.02 kB
  total pressure  =     -9.12 kB
  Total+kin.   -14.171     -13.896       0.708      -0.692      -0.570      -0.221

 VOLUME and BASIS-vectors are now :
 -----------------------------------------------------------------------------
  energy-cutoff  :      450.00
  volume of cell :      923.35
      direct lattice vectors                 reciprocal lattice vectors
     5.502300000  0.000000000  0.000000000     0.181742181  0.104928897 -0.000000000
    -2.751150000  4.765131579  0.000000000     0.000000000  0.209857794 -0.000000000
     0.000000000  0.000000000 35.216700000     0.000000000  0.000000000  0.028395619

  length of vectors
     5.502300000  5.502300000 35.216700000     0.209857794  0.209857794  0.028395619

";

const TABLE_HEADER: &str = "POSITION                                       TOTAL-FORCE (eV/Angst)";
const TABLE_RULE: &str =
    " -----------------------------------------------------------------------------------";

/// Formats a value with a sign slot: non-negative values get a leading space where the minus
/// sign would otherwise be.
fn format_sign_slot(value: f64, precision: usize) -> String {
    if value.is_sign_negative() {
        format!("{:.*}", precision, value)
    } else {
        format!(" {:.*}", precision, value)
    }
}

/// Formats the closing energy line of a frame block.
pub fn format_energy_line(energy: f64) -> String {
    format!("  free  energy   TOTEN  =  {} eV", format_sign_slot(energy, 6))
}

pub struct OutcarReport;

impl OutcarReport {
    /// Writes one report block per aligned pair of structure and force frames.
    ///
    /// Within a frame, positions and forces are paired by index; surplus entries on either side
    /// are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::FrameCountMismatch`] before anything is written if the two
    /// frame sequences differ in length, and [`TrajectoryError::Io`] if writing fails.
    pub fn write_to(
        frames: &[Frame],
        forces: &[ForceFrame],
        writer: &mut impl Write,
    ) -> Result<(), TrajectoryError> {
        if frames.len() != forces.len() {
            return Err(TrajectoryError::FrameCountMismatch {
                structures: frames.len(),
                forces: forces.len(),
            });
        }

        for (index, (frame, force_frame)) in frames.iter().zip(forces).enumerate() {
            if frame.atom_count() != force_frame.atom_count() {
                warn!(
                    frame = index + 1,
                    positions = frame.atom_count(),
                    forces = force_frame.atom_count(),
                    "Position and force counts differ; extra entries are dropped."
                );
            }

            writer.write_all(STRESS_BLOCK.as_bytes())?;
            writeln!(writer, "{}", TABLE_HEADER)?;
            writeln!(writer, "{}", TABLE_RULE)?;
            for (p, f) in frame.positions.iter().zip(&force_frame.forces) {
                writeln!(
                    writer,
                    "{:>12.5} {:>10.5} {:>10.5}     {:>12.6} {:>12.6} {:>12.6}",
                    p.x, p.y, p.z, f.x, f.y, f.z
                )?;
            }
            writeln!(writer)?;
            writeln!(writer, "{}", format_energy_line(frame.energy))?;
            writeln!(writer)?;
        }

        debug!(frames = frames.len(), "Wrote force report.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn render(frames: &[Frame], forces: &[ForceFrame]) -> Result<String, TrajectoryError> {
        let mut buffer = Vec::new();
        OutcarReport::write_to(frames, forces, &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    fn single_frame() -> (Frame, ForceFrame) {
        (
            Frame::new(-6.123456, vec![Point3::new(1.0, 2.0, 3.0)]),
            ForceFrame::new(vec![Vector3::new(0.1, -0.2, 0.3)]),
        )
    }

    #[test]
    fn energy_line_uses_a_sign_slot() {
        assert_eq!(
            format_energy_line(-6.123456),
            "  free  energy   TOTEN  =  -6.123456 eV"
        );
        assert_eq!(
            format_energy_line(6.5),
            "  free  energy   TOTEN  =   6.500000 eV"
        );
    }

    #[test]
    fn writes_one_block_per_frame() {
        let (frame, forces) = single_frame();
        let output = render(&[frame], &[forces]).unwrap();

        let expected_tail = "\
POSITION                                       TOTAL-FORCE (eV/Angst)
 -----------------------------------------------------------------------------------
     1.00000    2.00000    3.00000         0.100000    -0.200000     0.300000

  free  energy   TOTEN  =  -6.123456 eV

";
        assert!(output.starts_with(STRESS_BLOCK));
        assert_eq!(&output[STRESS_BLOCK.len()..], expected_tail);
        assert!(
            output
                .lines()
                .any(|line| line.ends_with("free  energy   TOTEN  =  -6.123456 eV"))
        );
    }

    #[test]
    fn block_count_matches_frame_count() {
        let (frame, forces) = single_frame();
        let frames = vec![frame.clone(), frame.clone(), frame];
        let force_frames = vec![forces.clone(), forces.clone(), forces];
        let output = render(&frames, &force_frames).unwrap();
        assert_eq!(output.matches(TABLE_HEADER).count(), 3);
        assert_eq!(output.matches("FORCE on cell").count(), 3);
    }

    #[test]
    fn zero_frames_produce_empty_output() {
        assert_eq!(render(&[], &[]).unwrap(), "");
    }

    #[test]
    fn mismatched_frame_counts_fail_without_output() {
        let (frame, _) = single_frame();
        let mut buffer = Vec::new();
        let result = OutcarReport::write_to(&[frame], &[], &mut buffer);
        assert!(matches!(
            result,
            Err(TrajectoryError::FrameCountMismatch {
                structures: 1,
                forces: 0
            })
        ));
        assert!(buffer.is_empty());
    }

    #[test]
    fn surplus_positions_are_dropped() {
        let frame = Frame::new(
            0.0,
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)],
        );
        let forces = ForceFrame::new(vec![Vector3::new(0.0, 0.0, 0.0)]);
        let output = render(&[frame], &[forces]).unwrap();
        let rows: Vec<&str> = output
            .lines()
            .skip_while(|line| *line != TABLE_RULE)
            .skip(1)
            .take_while(|line| !line.is_empty())
            .collect();
        assert_eq!(
            rows,
            vec!["     0.00000    0.00000    0.00000         0.000000     0.000000     0.000000"]
        );
    }

    #[test]
    fn stress_block_is_byte_exact() {
        assert!(STRESS_BLOCK.starts_with("  FORCE on cell =-STRESS in cart. coord.  units (eV):\n"));
        assert!(STRESS_BLOCK.ends_with(
            "  length of vectors\n     5.502300000  5.502300000 35.216700000     0.209857794  0.209857794  0.028395619\n\n"
        ));
        assert_eq!(STRESS_BLOCK.lines().count(), 34);
    }
}
