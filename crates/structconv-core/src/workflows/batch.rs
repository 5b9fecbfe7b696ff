use crate::core::io::traits::TextConverter;
use crate::workflows::archive::CarToArchive;
use crate::workflows::error::{ConfigError, ConversionError};
use crate::workflows::positions::CellToPoscar;
use crate::workflows::progress::{Progress, ProgressReporter};
use crate::workflows::trajectory::{MergeOptions, merge_paths};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Placeholder in output templates replaced by the input file stem.
pub const STEM_PLACEHOLDER: &str = "{stem}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Cell,
    Car,
    Trajectory,
}

impl JobKind {
    pub fn name(&self) -> &'static str {
        match self {
            JobKind::Cell => "cell → POSCAR",
            JobKind::Car => "car → arc",
            JobKind::Trajectory => "trajectory → OUTCAR",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which files a single-input converter picks up and where it writes its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    /// File extension to match, without the leading dot.
    pub extension: String,
    /// File names starting with this prefix (compared case-insensitively) are skipped.
    pub exclude_prefix: Option<String>,
    /// Output file name; may contain [`STEM_PLACEHOLDER`].
    pub output: String,
}

impl JobSpec {
    pub fn new(extension: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            extension: extension.into().trim_start_matches('.').to_string(),
            exclude_prefix: None,
            output: output.into(),
        }
    }

    pub fn excluding(mut self, prefix: impl Into<String>) -> Self {
        self.exclude_prefix = Some(prefix.into());
        self
    }

    /// `*.cell` files, skipping previously written `POSCAR*` files, into `POSCAR`.
    pub fn cell_default() -> Self {
        Self::new("cell", "POSCAR").excluding("poscar")
    }

    /// `*.car` files, skipping `converted_*` files, into `input.arc`.
    pub fn car_default() -> Self {
        Self::new("car", "input.arc").excluding("converted_")
    }

    /// Returns true if the file at `path` should be converted by this job.
    pub fn matches(&self, path: &Path) -> bool {
        let extension_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.extension);
        if !extension_matches {
            return false;
        }
        let Some(prefix) = &self.exclude_prefix else {
            return true;
        };
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_lowercase();
        !file_name.starts_with(&prefix.to_lowercase())
    }

    /// Resolves the output file for `input` inside `dir`.
    pub fn output_path(&self, dir: &Path, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        dir.join(self.output.replace(STEM_PLACEHOLDER, stem))
    }

    fn validate(&self, job: &'static str) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: job,
                reason: "extension must not be empty".to_string(),
            });
        }
        if self.output.trim().is_empty() {
            return Err(ConfigError::MissingParameter(job));
        }
        Ok(())
    }
}

/// The paired inputs and single output of the trajectory merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectorySpec {
    pub structures: PathBuf,
    pub forces: PathBuf,
    pub output: PathBuf,
    pub options: MergeOptions,
}

impl Default for TrajectorySpec {
    fn default() -> Self {
        Self {
            structures: PathBuf::from("allstr.arc"),
            forces: PathBuf::from("allfor.arc"),
            output: PathBuf::from("OUTCAR_formatted"),
            options: MergeOptions::default(),
        }
    }
}

/// Jobs run by [`run`]; a `None` job is skipped entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub cell: Option<JobSpec>,
    pub car: Option<JobSpec>,
    pub trajectory: Option<TrajectorySpec>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            cell: Some(JobSpec::cell_default()),
            car: Some(JobSpec::car_default()),
            trajectory: Some(TrajectorySpec::default()),
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(spec) = &self.cell {
            spec.validate("cell")?;
        }
        if let Some(spec) = &self.car {
            spec.validate("car")?;
        }
        if let Some(spec) = &self.trajectory {
            if spec.structures.as_os_str().is_empty() || spec.forces.as_os_str().is_empty() {
                return Err(ConfigError::MissingParameter("trajectory"));
            }
            if spec.structures == spec.forces {
                return Err(ConfigError::InvalidParameter {
                    name: "trajectory",
                    reason: "structure and force archives must be different files".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// The result of converting one input.
#[derive(Debug)]
pub struct FileOutcome {
    pub job: JobKind,
    pub input: PathBuf,
    pub output: PathBuf,
    pub error: Option<ConversionError>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_success)
    }
}

/// Runs every configured job over the files in `dir`.
///
/// Failures of individual files are recorded in the returned report and do not stop the batch.
/// Independent inputs are converted in parallel when the `parallel` feature is enabled; outputs
/// are always written sequentially in sorted input order, so inputs that share an output name
/// resolve deterministically to the last one.
///
/// # Errors
///
/// Returns an error only if `dir` itself cannot be listed.
#[instrument(skip_all, name = "batch_workflow", fields(dir = %dir.display()))]
pub fn run(
    dir: &Path,
    config: &BatchConfig,
    reporter: &ProgressReporter,
) -> Result<BatchReport, ConversionError> {
    let mut report = BatchReport::default();

    if let Some(spec) = &config.cell {
        run_single_input_job::<CellToPoscar>(JobKind::Cell, dir, spec, reporter, &mut report)?;
    }
    if let Some(spec) = &config.car {
        run_single_input_job::<CarToArchive>(JobKind::Car, dir, spec, reporter, &mut report)?;
    }
    if let Some(spec) = &config.trajectory {
        run_trajectory_job(dir, spec, reporter, &mut report);
    }

    info!(
        converted = report.succeeded(),
        failed = report.outcomes.len() - report.succeeded(),
        "Batch finished."
    );
    Ok(report)
}

/// Lists the files in `dir` selected by `spec`, sorted by path.
pub fn discover(dir: &Path, spec: &JobSpec) -> Result<Vec<PathBuf>, ConversionError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && spec.matches(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn run_single_input_job<C>(
    kind: JobKind,
    dir: &Path,
    spec: &JobSpec,
    reporter: &ProgressReporter,
    report: &mut BatchReport,
) -> Result<(), ConversionError>
where
    C: TextConverter<Error = ConversionError>,
{
    let inputs = discover(dir, spec)?;
    debug!(job = %kind, inputs = inputs.len(), "Discovered inputs.");

    if inputs.is_empty() {
        warn!(job = %kind, extension = %spec.extension, "No convertible input files found.");
        reporter.report(Progress::Message(format!(
            "No *.{} files to convert.",
            spec.extension
        )));
        return Ok(());
    }

    let outputs: Vec<PathBuf> = inputs
        .iter()
        .map(|input| spec.output_path(dir, input))
        .collect();
    let mut seen = HashSet::new();
    for output in &outputs {
        if !seen.insert(output) {
            warn!(
                output = %output.display(),
                "Several inputs share this output; the last one in name order wins."
            );
        }
    }

    reporter.report(Progress::JobStart {
        name: kind.name(),
        total_files: inputs.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = inputs.iter();

    #[cfg(feature = "parallel")]
    let iterator = inputs.par_iter();

    let results: Vec<Result<String, ConversionError>> = iterator
        .map(|input| -> Result<String, ConversionError> {
            let text = fs::read_to_string(input)?;
            C::convert_str(&text)
        })
        .collect();

    for ((input, output), result) in inputs.into_iter().zip(outputs).zip(results) {
        let result = result.and_then(|text| fs::write(&output, text).map_err(Into::into));
        record(kind, input, output, result, reporter, report);
    }

    reporter.report(Progress::JobFinish);
    Ok(())
}

fn run_trajectory_job(
    dir: &Path,
    spec: &TrajectorySpec,
    reporter: &ProgressReporter,
    report: &mut BatchReport,
) {
    let structures = dir.join(&spec.structures);
    let forces = dir.join(&spec.forces);
    let output = dir.join(&spec.output);

    if !structures.exists() && !forces.exists() {
        debug!("No trajectory archives present; skipping merge.");
        return;
    }

    reporter.report(Progress::JobStart {
        name: JobKind::Trajectory.name(),
        total_files: 1,
    });
    let result = merge_paths(&structures, &forces, &output, &spec.options);
    record(
        JobKind::Trajectory,
        structures,
        output,
        result,
        reporter,
        report,
    );
    reporter.report(Progress::JobFinish);
}

fn record(
    job: JobKind,
    input: PathBuf,
    output: PathBuf,
    result: Result<(), ConversionError>,
    reporter: &ProgressReporter,
    report: &mut BatchReport,
) {
    let error = match result {
        Ok(()) => {
            info!(input = %input.display(), output = %output.display(), "Converted.");
            reporter.report(Progress::FileConverted {
                input: input.clone(),
                output: output.clone(),
            });
            None
        }
        Err(e) => {
            warn!(input = %input.display(), error = %e, "Conversion failed.");
            reporter.report(Progress::FileFailed {
                input: input.clone(),
                reason: e.to_string(),
            });
            Some(e)
        }
    };
    report.outcomes.push(FileOutcome {
        job,
        input,
        output,
        error,
    });
}
