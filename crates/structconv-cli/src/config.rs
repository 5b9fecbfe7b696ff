use crate::cli::{JobSelector, ScanArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use structconv::core::io::trajectory::ElementMatch;
use structconv::workflows::batch::{BatchConfig, JobSpec, TrajectorySpec};
use structconv::workflows::trajectory::MergeOptions;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialJobConfig {
    enabled: Option<bool>,
    extension: Option<String>,
    #[serde(rename = "exclude-prefix")]
    exclude_prefix: Option<String>,
    output: Option<String>,
}

impl PartialJobConfig {
    /// Resolves the job against `defaults`; an empty `exclude-prefix` disables exclusion.
    fn resolve(self, defaults: JobSpec) -> Option<JobSpec> {
        if self.enabled == Some(false) {
            return None;
        }
        let exclude_prefix = match self.exclude_prefix {
            Some(prefix) if prefix.is_empty() => None,
            Some(prefix) => Some(prefix),
            None => defaults.exclude_prefix,
        };
        Some(JobSpec {
            extension: self
                .extension
                .map(|e| e.trim_start_matches('.').to_string())
                .unwrap_or(defaults.extension),
            exclude_prefix,
            output: self.output.unwrap_or(defaults.output),
        })
    }

    fn set(&mut self, job: &str, field: &str, value: &str) -> Result<()> {
        match field {
            "enabled" => self.enabled = Some(parse_bool(job, field, value)?),
            "extension" => self.extension = Some(value.to_string()),
            "exclude-prefix" => self.exclude_prefix = Some(value.to_string()),
            "output" => self.output = Some(value.to_string()),
            _ => return Err(unsupported_key(job, field)),
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialTrajectoryConfig {
    enabled: Option<bool>,
    structures: Option<PathBuf>,
    forces: Option<PathBuf>,
    output: Option<PathBuf>,
    elements: Option<Vec<String>>,
    #[serde(rename = "exact-elements")]
    exact_elements: Option<bool>,
}

impl PartialTrajectoryConfig {
    fn resolve(self) -> Option<TrajectorySpec> {
        if self.enabled == Some(false) {
            return None;
        }
        let defaults = TrajectorySpec::default();
        let mut options = self
            .elements
            .map(MergeOptions::with_elements)
            .unwrap_or(defaults.options);
        if self.exact_elements == Some(true) {
            options.elements = options.elements.with_mode(ElementMatch::Exact);
        }
        Some(TrajectorySpec {
            structures: self.structures.unwrap_or(defaults.structures),
            forces: self.forces.unwrap_or(defaults.forces),
            output: self.output.unwrap_or(defaults.output),
            options,
        })
    }

    fn set(&mut self, field: &str, value: &str) -> Result<()> {
        match field {
            "enabled" => self.enabled = Some(parse_bool("trajectory", field, value)?),
            "structures" => self.structures = Some(PathBuf::from(value)),
            "forces" => self.forces = Some(PathBuf::from(value)),
            "output" => self.output = Some(PathBuf::from(value)),
            "elements" => self.elements = Some(parser::parse_element_list(value)),
            "exact-elements" => {
                self.exact_elements = Some(parse_bool("trajectory", field, value)?)
            }
            _ => return Err(unsupported_key("trajectory", field)),
        }
        Ok(())
    }
}

/// Batch settings as read from a TOML file, before defaults and CLI overrides are applied.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialScanConfig {
    cell: Option<PartialJobConfig>,
    car: Option<PartialJobConfig>,
    trajectory: Option<PartialTrajectoryConfig>,
}

impl PartialScanConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn merge_with_cli(mut self, args: &ScanArgs) -> Result<BatchConfig> {
        self.apply_set_values(&args.set_values)?;

        let selected = |job: JobSelector| args.only.is_empty() || args.only.contains(&job);

        let config = BatchConfig {
            cell: self
                .cell
                .take()
                .unwrap_or_default()
                .resolve(JobSpec::cell_default())
                .filter(|_| selected(JobSelector::Cell)),
            car: self
                .car
                .take()
                .unwrap_or_default()
                .resolve(JobSpec::car_default())
                .filter(|_| selected(JobSelector::Car)),
            trajectory: self
                .trajectory
                .take()
                .unwrap_or_default()
                .resolve()
                .filter(|_| selected(JobSelector::Trajectory)),
        };

        config
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        debug!("Resolved batch configuration: {:?}", config);
        Ok(config)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) =
                parser::parse_assignment(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
            let Some((section, field)) = key.split_once('.') else {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            };

            match section {
                "cell" => self
                    .cell
                    .get_or_insert_with(Default::default)
                    .set(section, field, value)?,
                "car" => self
                    .car
                    .get_or_insert_with(Default::default)
                    .set(section, field, value)?,
                "trajectory" => self
                    .trajectory
                    .get_or_insert_with(Default::default)
                    .set(field, value)?,
                _ => return Err(unsupported_key(section, field)),
            }
        }
        Ok(())
    }
}

fn parse_bool(section: &str, field: &str, value: &str) -> Result<bool> {
    parser::parse_bool(&format!("{}.{}", section, field), value)
        .map_err(|e| CliError::Config(e.to_string()))
}

fn unsupported_key(section: &str, field: &str) -> CliError {
    CliError::Config(format!(
        "Unsupported configuration key for --set: '{}.{}'",
        section, field
    ))
}
