use crate::cli::ScanArgs;
use crate::config::PartialScanConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use structconv::workflows::{self, progress::ProgressReporter};
use tracing::{info, warn};

pub fn run(args: ScanArgs) -> Result<()> {
    if !args.dir.is_dir() {
        return Err(CliError::Argument(format!(
            "'{}' is not a directory",
            args.dir.display()
        )));
    }

    let partial_config = match &args.config {
        Some(path) => PartialScanConfig::from_file(path)?,
        None => PartialScanConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Scanning {} ...", args.dir.display());
    let report = workflows::batch::run(&args.dir, &config, &reporter)?;

    if report.outcomes.is_empty() {
        warn!("No input files were found.");
        println!("Nothing to convert.");
        return Ok(());
    }

    for outcome in report.outcomes.iter().filter(|o| o.is_success()) {
        println!(
            "✓ [{}] {} -> {}",
            outcome.job,
            outcome.input.display(),
            outcome.output.display()
        );
    }
    for outcome in report.failures() {
        if let Some(error) = &outcome.error {
            eprintln!("✗ [{}] {}: {}", outcome.job, outcome.input.display(), error);
        }
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::BatchFailed {
            failed: report.outcomes.len() - report.succeeded(),
            total: report.outcomes.len(),
        })
    }
}
