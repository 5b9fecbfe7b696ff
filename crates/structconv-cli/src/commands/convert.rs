use crate::cli::ConvertArgs;
use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};
use structconv::{
    core::io::traits::TextConverter,
    workflows::{archive::CarToArchive, error::ConversionError, positions::CellToPoscar},
};
use tracing::info;

const POSCAR_NAME: &str = "POSCAR";
const ARCHIVE_NAME: &str = "input.arc";

pub fn run_cell(args: ConvertArgs) -> Result<()> {
    convert::<CellToPoscar>(args, POSCAR_NAME)
}

pub fn run_car(args: ConvertArgs) -> Result<()> {
    convert::<CarToArchive>(args, ARCHIVE_NAME)
}

fn convert<C>(args: ConvertArgs, default_name: &str) -> Result<()>
where
    C: TextConverter<Error = ConversionError>,
{
    let output = args
        .output
        .unwrap_or_else(|| default_output(&args.input, default_name));

    info!("Converting {:?} into {:?}", &args.input, &output);
    C::convert_path(&args.input, &output).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;

    println!("✓ Written to: {}", output.display());
    Ok(())
}

/// The conventional output name, placed next to `input`.
fn default_output(input: &Path, name: &str) -> PathBuf {
    input
        .parent()
        .map(|dir| dir.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}
