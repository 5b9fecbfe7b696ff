use crate::cli::MergeArgs;
use crate::error::{CliError, Result};
use structconv::core::io::trajectory::{ElementFilter, ElementMatch};
use structconv::workflows::trajectory::{self, MergeOptions};
use tracing::info;

fn merge_options(args: &MergeArgs) -> MergeOptions {
    let mut options = if args.all_elements {
        MergeOptions {
            elements: ElementFilter::any(),
        }
    } else if args.elements.is_empty() {
        MergeOptions::default()
    } else {
        MergeOptions::with_elements(&args.elements)
    };
    if args.exact_elements {
        options.elements = options.elements.with_mode(ElementMatch::Exact);
    }
    options
}

pub fn run(args: MergeArgs) -> Result<()> {
    let options = merge_options(&args);
    info!(
        "Merging {:?} and {:?} (elements: {:?})",
        &args.structures,
        &args.forces,
        options.elements.elements()
    );

    trajectory::merge_paths(&args.structures, &args.forces, &args.output, &options).map_err(
        |e| CliError::FileParsing {
            path: args.structures.clone(),
            source: e.into(),
        },
    )?;

    println!("✓ Report written to: {}", args.output.display());
    Ok(())
}
