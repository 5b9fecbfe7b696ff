use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan",
    version,
    about = "structconv - Convert CASTEP, Materials Studio and trajectory archives into VASP-style inputs.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to convert files in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a CASTEP .cell file into a VASP POSCAR with selective dynamics.
    Cell(ConvertArgs),
    /// Convert a Materials Studio .car file into a BIOSYM archive.
    Car(ConvertArgs),
    /// Merge structure and force archives into an OUTCAR-style report.
    Merge(MergeArgs),
    /// Convert every recognized input file in a directory.
    Scan(ScanArgs),
}

/// Arguments shared by the single-file converters.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output file.
    /// Defaults to `POSCAR` or `input.arc` next to the input file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `merge` subcommand.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Multi-frame structure archive.
    #[arg(short, long, default_value = "allstr.arc", value_name = "PATH")]
    pub structures: PathBuf,

    /// Force archive with one block per structure frame.
    #[arg(short, long, default_value = "allfor.arc", value_name = "PATH")]
    pub forces: PathBuf,

    /// Path for the merged report.
    #[arg(short, long, default_value = "OUTCAR_formatted", value_name = "PATH")]
    pub output: PathBuf,

    /// Elements whose atoms are paired with forces (comma-separated). Defaults to H,Pd.
    #[arg(short, long, value_delimiter = ',', value_name = "SYMBOLS")]
    pub elements: Vec<String>,

    /// Pair every atom with a force, regardless of element.
    #[arg(long, conflicts_with = "elements")]
    pub all_elements: bool,

    /// Match whole element symbols instead of label prefixes (so `H` no longer admits `He`).
    #[arg(long, conflicts_with = "all_elements")]
    pub exact_elements: bool,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan for input files.
    #[arg(default_value = ".", value_name = "DIR")]
    pub dir: PathBuf,

    /// Path to a batch configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run only the listed jobs. Can be used multiple times.
    #[arg(long, value_enum, value_name = "JOB")]
    pub only: Vec<JobSelector>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S car.output=structure.arc
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSelector {
    Cell,
    Car,
    Trajectory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["structconv", "cell", "-i", "in.cell", "-vv", "-j", "4"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, Some(4));
        match cli.command {
            Commands::Cell(args) => {
                assert_eq!(args.input, PathBuf::from("in.cell"));
                assert_eq!(args.output, None);
            }
            other => panic!("Expected 'cell' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn merge_uses_conventional_file_names() {
        let cli = Cli::parse_from(["structconv", "merge"]);
        let Commands::Merge(args) = cli.command else {
            panic!("Expected 'merge' subcommand");
        };
        assert_eq!(args.structures, PathBuf::from("allstr.arc"));
        assert_eq!(args.forces, PathBuf::from("allfor.arc"));
        assert_eq!(args.output, PathBuf::from("OUTCAR_formatted"));
        assert!(args.elements.is_empty());
    }

    #[test]
    fn merge_elements_are_comma_separated() {
        let cli = Cli::parse_from(["structconv", "merge", "-e", "H,Pd,O"]);
        let Commands::Merge(args) = cli.command else {
            panic!("Expected 'merge' subcommand");
        };
        assert_eq!(args.elements, vec!["H", "Pd", "O"]);
    }

    #[test]
    fn elements_conflict_with_all_elements() {
        let result = Cli::try_parse_from(["structconv", "merge", "-e", "H", "--all-elements"]);
        assert!(result.is_err());
    }

    #[test]
    fn scan_defaults_to_current_directory() {
        let cli = Cli::parse_from([
            "structconv",
            "scan",
            "--only",
            "car",
            "-S",
            "car.output=x.arc",
        ]);
        let Commands::Scan(args) = cli.command else {
            panic!("Expected 'scan' subcommand");
        };
        assert_eq!(args.dir, PathBuf::from("."));
        assert_eq!(args.only, vec![JobSelector::Car]);
        assert_eq!(args.set_values, vec!["car.output=x.arc"]);
    }

    #[test]
    fn exact_elements_is_an_opt_in_flag() {
        let cli = Cli::parse_from(["structconv", "merge", "-e", "H", "--exact-elements"]);
        let Commands::Merge(args) = cli.command else {
            panic!("Expected 'merge' subcommand");
        };
        assert!(args.exact_elements);
        assert!(!args.all_elements);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["structconv", "-q", "-v", "scan"]).is_err());
    }
}
