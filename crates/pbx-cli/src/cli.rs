//! CLI argument definitions for the `pbx` tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "pbx",
    version,
    about = "Inspect and rewrite Xcode project files",
    long_about = "Open a project.pbxproj, resolve it into a typed graph, and\n\
                  query or rewrite it. Rewrites reproduce Xcode's own byte\n\
                  dialect so saved files stay diff-stable."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for silence).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the project's targets, products, and file references.
    Inspect(InspectArgs),

    /// Open a project and write it back out.
    Resave(ResaveArgs),

    /// Rename the first application target.
    Rename(RenameArgs),
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Path to the .xcodeproj directory.
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: PathBuf,
}

#[derive(Parser)]
pub struct ResaveArgs {
    /// Path to the .xcodeproj directory.
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Write the output here instead of back into the project.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RenameArgs {
    /// Path to the .xcodeproj directory.
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// The new target and product name.
    #[arg(long = "name", value_name = "NAME")]
    pub name: String,

    /// Report what would change without writing the file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    /// Human-readable output.
    Pretty,
    /// Compact single-line output.
    Compact,
}
