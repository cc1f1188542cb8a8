//! `pbx`: inspect and rewrite Xcode project files.

mod cli;
mod commands;
mod logging;

use clap::Parser;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::logging::{LogConfig, LogFormat, init_logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(level) = cli.verbosity.tracing_level() {
        let format = match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
        };
        init_logging(&LogConfig::default().with_level(level).with_format(format));
    }

    match &cli.command {
        Command::Inspect(args) => commands::inspect(args),
        Command::Resave(args) => commands::resave(args),
        Command::Rename(args) => commands::rename(args),
    }
}
