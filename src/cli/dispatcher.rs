//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers.

use crate::cli::args::{Cli, Command};
use crate::commands;
use crate::error::Result;
use clap::CommandFactory;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli) -> Result<()> {
    match &args.command {
        Some(Command::Locate { file, parents }) => commands::locate::run(commands::locate::LocateOptions {
            file: file.clone(),
            parents: *parents,
            format: args.global.format.clone(),
        }),

        Some(Command::Preview { file, parents }) => commands::preview::run(commands::preview::PreviewOptions {
            file: file.clone(),
            parents: *parents,
            format: args.global.format.clone(),
        }),

        Some(Command::Restore { files, parents }) => commands::restore::run(commands::restore::RestoreOptions {
            files: files.clone(),
            parents: *parents,
            yes: args.global.yes,
            format: args.global.format.clone(),
        }),

        Some(Command::Completions { shell }) => commands::completions::run(*shell),

        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
