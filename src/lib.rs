pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod ui;
pub mod utils;

use clap::Parser;
use std::process::exit;

/// Run unbak CLI entrypoint.
pub fn run_cli() {
    // 0. Initialize color settings (must be first)
    ui::init_colors();

    // 1. Signal handling (mark cancellation; the batch loop stops between
    //    items, an in-flight restore always settles first)
    ctrlc::set_handler(move || {
        eprintln!();
        ui::mark_interrupted();
        ui::warning("Operation cancelled by user.");
    })
    .expect("Error setting Ctrl-C handler");

    // 2. Parse & Run
    let args = cli::args::Cli::parse();
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    // Settings may force colors on or off; "auto" defers to the terminal
    // detection above
    if let Ok(settings) = config::Settings::load() {
        match settings.color.as_str() {
            "always" => colored::control::set_override(true),
            "never" => colored::control::set_override(false),
            _ => {}
        }
    }

    if let Err(e) = cli::dispatcher::dispatch(&args) {
        ui::error(&format!("{}", e));
        exit(1);
    }
}
