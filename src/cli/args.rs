use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "unbak",
    about = "Recover files from sibling backup copies",
    long_about = "Locates sibling backup copies (.bak, .backup, .old), previews the exact \
effect of restoring one, and performs the restore without destroying the current file: \
the pre-restore content is preserved next to the target as '<file>.new'.",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long = "yes", global = true)]
    pub yes: bool,

    /// Output format (human, json, yaml)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for a backup of a file and show everything that was checked
    Locate {
        /// File to find a backup for
        file: PathBuf,

        /// Also search up to N parent directories (0 = same directory only)
        #[arg(long, value_name = "N")]
        parents: Option<usize>,
    },

    /// Show what restoring a file would do, without touching anything
    Preview {
        /// File to preview a restore for
        file: PathBuf,

        /// Also search up to N parent directories
        #[arg(long, value_name = "N")]
        parents: Option<usize>,
    },

    /// Restore one or more files from their backups
    Restore {
        /// Files to restore; two or more are processed as a sequential batch
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Also search up to N parent directories
        #[arg(long, value_name = "N")]
        parents: Option<usize>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
