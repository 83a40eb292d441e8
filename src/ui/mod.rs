use colored::Colorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

pub mod progress;

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Disable colors when stdout is not a terminal
pub fn init_colors() {
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::SeqCst);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::SeqCst)
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Mark a pending cancellation (Ctrl-C). The batch loop checks this
/// between items; in-flight work always settles first.
pub fn mark_interrupted() {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

pub fn header(title: &str) {
    if !is_quiet() {
        println!("\n{}", title.bold().underline());
    }
}

pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green().bold(), msg);
    }
}

pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "ℹ".blue().bold(), msg);
    }
}

pub fn verbose(msg: &str) {
    if is_verbose() && !is_quiet() {
        println!("  {}", msg.bright_black());
    }
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Non-dismissible framing for the one failure state that must not be
/// mistaken for a routine error
pub fn alert(msg: &str) {
    eprintln!("{}", "═".repeat(60).red().bold());
    eprintln!("{}", "MANUAL RECOVERY REQUIRED".red().bold());
    eprintln!("{}", msg.red());
    eprintln!("{}", "═".repeat(60).red().bold());
}

pub fn separator() {
    if !is_quiet() {
        println!("{}", "─".repeat(60).bright_black());
    }
}

pub fn keyval(key: &str, val: &str) {
    if !is_quiet() {
        println!("{}: {}", key.bold(), val);
    }
}

pub fn indent(msg: &str, level: usize) {
    if !is_quiet() {
        let spaces = " ".repeat(level * 2);
        println!("{}{}", spaces, msg);
    }
}

pub fn prompt_yes_no(question: &str) -> bool {
    print!("{} {} [y/N] ", "?".yellow().bold(), question);

    // Attempt to flush stdout; refuse on a broken terminal since the
    // follow-up is a filesystem mutation
    if let Err(e) = io::stdout().flush() {
        eprintln!("\nWarning: Failed to flush terminal: {}", e);
        return false;
    }

    let mut input = String::new();

    match io::stdin().read_line(&mut input) {
        Ok(_) => {
            let input = input.trim().to_lowercase();
            input == "y" || input == "yes"
        }
        Err(e) => {
            eprintln!("\nWarning: Failed to read input: {}", e);
            false // Fail-closed: never mutate on unreadable input
        }
    }
}
