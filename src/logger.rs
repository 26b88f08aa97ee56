use std::io::{stderr, IsTerminal};

use colored::Colorize;

/// Print an error line to stderr. The `ERROR:` prefix is styled only
/// when stderr is attached to an interactive terminal; the check runs
/// at every emission rather than being cached.
pub fn error(msg: &str) {
    if stderr().is_terminal() {
        eprintln!("{}: {}", "ERROR".bright_red().bold(), msg);
    } else {
        eprintln!("ERROR: {}", msg);
    }
}

pub fn fatal(msg: &str) -> ! {
    error(msg);
    std::process::exit(1);
}
