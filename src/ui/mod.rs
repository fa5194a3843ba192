use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

pub fn header(title: &str) {
    if is_quiet() {
        return;
    }
    println!("\n{}", title.bold().underline());
}

pub fn success(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn info(msg: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "ℹ".blue().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

/// Informational message on stderr, for output that must not mix with results.
pub fn note(msg: &str) {
    eprintln!("{} {}", "→".cyan().bold(), msg);
}

/// Diagnostic detail on stderr, shown only in verbose mode.
pub fn verbose(msg: &str) {
    if is_verbose() {
        note(msg);
    }
}

/// Echo a command line before it runs (verbose mode only).
pub fn command(line: &str) {
    if !is_verbose() {
        return;
    }
    eprintln!("{}", format!("$ {}", line).dimmed());
}

/// Print the final status banner. Failures are diagnostics and go to stderr.
pub fn banner(msg: &str, ok: bool) {
    let rule = "=".repeat(msg.chars().count() + 8);
    if ok {
        if is_quiet() {
            return;
        }
        println!("{}", rule.green());
        println!("{}", format!("=== {} ===", msg).green().bold());
        println!("{}", rule.green());
    } else {
        eprintln!("{}", rule.red());
        eprintln!("{}", format!("=== {} ===", msg).red().bold());
        eprintln!("{}", rule.red());
    }
}
