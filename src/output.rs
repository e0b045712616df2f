use owo_colors::OwoColorize;

use crate::engine::Summary;

/// Diagnostics go to stderr so stdout only carries "moved to" lines and prompts.
/// Colors are enabled only when stderr is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "info:".cyan().bold(), msg);
    } else {
        eprintln!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// One-line batch summary.
pub fn format_summary(summary: &Summary) -> String {
    if summary.planned > 0 {
        format!(
            "{} moved, {} planned (dry run), {} skipped, {} failed",
            summary.moved, summary.planned, summary.skipped, summary.failed
        )
    } else {
        format!(
            "{} moved, {} skipped, {} failed",
            summary.moved, summary.skipped, summary.failed
        )
    }
}

pub fn print_summary(summary: &Summary) {
    let line = format_summary(summary);
    if summary.failed > 0 {
        print_warn(&line);
    } else {
        print_info(&line);
    }
}
