//! Terminal output helpers.
//!
//! Progress and error lines are colored only when stdout is a terminal and
//! `NO_COLOR` is unset, so piped output stays clean.

pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
}

fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

fn paint(code: &str, text: &str) -> String {
    if color_enabled() {
        format!("{code}{text}{}", ansi::RESET)
    } else {
        text.to_string()
    }
}

/// Green: completed actions.
pub fn success_text(text: &str) -> String {
    paint(ansi::GREEN, text)
}

/// Red: failures.
pub fn error_text(text: &str) -> String {
    paint(ansi::RED, text)
}

/// Yellow: problems that did not stop the run.
pub fn warn_text(text: &str) -> String {
    paint(ansi::YELLOW, text)
}

/// Dim: per-file progress detail.
pub fn detail_text(text: &str) -> String {
    paint(ansi::DIM, text)
}
