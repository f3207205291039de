//! Colored status lines on stderr.

use owo_colors::OwoColorize;

pub fn ok(message: &str) {
    eprintln!("{} {}", "✔".green(), message);
}

pub fn work(message: &str) {
    eprintln!("{} {}", "⚒".yellow(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}
