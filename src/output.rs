//! Operator-facing console text.
//!
//! Notices go to stdout; `colored` drops the escapes when stdout is not a
//! terminal or `NO_COLOR` is set.
use crate::config::MoveConfig;
use colored::{ColoredString, Colorize};

pub fn dry_run_tag() -> ColoredString {
    "[dry-run]".magenta()
}

/// Print the step heading (`==> ...`).
pub fn step(text: &str) {
    println!("==> {}", text.green());
}

/// Print what is about to be moved and where.
pub fn move_summary(config: &MoveConfig) {
    println!(
        "Moving resource {}: \n  From state {} \n  To state   {} ",
        config.resource.as_str().yellow(),
        config.source.to_string().blue(),
        config.target.to_string().blue()
    );
}

pub fn dry_run_enabled() {
    println!("{} enabled. Not actually making moves. ", dry_run_tag());
}
