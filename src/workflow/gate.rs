//! Safety gate consulted once before any staging or backend work.
use crate::config::RunMode;
use crate::error::MoveError;
use crate::output;
use std::io::{BufRead, Write};

/// Dry runs only announce themselves; live runs need an explicit "yes".
pub fn check<R: BufRead, W: Write>(
    mode: RunMode,
    input: &mut R,
    prompt: &mut W,
) -> Result<(), MoveError> {
    if mode.is_dry_run() {
        output::dry_run_enabled();
        return Ok(());
    }
    if confirm_intent(input, prompt) {
        Ok(())
    } else {
        tracing::info!("operator declined confirmation");
        Err(MoveError::Declined)
    }
}

/// Ask once. EOF or an unreadable answer counts as "no".
pub fn confirm_intent<R: BufRead, W: Write>(input: &mut R, prompt: &mut W) -> bool {
    if write!(prompt, "Do you want to continue? (yes/no): ")
        .and_then(|()| prompt.flush())
        .is_err()
    {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => answer.trim().eq_ignore_ascii_case("yes"),
    }
}
