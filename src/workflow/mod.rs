//! Move workflow: safety gate plus the ordered backend sequence.
mod gate;
mod move_resource;

pub use move_resource::run_move;

use crate::backend::{DryRunBackend, StateBackend, TerraformCli};
use crate::config::RunMode;
use anyhow::Result;

/// Pick the backend variant for `mode`. Only live runs parse the command.
pub fn select_backend(mode: RunMode, terraform: &str) -> Result<Box<dyn StateBackend>> {
    if mode.is_dry_run() {
        return Ok(Box::new(DryRunBackend::new(terraform)));
    }
    Ok(Box::new(TerraformCli::from_command_line(terraform)?))
}
