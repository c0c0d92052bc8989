//! Backend client capability used by the move workflow.
//!
//! The workflow is written once against `StateBackend`. `TerraformCli` runs
//! the real terraform commands; `DryRunBackend` only describes them.
mod dry_run;
mod terraform;

pub use dry_run::DryRunBackend;
#[cfg(test)]
pub use dry_run::PlannedOp;
pub use terraform::TerraformCli;

use crate::config::{BackendLocation, ResourceAddress};
use anyhow::Result;
use std::path::Path;

/// Opaque state bytes as returned by `terraform state pull`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDocument(Vec<u8>);

impl StateDocument {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// The primitive operations a move is built from.
pub trait StateBackend {
    /// Called once the staging area exists, before any other operation.
    fn staging_ready(&mut self, _root: &Path) {}

    /// Prepare the backend in `location` (`terraform init`).
    fn initialize(&mut self, location: &BackendLocation) -> Result<()>;

    /// Fetch the durable state of `location`. Returns `None` when nothing was
    /// actually pulled.
    fn pull_state(&mut self, location: &BackendLocation) -> Result<Option<StateDocument>>;

    /// Relocate `address` from the state loaded in `working_dir` into `state_out`.
    fn move_resource(
        &mut self,
        working_dir: &Path,
        state_out: &Path,
        address: &ResourceAddress,
    ) -> Result<()>;

    /// Deliver a staged state file into a backend directory.
    fn copy_state(&mut self, from: &Path, to: &Path) -> Result<()>;

    /// Publish `file_name` (relative to `location`) as the backend's new state.
    fn push_state(&mut self, location: &BackendLocation, file_name: &str) -> Result<()>;

    /// Remove a state file previously delivered by `copy_state`.
    fn remove_state(&mut self, path: &Path) -> Result<()>;
}
