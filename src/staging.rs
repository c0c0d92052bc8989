//! Ephemeral staging area holding pulled and mutated state documents.
//!
//! One staging area exists per run. It is destroyed explicitly at the end of
//! the run, and the wrapped `TempDir` removes it on drop for any path that
//! never reaches the explicit destroy.
use crate::backend::StateDocument;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Artifact name for the pulled source state.
///
/// `terraform state mv` run inside the staging area picks this file up as
/// its local state, which is what makes the source the move's origin.
pub const SOURCE_STATE_FILE: &str = "terraform.tfstate";

/// Artifact name for the pulled, then mutated, target state. The same name
/// is used for the copy delivered into the target directory.
pub const TARGET_STATE_FILE: &str = "target-state.tfstate";

const STAGING_PREFIX: &str = "terraform-move";

#[derive(Debug)]
pub struct Staging {
    dir: TempDir,
}

impl Staging {
    /// Allocate a fresh, uniquely named staging directory.
    pub fn create() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(STAGING_PREFIX).tempdir()?;
        tracing::debug!(path = %dir.path().display(), "staging area created");
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a state document under `name`, replacing any previous content.
    pub fn write_artifact(&self, name: &str, document: &StateDocument) -> Result<PathBuf> {
        let path = self.path(name);
        fs::write(&path, document.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Recursively remove the staging area and everything in it.
    pub fn destroy(self) -> io::Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close()?;
        tracing::debug!(path = %path.display(), "staging area removed");
        Ok(())
    }
}

/// Copy `source` to `dest` through a sibling temp file so `dest` is never
/// observed half written.
pub fn publish_file(source: &Path, dest: &Path) -> Result<()> {
    let file_name = dest
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("staged");
    let tmp_path = dest
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!(".{file_name}.tmp"));
    fs::copy(source, &tmp_path).with_context(|| format!("publish {}", dest.display()))?;
    if let Err(err) = fs::rename(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err).with_context(|| format!("publish {}", dest.display()));
    }
    Ok(())
}
