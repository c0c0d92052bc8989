//! Path normalization for backend locations.
use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::{Component, Path, PathBuf};

/// Placeholder shown instead of the staging root in dry-run notices.
pub const STAGING_PLACEHOLDER: &str = "$temp";

/// Resolve `input` to an absolute path using the real home and working directories.
///
/// The home directory is only looked up when `input` starts with `~`.
pub fn resolve_path(input: &Path) -> Result<PathBuf> {
    let cwd = env::current_dir().context("determine current working directory")?;
    let home = if expands_home(input) {
        Some(dirs::home_dir().ok_or_else(|| anyhow!("cannot determine home directory"))?)
    } else {
        None
    };
    Ok(resolve_path_with(input, home.as_deref(), &cwd))
}

/// Pure resolution: expand a leading `~`, anchor relative paths at `cwd`, and
/// clean `.`/`..` components lexically.
pub fn resolve_path_with(input: &Path, home: Option<&Path>, cwd: &Path) -> PathBuf {
    let expanded = match (home, home_relative(input)) {
        (Some(home), Some(rest)) => home.join(rest),
        _ => input.to_path_buf(),
    };
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };
    clean(&absolute)
}

/// Render `path` with `root` replaced by the staging placeholder.
pub fn redact_staging(path: &Path, root: Option<&Path>) -> String {
    if let Some(root) = root {
        if let Ok(relative) = path.strip_prefix(root) {
            if relative.as_os_str().is_empty() {
                return STAGING_PLACEHOLDER.to_string();
            }
            return format!("{STAGING_PLACEHOLDER}/{}", relative.display());
        }
    }
    path.display().to_string()
}

fn expands_home(input: &Path) -> bool {
    home_relative(input).is_some()
}

// Only `~` and `~/...` expand; `~user/...` is left alone.
fn home_relative(input: &Path) -> Option<&Path> {
    let text = input.to_str()?;
    if text == "~" {
        return Some(Path::new(""));
    }
    text.strip_prefix("~/").map(Path::new)
}

fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() && !cleaned.has_root() {
                    cleaned.push(component);
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}
