//! Resolved, immutable configuration for one move.
use crate::cli::MoveArgs;
use crate::paths::resolve_path;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Address selecting one resource in both the source and target state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAddress(String);

impl ResourceAddress {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(anyhow!("resource address must not be empty"));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Absolute path of a directory configured with a terraform backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendLocation(PathBuf);

impl BackendLocation {
    /// Wrap an already absolute path.
    pub fn new(path: PathBuf) -> Result<Self> {
        if !path.is_absolute() {
            return Err(anyhow!(
                "backend location must be absolute: {}",
                path.display()
            ));
        }
        Ok(Self(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl fmt::Display for BackendLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Whether backend operations run for real or are only described.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    DryRun,
    Live,
}

impl RunMode {
    pub fn from_dry_run_flag(dry_run: bool) -> Self {
        if dry_run {
            RunMode::DryRun
        } else {
            RunMode::Live
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == RunMode::DryRun
    }
}

/// Everything the orchestrator needs, resolved once before any side effect.
#[derive(Debug, Clone)]
pub struct MoveConfig {
    pub resource: ResourceAddress,
    pub source: BackendLocation,
    pub target: BackendLocation,
    pub mode: RunMode,
}

impl MoveConfig {
    /// Resolve raw CLI inputs into locations; the source defaults to the CWD.
    pub fn resolve(args: &MoveArgs) -> Result<Self> {
        let resource = ResourceAddress::parse(&args.resource_address)?;
        let source = match &args.source_dir {
            Some(dir) => resolve_path(dir)
                .with_context(|| format!("resolve source directory {}", dir.display()))?,
            None => env::current_dir().context("determine current working directory")?,
        };
        let target = resolve_path(&args.target_dir)
            .with_context(|| format!("resolve target directory {}", args.target_dir.display()))?;
        Self::new(
            resource,
            source,
            target,
            RunMode::from_dry_run_flag(args.dry_run),
        )
    }

    /// Reject a move onto itself. Paths are compared after resolving
    /// symlinks when both directories exist, and lexically otherwise.
    pub fn new(
        resource: ResourceAddress,
        source: PathBuf,
        target: PathBuf,
        mode: RunMode,
    ) -> Result<Self> {
        if same_directory(&source, &target) {
            return Err(anyhow!(
                "source and target resolve to the same directory: {}",
                source.display()
            ));
        }
        Ok(Self {
            resource,
            source: BackendLocation::new(source)?,
            target: BackendLocation::new(target)?,
            mode,
        })
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(source: Option<&str>, target: &str, dry_run: bool) -> MoveArgs {
        MoveArgs {
            resource_address: "aws_instance.foo".to_string(),
            target_dir: PathBuf::from(target),
            source_dir: source.map(PathBuf::from),
            dry_run,
            terraform: "terraform".to_string(),
            verbose: false,
        }
    }

    #[test]
    fn empty_resource_address_is_rejected() {
        assert!(ResourceAddress::parse("").is_err());
        assert!(ResourceAddress::parse("   ").is_err());
        assert_eq!(
            ResourceAddress::parse("module.a.aws_s3_bucket.b")
                .expect("valid address")
                .as_str(),
            "module.a.aws_s3_bucket.b"
        );
    }

    #[test]
    fn source_defaults_to_current_directory() {
        let config = MoveConfig::resolve(&args(None, "/b", true)).expect("resolve");
        let cwd = env::current_dir().expect("cwd");
        assert_eq!(config.source.path(), cwd.as_path());
        assert_eq!(config.target.path(), Path::new("/b"));
        assert_eq!(config.mode, RunMode::DryRun);
    }

    #[test]
    fn explicit_locations_and_live_mode() {
        let config = MoveConfig::resolve(&args(Some("/a"), "/b", false)).expect("resolve");
        assert_eq!(config.source.path(), Path::new("/a"));
        assert_eq!(config.target.path(), Path::new("/b"));
        assert_eq!(config.mode, RunMode::Live);
    }

    #[test]
    fn same_source_and_target_is_rejected() {
        let err = MoveConfig::resolve(&args(Some("/a/./x"), "/a/x", true))
            .expect_err("same directory must fail");
        assert!(err.to_string().contains("same directory"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_alias_of_the_source_is_rejected() {
        let scratch = tempfile::tempdir().expect("scratch dir");
        let real = scratch.path().join("real");
        let alias = scratch.path().join("alias");
        fs::create_dir(&real).expect("create dir");
        std::os::unix::fs::symlink(&real, &alias).expect("symlink");

        let err = MoveConfig::new(
            ResourceAddress::parse("aws_instance.foo").expect("address"),
            real.clone(),
            alias,
            RunMode::DryRun,
        )
        .expect_err("alias of the same directory must fail");
        assert!(err.to_string().contains("same directory"));

        let other = scratch.path().join("other");
        fs::create_dir(&other).expect("create dir");
        MoveConfig::new(
            ResourceAddress::parse("aws_instance.foo").expect("address"),
            real,
            other,
            RunMode::DryRun,
        )
        .expect("distinct directories");
    }

    #[test]
    fn run_mode_follows_the_flag() {
        assert!(RunMode::from_dry_run_flag(true).is_dry_run());
        assert!(!RunMode::from_dry_run_flag(false).is_dry_run());
    }

    #[test]
    fn relative_backend_location_is_rejected() {
        assert!(BackendLocation::new(PathBuf::from("relative")).is_err());
    }
}
