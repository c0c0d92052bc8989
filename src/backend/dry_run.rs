use super::{StateBackend, StateDocument};
use crate::config::{BackendLocation, ResourceAddress};
use crate::output::dry_run_tag;
use crate::paths::redact_staging;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// An operation the dry-run backend was asked to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedOp {
    Initialize(PathBuf),
    PullState(PathBuf),
    MoveResource {
        working_dir: PathBuf,
        state_out: PathBuf,
        address: String,
    },
    CopyState {
        from: PathBuf,
        to: PathBuf,
    },
    PushState {
        location: PathBuf,
        file_name: String,
    },
    RemoveState(PathBuf),
}

impl PlannedOp {
    /// Human-readable notice, with the staging root shown as `$temp`.
    /// Removing the delivered copy has nothing to announce in a dry run.
    fn notice(&self, program: &str, staging_root: Option<&Path>) -> Option<String> {
        let shown = |path: &Path| redact_staging(path, staging_root);
        let tag = dry_run_tag();
        let text = match self {
            PlannedOp::Initialize(dir) => format!(
                "{tag} Would run '{program} init': \n  from {}",
                dir.display()
            ),
            PlannedOp::PullState(dir) => format!(
                "{tag} Would run '{program} state pull': \n  from {}",
                dir.display()
            ),
            PlannedOp::MoveResource {
                working_dir,
                state_out,
                address,
            } => format!(
                "{tag} Would run '{program} state mv -state-out={} {address} {address}'\n  from {}",
                shown(state_out),
                shown(working_dir)
            ),
            PlannedOp::CopyState { from, to } => format!(
                "{tag} Would copy mutated state file over to target state directory\n  from {}\n  to {}",
                shown(from),
                shown(to)
            ),
            PlannedOp::PushState {
                location,
                file_name,
            } => format!(
                "{tag} Would run '{program} state push {file_name}' from {}",
                location.display()
            ),
            PlannedOp::RemoveState(_) => return None,
        };
        Some(text)
    }
}

/// Describes every operation instead of running it.
#[derive(Debug, Default)]
pub struct DryRunBackend {
    program: String,
    staging_root: Option<PathBuf>,
    planned: Vec<PlannedOp>,
}

impl DryRunBackend {
    /// `program` is the command name shown in notices.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn planned(&self) -> &[PlannedOp] {
        &self.planned
    }

    fn plan(&mut self, op: PlannedOp) {
        if let Some(notice) = op.notice(&self.program, self.staging_root.as_deref()) {
            println!("{notice}");
        }
        tracing::debug!(?op, "dry run");
        self.planned.push(op);
    }
}

impl StateBackend for DryRunBackend {
    fn staging_ready(&mut self, root: &Path) {
        self.staging_root = Some(root.to_path_buf());
    }

    fn initialize(&mut self, location: &BackendLocation) -> Result<()> {
        self.plan(PlannedOp::Initialize(location.path().to_path_buf()));
        Ok(())
    }

    fn pull_state(&mut self, location: &BackendLocation) -> Result<Option<StateDocument>> {
        self.plan(PlannedOp::PullState(location.path().to_path_buf()));
        Ok(None)
    }

    fn move_resource(
        &mut self,
        working_dir: &Path,
        state_out: &Path,
        address: &ResourceAddress,
    ) -> Result<()> {
        self.plan(PlannedOp::MoveResource {
            working_dir: working_dir.to_path_buf(),
            state_out: state_out.to_path_buf(),
            address: address.to_string(),
        });
        Ok(())
    }

    fn copy_state(&mut self, from: &Path, to: &Path) -> Result<()> {
        self.plan(PlannedOp::CopyState {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        Ok(())
    }

    fn push_state(&mut self, location: &BackendLocation, file_name: &str) -> Result<()> {
        self.plan(PlannedOp::PushState {
            location: location.path().to_path_buf(),
            file_name: file_name.to_string(),
        });
        Ok(())
    }

    fn remove_state(&mut self, path: &Path) -> Result<()> {
        self.plan(PlannedOp::RemoveState(path.to_path_buf()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_operations_without_touching_the_filesystem() {
        let scratch = tempfile::tempdir().expect("scratch dir");
        let target =
            BackendLocation::new(scratch.path().to_path_buf()).expect("absolute location");
        let delivered = target.join("target-state.tfstate");
        let address = ResourceAddress::parse("aws_instance.foo").expect("address");
        let mut backend = DryRunBackend::new("terraform");

        backend.initialize(&target).expect("init");
        assert_eq!(backend.pull_state(&target).expect("pull"), None);
        backend
            .move_resource(scratch.path(), &delivered, &address)
            .expect("move");
        backend
            .copy_state(Path::new("/nonexistent/source"), &delivered)
            .expect("copy");
        backend
            .push_state(&target, "target-state.tfstate")
            .expect("push");
        backend.remove_state(&delivered).expect("remove");

        assert!(!delivered.exists());
        assert_eq!(backend.planned().len(), 6);
        assert_eq!(
            backend.planned()[2],
            PlannedOp::MoveResource {
                working_dir: scratch.path().to_path_buf(),
                state_out: delivered.clone(),
                address: "aws_instance.foo".to_string(),
            }
        );
        assert_eq!(backend.planned()[5], PlannedOp::RemoveState(delivered));
    }

    #[test]
    fn notices_redact_the_staging_root() {
        let root = Path::new("/tmp/terraform-moveAbC123");
        let op = PlannedOp::MoveResource {
            working_dir: root.to_path_buf(),
            state_out: root.join("target-state.tfstate"),
            address: "aws_instance.foo".to_string(),
        };
        let notice = op.notice("terraform", Some(root)).expect("move is announced");
        assert!(notice.ends_with(
            "Would run 'terraform state mv -state-out=$temp/target-state.tfstate aws_instance.foo aws_instance.foo'\n  from $temp"
        ));
        assert_eq!(
            PlannedOp::RemoveState(PathBuf::from("/b/target-state.tfstate"))
                .notice("terraform", Some(root)),
            None
        );
    }
}
