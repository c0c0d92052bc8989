//! Failure taxonomy for a move run.
use std::fmt;
use std::io;
use thiserror::Error;

/// One step of the move sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    InitSource,
    PullSource,
    InitTarget,
    PullTarget,
    MoveResource,
    CopyToTarget,
    PushTarget,
    RemoveTargetCopy,
}

impl Step {
    /// Heading printed before the step starts; cleanup runs silently.
    pub fn heading(self) -> Option<&'static str> {
        let heading = match self {
            Step::InitSource => "Initializing source state",
            Step::PullSource => "Pulling source state",
            Step::InitTarget => "Initializing target state",
            Step::PullTarget => "Pulling target state",
            Step::MoveResource => "Moving resource from source to target in local state",
            Step::CopyToTarget => "Copying updated state to target directory",
            Step::PushTarget => "Pushing updated target state",
            Step::RemoveTargetCopy => return None,
        };
        Some(heading)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Step::InitSource => "terraform init in source directory",
            Step::PullSource => "pulling state from source directory",
            Step::InitTarget => "terraform init in target directory",
            Step::PullTarget => "pulling state from target directory",
            Step::MoveResource => "moving resource",
            Step::CopyToTarget => "copying target state file",
            Step::PushTarget => "pushing state to target directory",
            Step::RemoveTargetCopy => "cleaning up target state file",
        };
        f.write_str(what)
    }
}

/// Why a move run stopped before completing.
#[derive(Debug, Error)]
pub enum MoveError {
    #[error("confirmation declined")]
    Declined,
    #[error("creating temporary directory: {0}")]
    Staging(#[source] io::Error),
    #[error("{step}: {source:#}")]
    Step {
        step: Step,
        #[source]
        source: anyhow::Error,
    },
    #[error("removing temporary directory: {0}")]
    StagingCleanup(#[source] io::Error),
}

impl MoveError {
    /// The step that failed, if the run got past staging.
    pub fn step(&self) -> Option<Step> {
        match self {
            MoveError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// True when the run stopped after the updated state was copied into the
    /// target directory, so that copy is still there.
    pub fn leaves_target_copy(&self) -> bool {
        matches!(
            self.step(),
            Some(Step::PushTarget | Step::RemoveTargetCopy)
        )
    }
}
