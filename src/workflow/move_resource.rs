//! The move sequence: stage both states, move the resource into the target
//! copy, and push it back.
use super::gate;
use crate::backend::StateBackend;
use crate::config::{BackendLocation, MoveConfig};
use crate::error::{MoveError, Step};
use crate::output;
use crate::staging::{Staging, SOURCE_STATE_FILE, TARGET_STATE_FILE};
use std::io::{BufRead, Write};

/// Run one move end to end.
///
/// The staging area is destroyed exactly once whatever happens after it is
/// created. Completed steps are never undone: a failure after the push
/// leaves the target updated and reports the failing step.
pub fn run_move<B, R, W>(
    config: &MoveConfig,
    backend: &mut B,
    input: &mut R,
    prompt: &mut W,
) -> Result<(), MoveError>
where
    B: StateBackend + ?Sized,
    R: BufRead,
    W: Write,
{
    output::move_summary(config);
    gate::check(config.mode, input, prompt)?;

    let staging = Staging::create().map_err(MoveError::Staging)?;
    backend.staging_ready(staging.root());

    let outcome = run_steps(config, backend, &staging);
    let cleanup = staging.destroy().map_err(MoveError::StagingCleanup);
    outcome.and(cleanup)
}

fn run_steps<B>(config: &MoveConfig, backend: &mut B, staging: &Staging) -> Result<(), MoveError>
where
    B: StateBackend + ?Sized,
{
    let target_state = staging.path(TARGET_STATE_FILE);
    let delivered = config.target.join(TARGET_STATE_FILE);

    perform(Step::InitSource, || backend.initialize(&config.source))?;
    perform(Step::PullSource, || {
        pull_into(backend, &config.source, staging, SOURCE_STATE_FILE)
    })?;

    perform(Step::InitTarget, || backend.initialize(&config.target))?;
    perform(Step::PullTarget, || {
        pull_into(backend, &config.target, staging, TARGET_STATE_FILE)
    })?;

    // The staging root holds the source as `terraform.tfstate`, so the move
    // reads the source there and writes into the target's pulled copy.
    perform(Step::MoveResource, || {
        backend.move_resource(staging.root(), &target_state, &config.resource)
    })?;
    perform(Step::CopyToTarget, || {
        backend.copy_state(&target_state, &delivered)
    })?;
    perform(Step::PushTarget, || {
        backend.push_state(&config.target, TARGET_STATE_FILE)
    })?;
    output::step("Successfully moved!");

    perform(Step::RemoveTargetCopy, || backend.remove_state(&delivered))
}

fn pull_into<B>(
    backend: &mut B,
    location: &BackendLocation,
    staging: &Staging,
    artifact: &str,
) -> anyhow::Result<()>
where
    B: StateBackend + ?Sized,
{
    if let Some(document) = backend.pull_state(location)? {
        staging.write_artifact(artifact, &document)?;
    }
    Ok(())
}

fn perform<F>(step: Step, operation: F) -> Result<(), MoveError>
where
    F: FnOnce() -> anyhow::Result<()>,
{
    if let Some(heading) = step.heading() {
        output::step(heading);
    }
    tracing::debug!(?step, "step started");
    operation().map_err(|source| {
        tracing::debug!(?step, error = %format!("{source:#}"), "step failed");
        MoveError::Step { step, source }
    })
}

#[cfg(test)]
#[path = "move_resource_tests.rs"]
mod tests;
