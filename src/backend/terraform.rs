use super::{StateBackend, StateDocument};
use crate::config::{BackendLocation, ResourceAddress};
use crate::staging::publish_file;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

/// Live backend: every operation runs the terraform CLI.
#[derive(Debug, Clone)]
pub struct TerraformCli {
    argv: Vec<String>,
}

impl TerraformCli {
    /// Build from a command line such as `terraform` or `tofu -chdir=.`.
    pub fn from_command_line(command: &str) -> Result<Self> {
        let argv = shell_words::split(command)
            .with_context(|| format!("parse terraform command: {command}"))?;
        if argv.is_empty() {
            return Err(anyhow!("terraform command is empty"));
        }
        Ok(Self { argv })
    }

    fn program(&self) -> Result<PathBuf> {
        which::which(&self.argv[0]).with_context(|| format!("locate {} on PATH", self.argv[0]))
    }

    fn command(&self, dir: &Path, args: &[&str]) -> Result<Command> {
        let mut cmd = Command::new(self.program()?);
        cmd.args(&self.argv[1..])
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null());
        Ok(cmd)
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut words: Vec<&str> = self.argv.iter().map(String::as_str).collect();
        words.extend_from_slice(args);
        shell_words::join(words)
    }

    /// Run with output going straight to the operator's terminal.
    fn run_streaming(&self, dir: &Path, args: &[&str], show_stdout: bool) -> Result<()> {
        let description = self.describe(args);
        let mut cmd = self.command(dir, args)?;
        cmd.stderr(Stdio::inherit());
        cmd.stdout(if show_stdout {
            Stdio::inherit()
        } else {
            Stdio::null()
        });

        let start = Instant::now();
        let status = cmd
            .status()
            .with_context(|| format!("spawn `{description}`"))?;
        tracing::info!(
            command = %description,
            dir = %dir.display(),
            elapsed_ms = start.elapsed().as_millis(),
            code = ?status.code(),
            "terraform command finished"
        );

        if !status.success() {
            return Err(anyhow!(
                "`{description}` in {} failed with {status}",
                dir.display()
            ));
        }
        Ok(())
    }
}

impl StateBackend for TerraformCli {
    fn initialize(&mut self, location: &BackendLocation) -> Result<()> {
        self.run_streaming(location.path(), &["init"], false)
    }

    fn pull_state(&mut self, location: &BackendLocation) -> Result<Option<StateDocument>> {
        let args = ["state", "pull"];
        let description = self.describe(&args);
        let start = Instant::now();
        let output = self
            .command(location.path(), &args)?
            .output()
            .with_context(|| format!("spawn `{description}`"))?;
        tracing::info!(
            command = %description,
            dir = %location,
            elapsed_ms = start.elapsed().as_millis(),
            state_bytes = output.stdout.len(),
            "terraform command finished"
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "`{description}` in {location} failed with {}: {}",
                output.status,
                stderr.trim()
            ));
        }
        Ok(Some(StateDocument::new(output.stdout)))
    }

    fn move_resource(
        &mut self,
        working_dir: &Path,
        state_out: &Path,
        address: &ResourceAddress,
    ) -> Result<()> {
        let state_out_arg = format!("-state-out={}", state_out.display());
        self.run_streaming(
            working_dir,
            &[
                "state",
                "mv",
                state_out_arg.as_str(),
                address.as_str(),
                address.as_str(),
            ],
            true,
        )
    }

    fn copy_state(&mut self, from: &Path, to: &Path) -> Result<()> {
        publish_file(from, to)
    }

    fn push_state(&mut self, location: &BackendLocation, file_name: &str) -> Result<()> {
        self.run_streaming(location.path(), &["state", "push", file_name], true)
    }

    fn remove_state(&mut self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("remove {}", path.display()))
    }
}
