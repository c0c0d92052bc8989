//! CLI argument parsing for the resource move.
//!
//! The CLI only collects raw inputs; path resolution and validation happen in
//! `config` so the orchestrator receives a fully resolved `MoveConfig`.
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Default terraform command used by the live backend.
pub const DEFAULT_TERRAFORM_COMMAND: &str = "terraform";

/// Root CLI entrypoint: move one resource from a source state to a target state.
#[derive(Parser, Debug)]
#[command(
    name = "move-resource",
    version,
    about = "Move a terraform resource from a source state directory to a target state directory",
    after_help = "Examples:\n  move-resource aws_instance.foo --target-dir ~/infra/prod\n  move-resource module.db.aws_db_instance.main --source-dir ./legacy --target-dir ./platform --dry-run=false"
)]
pub struct MoveArgs {
    /// Terraform resource address to move (used as both source and destination address)
    #[arg(value_name = "RESOURCE_ADDRESS")]
    pub resource_address: String,

    /// Target directory to move the terraform resource to
    #[arg(long, value_name = "DIR")]
    pub target_dir: PathBuf,

    /// Source directory to move the terraform resource from (defaults to CWD)
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// If true, only describe the moves without running them (`--dry-run=false` to apply)
    #[arg(
        long,
        value_name = "BOOL",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub dry_run: bool,

    /// Terraform command line to invoke (e.g. "tofu" or "terraform-1.5")
    #[arg(long, value_name = "CMD", default_value = DEFAULT_TERRAFORM_COMMAND)]
    pub terraform: String,

    /// Emit debug logs to stderr when RUST_LOG is unset
    #[arg(short, long)]
    pub verbose: bool,
}
