use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;

mod backend;
mod cli;
mod config;
mod error;
mod logging;
mod output;
mod paths;
mod staging;
mod workflow;

use cli::MoveArgs;
use config::MoveConfig;
use error::MoveError;
use staging::TARGET_STATE_FILE;

fn main() -> ExitCode {
    let args = MoveArgs::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &MoveArgs) -> Result<()> {
    let config = MoveConfig::resolve(args)?;
    let mut backend = workflow::select_backend(config.mode, &args.terraform)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompt = io::stdout();
    workflow::run_move(&config, backend.as_mut(), &mut input, &mut prompt)?;
    Ok(())
}

fn report(err: &anyhow::Error) {
    let Some(move_err) = err.downcast_ref::<MoveError>() else {
        eprintln!("Error: {err:#}");
        return;
    };
    if matches!(move_err, MoveError::Declined) {
        println!("Exiting...");
        return;
    }
    eprintln!("Error: {move_err}");
    if move_err.leaves_target_copy() {
        eprintln!(
            "note: {TARGET_STATE_FILE} was left in the target directory; remove it once the target state is verified"
        );
    }
}
