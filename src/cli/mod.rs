//! Command-line interface layer: argument parsing, dispatch, reporting and
//! exit status mapping.

pub mod args;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

use crate::error::AnalyzeError;

pub fn run_cli(args: Arguments) -> ExitStatus {
    let Some(args) = args.with_command_or_help() else {
        return ExitStatus::Success;
    };

    let json = args.json();
    let verbose = args.verbose();

    match run::run(args) {
        Ok(outcome) => {
            report::print(&outcome, json, verbose);
            ExitStatus::Success
        }
        Err(error) => {
            report::print_error(&error);
            if error.downcast_ref::<AnalyzeError>().is_some() {
                ExitStatus::Failure
            } else {
                ExitStatus::Error
            }
        }
    }
}
