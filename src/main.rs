mod cli;
mod error;

use crate::cli::{Cli, init_logging};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::from_args(std::env::args_os()) {
        Ok(Some(cli)) => cli,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            println!("{}", *err);
            return ExitCode::FAILURE;
        },
    };
    init_logging(cli.default_filter());

    match cli.execute().await {
        Ok(summary) => {
            tracing::info!(
                headers = summary.records,
                structs = summary.structures.len(),
                snapshots = summary.written(),
                "Finished building struct histories"
            );
            ExitCode::SUCCESS
        },
        Err(err) if err.is_usage() => {
            println!("{}", *err);
            ExitCode::FAILURE
        },
        Err(err) => {
            tracing::error!(error = ?err, "Failed to build struct histories");
            ExitCode::FAILURE
        },
    }
}
