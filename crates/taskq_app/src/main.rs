use std::process::ExitCode;

use clap::Parser;
use taskq_app::cli::{self, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    match cli::dispatch(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
