#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! nvdv: read and adjust NVIDIA digital vibrance.

mod cli;
mod commands;
mod nvapi;
mod types;
mod vibrance;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();

    let ctx = OutputCtx::new(
        cli.output,
        cli.json,
        cli.verbose,
        cli.no_header,
        cli.debug,
    );

    match commands::dispatch(&cli, &ctx) {
        Ok(()) => {}
        Err(err) => {
            let error_output = ErrorOutput::from_vibrance_error(&err);
            write_error(&error_output, ctx.format);
            std::process::exit(err.exit_code());
        }
    }
}
