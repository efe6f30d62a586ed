//! sympredict CLI binary.

use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use sympredict::cli::{args::*, commands::*};
use sympredict::logging::{init_logging, level_for_verbosity};

fn main() {
    // Parse command line arguments using clap
    let args = SympredictArgs::parse();

    init_logging(level_for_verbosity(args.verbosity()), args.log_json);

    let command = args.command.name();

    if let Err(e) = execute_command(args).with_context(|| format!("{command} failed")) {
        error!("{e:#}");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
