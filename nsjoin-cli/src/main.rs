//! nsjoin CLI
//!
//! Runs the network namespace hook at startup, then inspects the result.

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;

/// Bad command line (sysexits `EX_USAGE`)
const EXIT_USAGE: i32 = 64;

/// A subcommand failed (sysexits `EX_SOFTWARE`)
const EXIT_FAILURE: i32 = 70;

fn main() {
    // Before anything spawns a thread: setns only moves the calling thread.
    nsjoin_namespace::init();

    // Parse command-line arguments; statuses 1-3 belong to the hook
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(EXIT_USAGE);
        }
        Err(e) => e.exit(),
    };

    // Setup logging based on verbosity, RUST_LOG wins if set
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            process::exit(EXIT_FAILURE);
        }
    };

    // Execute the command
    let result = runtime.block_on(commands::dispatch(cli.command));

    // Handle errors
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(EXIT_FAILURE);
    }
}
