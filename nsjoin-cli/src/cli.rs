//! CLI argument definitions

use clap::{Parser, Subcommand};

const EXIT_STATUS_HELP: &str = "\
Exit status:
  0   success, or _NSLISTENERPID unset/empty
  1   _NSLISTENERPID is not a positive decimal pid
  2   /proc/<pid>/ns/net could not be opened
  3   setns(2) failed
  64  invalid command line
  70  command failed";

#[derive(Parser)]
#[command(name = "nsjoin")]
#[command(about = "Network namespace join hook", long_about = None)]
#[command(version)]
#[command(after_help = EXIT_STATUS_HELP)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show which network namespace the environment asks to join
    Resolve {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show network namespace information
    Namespace {
        /// Process ID (default: current process, as seen from a runtime thread)
        #[arg(short, long)]
        pid: Option<i32>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}
