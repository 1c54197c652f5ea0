use crate::cli::Commands;
use anyhow::Result;

pub mod namespace;
pub mod resolve;

/// Dispatch command to appropriate handler
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Resolve { json } => resolve::execute(json),

        Commands::Namespace { pid, json } => namespace::execute(pid, json).await,

        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

fn print_version() {
    println!("nsjoin {}", env!("CARGO_PKG_VERSION"));
    println!(
        "Joins the network namespace named by {} at startup",
        nsjoin_namespace::DEFAULT_VARIABLE
    );
}
