//! Resolve command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use nsjoin_core::TargetPid;
use nsjoin_namespace::JoinConfig;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Resolution {
    variable: String,
    pid: Option<TargetPid>,
    path: Option<PathBuf>,
}

pub fn execute(json: bool) -> Result<()> {
    let config = JoinConfig::default();
    let pid = config
        .lookup_process_env()
        .with_context(|| format!("Failed to read {}", config.variable))?;

    let resolution = Resolution {
        variable: config.variable.clone(),
        pid,
        path: pid.map(|pid| config.ns_path(pid)),
    };

    tracing::debug!(?resolution, "Resolved join target");

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }

    match resolution.path {
        Some(path) => println!("{}", path.display()),
        None => println!("No network namespace requested ({} is unset)", config.variable),
    }

    Ok(())
}
