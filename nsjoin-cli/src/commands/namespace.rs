//! Namespace command implementation

use std::path::Path;

use anyhow::{Context, Result};
use nsjoin_core::TargetPid;
use nsjoin_namespace::{DEFAULT_PROC_ROOT, NetNamespace};

pub async fn execute(pid: Option<i32>, json: bool) -> Result<()> {
    let ns = match pid {
        Some(raw) => {
            let pid = TargetPid::new(raw).context("Invalid process ID")?;
            NetNamespace::of(Path::new(DEFAULT_PROC_ROOT), pid)
                .with_context(|| format!("Failed to read network namespace of PID {pid}"))?
        }
        // Read from a pool thread: it must have inherited the joined namespace
        None => tokio::task::spawn_blocking(NetNamespace::current_thread)
            .await
            .context("Namespace lookup task failed")?
            .context("Failed to read network namespace")?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&ns)?);
        return Ok(());
    }

    let target = pid.map_or_else(|| "current process".to_string(), |p| format!("PID {p}"));
    println!("Network namespace of {target}");
    println!("{:-<60}", "");
    println!("  NET:    {ns}");

    match ns.is_host(Path::new(DEFAULT_PROC_ROOT)) {
        Ok(true) => println!("\nProcess is in the host network namespace"),
        Ok(false) => println!("\nProcess is in an isolated network namespace"),
        Err(e) => tracing::debug!(error = %e, "Cannot compare with PID 1"),
    }

    Ok(())
}
