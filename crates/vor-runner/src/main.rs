//! Host loop for the vor spatial partition.
//!
//! This binary:
//! 1. Reads configuration from `VOR_*` environment variables
//! 2. Generates sites and builds the partition
//! 3. Orbits a probe node through the partition, polling its cell each step
//! 4. Writes a JSON summary of the cells visited to stdout
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

mod config;
mod sim;

use std::io::{self, Write as _};

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::RunnerConfig;

/// Log levels used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_DIRECTIVES: &str = "vor_runner=info,vor_partition=info";

/// `RUST_LOG` replaces the defaults entirely when it parses.
fn log_filter(env: Option<&str>) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

fn main() -> eyre::Result<()> {
    // Initialize logging
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter(env.as_deref()))
        .init();

    let config = RunnerConfig::from_env()?;
    info!(?config, "starting vor runner");

    let summary = sim::run(&config)?;
    info!(
        transitions = summary.transitions.len(),
        mismatches = summary.mismatches,
        "run complete"
    );

    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &summary)?;
    writeln!(out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter() {
        let filter = log_filter(None).to_string();
        assert!(filter.contains("vor_runner=info"));
        assert!(filter.contains("vor_partition=info"));
    }

    #[test]
    fn test_env_overrides_default_levels() {
        let filter = log_filter(Some("vor_partition=debug")).to_string();
        assert!(filter.contains("vor_partition=debug"));
        assert!(!filter.contains("vor_partition=info"));
    }
}
