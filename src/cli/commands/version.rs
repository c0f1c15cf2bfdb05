//! Version command implementation

use crate::cli::Output;
use crate::parallel::{ExecutionStrategy, ParallelConfig};
use crate::{PKG_DESCRIPTION, PKG_NAME, VERSION};
use anyhow::Result;

/// Execute the version command
pub async fn execute(output: &Output) -> Result<()> {
    let repository = env!("CARGO_PKG_REPOSITORY");

    // The version line itself is the command's result
    println!("{} {}", PKG_NAME, VERSION);

    output.category("About");
    output.key_value("Description:", PKG_DESCRIPTION, false);
    output.key_value("Repository:", repository, false);

    output.category("Build Information");
    output.key_value("Target:", std::env::consts::ARCH, false);
    output.key_value("Profile:", if cfg!(debug_assertions) { "debug" } else { "release" }, false);
    let defaults = ParallelConfig::default();
    let workers = ExecutionStrategy::calculate_optimal_workers(defaults.max_threads, defaults.thread_percentage);
    output.key_value("Default workers:", &workers.to_string(), false);

    Ok(())
}
