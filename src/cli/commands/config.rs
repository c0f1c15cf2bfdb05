//! Configuration command implementations
//!
//! Commands for inspecting the merged backsearch configuration.

use crate::cli::{ConfigCommands, ConfigFormatArg, Output};
use crate::config::BacksearchConfig;
use anyhow::Result;

/// Execute config commands
pub async fn execute(cmd: ConfigCommands, config_path: Option<&str>, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { format } => show(config_path, format).await,
        ConfigCommands::Validate => validate(config_path, output).await,
    }
}

async fn show(config_path: Option<&str>, format: ConfigFormatArg) -> Result<()> {
    let config = BacksearchConfig::load(config_path, None)?;

    let rendered = match format {
        ConfigFormatArg::Toml => config.to_toml()?,
        ConfigFormatArg::Json => serde_json::to_string_pretty(&config)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

async fn validate(config_path: Option<&str>, output: &Output) -> Result<()> {
    output.header("Validating Configuration");

    let config = BacksearchConfig::load(config_path, None)?;
    output.success("Configuration is valid");
    output.blank_line();

    output.key_value("Config file:", config_path.unwrap_or("(defaults + project/user files)"), false);
    output.key_value("Max depth:", &config.search.max_depth.to_string(), false);
    output.key_value("Stop on first:", &config.search.stop_on_first.to_string(), false);
    output.key_value("Pattern kind:", &format!("{:?}", config.search.pattern_kind), false);
    output.key_value("Mode:", &format!("{:?}", config.parallel.mode), true);
    output.key_value("Max threads:", &config.parallel.max_threads.to_string(), false);

    Ok(())
}
