use anyhow::{Context, Result};
use figment::{Figment, providers::{Env, Format, Json, Serialized, Toml, Yaml}};

use super::BacksearchConfig;
use super::overrides::filter_null_values;
use super::smart_load;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

impl BacksearchConfig {
    /// Load the layered configuration.
    ///
    /// `custom_config` replaces the user and project files when given.
    /// `overrides` (typically built from CLI flags) win over everything;
    /// null values in it are dropped so unset flags don't mask lower layers.
    pub fn load(custom_config: Option<&str>, overrides: Option<serde_json::Value>) -> Result<Self> {
        let figment = Self::figment(custom_config, overrides);
        let config: BacksearchConfig = figment
            .extract()
            .context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Build the provider chain without extracting it
    pub fn figment(custom_config: Option<&str>, overrides: Option<serde_json::Value>) -> Figment {
        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG));  // Embedded defaults

        // If custom config is specified, use only that + defaults + env vars
        if let Some(custom_path) = custom_config {
            figment = figment.merge(smart_load::auto(custom_path));
        } else {
            // Standard priority: user config -> project config
            let user_config = Self::user_config_path();
            figment = figment
                // User config - support multiple formats
                .merge(Toml::file(&user_config))
                .merge(Json::file(user_config.replace(".toml", ".json")))
                .merge(Yaml::file(user_config.replace(".toml", ".yaml")))
                .merge(Yaml::file(user_config.replace(".toml", ".yml")))
                // Project config - support multiple formats
                .merge(Toml::file("backsearch.toml"))
                .merge(Json::file("backsearch.json"))
                .merge(Yaml::file("backsearch.yaml"))
                .merge(Yaml::file("backsearch.yml"));
        }

        // Environment variables, e.g. BACKSEARCH_SEARCH__MAX_DEPTH=4
        figment = figment.merge(Env::prefixed("BACKSEARCH_").split("__"));

        if let Some(overrides) = overrides {
            figment = figment.merge(Serialized::defaults(filter_null_values(overrides)));
        }

        figment
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/backsearch/config.toml", home),
            Err(_) => "~/.config/backsearch/config.toml".to_string(),
        }
    }
}
