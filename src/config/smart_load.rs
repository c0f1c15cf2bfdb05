use std::path::Path;
use figment::providers::{Data, Format, Json, Toml, Yaml};
use figment::value::{Dict, Map};
use figment::{Metadata, Profile, Provider};
use tracing::debug;

/// Configuration file formats understood by `--config`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_extension(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }
}

/// Pick a provider for `path` from its extension, sniffing the content when
/// the extension is unknown. Anything undecidable is read as TOML.
pub fn auto<P: AsRef<Path>>(path: P) -> impl Provider {
    let path = path.as_ref();
    let format = ConfigFormat::from_extension(path).unwrap_or_else(|| {
        let sniffed = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| detect_format_from_content(&content));
        debug!(path = %path.display(), format = ?sniffed, "Config format not given by extension");
        sniffed.unwrap_or(ConfigFormat::Toml)
    });

    match format {
        ConfigFormat::Toml => FileProvider::Toml(Toml::file(path)),
        ConfigFormat::Json => FileProvider::Json(Json::file(path)),
        ConfigFormat::Yaml => FileProvider::Yaml(Yaml::file(path)),
    }
}

/// One concrete provider type for whichever format was chosen
enum FileProvider {
    Toml(Data<Toml>),
    Json(Data<Json>),
    Yaml(Data<Yaml>),
}

impl Provider for FileProvider {
    fn metadata(&self) -> Metadata {
        match self {
            FileProvider::Toml(p) => p.metadata(),
            FileProvider::Json(p) => p.metadata(),
            FileProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        match self {
            FileProvider::Toml(p) => p.data(),
            FileProvider::Json(p) => p.data(),
            FileProvider::Yaml(p) => p.data(),
        }
    }
}

/// Guess the format of a configuration file from its content
pub fn detect_format_from_content(content: &str) -> Option<ConfigFormat> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }

    if (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']') && !trimmed.contains('\n'))
    {
        return Some(ConfigFormat::Json);
    }

    let lines = || trimmed.lines().map(str::trim).filter(|line| !line.starts_with('#'));

    // Section headers or `key = value` mean TOML
    if lines().any(|line| {
        (line.starts_with('[') && line.ends_with(']')) || (line.contains('=') && !line.contains(':'))
    }) {
        return Some(ConfigFormat::Toml);
    }

    if trimmed.starts_with("---") || lines().any(|line| line.contains(':')) {
        return Some(ConfigFormat::Yaml);
    }

    None
}
