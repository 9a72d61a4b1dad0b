use std::path::{Path, PathBuf};

use humscribe_core::PipelineConfig;
use humscribe_services::RenderConfig;

#[derive(Debug, serde::Serialize, serde::Deserialize, Default, PartialEq)]
pub(super) struct AppConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

pub(super) fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("humscribe")
        .join("config.toml")
}

/// Load from `path`, or the default location; missing or broken files give defaults
pub(super) fn load_config(path: Option<&Path>) -> AppConfig {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let Ok(text) = std::fs::read_to_string(&path) else {
        return AppConfig::default();
    };
    toml::from_str(&text).unwrap_or_else(|e| {
        tracing::warn!("Ignoring invalid config {}: {e}", path.display());
        AppConfig::default()
    })
}
