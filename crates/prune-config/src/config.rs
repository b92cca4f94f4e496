use crate::constants;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Clone)]
pub struct PruneConfig {
    #[serde(default = "default_always_live_branches")]
    pub always_live_branches: Vec<String>,

    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    #[serde(default)]
    pub helm: HelmConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HelmConfig {
    #[serde(default = "default_helm_binary")]
    pub binary: String,

    pub kube_context: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_az_binary")]
    pub binary: String,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            always_live_branches: default_always_live_branches(),
            github_api_url: default_github_api_url(),
            helm: HelmConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for HelmConfig {
    fn default() -> Self {
        Self {
            binary: default_helm_binary(),
            kube_context: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            binary: default_az_binary(),
        }
    }
}

fn default_always_live_branches() -> Vec<String> {
    constants::DEFAULT_ALWAYS_LIVE_BRANCHES
        .iter()
        .map(|b| b.to_string())
        .collect()
}

fn default_github_api_url() -> String {
    constants::DEFAULT_GITHUB_API_URL.to_string()
}

fn default_helm_binary() -> String {
    constants::DEFAULT_HELM_BINARY.to_string()
}

fn default_az_binary() -> String {
    constants::DEFAULT_AZ_BINARY.to_string()
}

/// Loads `prune.toml`, falling back to defaults when the file does not exist.
pub async fn load_config(path: &Path) -> Result<PruneConfig, ConfigError> {
    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(PruneConfig::default());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: PruneConfig = toml::from_str(&content)?;

    Ok(config)
}
