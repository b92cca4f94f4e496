use prune_backends::{HelmBackend, StorageBackend};
use prune_config::PruneConfig;
use prune_core::{ArtifactBackend, SweepError, SweepOptions};
use std::env::VarError;
use std::sync::Arc;

fn require(name: &str, value: Result<String, VarError>) -> Result<String, SweepError> {
    match value {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SweepError::Setup(format!("{} must be set", name))),
    }
}

pub fn apply_env_overrides(config: &mut PruneConfig) {
    if let Ok(url) = std::env::var("GITHUB_API_URL") {
        config.github_api_url = url;
    }

    if let Ok(context) = std::env::var("HELM_KUBECONTEXT") {
        config.helm.kube_context = Some(context);
    }
}

pub fn github_token() -> Result<String, SweepError> {
    require("GITHUB_ACCESS_TOKEN", std::env::var("GITHUB_ACCESS_TOKEN"))
}

pub fn create_helm_backend(config: &PruneConfig) -> Arc<dyn ArtifactBackend> {
    Arc::new(HelmBackend::new(&config.helm))
}

pub fn create_storage_backend(
    config: &PruneConfig,
) -> Result<Arc<dyn ArtifactBackend>, SweepError> {
    let account_name = require(
        "AZURE_STORAGE_ACCOUNT_NAME",
        std::env::var("AZURE_STORAGE_ACCOUNT_NAME"),
    )?;
    let account_key = require(
        "AZURE_STORAGE_ACCOUNT_KEY",
        std::env::var("AZURE_STORAGE_ACCOUNT_KEY"),
    )?;

    let backend = StorageBackend::new(&config.storage, account_name, account_key)
        .map_err(|e| SweepError::Setup(e.to_string()))?;

    Ok(Arc::new(backend))
}

pub fn create_sweep_options(config: &PruneConfig, dry_run: bool) -> SweepOptions {
    SweepOptions {
        always_live_branches: config.always_live_branches.clone(),
        dry_run,
    }
}
