use crate::command::{self, split_handle};
use async_trait::async_trait;
use prune_config::{StorageConfig, constants};
use prune_core::{ArtifactBackend, ArtifactRecord, BackendError, InventoryScope, SnapshotSet};
use serde::Deserialize;
use std::collections::HashMap;
use tokio::process::Command;
use tracing::info;

const CONTAINER_NOT_FOUND_MARKERS: &[&str] =
    &["ContainerNotFound", "The specified container does not exist"];

#[derive(Debug, Deserialize)]
struct BlobItem {
    name: String,
    #[serde(default)]
    metadata: Option<HashMap<String, String>>,
}

/// Blob containers holding per-branch builds, one container per repository.
pub struct StorageBackend {
    binary: String,
    account_name: String,
    account_key: String,
}

impl StorageBackend {
    pub fn new(
        config: &StorageConfig,
        account_name: String,
        account_key: String,
    ) -> Result<Self, BackendError> {
        if account_name.is_empty() || account_key.is_empty() {
            return Err(BackendError::Setup(
                "storage account name and key must both be set".to_string(),
            ));
        }

        Ok(Self {
            binary: config.binary.clone(),
            account_name,
            account_key,
        })
    }

    /// Credentials travel through the environment so they stay out of the
    /// process list.
    fn command(&self) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .env("AZURE_STORAGE_ACCOUNT", &self.account_name)
            .env("AZURE_STORAGE_KEY", &self.account_key);
        command
    }
}

pub fn container_name(organization: &str, repository: &str) -> String {
    format!(
        "{}-{}",
        organization.to_lowercase(),
        repository.to_lowercase()
    )
}

fn is_container_missing(error: &BackendError) -> bool {
    match error {
        BackendError::Command { stderr, .. } => CONTAINER_NOT_FOUND_MARKERS
            .iter()
            .any(|marker| stderr.contains(marker)),
        _ => false,
    }
}

fn branch_tag(metadata: &HashMap<String, String>) -> Option<String> {
    metadata
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(constants::BRANCH_METADATA_KEY))
        .map(|(_, value)| value.clone())
}

fn parse_blobs(
    stdout: &[u8],
    container: &str,
    repository_key: &str,
) -> Result<Vec<ArtifactRecord>, BackendError> {
    let blobs: Vec<BlobItem> = serde_json::from_slice(stdout)?;

    Ok(blobs
        .into_iter()
        .map(|blob| {
            let branch = blob.metadata.as_ref().and_then(branch_tag);
            let handle = format!("{}/{}", container, blob.name);
            ArtifactRecord::tagged(blob.name, handle, repository_key, branch)
        })
        .collect())
}

#[async_trait]
impl ArtifactBackend for StorageBackend {
    fn name(&self) -> &'static str {
        "storage"
    }

    async fn check(&self) -> Result<(), BackendError> {
        command::run(
            self.command().arg("version").arg("--output").arg("json"),
            "az version",
        )
        .await
        .map_err(|e| BackendError::Setup(format!("azure cli unavailable: {}", e)))?;

        Ok(())
    }

    fn inventory_scopes(&self, snapshots: &SnapshotSet) -> Vec<InventoryScope> {
        InventoryScope::per_repository(snapshots)
    }

    async fn list_artifacts(
        &self,
        scope: &InventoryScope,
    ) -> Result<Vec<ArtifactRecord>, BackendError> {
        let InventoryScope::Repository {
            key,
            organization,
            repository,
        } = scope
        else {
            return Err(BackendError::Other(anyhow::anyhow!(
                "blob inventory is listed per repository, got {}",
                scope
            )));
        };

        let container = container_name(organization, repository);
        info!("Listing blobs in container {}", container);

        let result = command::run(
            self.command()
                .args(["storage", "blob", "list"])
                .arg("--container-name")
                .arg(&container)
                .args(["--include", "m"])
                .args(["--num-results", "*"])
                .args(["--only-show-errors", "--output", "json"]),
            &format!("az storage blob list {}", container),
        )
        .await;

        match result {
            Ok(stdout) => parse_blobs(&stdout, &container, key),
            Err(e) if is_container_missing(&e) => Err(BackendError::NamespaceNotFound(container)),
            Err(e) => Err(e),
        }
    }

    async fn delete_artifact(&self, artifact: &ArtifactRecord) -> Result<(), BackendError> {
        let (container, name) = split_handle(&artifact.handle)?;

        command::run(
            self.command()
                .args(["storage", "blob", "delete"])
                .arg("--container-name")
                .arg(container)
                .arg("--name")
                .arg(name)
                .args(["--delete-snapshots", "include"])
                .arg("--only-show-errors"),
            &format!("az storage blob delete {}", artifact.handle),
        )
        .await?;

        Ok(())
    }
}
