use crate::artifact::ArtifactRecord;
use crate::error::BackendError;
use crate::snapshot::SnapshotSet;
use async_trait::async_trait;
use std::fmt;

/// The part of a backend's inventory one listing call covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryScope {
    All,
    Repository {
        key: String,
        organization: String,
        repository: String,
    },
}

impl fmt::Display for InventoryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryScope::All => write!(f, "all releases"),
            InventoryScope::Repository {
                organization,
                repository,
                ..
            } => write!(f, "{}/{}", organization, repository),
        }
    }
}

impl InventoryScope {
    pub fn per_repository(snapshots: &SnapshotSet) -> Vec<InventoryScope> {
        snapshots
            .iter()
            .map(|s| InventoryScope::Repository {
                key: s.key(),
                organization: s.organization.clone(),
                repository: s.repository.clone(),
            })
            .collect()
    }
}

/// Lists and deletes deployed artifacts.
#[async_trait]
pub trait ArtifactBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Verifies credentials and connectivity before anything is listed.
    async fn check(&self) -> Result<(), BackendError> {
        Ok(())
    }

    fn inventory_scopes(&self, snapshots: &SnapshotSet) -> Vec<InventoryScope>;

    async fn list_artifacts(
        &self,
        scope: &InventoryScope,
    ) -> Result<Vec<ArtifactRecord>, BackendError>;

    async fn delete_artifact(&self, artifact: &ArtifactRecord) -> Result<(), BackendError>;
}
