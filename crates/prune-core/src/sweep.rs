use crate::artifact::ArtifactRecord;
use crate::backend::{ArtifactBackend, InventoryScope};
use crate::error::{Result, SweepError};
use crate::inventory;
use crate::reconcile;
use crate::snapshot::{RepositorySlug, SnapshotSet};
use crate::source::SourceControl;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Branches treated as live even when the branch listing omits them.
    pub always_live_branches: Vec<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    pub artifact: String,
    pub cause: String,
}

/// Outcome of one sweep
#[derive(Debug, Default, Clone)]
pub struct SweepSummary {
    pub repositories: usize,
    pub examined: usize,
    pub kept: usize,
    pub ignored: usize,
    pub deleted: Vec<String>,
    pub would_delete: Vec<String>,
    pub failures: Vec<DeleteFailure>,
}

pub struct Sweeper {
    source: Arc<dyn SourceControl>,
    backend: Arc<dyn ArtifactBackend>,
    options: SweepOptions,
}

impl Sweeper {
    pub fn new(
        source: Arc<dyn SourceControl>,
        backend: Arc<dyn ArtifactBackend>,
        options: SweepOptions,
    ) -> Self {
        Self {
            source,
            backend,
            options,
        }
    }

    pub async fn run(&self, slugs: &[RepositorySlug]) -> Result<SweepSummary> {
        info!(
            "Starting {} clean up run for {} repositories",
            self.backend.name(),
            slugs.len()
        );

        self.backend
            .check()
            .await
            .map_err(|e| SweepError::Setup(e.to_string()))?;

        let snapshots = inventory::build_snapshots(
            self.source.as_ref(),
            slugs,
            &self.options.always_live_branches,
        )
        .await?;

        let artifacts = self.collect_inventory(&snapshots).await?;
        let reconciliation = reconcile::reconcile(&snapshots, &artifacts);

        let mut summary = SweepSummary {
            repositories: snapshots.len(),
            examined: artifacts.len(),
            kept: reconciliation.kept.len(),
            ignored: reconciliation.ignored.len(),
            ..Default::default()
        };

        for orphan in &reconciliation.orphans {
            self.remove(orphan, &mut summary).await;
        }

        info!(
            "Clean up complete: {} examined, {} kept, {} ignored, {} deleted, {} failed",
            summary.examined,
            summary.kept,
            summary.ignored,
            summary.deleted.len(),
            summary.failures.len()
        );

        Ok(summary)
    }

    async fn collect_inventory(&self, snapshots: &SnapshotSet) -> Result<Vec<ArtifactRecord>> {
        let mut artifacts = Vec::new();

        for scope in self.backend.inventory_scopes(snapshots) {
            match self.backend.list_artifacts(&scope).await {
                Ok(listed) => {
                    info!("Found {} artifact(s) in {}", listed.len(), scope);
                    artifacts.extend(listed);
                }
                Err(e) if e.is_namespace_missing() && scope != InventoryScope::All => {
                    info!("No artifact container for {}, nothing to clean", scope);
                }
                Err(e) => {
                    return Err(SweepError::InventoryListing {
                        scope: scope.to_string(),
                        source: e,
                    });
                }
            }
        }

        Ok(artifacts)
    }

    async fn remove(&self, orphan: &ArtifactRecord, summary: &mut SweepSummary) {
        if self.options.dry_run {
            info!("Dry run: would delete {}", orphan.name);
            summary.would_delete.push(orphan.name.clone());
            return;
        }

        info!("Deleting {}", orphan.name);

        match self.backend.delete_artifact(orphan).await {
            Ok(()) => {
                info!("Deleted {}", orphan.name);
                summary.deleted.push(orphan.name.clone());
            }
            Err(e) => {
                error!("Failed to delete {}: {}", orphan.name, e);
                summary.failures.push(DeleteFailure {
                    artifact: orphan.name.clone(),
                    cause: e.to_string(),
                });
            }
        }
    }
}

impl SweepSummary {
    pub fn log_failures(&self) {
        for failure in &self.failures {
            warn!("Not deleted: {} ({})", failure.artifact, failure.cause);
        }
    }
}
