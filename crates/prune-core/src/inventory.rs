use crate::error::{Result, SweepError};
use crate::snapshot::{RepositorySlug, RepositorySnapshot, SnapshotSet};
use crate::source::SourceControl;
use tracing::info;

pub async fn fetch_snapshot(
    source: &dyn SourceControl,
    slug: &RepositorySlug,
    always_live_branches: &[String],
) -> Result<RepositorySnapshot> {
    let listing_error = |e| SweepError::SourceListing {
        repository: slug.to_string(),
        source: e,
    };

    let branches = source
        .list_branches(&slug.organization, &slug.repository)
        .await
        .map_err(listing_error)?;

    let pull_requests = source
        .list_open_pull_requests(&slug.organization, &slug.repository)
        .await
        .map_err(listing_error)?;

    info!(
        "Repository {}: {} branch(es), {} open pull request(s)",
        slug,
        branches.len(),
        pull_requests.len()
    );

    let live_branches = branches
        .into_iter()
        .chain(always_live_branches.iter().cloned());

    Ok(RepositorySnapshot::new(slug, live_branches, pull_requests))
}

/// Snapshots every repository before any artifact is looked at. The first
/// failing repository aborts the whole run.
pub async fn build_snapshots(
    source: &dyn SourceControl,
    slugs: &[RepositorySlug],
    always_live_branches: &[String],
) -> Result<SnapshotSet> {
    let mut snapshots = SnapshotSet::new();

    for slug in slugs {
        let snapshot = fetch_snapshot(source, slug, always_live_branches).await?;
        snapshots.insert(snapshot)?;
    }

    Ok(snapshots)
}
