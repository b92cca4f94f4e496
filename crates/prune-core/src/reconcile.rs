use crate::artifact::{ArtifactRecord, Ownership};
use crate::naming::{self, Identity};
use crate::snapshot::{RepositorySnapshot, SnapshotSet};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Orphan,
    /// No configured repository owns the artifact; it is never touched.
    Ignored,
}

/// Artifacts split by verdict, each list in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub kept: Vec<ArtifactRecord>,
    pub orphans: Vec<ArtifactRecord>,
    pub ignored: Vec<ArtifactRecord>,
}

impl Reconciliation {
    pub fn orphan_names(&self) -> Vec<&str> {
        self.orphans.iter().map(|a| a.name.as_str()).collect()
    }
}

pub fn classify(snapshots: &SnapshotSet, artifact: &ArtifactRecord) -> Verdict {
    match &artifact.ownership {
        Ownership::Named => {
            let Some(prefix) = naming::repository_prefix(&artifact.name) else {
                return Verdict::Ignored;
            };
            match snapshots.get(prefix) {
                Some(snapshot) if keeps_release(snapshot, &artifact.name) => Verdict::Keep,
                Some(_) => Verdict::Orphan,
                None => Verdict::Ignored,
            }
        }
        Ownership::Tagged { repository, branch } => match snapshots.get(repository) {
            Some(snapshot) => match branch {
                Some(branch) if snapshot.is_live_branch(branch) => Verdict::Keep,
                _ => Verdict::Orphan,
            },
            None => Verdict::Ignored,
        },
    }
}

fn keeps_release(snapshot: &RepositorySnapshot, name: &str) -> bool {
    let repository = snapshot.key();

    let branch_match = snapshot.live_branches.iter().any(|branch| {
        naming::derive_name(&repository, &Identity::Branch(branch.clone())) == name
    });

    branch_match
        || snapshot
            .open_pull_requests
            .iter()
            .any(|pr| naming::derive_name(&repository, &Identity::PullRequest(*pr)) == name)
}

pub fn reconcile(snapshots: &SnapshotSet, artifacts: &[ArtifactRecord]) -> Reconciliation {
    let mut result = Reconciliation::default();

    for artifact in artifacts {
        match classify(snapshots, artifact) {
            Verdict::Keep => {
                debug!("Keeping {}: matches a live branch or pull request", artifact.name);
                result.kept.push(artifact.clone());
            }
            Verdict::Orphan => {
                info!("Orphaned artifact {}: no live branch or pull request", artifact.name);
                result.orphans.push(artifact.clone());
            }
            Verdict::Ignored => {
                debug!("Ignoring {}: not owned by a configured repository", artifact.name);
                result.ignored.push(artifact.clone());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RepositorySlug;

    fn snapshot(slug: &str, branches: &[&str], prs: &[u64]) -> RepositorySnapshot {
        let slug: RepositorySlug = slug.parse().unwrap();
        RepositorySnapshot::new(
            &slug,
            branches.iter().map(|b| b.to_string()),
            prs.iter().copied(),
        )
    }

    fn single(snapshot: RepositorySnapshot) -> SnapshotSet {
        [snapshot].into_iter().collect()
    }

    #[test]
    fn test_named_without_hyphen_is_ignored() {
        let snapshots = single(snapshot("acme/myapp", &["main"], &[]));
        let artifact = ArtifactRecord::named("myapp", "default/myapp");
        assert_eq!(classify(&snapshots, &artifact), Verdict::Ignored);
    }

    #[test]
    fn test_named_branch_match() {
        let snapshots: SnapshotSet = [snapshot("acme/myapp", &["feature/x"], &[])]
            .into_iter()
            .collect();
        let artifact = ArtifactRecord::named("myapp-feature-x", "default/myapp-feature-x");
        assert_eq!(classify(&snapshots, &artifact), Verdict::Keep);
    }

    #[test]
    fn test_named_truncated_match() {
        let long = format!("feature/{}", "a".repeat(70));
        let snapshots: SnapshotSet = [snapshot("acme/myapp", &[long.as_str()], &[])]
            .into_iter()
            .collect();
        let name = naming::derive_name("myapp", &Identity::Branch(long.clone()));
        let artifact = ArtifactRecord::named(name.clone(), format!("default/{}", name));
        assert_eq!(classify(&snapshots, &artifact), Verdict::Keep);
    }

    #[test]
    fn test_mixed_case_repository_matches_lowercase_release() {
        let snapshots = single(snapshot("acme/MyApp", &["main"], &[]));
        let artifact = ArtifactRecord::named("myapp-main", "default/myapp-main");
        assert_eq!(classify(&snapshots, &artifact), Verdict::Keep);
    }

    #[test]
    fn test_pull_request_number_must_match_exactly() {
        let snapshots = single(snapshot("acme/myapp", &[], &[4]));
        let artifact = ArtifactRecord::named("myapp-pr-42", "default/myapp-pr-42");
        assert_eq!(classify(&snapshots, &artifact), Verdict::Orphan);
    }

    #[test]
    fn test_tagged_without_branch_is_orphan() {
        let snapshots = single(snapshot("acme/site", &["main"], &[]));
        let artifact =
            ArtifactRecord::tagged("index.html", "acme-site/index.html", "site", None);
        assert_eq!(classify(&snapshots, &artifact), Verdict::Orphan);
    }

    #[test]
    fn test_tagged_ignores_pull_requests() {
        let snapshots = single(snapshot("acme/site", &["main"], &[7]));
        let artifact = ArtifactRecord::tagged(
            "pr-7/index.html",
            "acme-site/pr-7/index.html",
            "site",
            Some("pr-7".to_string()),
        );
        assert_eq!(classify(&snapshots, &artifact), Verdict::Orphan);
    }

    #[test]
    fn test_tagged_unknown_repository_is_ignored() {
        let snapshots = single(snapshot("acme/site", &["main"], &[]));
        let artifact = ArtifactRecord::tagged(
            "main/index.html",
            "acme-other/main/index.html",
            "other",
            Some("gone".to_string()),
        );
        assert_eq!(classify(&snapshots, &artifact), Verdict::Ignored);
    }
}
